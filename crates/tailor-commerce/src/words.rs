//! Amount-in-words transcription for printed bills.
//!
//! Uses the Indian/Nepali grouping: crore (10^7), lakh (10^5), thousand and
//! hundred. Each group count is itself transcribed recursively, so
//! `150_00_00_000` reads "One Hundred and Fifty Crore".

use crate::money::Money;

const CRORE: u64 = 10_000_000;
const LAKH: u64 = 100_000;
const THOUSAND: u64 = 1_000;
const HUNDRED: u64 = 100;

const ONES: [&str; 20] = [
    "",
    "One",
    "Two",
    "Three",
    "Four",
    "Five",
    "Six",
    "Seven",
    "Eight",
    "Nine",
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Transcribe an integer into words.
///
/// ```
/// use tailor_commerce::words::number_to_words;
/// assert_eq!(number_to_words(0), "Zero");
/// assert_eq!(number_to_words(-15), "Minus Fifteen");
/// assert_eq!(number_to_words(1_050), "One Thousand and Fifty");
/// ```
pub fn number_to_words(num: i64) -> String {
    if num == 0 {
        return "Zero".to_string();
    }
    if num < 0 {
        return format!("Minus {}", unsigned_to_words(num.unsigned_abs()));
    }
    unsigned_to_words(num as u64)
}

fn unsigned_to_words(mut num: u64) -> String {
    if num == 0 {
        return "Zero".to_string();
    }

    let mut word = String::new();

    for (unit, name) in [
        (CRORE, "Crore"),
        (LAKH, "Lakh"),
        (THOUSAND, "Thousand"),
        (HUNDRED, "Hundred"),
    ] {
        let count = num / unit;
        if count > 0 {
            word.push_str(&unsigned_to_words(count));
            word.push(' ');
            word.push_str(name);
            word.push(' ');
            num %= unit;
        }
    }

    if num > 0 {
        if !word.is_empty() {
            word.push_str("and ");
        }
        if num < 20 {
            word.push_str(ONES[num as usize]);
        } else {
            word.push_str(TENS[(num / 10) as usize]);
            if num % 10 > 0 {
                word.push(' ');
                word.push_str(ONES[(num % 10) as usize]);
            }
        }
    }

    word.trim().to_string()
}

/// Transcribe a rupee/paisa pair the way the order slip prints it.
///
/// Returns an empty string when both parts are zero.
///
/// ```
/// use tailor_commerce::words::amount_to_words;
/// assert_eq!(amount_to_words(0, 0), "");
/// assert_eq!(
///     amount_to_words(1500, 50),
///     "Rupees One Thousand Five Hundred and Fifty Paisa Only"
/// );
/// ```
pub fn amount_to_words(rupees: i64, paisa: i64) -> String {
    if rupees == 0 && paisa == 0 {
        return String::new();
    }
    let mut result = format!("Rupees {}", number_to_words(rupees));
    if paisa > 0 {
        result.push_str(" and ");
        result.push_str(&number_to_words(paisa));
        result.push_str(" Paisa");
    }
    result.push_str(" Only");
    result
}

/// Transcribe a money value into bill words.
pub fn money_to_words(amount: &Money) -> String {
    amount_to_words(amount.rupees(), amount.paisa())
}
