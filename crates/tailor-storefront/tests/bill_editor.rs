mod common;

use common::{api, booking, url, TOKEN};
use serde_json::json;
use tailor_commerce::{Currency, Money};
use tailor_data::Method;
use tailor_storefront::{BillDate, BillEditor, NoticeLevel, StorefrontError};

fn rupees(rs: i64) -> Money {
    Money::from_parts(rs, 0, Currency::NPR)
}

#[tokio::test]
async fn fresh_bill_is_dated_from_booking_and_recomputes() {
    let (_mock, api) = api();
    let mut editor = BillEditor::open(api, TOKEN, booking(7)).unwrap();
    assert!(!editor.has_saved_bill());
    assert_eq!(
        editor.bill().date_ordered.map(|d| d.to_string()).as_deref(),
        Some("2026-03-14")
    );

    editor.set_qty(1, Some(2.0)).unwrap();
    editor.set_rate(1, Some(rupees(4500))).unwrap();
    editor.set_advance(Some(rupees(3000))).unwrap();

    let bill = editor.bill();
    assert_eq!(bill.total, rupees(9000));
    assert_eq!(bill.balance, rupees(6000));
    assert_eq!(bill.amount_in_words, "Rupees Nine Thousand Only");

    editor.set_advance(Some(rupees(12000))).unwrap();
    assert!(editor.bill().balance.is_zero());
}

#[tokio::test]
async fn unknown_row_is_an_error() {
    let (_mock, api) = api();
    let mut editor = BillEditor::open(api, TOKEN, booking(7)).unwrap();
    let err = editor.set_qty(42, Some(1.0)).unwrap_err();
    assert!(matches!(err, StorefrontError::Commerce(_)));
}

#[tokio::test]
async fn save_then_overwrite_needs_confirmation() {
    let (mock, api) = api();
    let mut editor = BillEditor::open(api, TOKEN, booking(7)).unwrap();
    editor.set_qty(1, Some(2.0)).unwrap();
    editor.set_rate(1, Some(rupees(4500))).unwrap();
    editor.set_advance(Some(rupees(3000))).unwrap();

    let mut saved = booking(7);
    saved.bill_data = Some(editor.bill().clone());
    mock.push_json(200, serde_json::to_value(&saved).unwrap());

    let notice = editor.save(false).await.unwrap();
    assert_eq!(notice.message, "Bill saved successfully");
    assert!(editor.has_saved_bill());

    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::Patch);
    assert_eq!(request.url, url("api/booking/bookings/7/"));
    let body = request.json_body().unwrap();
    assert_eq!(body["bill_data"]["total_rs"], "9000");
    assert_eq!(body["bill_data"]["advance_rs"], "3000");
    assert_eq!(body["bill_data"]["balance_rs"], "6000");
    assert_eq!(body["bill_data"]["amount_in_words"], "Rupees Nine Thousand Only");
    assert_eq!(body["bill_data"]["date_ordered"], "2026-03-14");

    editor.set_date(BillDate::Delivery, chrono::NaiveDate::from_ymd_opt(2026, 3, 28));
    let err = editor.save(false).await.unwrap_err();
    assert!(matches!(err, StorefrontError::OverwriteNotConfirmed));
    assert_eq!(mock.requests().len(), 1);

    mock.push_json(200, serde_json::to_value(&saved).unwrap());
    let notice = editor.save(true).await.unwrap();
    assert_eq!(notice.message, "Bill updated successfully");
    assert_eq!(notice.level, NoticeLevel::Success);
}

#[tokio::test]
async fn saved_bill_reopens_with_its_rows() {
    let (_mock, api) = api();
    let mut stored = booking(9);
    let mut bill = tailor_commerce::bill::BillData::for_booking(&stored);
    bill.set_amount(3, Some(rupees(2500))).unwrap();
    stored.bill_data = Some(bill);

    // Through the wire, as the API would return it.
    let stored: tailor_commerce::booking::Booking =
        serde_json::from_value(serde_json::to_value(&stored).unwrap()).unwrap();
    let editor = BillEditor::open(api, TOKEN, stored).unwrap();
    assert!(editor.has_saved_bill());
    assert_eq!(editor.bill().items.len(), 10);
    assert_eq!(editor.bill().total, rupees(2500));
}

#[tokio::test]
async fn email_and_share_need_a_saved_bill() {
    let (mock, api) = api();
    let editor = BillEditor::open(api, TOKEN, booking(7)).unwrap();

    let err = editor.email().await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "Please save the bill first before sending email."
    );
    let err = editor.share().unwrap_err();
    assert_eq!(
        err.user_message(),
        "Please save the bill first before sharing on WhatsApp."
    );
    assert!(mock.requests().is_empty());

    // Printing works on an unsaved bill.
    assert!(editor.print_html().contains("Order Slip - Bill #20260314-AB12"));
}

#[tokio::test]
async fn email_and_share_a_saved_bill() {
    let (mock, api) = api();
    let mut stored = booking(7);
    let mut bill = tailor_commerce::bill::BillData::for_booking(&stored);
    bill.set_amount(1, Some(rupees(9000))).unwrap();
    stored.bill_data = Some(bill);
    let editor = BillEditor::open(api, TOKEN, stored).unwrap();

    mock.push_json(200, json!({"message": "sent"}));
    let notice = editor.email().await.unwrap();
    assert_eq!(notice.message, "Bill sent to hari@example.com");
    let request = mock.last_request().unwrap();
    assert_eq!(request.method, Method::Post);
    assert_eq!(
        request.url,
        url("api/booking/bookings/7/send_bill_email/")
    );

    let shared = editor.share().unwrap();
    assert_eq!(shared.file_name, "OrderSlip_20260314-AB12.png");
    assert!(shared.whatsapp_link.starts_with("https://wa.me/9779800000000?text="));
    assert!(shared.html.contains("Hari Sharma"));
}

#[tokio::test]
async fn save_failure_is_normalized() {
    let (mock, api) = api();
    let mut editor = BillEditor::open(api, TOKEN, booking(7)).unwrap();
    mock.push_json(403, json!({"detail": "You do not have permission to perform this action."}));

    let err = editor.save(false).await.unwrap_err();
    assert_eq!(
        err.user_message(),
        "You do not have permission to perform this action."
    );
    assert!(!editor.has_saved_bill());
}
