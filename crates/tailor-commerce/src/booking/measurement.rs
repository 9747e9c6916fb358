//! Measurement grids recorded during a fitting.
//!
//! Each garment has a fixed set of measurement keys and every key has two
//! columns, A and B, as on the paper measurement card.

use crate::error::CommerceError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Garment a measurement grid belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Garment {
    /// Coat, safari and waistcoat.
    Coat,
    /// Trousers.
    Pant,
    /// Shirt.
    Shirt,
}

impl Garment {
    pub const ALL: [Garment; 3] = [Garment::Coat, Garment::Pant, Garment::Shirt];

    /// Measurement keys accepted for this garment, in card order.
    pub fn keys(&self) -> &'static [&'static str] {
        match self {
            // Length, Chest, Waist, Hips, Shoulder, Back, Sleeve Length, Neck
            Garment::Coat => &["L", "C", "W", "H", "S", "B", "SL", "N"],
            // Length, Waist, Hips, Thigh, HIL, Knee, Bottom
            Garment::Pant => &["L", "W", "H", "T", "HIL", "K", "B"],
            // Length, Chest, Waist, Hips, Shoulder, Sleeve Length, Neck
            Garment::Shirt => &["L", "C", "W", "H", "S", "SL", "N"],
        }
    }

    /// Heading used in printed summaries.
    pub fn title(&self) -> &'static str {
        match self {
            Garment::Coat => "COAT & SAFARI",
            Garment::Pant => "PANT",
            Garment::Shirt => "SHIRT",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Garment::Coat => "coat",
            Garment::Pant => "pant",
            Garment::Shirt => "shirt",
        }
    }
}

/// The A/B pair for one measurement key.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MeasurementCell {
    #[serde(rename = "A", default, skip_serializing_if = "Option::is_none")]
    pub a: Option<String>,
    #[serde(rename = "B", default, skip_serializing_if = "Option::is_none")]
    pub b: Option<String>,
}

impl MeasurementCell {
    pub fn new(a: Option<&str>, b: Option<&str>) -> Self {
        Self {
            a: a.map(str::to_string),
            b: b.map(str::to_string),
        }
    }

    /// Check if neither column holds a value.
    pub fn is_blank(&self) -> bool {
        let blank = |v: &Option<String>| v.as_deref().map_or(true, |s| s.trim().is_empty());
        blank(&self.a) && blank(&self.b)
    }
}

/// Measurement key to A/B values.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct MeasurementGrid(BTreeMap<String, MeasurementCell>);

impl MeasurementGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set one measurement, checking the key against the garment.
    pub fn set(
        &mut self,
        garment: Garment,
        key: &str,
        cell: MeasurementCell,
    ) -> Result<(), CommerceError> {
        let key = key.trim().to_uppercase();
        if !garment.keys().contains(&key.as_str()) {
            return Err(CommerceError::UnknownMeasurement {
                garment: garment.as_str().to_string(),
                key,
            });
        }
        if cell.is_blank() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, cell);
        }
        Ok(())
    }

    /// Look up a measurement.
    pub fn get(&self, key: &str) -> Option<&MeasurementCell> {
        self.0.get(key)
    }

    /// Check every key against the garment.
    pub fn validate(&self, garment: Garment) -> Result<(), CommerceError> {
        match self
            .0
            .keys()
            .find(|k| !garment.keys().contains(&k.as_str()))
        {
            Some(key) => Err(CommerceError::UnknownMeasurement {
                garment: garment.as_str().to_string(),
                key: key.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Check if no measurement has been recorded.
    pub fn is_empty(&self) -> bool {
        self.0.values().all(MeasurementCell::is_blank)
    }

    /// Rows in card order for `garment`, skipping unrecorded keys.
    pub fn rows(&self, garment: Garment) -> Vec<(&'static str, &MeasurementCell)> {
        garment
            .keys()
            .iter()
            .filter_map(|k| self.0.get(*k).map(|cell| (*k, cell)))
            .collect()
    }

    /// Render as summary lines such as `  C: A=40, B=42`.
    pub fn summary(&self, garment: Garment) -> String {
        self.rows(garment)
            .into_iter()
            .map(|(key, cell)| {
                format!(
                    "  {key}: A={}, B={}\n",
                    cell.a.as_deref().unwrap_or("-"),
                    cell.b.as_deref().unwrap_or("-")
                )
            })
            .collect()
    }
}
