//! Data models for the member admin tool.
//!
//! This module contains the member record as it is stored by the
//! Hidup Sehat dashboards, plus the health categories derived from it.
//! Stored JSON uses camelCase keys and Indonesian labels for the enums;
//! English labels are accepted on input as well.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Gender of a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Laki-laki", alias = "Male", alias = "male", alias = "L")]
    Male,
    #[serde(rename = "Perempuan", alias = "Female", alias = "female", alias = "P")]
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

/// Self-reported mental health status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MentalStatus {
    #[serde(rename = "Baik", alias = "Good", alias = "good")]
    Good,
    #[serde(
        rename = "Perhatian",
        alias = "NeedsAttention",
        alias = "Needs Attention",
        alias = "attention"
    )]
    NeedsAttention,
    #[serde(
        rename = "Butuh Bantuan",
        alias = "NeedsHelp",
        alias = "Needs Help",
        alias = "help"
    )]
    NeedsHelp,
}

impl MentalStatus {
    /// All statuses, from best to worst.
    pub const ALL: [MentalStatus; 3] = [
        MentalStatus::Good,
        MentalStatus::NeedsAttention,
        MentalStatus::NeedsHelp,
    ];

    /// Returns true for statuses that call for a follow-up.
    pub fn needs_follow_up(&self) -> bool {
        !matches!(self, MentalStatus::Good)
    }

    /// Returns an emoji representation of the status.
    pub fn emoji(&self) -> &'static str {
        match self {
            MentalStatus::Good => "🟢",
            MentalStatus::NeedsAttention => "🟡",
            MentalStatus::NeedsHelp => "🔴",
        }
    }
}

impl fmt::Display for MentalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MentalStatus::Good => write!(f, "Good"),
            MentalStatus::NeedsAttention => write!(f, "Needs Attention"),
            MentalStatus::NeedsHelp => write!(f, "Needs Help"),
        }
    }
}

/// A blood pressure reading in mmHg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BloodPressure {
    pub systolic: u32,
    pub diastolic: u32,
}

impl BloodPressure {
    pub fn new(systolic: u32, diastolic: u32) -> Self {
        Self {
            systolic,
            diastolic,
        }
    }
}

impl fmt::Display for BloodPressure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.systolic, self.diastolic)
    }
}

/// BMI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::Normal,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "🔵",
            BmiCategory::Normal => "🟢",
            BmiCategory::Overweight => "🟡",
            BmiCategory::Obese => "🔴",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BmiCategory::Underweight => write!(f, "Underweight"),
            BmiCategory::Normal => write!(f, "Normal"),
            BmiCategory::Overweight => write!(f, "Overweight"),
            BmiCategory::Obese => write!(f, "Obese"),
        }
    }
}

/// Blood pressure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BloodPressureCategory {
    Normal,
    PreHypertension,
    Hypertensive,
}

impl BloodPressureCategory {
    pub const ALL: [BloodPressureCategory; 3] = [
        BloodPressureCategory::Normal,
        BloodPressureCategory::PreHypertension,
        BloodPressureCategory::Hypertensive,
    ];

    pub fn emoji(&self) -> &'static str {
        match self {
            BloodPressureCategory::Normal => "🟢",
            BloodPressureCategory::PreHypertension => "🟡",
            BloodPressureCategory::Hypertensive => "🔴",
        }
    }
}

impl fmt::Display for BloodPressureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BloodPressureCategory::Normal => write!(f, "Normal"),
            BloodPressureCategory::PreHypertension => write!(f, "Pre-hypertension"),
            BloodPressureCategory::Hypertensive => write!(f, "Hypertensive"),
        }
    }
}

/// Daily water intake status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WaterStatus {
    Low,
    Moderate,
    Optimal,
}

impl fmt::Display for WaterStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WaterStatus::Low => write!(f, "Low"),
            WaterStatus::Moderate => write!(f, "Moderate"),
            WaterStatus::Optimal => write!(f, "Optimal"),
        }
    }
}

/// A single member health record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    /// Numeric identity used by some dashboard variants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Email address, the usual unique key.
    #[serde(default)]
    pub email: String,
    pub full_name: String,
    pub gender: Gender,
    pub age: u32,
    pub bmi: f64,
    pub blood_pressure: BloodPressure,
    /// Glasses of water per day.
    #[serde(default)]
    pub water_intake: u32,
    pub mental_status: MentalStatus,
    #[serde(deserialize_with = "deserialize_date")]
    pub registration_date: NaiveDate,
    #[serde(
        default,
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_update: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_notes: Option<String>,
    /// Stored fields this tool does not model (`weight`, `height`, `userId`, ...),
    /// written back unchanged on save.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Parse a stored date.
///
/// Accepts `YYYY-MM-DD`, the `DD/MM/YYYY` form some dashboards write, and
/// ISO datetimes (`2024-11-23T10:00:00.000Z`), of which only the date is kept.
pub fn parse_stored_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%d/%m/%Y"))
        .ok()
        .or_else(|| {
            let (date, time) = raw.split_at_checked(10)?;
            if !time.starts_with(['T', ' ']) {
                return None;
            }
            NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
        })
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_stored_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {:?}", raw)))
}

fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => parse_stored_date(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized date {:?}", raw))),
    }
}

impl Member {
    /// Date of the last profile update, falling back to the registration date.
    pub fn last_updated(&self) -> NaiveDate {
        self.last_update.unwrap_or(self.registration_date)
    }

    /// Returns true if `key` identifies this member, by email
    /// (case-insensitive) or by numeric id.
    pub fn matches_key(&self, key: &str) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }

        if !self.email.is_empty() && self.email.eq_ignore_ascii_case(key) {
            return true;
        }

        match (self.id, key.parse::<u64>()) {
            (Some(id), Ok(wanted)) => id == wanted,
            _ => false,
        }
    }

    /// The identifier shown to the admin: email if present, else `#id`.
    pub fn display_key(&self) -> String {
        if !self.email.is_empty() {
            self.email.clone()
        } else if let Some(id) = self.id {
            format!("#{}", id)
        } else {
            "-".to_string()
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Build a member with sensible defaults for tests.
    pub fn member(email: &str, age: u32, registered: &str) -> Member {
        Member {
            id: None,
            email: email.to_string(),
            full_name: email.split('@').next().unwrap_or(email).to_string(),
            gender: Gender::Male,
            age,
            bmi: 22.0,
            blood_pressure: BloodPressure::new(115, 75),
            water_intake: 8,
            mental_status: MentalStatus::Good,
            registration_date: NaiveDate::parse_from_str(registered, "%Y-%m-%d").unwrap(),
            last_update: None,
            phone: None,
            health_notes: None,
            extra: Map::new(),
        }
    }
}
