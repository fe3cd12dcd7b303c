//! Member health statistics.
//!
//! Pure functions over a slice of members: averages, percentage rollups,
//! classification thresholds and categorical distributions. Nothing here
//! performs I/O or mutates its input.

use crate::models::{
    BloodPressure, BloodPressureCategory, BmiCategory, Gender, Member, MentalStatus, WaterStatus,
};
use chrono::{Datelike, NaiveDate};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::fmt;
use thiserror::Error;

/// Glasses of water per day considered optimal.
pub const WATER_TARGET_GLASSES: u32 = 8;

/// Errors raised by statistics that have no meaningful value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StatsError {
    /// The statistic is undefined for an empty member collection.
    #[error("cannot compute {0} of an empty member collection")]
    EmptyInput(&'static str),
}

/// Mean age of the members.
pub fn average_age(members: &[Member]) -> Result<f64, StatsError> {
    if members.is_empty() {
        return Err(StatsError::EmptyInput("average age"));
    }

    let total: u64 = members.iter().map(|m| u64::from(m.age)).sum();
    Ok(total as f64 / members.len() as f64)
}

/// Mean BMI of the members, rounded to one decimal.
pub fn average_bmi(members: &[Member]) -> Result<f64, StatsError> {
    if members.is_empty() {
        return Err(StatsError::EmptyInput("average BMI"));
    }

    let total: f64 = members.iter().map(|m| m.bmi).sum();
    Ok((total / members.len() as f64 * 10.0).round() / 10.0)
}

/// Rounded share of `count` in `total`, as a whole percentage. Zero when `total` is zero.
pub fn percent(count: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }

    let pct = (count as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}

/// Percentage of members satisfying `predicate`, rounded to the nearest integer.
///
/// Returns 0 for an empty collection.
pub fn percentage_in_range<F>(members: &[Member], predicate: F) -> u8
where
    F: Fn(&Member) -> bool,
{
    let matching = members.iter().filter(|m| predicate(*m)).count();
    percent(matching, members.len())
}

/// Classify a BMI value.
///
/// Every input maps to exactly one category; NaN compares false against
/// every threshold and lands in `Obese`.
pub fn classify_bmi(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// Classify a blood pressure reading.
pub fn classify_blood_pressure(bp: BloodPressure) -> BloodPressureCategory {
    if bp.systolic < 120 && bp.diastolic < 80 {
        BloodPressureCategory::Normal
    } else if bp.systolic < 140 && bp.diastolic < 90 {
        BloodPressureCategory::PreHypertension
    } else {
        BloodPressureCategory::Hypertensive
    }
}

/// Classify a daily water intake in glasses.
pub fn classify_water_intake(glasses: u32) -> WaterStatus {
    if glasses >= WATER_TARGET_GLASSES {
        WaterStatus::Optimal
    } else if glasses >= 5 {
        WaterStatus::Moderate
    } else {
        WaterStatus::Low
    }
}

/// Member counts per gender.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GenderDistribution {
    pub male: usize,
    pub female: usize,
}

impl GenderDistribution {
    pub fn total(&self) -> usize {
        self.male + self.female
    }
}

/// Count members by gender.
pub fn distribution_by_gender(members: &[Member]) -> GenderDistribution {
    let mut dist = GenderDistribution::default();

    for member in members {
        match member.gender {
            Gender::Male => dist.male += 1,
            Gender::Female => dist.female += 1,
        }
    }

    dist
}

/// Age bucket used by the demographics chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeBucket {
    From18To25,
    From26To35,
    From36To45,
    From46To55,
    From56,
}

impl AgeBucket {
    /// Buckets in display order.
    pub const ALL: [AgeBucket; 5] = [
        AgeBucket::From18To25,
        AgeBucket::From26To35,
        AgeBucket::From36To45,
        AgeBucket::From46To55,
        AgeBucket::From56,
    ];

    /// Inclusive upper bound, `None` for the open-ended bucket.
    fn upper_bound(&self) -> Option<u32> {
        match self {
            AgeBucket::From18To25 => Some(25),
            AgeBucket::From26To35 => Some(35),
            AgeBucket::From36To45 => Some(45),
            AgeBucket::From46To55 => Some(55),
            AgeBucket::From56 => None,
        }
    }

    /// The first bucket (in order) that admits `age`. Ages under 18 go to the lowest bucket.
    pub fn for_age(age: u32) -> AgeBucket {
        Self::ALL
            .into_iter()
            .find(|bucket| bucket.upper_bound().is_none_or(|max| age <= max))
            .unwrap_or(AgeBucket::From56)
    }

    pub fn label(&self) -> &'static str {
        match self {
            AgeBucket::From18To25 => "18-25",
            AgeBucket::From26To35 => "26-35",
            AgeBucket::From36To45 => "36-45",
            AgeBucket::From46To55 => "46-55",
            AgeBucket::From56 => "56+",
        }
    }
}

impl fmt::Display for AgeBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Ordered counts over a fixed set of categories.
///
/// Serializes as a map keyed by the category's display form, in category order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution<K> {
    entries: Vec<(K, usize)>,
}

impl<K: Copy + PartialEq> Distribution<K> {
    /// An all-zero distribution over `keys`, in the given order.
    pub fn zeroed(keys: &[K]) -> Self {
        Self {
            entries: keys.iter().map(|k| (*k, 0)).collect(),
        }
    }

    /// Count every item of `items` under the key chosen by `key_of`.
    pub fn tally<T, F>(keys: &[K], items: &[T], key_of: F) -> Self
    where
        F: Fn(&T) -> K,
    {
        let mut dist = Self::zeroed(keys);
        for item in items {
            dist.increment(key_of(item));
        }
        dist
    }

    fn increment(&mut self, key: K) {
        if let Some(entry) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            entry.1 += 1;
        }
    }

    pub fn count(&self, key: K) -> usize {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, usize)> + '_ {
        self.entries.iter().copied()
    }

    /// Per-category share of the total, each rounded independently.
    pub fn percentages(&self) -> Distribution<K> {
        let total = self.total();
        Distribution {
            entries: self
                .entries
                .iter()
                .map(|(k, count)| (*k, usize::from(percent(*count, total))))
                .collect(),
        }
    }
}

impl<K: fmt::Display> Serialize for Distribution<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, count) in &self.entries {
            map.serialize_entry(&key.to_string(), count)?;
        }
        map.end()
    }
}

pub type AgeDistribution = Distribution<AgeBucket>;

/// Count members per age bucket. Each member lands in exactly one bucket.
pub fn distribution_by_age_bucket(members: &[Member]) -> AgeDistribution {
    Distribution::tally(&AgeBucket::ALL, members, |m| AgeBucket::for_age(m.age))
}

/// Count members per BMI category.
pub fn bmi_distribution(members: &[Member]) -> Distribution<BmiCategory> {
    Distribution::tally(&BmiCategory::ALL, members, |m| classify_bmi(m.bmi))
}

/// Count members per blood pressure category.
pub fn blood_pressure_distribution(members: &[Member]) -> Distribution<BloodPressureCategory> {
    Distribution::tally(&BloodPressureCategory::ALL, members, |m| {
        classify_blood_pressure(m.blood_pressure)
    })
}

/// Count members per mental status.
pub fn mental_distribution(members: &[Member]) -> Distribution<MentalStatus> {
    Distribution::tally(&MentalStatus::ALL, members, |m| m.mental_status)
}

/// Number of members whose mental status needs attention or help.
pub fn mental_attention_count(members: &[Member]) -> usize {
    members
        .iter()
        .filter(|m| m.mental_status.needs_follow_up())
        .count()
}

/// A calendar month, shown as `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RegistrationMonth {
    pub year: i32,
    pub month: u32,
}

impl RegistrationMonth {
    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    fn months_before(self, n: usize) -> Self {
        let index = i64::from(self.year) * 12 + i64::from(self.month) - 1 - n as i64;
        Self {
            year: index.div_euclid(12) as i32,
            month: (index.rem_euclid(12) + 1) as u32,
        }
    }
}

impl fmt::Display for RegistrationMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

pub type MonthlyRegistrations = Distribution<RegistrationMonth>;

/// Registrations per month over the last `months` calendar months, ending
/// with the month of `today`, oldest first.
///
/// Months without registrations count zero. Registrations outside the
/// window are not counted.
pub fn registrations_by_month(
    members: &[Member],
    today: NaiveDate,
    months: usize,
) -> MonthlyRegistrations {
    let current = RegistrationMonth::of(today);
    let window: Vec<RegistrationMonth> =
        (0..months).rev().map(|n| current.months_before(n)).collect();

    Distribution::tally(&window, members, |m| {
        RegistrationMonth::of(m.registration_date)
    })
}

/// The `n` most recently registered members, newest first.
///
/// Members registered on the same date keep their input order.
pub fn recent_members(members: &[Member], n: usize) -> Vec<&Member> {
    let mut sorted: Vec<&Member> = members.iter().collect();
    sorted.sort_by(|a, b| b.registration_date.cmp(&a.registration_date));
    sorted.truncate(n);
    sorted
}

/// Headline statistics shown on the dashboard cards.
///
/// Averages are zero for an empty collection; renderers should check
/// `total_members` before showing them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct HealthSummary {
    pub total_members: usize,
    pub average_age: f64,
    pub average_bmi: f64,
    pub bmi_normal_pct: u8,
    pub bp_normal_pct: u8,
    pub mental_good_pct: u8,
    pub water_optimal_pct: u8,
    pub mental_attention: usize,
}

impl HealthSummary {
    /// Creates a summary from a list of members.
    pub fn from_members(members: &[Member]) -> Self {
        Self {
            total_members: members.len(),
            average_age: average_age(members).unwrap_or(0.0),
            average_bmi: average_bmi(members).unwrap_or(0.0),
            bmi_normal_pct: percentage_in_range(members, |m| {
                classify_bmi(m.bmi) == BmiCategory::Normal
            }),
            bp_normal_pct: percentage_in_range(members, |m| {
                classify_blood_pressure(m.blood_pressure) == BloodPressureCategory::Normal
            }),
            mental_good_pct: percentage_in_range(members, |m| {
                m.mental_status == MentalStatus::Good
            }),
            water_optimal_pct: percentage_in_range(members, |m| {
                classify_water_intake(m.water_intake) == WaterStatus::Optimal
            }),
            mental_attention: mental_attention_count(members),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_members == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::member;

    fn ages(values: &[u32]) -> Vec<Member> {
        values
            .iter()
            .enumerate()
            .map(|(i, age)| member(&format!("m{}@test.com", i), *age, "2024-03-15"))
            .collect()
    }

    #[test]
    fn test_average_age() {
        let members = ages(&[20, 30, 41]);
        assert_eq!(average_age(&members), Ok(91.0 / 3.0));
    }

    #[test]
    fn test_average_age_empty_is_error() {
        assert_eq!(
            average_age(&[]),
            Err(StatsError::EmptyInput("average age"))
        );
        assert_eq!(HealthSummary::from_members(&[]).average_age, 0.0);
    }

    #[test]
    fn test_average_bmi_rounds_to_one_decimal() {
        let mut members = ages(&[20, 30, 40]);
        members[0].bmi = 24.5;
        members[1].bmi = 28.7;
        members[2].bmi = 31.2;
        assert_eq!(average_bmi(&members), Ok(28.1));
        assert!(average_bmi(&[]).is_err());
    }

    #[test]
    fn test_percentage_in_range() {
        let members = ages(&[20, 30, 40]);
        assert_eq!(percentage_in_range(&members, |m| m.age >= 30), 67);
        assert_eq!(percentage_in_range(&members, |_| true), 100);
        assert_eq!(percentage_in_range(&members, |_| false), 0);
        assert_eq!(percentage_in_range(&[], |_| true), 0);
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        let members = ages(&[20, 30, 40, 50, 60, 70, 80, 90]);
        // 1 of 8 = 12.5%
        assert_eq!(percentage_in_range(&members, |m| m.age == 20), 13);
    }

    #[test]
    fn test_percentage_always_in_bounds() {
        for size in 1..20u32 {
            let members = ages(&(0..size).map(|i| 18 + i * 3).collect::<Vec<_>>());
            for cutoff in 0..80 {
                let pct = percentage_in_range(&members, |m| m.age < cutoff);
                assert!(pct <= 100);
            }
        }
    }

    #[test]
    fn test_classify_bmi_boundaries() {
        assert_eq!(classify_bmi(18.49), BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5), BmiCategory::Normal);
        assert_eq!(classify_bmi(24.9), BmiCategory::Normal);
        assert_eq!(classify_bmi(25.0), BmiCategory::Overweight);
        assert_eq!(classify_bmi(29.99), BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0), BmiCategory::Obese);
        assert_eq!(classify_bmi(f64::NAN), BmiCategory::Obese);
    }

    #[test]
    fn test_classify_blood_pressure() {
        assert_eq!(
            classify_blood_pressure(BloodPressure::new(119, 79)),
            BloodPressureCategory::Normal
        );
        assert_eq!(
            classify_blood_pressure(BloodPressure::new(139, 89)),
            BloodPressureCategory::PreHypertension
        );
        assert_eq!(
            classify_blood_pressure(BloodPressure::new(140, 90)),
            BloodPressureCategory::Hypertensive
        );
        // Either reading alone can push the category up.
        assert_eq!(
            classify_blood_pressure(BloodPressure::new(110, 85)),
            BloodPressureCategory::PreHypertension
        );
        assert_eq!(
            classify_blood_pressure(BloodPressure::new(150, 70)),
            BloodPressureCategory::Hypertensive
        );
    }

    #[test]
    fn test_classify_water_intake() {
        assert_eq!(classify_water_intake(0), WaterStatus::Low);
        assert_eq!(classify_water_intake(4), WaterStatus::Low);
        assert_eq!(classify_water_intake(5), WaterStatus::Moderate);
        assert_eq!(classify_water_intake(8), WaterStatus::Optimal);
    }

    #[test]
    fn test_distribution_by_gender() {
        let mut members = ages(&[20, 30, 40]);
        members[1].gender = Gender::Female;

        let dist = distribution_by_gender(&members);
        assert_eq!(dist, GenderDistribution { male: 2, female: 1 });
        assert_eq!(dist.total(), members.len());
        assert_eq!(distribution_by_gender(&[]).total(), 0);
    }

    #[test]
    fn test_age_bucket_boundaries() {
        assert_eq!(AgeBucket::for_age(18), AgeBucket::From18To25);
        assert_eq!(AgeBucket::for_age(25), AgeBucket::From18To25);
        assert_eq!(AgeBucket::for_age(26), AgeBucket::From26To35);
        assert_eq!(AgeBucket::for_age(35), AgeBucket::From26To35);
        assert_eq!(AgeBucket::for_age(36), AgeBucket::From36To45);
        assert_eq!(AgeBucket::for_age(55), AgeBucket::From46To55);
        assert_eq!(AgeBucket::for_age(56), AgeBucket::From56);
        assert_eq!(AgeBucket::for_age(90), AgeBucket::From56);
        assert_eq!(AgeBucket::for_age(12), AgeBucket::From18To25);
    }

    #[test]
    fn test_age_buckets_partition_members() {
        let all_ages: Vec<u32> = (0..=100).collect();
        let members = ages(&all_ages);
        let dist = distribution_by_age_bucket(&members);

        assert_eq!(dist.total(), members.len());
        assert_eq!(dist.count(AgeBucket::From26To35), 10);
        assert_eq!(dist.count(AgeBucket::From56), 45);

        let labels: Vec<String> = dist.iter().map(|(b, _)| b.to_string()).collect();
        assert_eq!(labels, vec!["18-25", "26-35", "36-45", "46-55", "56+"]);
    }

    #[test]
    fn test_distribution_serializes_in_order() {
        let dist = distribution_by_age_bucket(&ages(&[20, 60]));
        let json = serde_json::to_string(&dist).unwrap();
        assert_eq!(
            json,
            r#"{"18-25":1,"26-35":0,"36-45":0,"46-55":0,"56+":1}"#
        );
    }

    #[test]
    fn test_bmi_distribution_percentages() {
        let mut members = ages(&[20, 30, 40]);
        members[0].bmi = 17.0;
        members[1].bmi = 22.0;
        members[2].bmi = 22.0;

        let pct = bmi_distribution(&members).percentages();
        assert_eq!(pct.count(BmiCategory::Underweight), 33);
        assert_eq!(pct.count(BmiCategory::Normal), 67);
        assert_eq!(pct.count(BmiCategory::Obese), 0);

        let empty = bmi_distribution(&[]).percentages();
        assert_eq!(empty.total(), 0);
    }

    #[test]
    fn test_mental_attention_count() {
        let mut members = ages(&[20, 30, 40, 50]);
        members[1].mental_status = MentalStatus::NeedsAttention;
        members[2].mental_status = MentalStatus::NeedsHelp;

        assert_eq!(mental_attention_count(&members), 2);
        let dist = mental_distribution(&members);
        assert_eq!(dist.count(MentalStatus::Good), 2);
        assert_eq!(dist.total(), 4);
    }

    fn date(raw: &str) -> NaiveDate {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_registrations_by_month_zero_fills() {
        let members = vec![
            member("a@x.com", 30, "2024-11-02"),
            member("b@x.com", 30, "2024-11-20"),
            member("c@x.com", 30, "2024-09-15"),
            member("d@x.com", 30, "2024-03-01"),
            member("e@x.com", 30, "2024-12-01"),
        ];

        let trend = registrations_by_month(&members, date("2024-11-25"), 6);
        let months: Vec<(String, usize)> = trend
            .iter()
            .map(|(month, count)| (month.to_string(), count))
            .collect();
        assert_eq!(
            months,
            vec![
                ("2024-06".to_string(), 0),
                ("2024-07".to_string(), 0),
                ("2024-08".to_string(), 0),
                ("2024-09".to_string(), 1),
                ("2024-10".to_string(), 0),
                ("2024-11".to_string(), 2),
            ]
        );
        assert_eq!(trend.total(), 3);
    }

    #[test]
    fn test_registrations_by_month_crosses_year() {
        let members = vec![
            member("a@x.com", 30, "2024-12-31"),
            member("b@x.com", 30, "2025-01-01"),
        ];

        let trend = registrations_by_month(&members, date("2025-02-10"), 4);
        let months: Vec<String> = trend.iter().map(|(month, _)| month.to_string()).collect();
        assert_eq!(months, vec!["2024-11", "2024-12", "2025-01", "2025-02"]);
        assert_eq!(
            trend.count(RegistrationMonth {
                year: 2024,
                month: 12
            }),
            1
        );
        assert_eq!(trend.total(), 2);
    }

    #[test]
    fn test_registrations_by_month_empty_window() {
        let members = vec![member("a@x.com", 30, "2024-11-02")];
        let trend = registrations_by_month(&members, date("2024-11-25"), 0);
        assert_eq!(trend.iter().count(), 0);
        assert_eq!(trend.total(), 0);

        let trend = registrations_by_month(&[], date("2024-11-25"), 6);
        assert_eq!(trend.iter().count(), 6);
        assert_eq!(trend.total(), 0);
    }

    #[test]
    fn test_recent_members_newest_first() {
        let members = vec![
            member("a@test.com", 30, "2024-03-15"),
            member("b@test.com", 30, "2024-03-17"),
            member("c@test.com", 30, "2024-03-16"),
        ];

        let recent: Vec<String> = recent_members(&members, 2)
            .iter()
            .map(|m| m.registration_date.to_string())
            .collect();
        assert_eq!(recent, vec!["2024-03-17", "2024-03-16"]);
    }

    #[test]
    fn test_recent_members_stable_on_ties() {
        let members = vec![
            member("first@test.com", 30, "2024-03-15"),
            member("second@test.com", 30, "2024-03-15"),
            member("newer@test.com", 30, "2024-03-20"),
        ];

        let recent = recent_members(&members, 5);
        assert_eq!(recent.len(), 3);
        assert_eq!(recent[0].email, "newer@test.com");
        assert_eq!(recent[1].email, "first@test.com");
        assert_eq!(recent[2].email, "second@test.com");
        assert!(recent_members(&members, 0).is_empty());
    }

    #[test]
    fn test_health_summary() {
        let mut members = ages(&[20, 30, 40, 50]);
        members[0].bmi = 31.0;
        members[1].blood_pressure = BloodPressure::new(145, 95);
        members[2].mental_status = MentalStatus::NeedsHelp;
        members[3].water_intake = 3;

        let summary = HealthSummary::from_members(&members);
        assert_eq!(summary.total_members, 4);
        assert_eq!(summary.average_age, 35.0);
        assert_eq!(summary.bmi_normal_pct, 75);
        assert_eq!(summary.bp_normal_pct, 75);
        assert_eq!(summary.mental_good_pct, 75);
        assert_eq!(summary.water_optimal_pct, 75);
        assert_eq!(summary.mental_attention, 1);
        assert!(!summary.is_empty());
    }
}
