//! Dashboard report assembly.
//!
//! Gathers every statistic the admin dashboard shows into one
//! serializable value, so the Markdown and JSON renderers never compute.

use crate::analysis::{
    attention_members, blood_pressure_distribution, bmi_distribution, distribution_by_age_bucket,
    distribution_by_gender, mental_distribution, recent_activity, registrations_by_month,
    ActivityItem, AgeDistribution, AttentionEntry, Distribution, GenderDistribution,
    HealthSummary, MonthlyRegistrations,
};
use crate::models::{BloodPressureCategory, BmiCategory, Member, MentalStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// Options controlling what goes into a dashboard report.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Where the members came from (store path, "sample", ...).
    pub source: String,
    /// Whether the built-in sample collection was used.
    pub sample_data: bool,
    /// How many recent members to list.
    pub recent_count: usize,
    /// How many months the registration trend covers, ending with the report month.
    pub trend_months: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            source: String::new(),
            sample_data: false,
            recent_count: 3,
            trend_months: 6,
        }
    }
}

/// Metadata about the report.
#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub source: String,
    pub sample_data: bool,
    pub total_members: usize,
}

/// Counts per category together with their rounded percentages.
#[derive(Debug, Clone, Serialize)]
#[serde(bound = "K: fmt::Display")]
pub struct Breakdown<K> {
    pub counts: Distribution<K>,
    pub percentages: Distribution<K>,
}

impl<K: Copy + PartialEq> Breakdown<K> {
    fn new(counts: Distribution<K>) -> Self {
        let percentages = counts.percentages();
        Self {
            counts,
            percentages,
        }
    }
}

/// Everything shown on the admin dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardReport<'a> {
    pub metadata: ReportMetadata,
    pub summary: HealthSummary,
    pub gender: GenderDistribution,
    pub age_buckets: AgeDistribution,
    pub registrations: MonthlyRegistrations,
    pub bmi: Breakdown<BmiCategory>,
    pub blood_pressure: Breakdown<BloodPressureCategory>,
    pub mental: Breakdown<MentalStatus>,
    pub recent_activity: Vec<ActivityItem<'a>>,
    pub attention: Vec<AttentionEntry<'a>>,
}

impl<'a> DashboardReport<'a> {
    pub fn build(
        members: &'a [Member],
        options: &ReportOptions,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            metadata: ReportMetadata {
                generated_at,
                source: options.source.clone(),
                sample_data: options.sample_data,
                total_members: members.len(),
            },
            summary: HealthSummary::from_members(members),
            gender: distribution_by_gender(members),
            age_buckets: distribution_by_age_bucket(members),
            registrations: registrations_by_month(
                members,
                generated_at.date_naive(),
                options.trend_months,
            ),
            bmi: Breakdown::new(bmi_distribution(members)),
            blood_pressure: Breakdown::new(blood_pressure_distribution(members)),
            mental: Breakdown::new(mental_distribution(members)),
            recent_activity: recent_activity(members, options.recent_count),
            attention: attention_members(members),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.summary.is_empty()
    }
}
