//! Members needing follow-up and the recent-activity feed.

use super::aggregator::{classify_bmi, recent_members};
use crate::models::{BmiCategory, Member, MentalStatus};
use serde::Serialize;
use std::fmt;

/// A reason a member shows up on the attention list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Concern {
    Obesity,
    Hypertension,
    MentalHealth,
}

impl fmt::Display for Concern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Concern::Obesity => write!(f, "Obesity"),
            Concern::Hypertension => write!(f, "Hypertension"),
            Concern::MentalHealth => write!(f, "Mental health"),
        }
    }
}

/// The concerns raised by a single member's record.
pub fn concerns_for(member: &Member) -> Vec<Concern> {
    let mut concerns = Vec::new();

    if classify_bmi(member.bmi) == BmiCategory::Obese {
        concerns.push(Concern::Obesity);
    }
    // Only the systolic reading counts here, unlike the full classification.
    if member.blood_pressure.systolic >= 140 {
        concerns.push(Concern::Hypertension);
    }
    if member.mental_status.needs_follow_up() {
        concerns.push(Concern::MentalHealth);
    }

    concerns
}

/// A member on the attention list.
#[derive(Debug, Clone, Serialize)]
pub struct AttentionEntry<'a> {
    pub member: &'a Member,
    pub concerns: Vec<Concern>,
}

/// Members with at least one concern, in input order.
pub fn attention_members(members: &[Member]) -> Vec<AttentionEntry<'_>> {
    members
        .iter()
        .filter_map(|member| {
            let concerns = concerns_for(member);
            if concerns.is_empty() {
                None
            } else {
                Some(AttentionEntry { member, concerns })
            }
        })
        .collect()
}

/// Kind of item in the recent-activity feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Activity {
    MentalHelp,
    HighBmi,
    NewMember,
}

impl Activity {
    /// The feed item for a member. Mental help requests win over a high BMI.
    pub fn for_member(member: &Member) -> Self {
        if member.mental_status == MentalStatus::NeedsHelp {
            Activity::MentalHelp
        } else if classify_bmi(member.bmi) == BmiCategory::Obese {
            Activity::HighBmi
        } else {
            Activity::NewMember
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Activity::MentalHelp => "🧠",
            Activity::HighBmi => "⚠️",
            Activity::NewMember => "👤",
        }
    }

    pub fn describe(&self, member: &Member) -> String {
        match self {
            Activity::MentalHelp => format!("{} needs mental health support", member.full_name),
            Activity::HighBmi => format!("{} has a high BMI", member.full_name),
            Activity::NewMember => format!("New member: {} joined", member.full_name),
        }
    }
}

/// One entry of the recent-activity feed.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem<'a> {
    pub member: &'a Member,
    pub activity: Activity,
    pub text: String,
}

/// Activity items for the `n` most recently registered members.
pub fn recent_activity(members: &[Member], n: usize) -> Vec<ActivityItem<'_>> {
    recent_members(members, n)
        .into_iter()
        .map(|member| {
            let activity = Activity::for_member(member);
            ActivityItem {
                member,
                activity,
                text: activity.describe(member),
            }
        })
        .collect()
}
