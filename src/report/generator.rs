//! Markdown dashboard generation.
//!
//! Renders a [`DashboardReport`] as a Markdown document, plus the member
//! listing and detail views used by the `members` and `show` commands.

use super::dashboard::{Breakdown, DashboardReport, ReportMetadata};
use crate::analysis::{
    classify_blood_pressure, classify_bmi, classify_water_intake, concerns_for, HealthSummary,
    WATER_TARGET_GLASSES,
};
use crate::models::{Member, MentalStatus};
use anyhow::Result;
use std::fmt;

/// Placeholder for statistics that have no value on an empty dashboard.
const NO_VALUE: &str = "-";

/// Generate a complete Markdown dashboard.
pub fn generate_markdown_report(report: &DashboardReport<'_>) -> String {
    let mut output = String::new();

    output.push_str("# Hidup Sehat Admin Dashboard\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));

    if report.is_empty() {
        output.push_str(&generate_empty_section());
        output.push_str(&generate_footer());
        return output;
    }

    output.push_str(&generate_overview_section(&report.summary));
    output.push_str(&generate_demographics_section(report));
    output.push_str(&generate_registrations_section(report));
    output.push_str(&generate_health_section(report));
    output.push_str(&generate_mental_section(report));
    output.push_str(&generate_activity_section(report));
    output.push_str(&generate_attention_section(report));
    output.push_str(&generate_footer());

    output
}

/// Generate a JSON dashboard.
pub fn generate_json_report(report: &DashboardReport<'_>) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    if !metadata.source.is_empty() {
        section.push_str(&format!("- **Source:** `{}`\n", metadata.source));
    }
    if metadata.sample_data {
        section.push_str("- **Data:** sample members (store is empty)\n");
    }
    section.push_str(&format!("- **Members:** {}\n", metadata.total_members));
    section.push('\n');

    section
}

/// Zero-state dashboard shown when there are no members.
fn generate_empty_section() -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("No member data yet. Members appear here once they register.\n\n");
    section.push_str("| Members | Average Age | Normal BMI | Need Mental Attention |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!("| 0 | {} | 0% | 0 |\n\n", NO_VALUE));

    section
}

fn generate_overview_section(summary: &HealthSummary) -> String {
    let mut section = String::new();

    section.push_str("## Overview\n\n");
    section.push_str("| Members | Average Age | Average BMI | Normal BMI | Need Mental Attention |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {:.0} | {:.1} | {}% | {} |\n\n",
        summary.total_members,
        summary.average_age,
        summary.average_bmi,
        summary.bmi_normal_pct,
        summary.mental_attention
    ));

    section.push_str("### Health Indicators\n\n");
    section.push_str("| Indicator | Share of Members |\n");
    section.push_str("|:---|:---:|\n");
    section.push_str(&format!("| Normal BMI | {}% |\n", summary.bmi_normal_pct));
    section.push_str(&format!(
        "| Normal blood pressure | {}% |\n",
        summary.bp_normal_pct
    ));
    section.push_str(&format!("| Good mental health | {}% |\n", summary.mental_good_pct));
    section.push_str(&format!(
        "| Water intake ≥ {} glasses | {}% |\n\n",
        WATER_TARGET_GLASSES, summary.water_optimal_pct
    ));

    section
}

fn generate_demographics_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Demographics\n\n");

    section.push_str("### Gender\n\n");
    section.push_str("| Male | Female | Total |\n");
    section.push_str("|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} |\n\n",
        report.gender.male,
        report.gender.female,
        report.gender.total()
    ));

    section.push_str("### Age\n\n");
    section.push_str("| Age | Members |\n");
    section.push_str("|:---|:---:|\n");
    for (bucket, count) in report.age_buckets.iter() {
        section.push_str(&format!("| {} | {} |\n", bucket, count));
    }
    section.push('\n');

    section
}

fn generate_registrations_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Registrations\n\n");
    section.push_str("| Month | New Members |\n");
    section.push_str("|:---|:---:|\n");
    for (month, count) in report.registrations.iter() {
        section.push_str(&format!("| {} | {} |\n", month, count));
    }
    section.push('\n');

    section
}

fn breakdown_table<K>(title: &str, breakdown: &Breakdown<K>, emoji: fn(&K) -> &'static str) -> String
where
    K: Copy + PartialEq + fmt::Display,
{
    let mut table = String::new();

    table.push_str(&format!("### {}\n\n", title));
    table.push_str("| Category | Members | Share |\n");
    table.push_str("|:---|:---:|:---:|\n");
    for ((key, count), (_, pct)) in breakdown.counts.iter().zip(breakdown.percentages.iter()) {
        table.push_str(&format!(
            "| {} {} | {} | {}% |\n",
            emoji(&key),
            key,
            count,
            pct
        ));
    }
    table.push('\n');

    table
}

fn generate_health_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Health Data\n\n");
    section.push_str(&breakdown_table("BMI", &report.bmi, |k| k.emoji()));
    section.push_str(&breakdown_table(
        "Blood Pressure",
        &report.blood_pressure,
        |k| k.emoji(),
    ));

    section
}

fn generate_mental_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Mental Health\n\n");
    section.push_str(&format!(
        "**{}** need help, **{}** need attention, **{}** doing well.\n\n",
        report.mental.counts.count(MentalStatus::NeedsHelp),
        report.mental.counts.count(MentalStatus::NeedsAttention),
        report.mental.counts.count(MentalStatus::Good)
    ));
    section.push_str(&breakdown_table("Status", &report.mental, |k| k.emoji()));

    section
}

fn generate_activity_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Recent Activity\n\n");

    for item in &report.recent_activity {
        section.push_str(&format!(
            "- {} {} *({})*\n",
            item.activity.emoji(),
            item.text,
            item.member.registration_date
        ));
    }
    section.push('\n');

    section
}

fn generate_attention_section(report: &DashboardReport<'_>) -> String {
    let mut section = String::new();

    section.push_str("## Members Needing Attention\n\n");

    if report.attention.is_empty() {
        section.push_str("No members need follow-up right now. 🎉\n\n");
        return section;
    }

    section.push_str("| Member | Age | BMI | Blood Pressure | Mental | Concerns |\n");
    section.push_str("|:---|:---:|:---:|:---:|:---|:---|\n");

    for entry in &report.attention {
        let m = entry.member;
        let concerns: Vec<String> = entry.concerns.iter().map(|c| c.to_string()).collect();
        section.push_str(&format!(
            "| {} <{}> | {} | {} | {} | {} {} | {} |\n",
            m.full_name,
            m.display_key(),
            m.age,
            m.bmi,
            m.blood_pressure,
            m.mental_status.emoji(),
            m.mental_status,
            concerns.join(", ")
        ));
    }
    section.push('\n');

    section
}

fn generate_footer() -> String {
    "---\n\n*Generated by sehat-admin*\n".to_string()
}

/// Render the members listing as a Markdown table.
pub fn members_table_markdown(members: &[&Member]) -> String {
    if members.is_empty() {
        return "No members match.\n".to_string();
    }

    let mut table = String::new();

    table.push_str("| Member | Age | Gender | BMI | Blood Pressure | Water | Mental | Registered |\n");
    table.push_str("|:---|:---:|:---|:---|:---|:---|:---|:---:|\n");

    for m in members {
        table.push_str(&format!(
            "| {} <{}> | {} | {} | {} ({}) | {} ({}) | {} glasses ({}) | {} {} | {} |\n",
            m.full_name,
            m.display_key(),
            m.age,
            m.gender,
            m.bmi,
            classify_bmi(m.bmi),
            m.blood_pressure,
            classify_blood_pressure(m.blood_pressure),
            m.water_intake,
            classify_water_intake(m.water_intake),
            m.mental_status.emoji(),
            m.mental_status,
            m.registration_date
        ));
    }

    table.push_str(&format!("\n{} member(s)\n", members.len()));
    table
}

/// Render the detail view for a single member.
pub fn member_detail(member: &Member) -> String {
    let mut detail = String::new();

    detail.push_str(&format!("## {}\n\n", member.full_name));
    detail.push_str(&format!("- **Key:** {}\n", member.display_key()));
    detail.push_str(&format!("- **Age:** {} years\n", member.age));
    detail.push_str(&format!("- **Gender:** {}\n", member.gender));
    detail.push_str(&format!(
        "- **Phone:** {}\n",
        member.phone.as_deref().unwrap_or("none")
    ));

    detail.push_str("\n### Health\n\n");
    detail.push_str(&format!(
        "- **BMI:** {} ({})\n",
        member.bmi,
        classify_bmi(member.bmi)
    ));
    detail.push_str(&format!(
        "- **Blood Pressure:** {} ({})\n",
        member.blood_pressure,
        classify_blood_pressure(member.blood_pressure)
    ));
    detail.push_str(&format!(
        "- **Water:** {} glasses/day ({})\n",
        member.water_intake,
        classify_water_intake(member.water_intake)
    ));
    detail.push_str(&format!("- **Mental Status:** {}\n", member.mental_status));
    if let Some(notes) = member.health_notes.as_deref() {
        detail.push_str(&format!("- **Notes:** {}\n", notes));
    }

    let concerns = concerns_for(member);
    if !concerns.is_empty() {
        let concerns: Vec<String> = concerns.iter().map(|c| c.to_string()).collect();
        detail.push_str(&format!("- **Concerns:** {}\n", concerns.join(", ")));
    }

    detail.push_str(&format!("\nJoined: {}\n", member.registration_date));
    detail.push_str(&format!("Last update: {}\n", member.last_updated()));

    detail
}
