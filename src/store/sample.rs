use crate::models::{BloodPressure, Gender, Member, MentalStatus};
use chrono::NaiveDate;

struct SampleRow {
    id: u64,
    name: &'static str,
    email: &'static str,
    gender: Gender,
    age: u32,
    phone: &'static str,
    registered: (i32, u32, u32),
    bmi: f64,
    bp: (u32, u32),
    water: u32,
    mental: MentalStatus,
}

const SAMPLE_ROWS: [SampleRow; 5] = [
    SampleRow {
        id: 1,
        name: "Budi Santoso",
        email: "budi@email.com",
        gender: Gender::Male,
        age: 28,
        phone: "081234567890",
        registered: (2024, 3, 15),
        bmi: 24.5,
        bp: (120, 80),
        water: 8,
        mental: MentalStatus::Good,
    },
    SampleRow {
        id: 2,
        name: "Siti Rahayu",
        email: "siti@email.com",
        gender: Gender::Female,
        age: 32,
        phone: "081234567891",
        registered: (2024, 3, 16),
        bmi: 28.7,
        bp: (135, 85),
        water: 6,
        mental: MentalStatus::NeedsAttention,
    },
    SampleRow {
        id: 3,
        name: "Ahmad Wijaya",
        email: "ahmad@email.com",
        gender: Gender::Male,
        age: 45,
        phone: "081234567892",
        registered: (2024, 3, 17),
        bmi: 31.2,
        bp: (145, 95),
        water: 4,
        mental: MentalStatus::NeedsHelp,
    },
    SampleRow {
        id: 4,
        name: "Maya Sari",
        email: "maya@email.com",
        gender: Gender::Female,
        age: 22,
        phone: "081234567893",
        registered: (2024, 3, 18),
        bmi: 18.5,
        bp: (110, 70),
        water: 9,
        mental: MentalStatus::Good,
    },
    SampleRow {
        id: 5,
        name: "Dewi Lestari",
        email: "dewi@email.com",
        gender: Gender::Female,
        age: 58,
        phone: "081234567894",
        registered: (2024, 3, 19),
        bmi: 23.1,
        bp: (118, 76),
        water: 7,
        mental: MentalStatus::Good,
    },
];

/// Built-in demo members used when the store is empty or on `seed`.
pub fn sample_members() -> Vec<Member> {
    SAMPLE_ROWS
        .iter()
        .filter_map(|row| {
            let (y, m, d) = row.registered;
            let registration_date = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Member {
                id: Some(row.id),
                email: row.email.to_string(),
                full_name: row.name.to_string(),
                gender: row.gender,
                age: row.age,
                bmi: row.bmi,
                blood_pressure: BloodPressure::new(row.bp.0, row.bp.1),
                water_intake: row.water,
                mental_status: row.mental,
                registration_date,
                last_update: None,
                phone: Some(row.phone.to_string()),
                health_notes: None,
                extra: Default::default(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_sample_members_are_complete() {
        let members = sample_members();
        assert_eq!(members.len(), SAMPLE_ROWS.len());

        let emails: HashSet<_> = members.iter().map(|m| m.email.as_str()).collect();
        assert_eq!(emails.len(), members.len());
    }
}
