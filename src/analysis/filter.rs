//! Member search and lookup.

use crate::models::{Member, MentalStatus};

/// Criteria for the members listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberFilter {
    /// Case-insensitive text matched against full name and email.
    pub search: Option<String>,
    /// Exact mental status to keep.
    pub status: Option<MentalStatus>,
}

impl MemberFilter {
    pub fn matches(&self, member: &Member) -> bool {
        let matches_search = match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(text) => {
                let needle = text.to_lowercase();
                member.full_name.to_lowercase().contains(&needle)
                    || member.email.to_lowercase().contains(&needle)
            }
        };

        let matches_status = self
            .status
            .is_none_or(|status| member.mental_status == status);

        matches_search && matches_status
    }
}

/// Members matching `filter`, in input order.
pub fn filter_members<'a>(members: &'a [Member], filter: &MemberFilter) -> Vec<&'a Member> {
    members.iter().filter(|m| filter.matches(m)).collect()
}

/// Find a member by email or numeric id.
pub fn find_member<'a>(members: &'a [Member], key: &str) -> Option<&'a Member> {
    members.iter().find(|m| m.matches_key(key))
}
