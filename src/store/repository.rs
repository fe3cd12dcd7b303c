use super::{sample_members, KeyValueStore, StoreError};
use crate::models::Member;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Key the dashboards store their member list under.
pub const DEFAULT_MEMBERS_KEY: &str = "adminMembersData";

/// What was found under the members key.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadOutcome {
    /// Nothing stored: the key is missing, blank or `null`.
    Absent,
    /// A JSON array. Records that did not parse are counted in `skipped`.
    Loaded { members: Vec<Member>, skipped: usize },
    /// Content is present but is not a JSON array.
    Malformed,
}

impl LoadOutcome {
    /// True when the key holds anything besides an empty array.
    pub fn holds_data(&self) -> bool {
        match self {
            LoadOutcome::Absent => false,
            LoadOutcome::Loaded { members, skipped } => !members.is_empty() || *skipped > 0,
            LoadOutcome::Malformed => true,
        }
    }

    pub fn into_members(self) -> Vec<Member> {
        match self {
            LoadOutcome::Loaded { members, .. } => members,
            LoadOutcome::Absent | LoadOutcome::Malformed => Vec::new(),
        }
    }
}

/// Loads and saves the member collection as one JSON array under a single key.
pub struct MemberRepository<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> MemberRepository<S> {
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Stored text under the key, `None` when missing, blank or `null`.
    fn stored_text(&self) -> Result<Option<String>, StoreError> {
        let Some(raw) = self.store.get(&self.key)? else {
            info!("No member data stored under '{}'", self.key);
            return Ok(None);
        };

        if raw.trim().is_empty() || raw.trim() == "null" {
            return Ok(None);
        }
        Ok(Some(raw))
    }

    /// Inspect the stored members, telling an empty key apart from unreadable content.
    pub fn load_outcome(&self) -> Result<LoadOutcome, StoreError> {
        let Some(raw) = self.stored_text()? else {
            return Ok(LoadOutcome::Absent);
        };

        let records = match serde_json::from_str::<Vec<Value>>(&raw) {
            Ok(records) => records,
            Err(e) => {
                warn!(
                    "Stored member data under '{}' is malformed, treating as empty: {}",
                    self.key, e
                );
                return Ok(LoadOutcome::Malformed);
            }
        };

        let total = records.len();
        let members: Vec<Member> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(member) => Some(member),
                Err(e) => {
                    warn!("Skipping member record {} under '{}': {}", index, self.key, e);
                    None
                }
            })
            .collect();

        let skipped = total - members.len();
        debug!(
            "Loaded {} members from '{}' ({} skipped)",
            members.len(),
            self.key,
            skipped
        );
        Ok(LoadOutcome::Loaded { members, skipped })
    }

    /// Load the stored members.
    ///
    /// A missing key or unreadable content yields an empty collection and
    /// records that do not parse are skipped; only storage access errors
    /// are returned.
    pub fn load(&self) -> Result<Vec<Member>, StoreError> {
        Ok(self.load_outcome()?.into_members())
    }

    /// Load the stored members, or the sample collection when there are none.
    ///
    /// The flag is true when the sample collection was returned.
    pub fn load_or_sample(&self) -> Result<(Vec<Member>, bool), StoreError> {
        let members = self.load()?;
        if members.is_empty() {
            info!("Using sample member data");
            Ok((sample_members(), true))
        } else {
            Ok((members, false))
        }
    }

    /// Replace the stored collection.
    pub fn save(&mut self, members: &[Member]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(members)?;
        self.store.set(&self.key, &json)?;
        info!("Saved {} members under '{}'", members.len(), self.key);
        Ok(())
    }

    /// Delete the member matching `key` (email or id). Returns the removed member.
    ///
    /// Every other stored record is written back exactly as it was read,
    /// including records this tool cannot parse.
    pub fn delete(&mut self, key: &str) -> Result<Option<Member>, StoreError> {
        let Some(raw) = self.stored_text()? else {
            return Ok(None);
        };
        let Ok(mut records) = serde_json::from_str::<Vec<Value>>(&raw) else {
            warn!("Stored member data under '{}' is malformed, nothing deleted", self.key);
            return Ok(None);
        };

        let found = records.iter().enumerate().find_map(|(index, record)| {
            serde_json::from_value::<Member>(record.clone())
                .ok()
                .filter(|member| member.matches_key(key))
                .map(|member| (index, member))
        });
        let Some((index, removed)) = found else {
            return Ok(None);
        };

        records.remove(index);
        let json = serde_json::to_string_pretty(&records)?;
        self.store.set(&self.key, &json)?;
        info!(
            "Deleted {} from '{}', {} records left",
            removed.display_key(),
            self.key,
            records.len()
        );
        Ok(Some(removed))
    }

    /// Write the sample collection. Returns how many members were written.
    pub fn seed_sample(&mut self) -> Result<usize, StoreError> {
        let members = sample_members();
        self.save(&members)?;
        Ok(members.len())
    }
}
