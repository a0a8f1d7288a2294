//! Persistence for the catalogue.

use std::collections::BTreeMap;

use crate::record::{FontGroup, FontId, FontRecord, GroupId};

/// Storage for fonts and groups.
///
/// The catalogue validates every request before making a single call that
/// mutates the store; making that call atomic is the store's concern.
pub trait CatalogStore {
    /// Allocate an identity that has never been handed out before.
    fn next_font_id(&mut self) -> Result<FontId, StoreError>;

    /// Allocate a group identity that has never been handed out before.
    fn next_group_id(&mut self) -> Result<GroupId, StoreError>;

    fn insert_font(&mut self, record: FontRecord) -> Result<(), StoreError>;

    fn font(&self, id: FontId) -> Result<Option<FontRecord>, StoreError>;

    /// All fonts, in registration order.
    fn fonts(&self) -> Result<Vec<FontRecord>, StoreError>;

    /// Remove a font, returning it if it was present.
    fn remove_font(&mut self, id: FontId) -> Result<Option<FontRecord>, StoreError>;

    fn insert_group(&mut self, group: FontGroup) -> Result<(), StoreError>;

    fn group(&self, id: GroupId) -> Result<Option<FontGroup>, StoreError>;

    /// All groups, in creation order.
    fn groups(&self) -> Result<Vec<FontGroup>, StoreError>;

    /// Replace the members of a group, returning the updated group if it exists.
    fn replace_members(
        &mut self,
        id: GroupId,
        members: Vec<FontId>,
    ) -> Result<Option<FontGroup>, StoreError>;

    /// Remove a group, returning it if it was present.
    fn remove_group(&mut self, id: GroupId) -> Result<Option<FontGroup>, StoreError>;
}

/// An error reported by a [`CatalogStore`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The identity space is used up.
    IdsExhausted,
    /// A record with this identity already exists.
    DuplicateFont(FontId),
    DuplicateGroup(GroupId),
    /// The backing store failed; the message comes from the backend.
    Backend(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::IdsExhausted => write!(f, "no identities left to allocate"),
            StoreError::DuplicateFont(id) => write!(f, "{id} is already stored"),
            StoreError::DuplicateGroup(id) => write!(f, "{id} is already stored"),
            StoreError::Backend(msg) => write!(f, "store failure: '{msg}'"),
        }
    }
}

impl std::error::Error for StoreError {}

/// A [`CatalogStore`] that keeps everything in memory.
///
/// Identities come from counters that only ever increase, so ids of deleted
/// fonts and groups are never reused.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    next_font: u64,
    next_group: u64,
    fonts: BTreeMap<FontId, FontRecord>,
    groups: BTreeMap<GroupId, FontGroup>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn bump(counter: &mut u64) -> Result<u64, StoreError> {
    let id = *counter;
    *counter = id.checked_add(1).ok_or(StoreError::IdsExhausted)?;
    Ok(id)
}

impl CatalogStore for MemoryStore {
    fn next_font_id(&mut self) -> Result<FontId, StoreError> {
        bump(&mut self.next_font).map(FontId::new)
    }

    fn next_group_id(&mut self) -> Result<GroupId, StoreError> {
        bump(&mut self.next_group).map(GroupId::new)
    }

    fn insert_font(&mut self, record: FontRecord) -> Result<(), StoreError> {
        if self.fonts.contains_key(&record.identity) {
            return Err(StoreError::DuplicateFont(record.identity));
        }
        self.fonts.insert(record.identity, record);
        Ok(())
    }

    fn font(&self, id: FontId) -> Result<Option<FontRecord>, StoreError> {
        Ok(self.fonts.get(&id).cloned())
    }

    fn fonts(&self) -> Result<Vec<FontRecord>, StoreError> {
        Ok(self.fonts.values().cloned().collect())
    }

    fn remove_font(&mut self, id: FontId) -> Result<Option<FontRecord>, StoreError> {
        Ok(self.fonts.remove(&id))
    }

    fn insert_group(&mut self, group: FontGroup) -> Result<(), StoreError> {
        if self.groups.contains_key(&group.identity) {
            return Err(StoreError::DuplicateGroup(group.identity));
        }
        self.groups.insert(group.identity, group);
        Ok(())
    }

    fn group(&self, id: GroupId) -> Result<Option<FontGroup>, StoreError> {
        Ok(self.groups.get(&id).cloned())
    }

    fn groups(&self) -> Result<Vec<FontGroup>, StoreError> {
        Ok(self.groups.values().cloned().collect())
    }

    fn replace_members(
        &mut self,
        id: GroupId,
        members: Vec<FontId>,
    ) -> Result<Option<FontGroup>, StoreError> {
        Ok(self.groups.get_mut(&id).map(|group| {
            group.members = members;
            group.clone()
        }))
    }

    fn remove_group(&mut self, id: GroupId) -> Result<Option<FontGroup>, StoreError> {
        Ok(self.groups.remove(&id))
    }
}
