//! Catalogue operations: registering fonts and maintaining groups.

use shelf_read::FontMetadata;

use crate::{
    record::{FontGroup, FontId, FontRecord, GroupId},
    store::{CatalogStore, MemoryStore, StoreError},
    upload::CatalogConfig,
};

/// The smallest number of members a group may be created or updated with.
pub const MIN_GROUP_MEMBERS: usize = 2;

/// A catalogue of fonts and font groups, backed by an injected store.
#[derive(Clone, Debug, Default)]
pub struct FontCatalog<S = MemoryStore> {
    pub(crate) store: S,
    pub(crate) config: CatalogConfig,
}

/// A request the catalogue refuses to carry out.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// Groups need at least two members.
    TooFewMembers { found: usize },
    GroupNotFound(GroupId),
    FontNotFound(FontId),
}

/// An error returned by a catalogue operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    Validation(ValidationError),
    Store(StoreError),
}

impl<S: CatalogStore> FontCatalog<S> {
    /// Create a catalogue with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, CatalogConfig::default())
    }

    pub fn with_config(store: S, config: CatalogConfig) -> Self {
        FontCatalog { store, config }
    }

    pub fn config(&self) -> &CatalogConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Add a parsed font to the catalogue under a fresh identity.
    ///
    /// Registration never deduplicates: the same bytes registered twice
    /// produce two records.
    pub fn register(
        &mut self,
        filename: &str,
        metadata: FontMetadata,
        raw_bytes: &[u8],
    ) -> Result<FontRecord, CatalogError> {
        Ok(self.insert_record(filename, metadata, raw_bytes)?)
    }

    pub(crate) fn insert_record(
        &mut self,
        filename: &str,
        metadata: FontMetadata,
        raw_bytes: &[u8],
    ) -> Result<FontRecord, StoreError> {
        let identity = self.store.next_font_id()?;
        let record = FontRecord::new(identity, filename, metadata, raw_bytes);
        self.store.insert_font(record.clone())?;
        log::debug!("registered '{filename}' as {identity}");
        Ok(record)
    }

    /// Create a group from at least two font identities.
    ///
    /// Members are stored as given; they are not checked against the
    /// registered fonts and may repeat.
    pub fn create_group(&mut self, members: Vec<FontId>) -> Result<FontGroup, CatalogError> {
        check_member_count(&members)?;
        let identity = self.store.next_group_id()?;
        let group = FontGroup { identity, members };
        self.store.insert_group(group.clone())?;
        log::debug!("created {identity} with {} members", group.members.len());
        Ok(group)
    }

    /// Replace all members of an existing group.
    ///
    /// The member count is checked before the group is looked up, so too few
    /// members are reported even for an unknown group. On error the stored
    /// group is unchanged.
    pub fn update_group(
        &mut self,
        id: GroupId,
        members: Vec<FontId>,
    ) -> Result<FontGroup, CatalogError> {
        check_member_count(&members)?;
        let group = self
            .store
            .replace_members(id, members)?
            .ok_or(ValidationError::GroupNotFound(id))?;
        log::debug!("updated {id}, now {} members", group.members.len());
        Ok(group)
    }

    pub fn delete_group(&mut self, id: GroupId) -> Result<(), CatalogError> {
        self.store
            .remove_group(id)?
            .ok_or(ValidationError::GroupNotFound(id))?;
        log::debug!("deleted {id}");
        Ok(())
    }

    /// Remove a font from the catalogue.
    ///
    /// Groups that reference the font keep doing so.
    pub fn remove_font(&mut self, id: FontId) -> Result<FontRecord, CatalogError> {
        let record = self
            .store
            .remove_font(id)?
            .ok_or(ValidationError::FontNotFound(id))?;
        log::debug!("removed {id} ('{}')", record.filename);
        Ok(record)
    }

    /// All registered fonts, in registration order.
    pub fn fonts(&self) -> Result<Vec<FontRecord>, CatalogError> {
        Ok(self.store.fonts()?)
    }

    pub fn font(&self, id: FontId) -> Result<FontRecord, CatalogError> {
        Ok(self
            .store
            .font(id)?
            .ok_or(ValidationError::FontNotFound(id))?)
    }

    /// All groups, in creation order.
    pub fn groups(&self) -> Result<Vec<FontGroup>, CatalogError> {
        Ok(self.store.groups()?)
    }

    pub fn group(&self, id: GroupId) -> Result<FontGroup, CatalogError> {
        Ok(self
            .store
            .group(id)?
            .ok_or(ValidationError::GroupNotFound(id))?)
    }
}

fn check_member_count(members: &[FontId]) -> Result<(), ValidationError> {
    if members.len() < MIN_GROUP_MEMBERS {
        return Err(ValidationError::TooFewMembers {
            found: members.len(),
        });
    }
    Ok(())
}

impl From<ValidationError> for CatalogError {
    fn from(src: ValidationError) -> CatalogError {
        CatalogError::Validation(src)
    }
}

impl From<StoreError> for CatalogError {
    fn from(src: StoreError) -> CatalogError {
        CatalogError::Store(src)
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::TooFewMembers { found } => write!(
                f,
                "a group needs at least {MIN_GROUP_MEMBERS} fonts, found {found}"
            ),
            ValidationError::GroupNotFound(id) => write!(f, "{id} not found"),
            ValidationError::FontNotFound(id) => write!(f, "{id} not found"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Validation(err) => write!(f, "{err}"),
            CatalogError::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for CatalogError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CatalogError::Validation(err) => Some(err),
            CatalogError::Store(err) => Some(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use shelf_test_data::fonts;

    use super::*;

    fn catalog_with_fonts(n: usize) -> (FontCatalog, Vec<FontId>) {
        let mut catalog = FontCatalog::new(MemoryStore::new());
        let data = fonts::open_sans_regular();
        let metadata = shelf_read::metadata::parse(&data).unwrap();
        let ids = (0..n)
            .map(|i| {
                catalog
                    .register(&format!("font{i}.ttf"), metadata.clone(), &data)
                    .unwrap()
                    .identity
            })
            .collect();
        (catalog, ids)
    }

    #[test]
    fn register_keeps_bytes() {
        let data = fonts::open_sans_bold();
        let metadata = shelf_read::metadata::parse(&data).unwrap();
        let mut catalog = FontCatalog::new(MemoryStore::new());
        let record = catalog.register("OpenSans-Bold.ttf", metadata, &data).unwrap();
        assert_eq!(record.full_name, "Open Sans Bold");
        assert_eq!(record.embedded_data.decode().unwrap(), data);
        assert_eq!(catalog.font(record.identity).unwrap(), record);
    }

    #[test]
    fn register_never_deduplicates() {
        let (catalog, ids) = catalog_with_fonts(2);
        assert_ne!(ids[0], ids[1]);
        assert_eq!(catalog.fonts().unwrap().len(), 2);
    }

    #[test]
    fn create_group_needs_two_members() {
        let (mut catalog, ids) = catalog_with_fonts(1);
        assert_eq!(
            catalog.create_group(vec![ids[0]]),
            Err(CatalogError::Validation(ValidationError::TooFewMembers {
                found: 1
            }))
        );
        assert_eq!(
            catalog.create_group(vec![]),
            Err(ValidationError::TooFewMembers { found: 0 }.into())
        );
        assert!(catalog.groups().unwrap().is_empty());

        let group = catalog.create_group(vec![ids[0], ids[0]]).unwrap();
        assert_eq!(group.members, [ids[0], ids[0]]);
    }

    #[test]
    fn create_group_does_not_check_members_exist() {
        let (mut catalog, _) = catalog_with_fonts(0);
        let ghost = [FontId::new(40), FontId::new(41)];
        let group = catalog.create_group(ghost.to_vec()).unwrap();
        assert_eq!(catalog.group(group.identity).unwrap().members, ghost);
    }

    #[test]
    fn update_group() {
        let (mut catalog, ids) = catalog_with_fonts(3);
        let group = catalog.create_group(vec![ids[0], ids[1]]).unwrap();

        let updated = catalog
            .update_group(group.identity, vec![ids[2], ids[1], ids[0]])
            .unwrap();
        assert_eq!(updated.members, [ids[2], ids[1], ids[0]]);
        assert_eq!(catalog.group(group.identity).unwrap(), updated);
    }

    #[test]
    fn update_group_failures_change_nothing() {
        let (mut catalog, ids) = catalog_with_fonts(2);
        let group = catalog.create_group(vec![ids[0], ids[1]]).unwrap();

        assert_eq!(
            catalog.update_group(group.identity, vec![ids[0]]),
            Err(ValidationError::TooFewMembers { found: 1 }.into())
        );
        assert_eq!(catalog.group(group.identity).unwrap(), group);

        let unknown = GroupId::new(99);
        assert_eq!(
            catalog.update_group(unknown, ids.clone()),
            Err(ValidationError::GroupNotFound(unknown).into())
        );
        // too few members is reported before the lookup
        assert_eq!(
            catalog.update_group(unknown, vec![ids[0]]),
            Err(ValidationError::TooFewMembers { found: 1 }.into())
        );
        assert_eq!(
            catalog.update_group(unknown, vec![]),
            Err(ValidationError::TooFewMembers { found: 0 }.into())
        );
    }

    #[test]
    fn delete_group_twice() {
        let (mut catalog, ids) = catalog_with_fonts(2);
        let group = catalog.create_group(ids.clone()).unwrap();
        catalog.delete_group(group.identity).unwrap();
        assert_eq!(
            catalog.delete_group(group.identity),
            Err(ValidationError::GroupNotFound(group.identity).into())
        );
        assert_eq!(
            catalog.group(group.identity),
            Err(ValidationError::GroupNotFound(group.identity).into())
        );

        let next = catalog.create_group(ids).unwrap();
        assert_ne!(next.identity, group.identity);
    }

    #[test]
    fn remove_font_leaves_groups_alone() {
        let (mut catalog, ids) = catalog_with_fonts(2);
        let group = catalog.create_group(ids.clone()).unwrap();

        let removed = catalog.remove_font(ids[0]).unwrap();
        assert_eq!(removed.identity, ids[0]);
        assert_eq!(catalog.fonts().unwrap().len(), 1);
        assert_eq!(catalog.group(group.identity).unwrap().members, ids);
        assert_eq!(
            catalog.remove_font(ids[0]),
            Err(ValidationError::FontNotFound(ids[0]).into())
        );
    }

    #[test]
    fn error_messages() {
        let err = CatalogError::from(ValidationError::TooFewMembers { found: 1 });
        assert_eq!(err.to_string(), "a group needs at least 2 fonts, found 1");
        let err = CatalogError::from(ValidationError::GroupNotFound(GroupId::new(3)));
        assert_eq!(err.to_string(), "group-3 not found");
    }
}
