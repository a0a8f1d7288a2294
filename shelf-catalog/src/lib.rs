//! A catalogue of uploaded fonts and the groups they are paired in.
//!
//! Fonts enter the catalogue either one at a time, through
//! [`FontCatalog::register`] with metadata already extracted by
//! [`shelf_read::metadata::parse`], or as a batch through
//! [`FontCatalog::upload`], which filters, parses and registers each file.
//!
//! ```
//! use shelf_catalog::{FontCatalog, MemoryStore, Upload};
//! # let regular = shelf_test_data::fonts::open_sans_regular();
//! # let bold = shelf_test_data::fonts::open_sans_bold();
//!
//! let mut catalog = FontCatalog::new(MemoryStore::new());
//! let report = catalog
//!     .upload(vec![
//!         Upload::new("OpenSans-Regular.ttf", regular),
//!         Upload::new("OpenSans-Bold.ttf", bold),
//!     ])
//!     .unwrap();
//! let ids = report.registered.iter().map(|font| font.identity).collect();
//! let group = catalog.create_group(ids).unwrap();
//! assert_eq!(group.members.len(), 2);
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod catalog;
mod embedded;
mod record;
mod store;
mod upload;

pub use catalog::{CatalogError, FontCatalog, ValidationError, MIN_GROUP_MEMBERS};
pub use embedded::{DecodeError, EmbeddedData};
pub use record::{FontGroup, FontId, FontRecord, GroupId};
pub use store::{CatalogStore, MemoryStore, StoreError};
pub use upload::{
    CatalogConfig, Upload, UploadError, UploadFailure, UploadFailureReason, UploadReport,
};
