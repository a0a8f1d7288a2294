//! Common [scalar data types][data types] used when reading sfnt font files
//!
//! [data types]: https://docs.microsoft.com/en-us/typography/opentype/spec/otff#data-types

#![deny(rustdoc::broken_intra_doc_links)]
#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(any(feature = "std", test))]
#[macro_use]
extern crate std;

#[cfg(all(not(feature = "std"), not(test)))]
#[macro_use]
extern crate core as std;

mod attribute;
mod name_id;
mod raw;
mod tag;


pub use attribute::Weight;
pub use name_id::NameId;
pub use raw::{BigEndian, FixedSize, Scalar};
pub use tag::Tag;

/// The SFNT version for fonts containing TrueType outlines.
pub const TT_SFNT_VERSION: u32 = 0x00010000;
/// The SFNT version for fonts containing CFF outlines ('OTTO').
pub const CFF_SFNT_VERSION: u32 = 0x4F54544F;
/// The SFNT version for legacy Apple fonts containing TrueType outlines ('true').
pub const TRUE_SFNT_VERSION: u32 = 0x74727565;
/// The SFNT version for legacy Apple fonts wrapping a PostScript Type 1 font ('typ1').
pub const TYP1_SFNT_VERSION: u32 = 0x74797031;

/// Every sfnt version accepted at the start of a table directory.
pub const SFNT_VERSIONS: [u32; 4] = [
    TT_SFNT_VERSION,
    CFF_SFNT_VERSION,
    TRUE_SFNT_VERSION,
    TYP1_SFNT_VERSION,
];
