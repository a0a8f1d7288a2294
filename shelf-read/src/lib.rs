//! Reading catalogue metadata from sfnt font files
//!
//! This crate provides memory safe zero-allocation parsing of the parts of a
//! font file needed to identify it: the [table directory], the
//! [`name`][name-table] table and the weight class in the [`OS/2`][os2-table]
//! table. Glyph outlines and every other table are never touched.
//!
//! Most callers only need [`metadata::parse`], which turns a buffer into a
//! [`FontMetadata`] record or a [`ParseError`] explaining why the file can't
//! be catalogued.
//!
//! # Example
//!
//! ```no_run
//! # let path_to_my_font_file = std::path::Path::new("");
//! let font_bytes = std::fs::read(path_to_my_font_file).unwrap();
//! let metadata = shelf_read::metadata::parse(&font_bytes).expect("not a usable font");
//!
//! println!("{} ({}), weight {:?}", metadata.full_name, metadata.style, metadata.weight);
//! ```
//!
//! [table directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
//! [name-table]: https://learn.microsoft.com/en-us/typography/opentype/spec/name
//! [os2-table]: https://learn.microsoft.com/en-us/typography/opentype/spec/os2

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod font_data;
pub mod metadata;
mod read;
mod table_provider;
pub mod tables;

pub use font_data::FontData;
pub use metadata::{FontMetadata, ParseError};
pub use read::{FontRead, ReadError};
pub use table_provider::TableProvider;

/// Public re-export of the shelf-types crate.
pub extern crate shelf_types as types;

use types::{BigEndian, FixedSize, Tag, SFNT_VERSIONS};

/// The size of the fixed portion of a table directory, in bytes.
pub const TABLE_DIRECTORY_HEADER_LEN: usize = 12;

/// The [table directory](https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory)
/// at the start of every sfnt font.
#[derive(Clone, Copy)]
pub struct TableDirectory<'a> {
    sfnt_version: u32,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    table_records: &'a [TableRecord],
}

impl<'a> FontRead<'a> for TableDirectory<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let sfnt_version: u32 = cursor.read()?;
        let num_tables: u16 = cursor.read()?;
        let search_range: u16 = cursor.read()?;
        let entry_selector: u16 = cursor.read()?;
        let range_shift: u16 = cursor.read()?;
        let table_records = cursor.read_array(num_tables as usize)?;
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }
}

impl<'a> TableDirectory<'a> {
    /// 0x00010000 or 0x4F54544F
    pub fn sfnt_version(&self) -> u32 {
        self.sfnt_version
    }

    /// Number of tables.
    pub fn num_tables(&self) -> u16 {
        self.table_records.len() as u16
    }

    pub fn search_range(&self) -> u16 {
        self.search_range
    }

    pub fn entry_selector(&self) -> u16 {
        self.entry_selector
    }

    pub fn range_shift(&self) -> u16 {
        self.range_shift
    }

    /// Table records array, one for each top-level table in the font
    pub fn table_records(&self) -> &'a [TableRecord] {
        self.table_records
    }

    fn is_sorted(&self) -> bool {
        self.table_records
            .windows(2)
            .all(|pair| pair[0].tag() < pair[1].tag())
    }
}

/// Record for a table in a font.
#[derive(Clone, Debug, Copy, bytemuck::AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct TableRecord {
    /// Table identifier.
    pub tag: BigEndian<Tag>,
    /// Checksum for the table.
    pub checksum: BigEndian<u32>,
    /// Offset from the beginning of the font data.
    pub offset: BigEndian<u32>,
    /// Length of the table.
    pub length: BigEndian<u32>,
}

impl FixedSize for TableRecord {
    const RAW_BYTE_LEN: usize = Tag::RAW_BYTE_LEN + u32::RAW_BYTE_LEN * 3;
}

impl TableRecord {
    pub fn tag(&self) -> Tag {
        self.tag.get()
    }

    pub fn checksum(&self) -> u32 {
        self.checksum.get()
    }

    pub fn offset(&self) -> u32 {
        self.offset.get()
    }

    pub fn length(&self) -> u32 {
        self.length.get()
    }

    /// The byte range of the table, if computing it does not overflow.
    pub fn byte_range(&self) -> Option<std::ops::Range<usize>> {
        let start = self.offset() as usize;
        let end = start.checked_add(self.length() as usize)?;
        Some(start..end)
    }
}

/// Reference to an in-memory font.
///
/// This is a simple implementation of the [`TableProvider`] trait backed
/// by a borrowed slice containing font data.
///
/// Construction validates the whole table directory up front: every table
/// record must describe a range inside the font data.
#[derive(Clone)]
pub struct FontRef<'a> {
    data: FontData<'a>,
    pub table_directory: TableDirectory<'a>,
    // Whether the table directory is sorted and thus we can use binary search for
    // finding table records. In principle, fonts are required to have a sorted
    // table directory, but certain fonts don't seem to follow that requirement.
    table_directory_sorted: bool,
}

impl<'a> FontRef<'a> {
    /// Creates a new reference to an in-memory font backed by the given data.
    ///
    /// The data must be a single font (not a font collection) and must begin
    /// with a table directory whose sfnt version is one of
    /// [`SFNT_VERSIONS`](types::SFNT_VERSIONS).
    pub fn new(data: &'a [u8]) -> Result<Self, ReadError> {
        let data = FontData::new(data);
        let sfnt_version: u32 = data.read_at(0)?;
        if !SFNT_VERSIONS.contains(&sfnt_version) {
            return Err(ReadError::InvalidSfnt(sfnt_version));
        }
        if data.len() < TABLE_DIRECTORY_HEADER_LEN {
            return Err(ReadError::OutOfBounds);
        }
        let table_directory = TableDirectory::read(data)
            .map_err(|_| ReadError::MalformedData("table records exceed font data"))?;
        if let Some(record) = table_directory
            .table_records()
            .iter()
            .find(|record| {
                record
                    .byte_range()
                    .map_or(true, |range| range.end > data.len())
            })
        {
            return Err(ReadError::TableOutOfBounds(record.tag()));
        }

        Ok(FontRef {
            data,
            table_directory_sorted: table_directory.is_sorted(),
            table_directory,
        })
    }

    /// Returns the underlying font data.
    pub fn data(&self) -> FontData<'a> {
        self.data
    }

    /// Returns the associated table directory.
    pub fn table_directory(&self) -> &TableDirectory<'a> {
        &self.table_directory
    }

    /// Returns the data for the table with the specified tag, if present.
    pub fn table_data(&self, tag: Tag) -> Option<FontData<'a>> {
        let records = self.table_directory.table_records();
        let entry = if self.table_directory_sorted {
            records.binary_search_by(|rec| rec.tag().cmp(&tag)).ok()
        } else {
            records.iter().position(|rec| rec.tag() == tag)
        };

        entry
            .and_then(|idx| records.get(idx))
            .and_then(|record| self.data.slice(record.byte_range()?))
    }
}

impl<'a> TableProvider<'a> for FontRef<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>> {
        self.table_data(tag)
    }
}

#[cfg(test)]
mod tests {
    use shelf_test_data::be_buffer;
    use types::{Tag, CFF_SFNT_VERSION, TT_SFNT_VERSION};

    use crate::{FontRef, ReadError};

    #[test]
    fn rejects_unknown_signature() {
        assert!(matches!(
            FontRef::new(b"NOT_A_FONT_AT_ALL"),
            Err(ReadError::InvalidSfnt(0x4E4F545F))
        ));
        assert!(matches!(FontRef::new(&[0, 1]), Err(ReadError::OutOfBounds)));
    }

    #[test]
    fn accepts_empty_directory() {
        let font_data = be_buffer! { CFF_SFNT_VERSION, 0u16, 0u16, 0u16, 0u16 };
        let font = FontRef::new(&font_data).unwrap();
        assert_eq!(font.table_directory.num_tables(), 0);
        assert!(font.table_data(Tag::new(b"name")).is_none());
    }

    #[test]
    fn truncated_header() {
        let font_data = be_buffer! { TT_SFNT_VERSION, 0u16, 0u16 };
        assert!(matches!(FontRef::new(&font_data), Err(ReadError::OutOfBounds)));
    }

    #[test]
    fn table_past_end() {
        let font_data = be_buffer! {
            TT_SFNT_VERSION,
            1u16,    // num tables
            16u16,   // search range
            0u16,    // entry selector
            0u16,    // range shift

            (Tag::new(b"name")),
            0u32,    // checksum
            28u32,   // offset
            8u32,    // length, four bytes too long
            [0u8, 0, 0, 0]
        };
        assert!(matches!(
            FontRef::new(&font_data),
            Err(ReadError::TableOutOfBounds(tag)) if tag == Tag::new(b"name")
        ));
    }

    #[test]
    fn offset_overflow() {
        let font_data = be_buffer! {
            TT_SFNT_VERSION, 1u16, 16u16, 0u16, 0u16,
            (Tag::new(b"name")), 0u32, 0xFFFF_FFFFu32, 0xFFFF_FFFFu32
        };
        assert!(matches!(
            FontRef::new(&font_data),
            Err(ReadError::TableOutOfBounds(_))
        ));
    }

    #[test]
    fn records_past_end() {
        let font_data = be_buffer! {
            TT_SFNT_VERSION,
            2u16,    // claims two tables
            32u16, 1u16, 0u16,
            (Tag::new(b"name")), 0u32, 28u32, 0u32
        };
        assert!(matches!(
            FontRef::new(&font_data),
            Err(ReadError::MalformedData(_))
        ));
    }

    #[test]
    fn unsorted_table_directory() {
        let post_data = [1u8, 2, 3, 4];
        let name_data = [5u8, 6, 7, 8, 9, 10];
        let os2_data = [11u8, 12];

        let font_data = be_buffer! {
            TT_SFNT_VERSION,
            3u16,    // num tables
            32u16,   // search range
            1u16,    // entry selector
            16u16,   // range shift

            (Tag::new(b"post")),
            0u32,    // checksum
            60u32,   // offset
            (post_data.len() as u32),

            (Tag::new(b"name")),
            0u32,    // checksum
            64u32,   // offset
            (name_data.len() as u32),

            (Tag::new(b"OS/2")),
            0u32,    // checksum
            70u32,   // offset
            (os2_data.len() as u32)
        };

        let mut full_font = font_data.to_vec();
        full_font.extend_from_slice(&post_data);
        full_font.extend_from_slice(&name_data);
        full_font.extend_from_slice(&os2_data);

        let font = FontRef::new(&full_font).unwrap();

        assert!(!font.table_directory_sorted);
        assert_eq!(
            font.table_data(Tag::new(b"name")).unwrap().as_bytes(),
            &name_data
        );
        assert_eq!(
            font.table_data(Tag::new(b"OS/2")).unwrap().as_bytes(),
            &os2_data
        );
        assert_eq!(
            font.table_data(Tag::new(b"post")).unwrap().as_bytes(),
            &post_data
        );
    }

    #[test]
    fn sorted_lookup() {
        let font_data = shelf_test_data::FontBuilder::new()
            .add_raw(Tag::new(b"zzzz"), vec![1, 2, 3])
            .add_raw(Tag::new(b"aaaa"), vec![4])
            .build();
        let font = FontRef::new(&font_data).unwrap();
        assert!(font.table_directory_sorted);
        assert_eq!(font.table_data(Tag::new(b"aaaa")).unwrap().as_bytes(), &[4]);
        assert_eq!(
            font.table_data(Tag::new(b"zzzz")).unwrap().as_bytes(),
            &[1, 2, 3]
        );
    }
}
