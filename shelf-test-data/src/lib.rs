//! test data shared between the shelf crates.
//!
//! Rather than checking in binary fixtures, fonts are assembled on demand
//! from the handful of tables the catalogue cares about.

use std::borrow::Cow;
use std::collections::BTreeMap;

use shelf_types::{NameId, Tag, TT_SFNT_VERSION};

pub mod bebuffer;

use bebuffer::BeBuffer;

const TABLE_RECORD_LEN: usize = 16;
const NAME_RECORD_LEN: usize = 12;

pub const NAME: Tag = Tag::new(b"name");
pub const OS2: Tag = Tag::new(b"OS/2");

/// Build a font from some set of raw tables.
#[derive(Debug, Clone)]
pub struct FontBuilder<'a> {
    sfnt_version: u32,
    tables: BTreeMap<Tag, Cow<'a, [u8]>>,
}

impl Default for FontBuilder<'_> {
    fn default() -> Self {
        FontBuilder {
            sfnt_version: TT_SFNT_VERSION,
            tables: BTreeMap::new(),
        }
    }
}

impl<'a> FontBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the version written at the start of the table directory.
    pub fn sfnt_version(&mut self, version: u32) -> &mut Self {
        self.sfnt_version = version;
        self
    }

    /// A builder method to add raw data for the provided tag
    pub fn add_raw(&mut self, tag: Tag, data: impl Into<Cow<'a, [u8]>>) -> &mut Self {
        self.tables.insert(tag, data.into());
        self
    }

    /// Assemble all the tables into a binary font file with a [Table Directory].
    ///
    /// Records are sorted by tag and every table is padded to four bytes.
    ///
    /// [Table Directory]: https://learn.microsoft.com/en-us/typography/opentype/spec/otff#table-directory
    pub fn build(&mut self) -> Vec<u8> {
        let num_tables = self.tables.len();
        let header_len = 12 + num_tables * TABLE_RECORD_LEN;
        let search = SearchRange::compute(num_tables, TABLE_RECORD_LEN);

        let mut directory = BeBuffer::new()
            .push(self.sfnt_version)
            .push(num_tables as u16)
            .push(search.search_range)
            .push(search.entry_selector)
            .push(search.range_shift);

        let mut position = header_len;
        for (tag, data) in &self.tables {
            directory = directory
                .push(*tag)
                .push(compute_checksum(data))
                .push(position as u32)
                .push(data.len() as u32);
            position += round4(data.len());
        }

        let mut data = directory.into_vec();
        for table in self.tables.values() {
            data.extend_from_slice(table);
            data.resize(round4(data.len()), 0);
        }
        data
    }
}

/// Binary search assists for a sorted array of records.
struct SearchRange {
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
}

impl SearchRange {
    fn compute(n_items: usize, item_size: usize) -> Self {
        if n_items == 0 {
            return SearchRange {
                search_range: 0,
                entry_selector: 0,
                range_shift: 0,
            };
        }
        let entry_selector = n_items.ilog2() as usize;
        let search_range = (1 << entry_selector) * item_size;
        let range_shift = n_items * item_size - search_range;
        SearchRange {
            search_range: search_range as u16,
            entry_selector: entry_selector as u16,
            range_shift: range_shift as u16,
        }
    }
}

fn round4(sz: usize) -> usize {
    (sz + 3) & !3
}

/// Sum of the table's big-endian u32 words, zero padded.
fn compute_checksum(table: &[u8]) -> u32 {
    table.chunks(4).fold(0u32, |sum, chunk| {
        let mut word = [0u8; 4];
        word[..chunk.len()].copy_from_slice(chunk);
        sum.wrapping_add(u32::from_be_bytes(word))
    })
}

/// A single record for a [`NameTableBuilder`].
#[derive(Debug, Clone)]
pub struct NameEntry {
    pub platform_id: u16,
    pub encoding_id: u16,
    pub language_id: u16,
    pub name_id: NameId,
    pub bytes: Vec<u8>,
}

/// Builds a version 0 `name` table.
///
/// Records are written in insertion order, so tests can control which of
/// several candidates comes first.
#[derive(Debug, Clone, Default)]
pub struct NameTableBuilder {
    entries: Vec<NameEntry>,
}

impl NameTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record with already encoded string bytes.
    pub fn add_raw(
        &mut self,
        platform_id: u16,
        encoding_id: u16,
        language_id: u16,
        name_id: NameId,
        bytes: impl Into<Vec<u8>>,
    ) -> &mut Self {
        self.entries.push(NameEntry {
            platform_id,
            encoding_id,
            language_id,
            name_id,
            bytes: bytes.into(),
        });
        self
    }

    /// Add a Windows Unicode BMP record with language 0x409 (US English).
    pub fn add_windows(&mut self, name_id: NameId, value: &str) -> &mut Self {
        self.add_windows_lang(name_id, 0x0409, value)
    }

    /// Add a Windows Unicode BMP record with the given language.
    pub fn add_windows_lang(&mut self, name_id: NameId, language_id: u16, value: &str) -> &mut Self {
        self.add_raw(3, 1, language_id, name_id, utf16be(value))
    }

    /// Add a Macintosh Roman record; `value` must already be Mac Roman encoded.
    pub fn add_mac(&mut self, name_id: NameId, value: &[u8]) -> &mut Self {
        self.add_raw(1, 0, 0, name_id, value)
    }

    /// Add a Unicode platform record, encoded as UTF-16BE.
    pub fn add_unicode(&mut self, name_id: NameId, value: &str) -> &mut Self {
        self.add_raw(0, 3, 0, name_id, utf16be(value))
    }

    pub fn build(&self) -> Vec<u8> {
        let storage_offset = 6 + self.entries.len() * NAME_RECORD_LEN;
        let mut buf = BeBuffer::new()
            .push(0u16)
            .push(self.entries.len() as u16)
            .push(storage_offset as u16);
        let mut string_offset = 0usize;
        for entry in &self.entries {
            buf = buf
                .push(entry.platform_id)
                .push(entry.encoding_id)
                .push(entry.language_id)
                .push(entry.name_id)
                .push(entry.bytes.len() as u16)
                .push(string_offset as u16);
            string_offset += entry.bytes.len();
        }
        for entry in &self.entries {
            buf = buf.extend_bytes(&entry.bytes);
        }
        buf.into_vec()
    }
}

/// Encode a string as UTF-16BE.
pub fn utf16be(value: &str) -> Vec<u8> {
    value.encode_utf16().flat_map(u16::to_be_bytes).collect()
}

/// A version 4 `OS/2` table with everything but the weight class zeroed.
pub fn os2_table(weight_class: u16) -> Vec<u8> {
    BeBuffer::new()
        .push(4u16) // version
        .push(0i16) // xAvgCharWidth
        .push(weight_class)
        .push(5u16) // usWidthClass, medium
        .extend_bytes(&[0; 88])
        .into_vec()
}

/// Ready-made fonts with the three names the catalogue requires.
pub mod fonts {
    use shelf_types::NameId;

    use super::{os2_table, FontBuilder, NameTableBuilder, NAME, OS2};

    /// A font with English Windows names and, optionally, an `OS/2` table.
    pub fn named(family: &str, style: &str, full_name: &str, weight_class: Option<u16>) -> Vec<u8> {
        let name = NameTableBuilder::new()
            .add_windows(NameId::FAMILY_NAME, family)
            .add_windows(NameId::SUBFAMILY_NAME, style)
            .add_windows(NameId::FULL_NAME, full_name)
            .build();
        let mut builder = FontBuilder::new();
        builder.add_raw(NAME, name);
        if let Some(weight_class) = weight_class {
            builder.add_raw(OS2, os2_table(weight_class));
        }
        builder.build()
    }

    /// "Open Sans Bold", with an `OS/2` weight class of 700.
    pub fn open_sans_bold() -> Vec<u8> {
        named("Open Sans", "Bold", "Open Sans Bold", Some(700))
    }

    /// "Open Sans Regular", with an `OS/2` weight class of 400.
    pub fn open_sans_regular() -> Vec<u8> {
        named("Open Sans", "Regular", "Open Sans Regular", Some(400))
    }

    /// "Lato Light", without an `OS/2` table.
    pub fn lato_light_names_only() -> Vec<u8> {
        named("Lato", "Light", "Lato Light", None)
    }

    /// A structurally valid font that has no `name` table.
    pub fn no_name_table() -> Vec<u8> {
        FontBuilder::new().add_raw(OS2, os2_table(400)).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_range_matches_roboto() {
        let computed = SearchRange::compute(0x16, TABLE_RECORD_LEN);
        assert_eq!(
            (256, 4, 96),
            (
                computed.search_range,
                computed.entry_selector,
                computed.range_shift
            )
        );
    }

    #[test]
    fn tables_are_padded() {
        let data = FontBuilder::new()
            .add_raw(Tag::new(b"abcd"), vec![1u8; 5])
            .add_raw(Tag::new(b"efgh"), vec![2u8; 3])
            .build();
        assert_eq!(data.len(), 12 + 2 * TABLE_RECORD_LEN + 8 + 4);
        // second record's offset
        assert_eq!(&data[12 + 16 + 8..12 + 16 + 12], &[0, 0, 0, 52]);
    }

    #[test]
    fn checksum_pads_trailing_bytes() {
        assert_eq!(compute_checksum(&[0, 0, 0, 1, 0, 0, 0, 2]), 3);
        assert_eq!(compute_checksum(&[1]), 0x0100_0000);
    }

    #[test]
    fn name_table_layout() {
        let data = NameTableBuilder::new()
            .add_windows(NameId::FAMILY_NAME, "A")
            .add_mac(NameId::FULL_NAME, b"Bc")
            .build();
        assert_eq!(&data[..6], &[0, 0, 0, 2, 0, 30]);
        assert_eq!(&data[30..], &[0, b'A', b'B', b'c']);
        // second record's string offset
        assert_eq!(&data[28..30], &[0, 2]);
    }
}
