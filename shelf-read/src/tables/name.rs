//! The [name (Naming)](https://docs.microsoft.com/en-us/typography/opentype/spec/name) table

use types::{BigEndian, FixedSize, Tag};

use crate::{FontData, FontRead, ReadError};

pub use types::NameId;

/// 'name'
pub const TAG: Tag = Tag::new(b"name");

/// Platform identifiers used in name records.
pub mod platform {
    pub const UNICODE: u16 = 0;
    pub const MACINTOSH: u16 = 1;
    pub const WINDOWS: u16 = 3;
}

/// Encoding identifiers, meaningful only together with a platform.
pub mod encoding {
    /// Macintosh platform, Roman script.
    pub const MAC_ROMAN: u16 = 0;
    /// Windows platform, symbol font (UTF-16BE).
    pub const WINDOWS_SYMBOL: u16 = 0;
    /// Windows platform, Unicode BMP (UTF-16BE).
    pub const WINDOWS_UNICODE_BMP: u16 = 1;
    /// Windows platform, full Unicode repertoire (UTF-16BE).
    pub const WINDOWS_UNICODE_FULL: u16 = 10;
}

/// [Naming table](https://docs.microsoft.com/en-us/typography/opentype/spec/name#naming-table-version-0)
#[derive(Clone, Copy)]
pub struct Name<'a> {
    data: FontData<'a>,
    version: u16,
    storage_offset: u16,
    name_record: &'a [NameRecord],
    lang_tag_record: Option<&'a [LangTagRecord]>,
}

impl<'a> FontRead<'a> for Name<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        let mut cursor = data.cursor();
        let version: u16 = cursor.read()?;
        let count: u16 = cursor.read()?;
        let storage_offset: u16 = cursor.read()?;
        let name_record = cursor.read_array(count as usize)?;
        let lang_tag_record = if version >= 1 {
            let lang_tag_count: u16 = cursor.read()?;
            Some(cursor.read_array(lang_tag_count as usize)?)
        } else {
            None
        };
        cursor.position()?;
        Ok(Name {
            data,
            version,
            storage_offset,
            name_record,
            lang_tag_record,
        })
    }
}

impl<'a> Name<'a> {
    /// Table version number (0 or 1).
    pub fn version(&self) -> u16 {
        self.version
    }

    /// Number of name records.
    pub fn count(&self) -> u16 {
        self.name_record.len() as u16
    }

    /// Offset to start of string storage (from start of table).
    pub fn storage_offset(&self) -> u16 {
        self.storage_offset
    }

    /// The name records where count is the number of records.
    pub fn name_record(&self) -> &'a [NameRecord] {
        self.name_record
    }

    /// The language-tag records, for version 1 tables.
    pub fn lang_tag_record(&self) -> Option<&'a [LangTagRecord]> {
        self.lang_tag_record
    }

    /// The FontData containing the encoded name strings.
    pub fn string_data(&self) -> FontData<'a> {
        self.data
            .split_off(self.storage_offset as usize)
            .unwrap_or_default()
    }

    /// Returns an iterator over the records with the given name id, in table order.
    pub fn records_for(&self, name_id: NameId) -> impl Iterator<Item = &'a NameRecord> + 'a {
        self.name_record
            .iter()
            .filter(move |record| record.name_id() == name_id)
    }
}

impl std::fmt::Debug for Name<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Name")
            .field("version", &self.version)
            .field("count", &self.count())
            .field("storage_offset", &self.storage_offset)
            .finish()
    }
}

/// Part of [Name]
#[derive(Clone, Debug, Copy, bytemuck::AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct NameRecord {
    pub platform_id: BigEndian<u16>,
    pub encoding_id: BigEndian<u16>,
    pub language_id: BigEndian<u16>,
    pub name_id: BigEndian<NameId>,
    pub length: BigEndian<u16>,
    pub string_offset: BigEndian<u16>,
}

impl FixedSize for NameRecord {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN * 4
        + NameId::RAW_BYTE_LEN
        + u16::RAW_BYTE_LEN;
}

impl NameRecord {
    pub fn platform_id(&self) -> u16 {
        self.platform_id.get()
    }

    pub fn encoding_id(&self) -> u16 {
        self.encoding_id.get()
    }

    pub fn language_id(&self) -> u16 {
        self.language_id.get()
    }

    pub fn name_id(&self) -> NameId {
        self.name_id.get()
    }

    /// String length (in bytes).
    pub fn length(&self) -> u16 {
        self.length.get()
    }

    /// String offset from start of storage area (in bytes).
    pub fn string_offset(&self) -> u16 {
        self.string_offset.get()
    }

    /// Return a type that can decode the string data for this name entry.
    pub fn string<'a>(&self, data: FontData<'a>) -> Result<NameString<'a>, ReadError> {
        let start = self.string_offset() as usize;
        let end = start + self.length() as usize;

        let data = data
            .as_bytes()
            .get(start..end)
            .ok_or(ReadError::OutOfBounds)?;

        let encoding = Encoding::new(self.platform_id(), self.encoding_id());
        Ok(NameString { data, encoding })
    }

    // reference from fonttools:
    // https://github.com/fonttools/fonttools/blob/c2119229cfb02cdb7c5a63374ef29d3d514259e8/Lib/fontTools/ttLib/tables/_n_a_m_e.py#L509
    pub fn is_unicode(&self) -> bool {
        self.platform_id() == platform::UNICODE
            || (self.platform_id() == platform::WINDOWS
                && [
                    encoding::WINDOWS_SYMBOL,
                    encoding::WINDOWS_UNICODE_BMP,
                    encoding::WINDOWS_UNICODE_FULL,
                ]
                .contains(&self.encoding_id()))
    }

    /// `true` for Windows platform records in any English locale.
    ///
    /// Windows language ids keep the primary language in the low ten bits;
    /// English is 0x09 (en-US is 0x0409, en-GB is 0x0809 and so on).
    pub fn is_windows_english(&self) -> bool {
        const PRIMARY_LANGUAGE_MASK: u16 = 0x03FF;
        const LANG_ENGLISH: u16 = 0x09;
        self.platform_id() == platform::WINDOWS
            && self.language_id() & PRIMARY_LANGUAGE_MASK == LANG_ENGLISH
    }
}

/// Part of [Name]
#[derive(Clone, Debug, Copy, bytemuck::AnyBitPattern)]
#[repr(C)]
#[repr(packed)]
pub struct LangTagRecord {
    pub length: BigEndian<u16>,
    pub lang_tag_offset: BigEndian<u16>,
}

impl FixedSize for LangTagRecord {
    const RAW_BYTE_LEN: usize = u16::RAW_BYTE_LEN * 2;
}

impl LangTagRecord {
    pub fn length(&self) -> u16 {
        self.length.get()
    }

    pub fn lang_tag_offset(&self) -> u16 {
        self.lang_tag_offset.get()
    }

    /// Return a type that can decode the language tag for this record.
    pub fn lang_tag<'a>(&self, data: FontData<'a>) -> Result<NameString<'a>, ReadError> {
        let start = self.lang_tag_offset() as usize;
        let end = start + self.length() as usize;

        let data = data
            .as_bytes()
            .get(start..end)
            .ok_or(ReadError::OutOfBounds)?;
        Ok(NameString {
            data,
            encoding: Encoding::Utf16Be,
        })
    }
}

/// Entry for a name in the naming table.
///
/// This provides an iterator over characters.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct NameString<'a> {
    data: &'a [u8],
    encoding: Encoding,
}

impl<'a> NameString<'a> {
    /// An iterator over the `char`s in this name.
    pub fn chars(&self) -> CharIter<'a> {
        CharIter {
            data: self.data,
            encoding: self.encoding,
            pos: 0,
        }
    }

    /// The encoding used to decode this string.
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl<'a> IntoIterator for NameString<'a> {
    type Item = char;
    type IntoIter = CharIter<'a>;
    fn into_iter(self) -> Self::IntoIter {
        self.chars()
    }
}

impl std::fmt::Display for NameString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        use std::fmt::Write;
        for c in self.chars() {
            f.write_char(c)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for NameString<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "\"{self}\"")
    }
}

/// An iterator over the chars of a name record.
#[derive(Clone)]
pub struct CharIter<'a> {
    data: &'a [u8],
    encoding: Encoding,
    pos: usize,
}

impl CharIter<'_> {
    fn bump_u16(&mut self) -> Option<u16> {
        let result = self
            .data
            .get(self.pos..self.pos + 2)
            .map(|x| u16::from_be_bytes([x[0], x[1]]))?;
        self.pos += 2;
        Some(result)
    }

    fn bump_u8(&mut self) -> Option<u8> {
        let result = self.data.get(self.pos)?;
        self.pos += 1;
        Some(*result)
    }
}

impl Iterator for CharIter<'_> {
    type Item = char;

    fn next(&mut self) -> Option<Self::Item> {
        if self.pos >= self.data.len() {
            return None;
        }
        let rep = std::char::REPLACEMENT_CHARACTER;
        let raw_c = match self.encoding {
            Encoding::Utf16Be => {
                let Some(c1) = self.bump_u16() else {
                    // odd trailing byte
                    self.pos = self.data.len();
                    return Some(rep);
                };
                let c1 = c1 as u32;
                if (0xD800..0xDC00).contains(&c1) {
                    let Some(c2) = self.bump_u16() else {
                        return Some(rep);
                    };
                    if !(0xDC00..0xE000).contains(&c2) {
                        // unpaired; decode the next unit on its own
                        self.pos -= 2;
                        return Some(rep);
                    }
                    ((c1 & 0x3FF) << 10) + (c2 as u32 & 0x3FF) + 0x10000
                } else {
                    c1
                }
            }
            Encoding::MacRoman => {
                let c = self.bump_u8()?;
                MacRomanMapping.decode(c) as u32
            }
            Encoding::Ascii => {
                let c = self.bump_u8()?;
                if c.is_ascii() {
                    c as u32
                } else {
                    rep as u32
                }
            }
        };
        Some(std::char::from_u32(raw_c).unwrap_or(rep))
    }
}

/// The encoding used by the name table.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Encoding {
    Utf16Be,
    MacRoman,
    /// Any other platform/encoding pair, read one byte per character.
    Ascii,
}

impl Encoding {
    /// Determine the coding from the platform and encoding id.
    pub fn new(platform_id: u16, encoding_id: u16) -> Encoding {
        match (platform_id, encoding_id) {
            (platform::UNICODE, _) => Encoding::Utf16Be,
            (platform::MACINTOSH, encoding::MAC_ROMAN) => Encoding::MacRoman,
            (platform::WINDOWS, encoding::WINDOWS_SYMBOL)
            | (platform::WINDOWS, encoding::WINDOWS_UNICODE_BMP)
            | (platform::WINDOWS, encoding::WINDOWS_UNICODE_FULL) => Encoding::Utf16Be,
            _ => Encoding::Ascii,
        }
    }
}

/// A helper for decoding Mac OS Roman encoded strings.
pub struct MacRomanMapping;

impl MacRomanMapping {
    const START_REMAP: u8 = 128;
    /// Convert from a mac-roman encoded byte to a `char`
    pub fn decode(self, raw: u8) -> char {
        if raw < Self::START_REMAP {
            raw as char
        } else {
            let idx = raw - Self::START_REMAP;
            char::from_u32(MAC_ROMAN_DECODE[idx as usize] as u32)
                .unwrap_or(std::char::REPLACEMENT_CHARACTER)
        }
    }
}

/// a lookup table for the Mac Moman encoding. this matches the values 128..=255
/// to specific unicode values.
#[rustfmt::skip]
static MAC_ROMAN_DECODE: [u16; 128] = [
    196, 197, 199, 201, 209, 214, 220, 225, 224, 226, 228, 227, 229, 231, 233,
    232, 234, 235, 237, 236, 238, 239, 241, 243, 242, 244, 246, 245, 250, 249,
    251, 252, 8224, 176, 162, 163, 167, 8226, 182, 223, 174, 169, 8482, 180,
    168, 8800, 198, 216, 8734, 177, 8804, 8805, 165, 181, 8706, 8721, 8719,
    960, 8747, 170, 186, 937, 230, 248, 191, 161, 172, 8730, 402, 8776, 8710,
    171, 187, 8230, 160, 192, 195, 213, 338, 339, 8211, 8212, 8220, 8221, 8216,
    8217, 247, 9674, 255, 376, 8260, 8364, 8249, 8250, 64257, 64258, 8225, 183,
    8218, 8222, 8240, 194, 202, 193, 203, 200, 205, 206, 207, 204, 211, 212,
    63743, 210, 218, 219, 217, 305, 710, 732, 175, 728, 729, 730, 184, 733,
    731, 711,
];
