//! Catalogue metadata: the names and weight that identify a font.

use types::{NameId, Weight};

use crate::{
    tables::name::{encoding, platform, Name, NameRecord},
    FontRef, ReadError, TableProvider,
};

/// The names and weight extracted from a single font file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FontMetadata {
    /// Font family name (name id 1). Never empty.
    pub family: String,
    /// Full font name (name id 4). Never empty.
    pub full_name: String,
    /// Subfamily, e.g. "Bold Italic" (name id 2). Never empty.
    pub style: String,
    /// The weight class, if the font declares one or its style implies one.
    pub weight: Option<Weight>,
}

/// Why a buffer could not be turned into [`FontMetadata`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The buffer is shorter than a table directory header, or does not
    /// begin with a known sfnt version.
    MalformedHeader,
    /// The table records run past the buffer, or describe a table that does.
    MalformedTableDirectory,
    MissingNameTable,
    /// No usable record was found for this name id.
    IncompleteNaming(NameId),
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::MalformedHeader => write!(f, "not an sfnt font: malformed header"),
            ParseError::MalformedTableDirectory => write!(f, "malformed table directory"),
            ParseError::MissingNameTable => write!(f, "the font has no 'name' table"),
            ParseError::IncompleteNaming(name_id) => {
                write!(f, "no usable {name_id:?} in the 'name' table")
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ReadError> for ParseError {
    fn from(src: ReadError) -> ParseError {
        match src {
            ReadError::OutOfBounds | ReadError::InvalidSfnt(_) => ParseError::MalformedHeader,
            ReadError::TableIsMissing(_) => ParseError::MissingNameTable,
            ReadError::InvalidArrayLen
            | ReadError::TableOutOfBounds(_)
            | ReadError::MalformedData(_) => ParseError::MalformedTableDirectory,
        }
    }
}

/// The name ids required for a catalogue entry, in the order they are checked.
const REQUIRED_NAMES: [NameId; 3] = [NameId::FAMILY_NAME, NameId::SUBFAMILY_NAME, NameId::FULL_NAME];

/// Extract catalogue metadata from the bytes of a font file.
///
/// This is a pure function of `data`; only the table directory and the
/// `name` and `OS/2` tables are read.
pub fn parse(data: &[u8]) -> Result<FontMetadata, ParseError> {
    let font = FontRef::new(data)?;
    FontMetadata::from_font(&font)
}

/// Parse every input independently, returning one result per input in order.
pub fn parse_batch<T: AsRef<[u8]>>(inputs: &[T]) -> Vec<Result<FontMetadata, ParseError>> {
    inputs.iter().map(|input| parse(input.as_ref())).collect()
}

impl FontMetadata {
    /// Extract metadata from an already validated font.
    pub fn from_font(font: &FontRef) -> Result<FontMetadata, ParseError> {
        if font.table_data(crate::tables::name::TAG).is_none() {
            return Err(ParseError::MissingNameTable);
        }
        // a truncated name table has no usable records, which is reported below
        let name = font.name().ok();

        let [family, style, full_name] = REQUIRED_NAMES.map(|id| {
            name.as_ref()
                .and_then(|name| resolve_name(name, id))
                .ok_or(ParseError::IncompleteNaming(id))
        });
        let family = family?;
        let style = style?;
        let full_name = full_name?;

        let weight = match font.os2() {
            Ok(os2) => os2.weight().or_else(|| {
                log::debug!(
                    "'{full_name}' has weight class {}, using style",
                    os2.us_weight_class()
                );
                weight_from_style(&style)
            }),
            Err(_) => weight_from_style(&style),
        };

        Ok(FontMetadata {
            family,
            full_name,
            style,
            weight,
        })
    }
}

/// Pick the best record for `name_id` and decode it.
///
/// Records are ranked Windows Unicode BMP English first, then Mac Roman,
/// then anything else; ties go to the record that comes first in the table.
/// Records that can't be read or that decode to blank strings are skipped.
pub fn resolve_name(name: &Name, name_id: NameId) -> Option<String> {
    let data = name.string_data();
    name.records_for(name_id)
        .filter_map(|record| {
            let value = record.string(data).ok()?.to_string();
            (!value.trim().is_empty()).then_some((preference(record), value))
        })
        .min_by_key(|(rank, _)| *rank)
        .map(|(_, value)| value)
}

fn preference(record: &NameRecord) -> u8 {
    match (record.platform_id(), record.encoding_id()) {
        (platform::WINDOWS, encoding::WINDOWS_UNICODE_BMP) if record.is_windows_english() => 0,
        (platform::MACINTOSH, encoding::MAC_ROMAN) => 1,
        _ => 2,
    }
}

// compound keywords come before the keywords they end with
const STYLE_WEIGHTS: &[(&str, Weight)] = &[
    ("extralight", Weight::EXTRA_LIGHT),
    ("ultralight", Weight::EXTRA_LIGHT),
    ("semibold", Weight::SEMI_BOLD),
    ("demibold", Weight::SEMI_BOLD),
    ("extrabold", Weight::EXTRA_BOLD),
    ("ultrabold", Weight::EXTRA_BOLD),
    ("hairline", Weight::THIN),
    ("thin", Weight::THIN),
    ("light", Weight::LIGHT),
    ("regular", Weight::NORMAL),
    ("normal", Weight::NORMAL),
    ("book", Weight::NORMAL),
    ("roman", Weight::NORMAL),
    ("medium", Weight::MEDIUM),
    ("bold", Weight::BOLD),
    ("black", Weight::BLACK),
    ("heavy", Weight::BLACK),
];

const SLOPE_KEYWORDS: &[&str] = &["italic", "oblique"];

/// Infer a weight from a subfamily name such as "Semi-Bold Italic".
///
/// Matching ignores case, spaces, hyphens and underscores. A style that
/// only names a slope is regular; a style with no known keyword has no
/// weight.
pub fn weight_from_style(style: &str) -> Option<Weight> {
    let normalized: String = style
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect();

    if let Some((_, weight)) = STYLE_WEIGHTS
        .iter()
        .find(|(keyword, _)| normalized.contains(keyword))
    {
        return Some(*weight);
    }

    let unsloped = SLOPE_KEYWORDS
        .iter()
        .fold(normalized, |style, slope| style.replace(slope, ""));
    (unsloped.is_empty() && !style.trim().is_empty()).then_some(Weight::NORMAL)
}
