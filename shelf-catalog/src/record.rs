//! Catalogued fonts and font groups.

use shelf_read::FontMetadata;
use shelf_types::Weight;

use crate::embedded::EmbeddedData;

macro_rules! identity {
    ($(#[$attr:meta])* $name:ident, $prefix:literal) => {
        $(#[$attr])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name(u64);

        impl $name {
            pub const fn new(raw: u64) -> Self {
                Self(raw)
            }

            pub const fn to_u64(self) -> u64 {
                self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

identity!(
    /// Opaque identity of a catalogued font, assigned at registration.
    ///
    /// Identities are never derived from content: registering the same file
    /// twice yields two fonts.
    FontId,
    "font-"
);

identity!(
    /// Opaque identity of a font group.
    GroupId,
    "group-"
);

/// A font file accepted into the catalogue.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct FontRecord {
    pub identity: FontId,
    /// The name the file was uploaded under; not unique.
    pub filename: String,
    pub family: String,
    pub full_name: String,
    pub style: String,
    pub weight: Option<Weight>,
    pub embedded_data: EmbeddedData,
}

impl FontRecord {
    /// Assemble a record from parsed metadata and the bytes it came from.
    pub fn new(
        identity: FontId,
        filename: impl Into<String>,
        metadata: FontMetadata,
        raw_bytes: &[u8],
    ) -> Self {
        let FontMetadata {
            family,
            full_name,
            style,
            weight,
        } = metadata;
        FontRecord {
            identity,
            filename: filename.into(),
            family,
            full_name,
            style,
            weight,
            embedded_data: EmbeddedData::encode(raw_bytes),
        }
    }

    /// A CSS `@font-face` rule that loads this font under its family name.
    pub fn font_face_rule(&self) -> String {
        let family = self.family.replace('\\', "\\\\").replace('\'', "\\'");
        let mut rule = format!(
            "@font-face {{\n  font-family: '{family}';\n  src: url('{}') format('truetype');\n",
            self.embedded_data.data_uri()
        );
        if let Some(weight) = self.weight {
            rule.push_str(&format!("  font-weight: {weight};\n"));
        }
        rule.push('}');
        rule
    }
}

/// A named pairing of fonts, previewed together.
///
/// Members are kept in the order given and may repeat. A group always has
/// at least two members when created or updated.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontGroup {
    pub identity: GroupId,
    pub members: Vec<FontId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(family: &str, weight: Option<Weight>) -> FontRecord {
        FontRecord::new(
            FontId::new(7),
            "a.ttf",
            FontMetadata {
                family: family.into(),
                full_name: format!("{family} Regular"),
                style: "Regular".into(),
                weight,
            },
            b"\0\x01\0\0",
        )
    }

    #[test]
    fn font_face_rule() {
        let rule = record("Open Sans", Some(Weight::NORMAL)).font_face_rule();
        assert_eq!(
            rule,
            "@font-face {\n  font-family: 'Open Sans';\n  \
             src: url('data:font/ttf;base64,AAEAAA==') format('truetype');\n  \
             font-weight: 400;\n}"
        );
    }

    #[test]
    fn font_face_rule_escapes_quotes() {
        let rule = record("Gill's Sans", None).font_face_rule();
        assert!(rule.contains(r"font-family: 'Gill\'s Sans';"));
        assert!(!rule.contains("font-weight"));
    }

    #[test]
    fn identities_display() {
        assert_eq!(FontId::new(3).to_string(), "font-3");
        assert_eq!(format!("{:?}", GroupId::new(1)), "GroupId(1)");
    }
}
