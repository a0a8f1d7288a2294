//! a trait for things that can serve font tables

use types::Tag;

use crate::{tables, FontData, FontRead, ReadError};

/// An interface for accessing tables from a font (or font-like object)
pub trait TableProvider<'a> {
    fn data_for_tag(&self, tag: Tag) -> Option<FontData<'a>>;

    fn expect_data_for_tag(&self, tag: Tag) -> Result<FontData<'a>, ReadError> {
        self.data_for_tag(tag).ok_or(ReadError::TableIsMissing(tag))
    }

    fn name(&self) -> Result<tables::name::Name<'a>, ReadError> {
        self.expect_data_for_tag(tables::name::TAG)
            .and_then(FontRead::read)
    }

    fn os2(&self) -> Result<tables::os2::Os2<'a>, ReadError> {
        self.expect_data_for_tag(tables::os2::TAG)
            .and_then(FontRead::read)
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn missing_tables_are_reported_by_tag() {
        // serves a bare OS/2 header and nothing else
        struct DummyProvider;
        impl TableProvider<'static> for DummyProvider {
            fn data_for_tag(&self, tag: Tag) -> Option<FontData<'static>> {
                if tag == Tag::new(b"OS/2") {
                    Some(FontData::new(&[
                        0, 0, // version 0
                        1, 244, // xAvgCharWidth 500
                        1, 144, // usWeightClass 400
                        0, 5, // usWidthClass 5
                    ]))
                } else {
                    None
                }
            }
        }

        assert_eq!(DummyProvider.os2().unwrap().us_weight_class(), 400);
        assert!(matches!(
            DummyProvider.name(),
            Err(ReadError::TableIsMissing(tag)) if tag == Tag::new(b"name")
        ));
    }
}
