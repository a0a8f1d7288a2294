//! The [os2](https://docs.microsoft.com/en-us/typography/opentype/spec/os2) table

use types::{Tag, Weight};

use crate::{FontData, FontRead, ReadError};

/// 'OS/2'
pub const TAG: Tag = Tag::new(b"OS/2");

/// The leading fields of the OS/2 table.
///
/// Every version of the table starts with the same fields, so only the
/// prefix up to `usWidthClass` is required to be present.
#[derive(Clone, Copy)]
pub struct Os2<'a> {
    data: FontData<'a>,
}

impl Os2<'_> {
    const MIN_LEN: usize = 8;
    const WEIGHT_CLASS_OFFSET: usize = 4;

    pub fn version(&self) -> u16 {
        self.data.read_at(0).unwrap_or_default()
    }

    pub fn x_avg_char_width(&self) -> i16 {
        self.data.read_at(2).unwrap_or_default()
    }

    /// Visual weight of the font, nominally in `1..=1000`.
    pub fn us_weight_class(&self) -> u16 {
        self.data
            .read_at(Self::WEIGHT_CLASS_OFFSET)
            .unwrap_or_default()
    }

    pub fn us_width_class(&self) -> u16 {
        self.data.read_at(6).unwrap_or_default()
    }

    /// The weight class, if it is within `1..=1000`.
    pub fn weight(&self) -> Option<Weight> {
        Weight::from_weight_class(self.us_weight_class())
    }
}

impl<'a> FontRead<'a> for Os2<'a> {
    fn read(data: FontData<'a>) -> Result<Self, ReadError> {
        if data.len() < Self::MIN_LEN {
            return Err(ReadError::OutOfBounds);
        }
        Ok(Os2 { data })
    }
}

impl std::fmt::Debug for Os2<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Os2")
            .field("version", &self.version())
            .field("us_weight_class", &self.us_weight_class())
            .field("us_width_class", &self.us_width_class())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shelf_test_data::bebuffer::BeBuffer;

    #[test]
    fn reads_prefix_fields() {
        let buf = BeBuffer::new()
            .extend([4u16]) // version
            .push(-12i16) // xAvgCharWidth
            .extend([300u16, 3]); // weight, width
        let os2 = Os2::read(FontData::new(&buf)).unwrap();
        assert_eq!(os2.version(), 4);
        assert_eq!(os2.x_avg_char_width(), -12);
        assert_eq!(os2.us_weight_class(), 300);
        assert_eq!(os2.us_width_class(), 3);
        assert_eq!(os2.weight(), Some(Weight::LIGHT));
    }

    #[test]
    fn out_of_range_weight() {
        let buf = BeBuffer::new().extend([0u16, 0, 0, 5]);
        let os2 = Os2::read(FontData::new(&buf)).unwrap();
        assert_eq!(os2.weight(), None);
    }

    #[test]
    fn truncated() {
        assert!(Os2::read(FontData::new(&[0, 4, 0, 0, 1])).is_err());
    }
}
