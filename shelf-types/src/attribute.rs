//! Weight classification of a font.

/// Visual weight class of a font, on the `usWeightClass` scale of 1 to 1000.
///
/// See <https://learn.microsoft.com/en-us/typography/opentype/spec/os2#usweightclass>
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Weight(u16);

impl Weight {
    /// Weight value of 100.
    pub const THIN: Self = Self(100);

    /// Weight value of 200.
    pub const EXTRA_LIGHT: Self = Self(200);

    /// Weight value of 300.
    pub const LIGHT: Self = Self(300);

    /// Weight value of 400.
    pub const NORMAL: Self = Self(400);

    /// Weight value of 500.
    pub const MEDIUM: Self = Self(500);

    /// Weight value of 600.
    pub const SEMI_BOLD: Self = Self(600);

    /// Weight value of 700.
    pub const BOLD: Self = Self(700);

    /// Weight value of 800.
    pub const EXTRA_BOLD: Self = Self(800);

    /// Weight value of 900.
    pub const BLACK: Self = Self(900);
}

impl Weight {
    /// The smallest valid weight class.
    pub const MIN_VALUE: u16 = 1;
    /// The largest valid weight class.
    pub const MAX_VALUE: u16 = 1000;

    /// Creates a weight from a `usWeightClass` value.
    ///
    /// Returns `None` for values outside of `1..=1000`; a zero weight class
    /// in particular shows up in fonts whose OS/2 table was never filled in.
    pub const fn from_weight_class(weight_class: u16) -> Option<Self> {
        if weight_class >= Self::MIN_VALUE && weight_class <= Self::MAX_VALUE {
            Some(Self(weight_class))
        } else {
            None
        }
    }

    /// Returns the underlying weight value.
    pub const fn value(self) -> u16 {
        self.0
    }
}

impl Default for Weight {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl std::fmt::Display for Weight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weight_class_range() {
        assert_eq!(Weight::from_weight_class(0), None);
        assert_eq!(Weight::from_weight_class(1).map(Weight::value), Some(1));
        assert_eq!(Weight::from_weight_class(700), Some(Weight::BOLD));
        assert_eq!(Weight::from_weight_class(1000).map(Weight::value), Some(1000));
        assert_eq!(Weight::from_weight_class(1001), None);
    }
}
