//! The font tables needed to catalogue a font

pub mod name;
pub mod os2;
