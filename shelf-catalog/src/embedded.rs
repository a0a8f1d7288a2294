//! The original bytes of a font, kept as base64 text.

use data_encoding::BASE64;

/// Base64 text of a font file, exactly as uploaded.
///
/// Deserializing goes through [`EmbeddedData::from_base64`], so invalid text
/// is rejected.
#[derive(Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String"))]
pub struct EmbeddedData(String);

/// An error returned when embedded data is not valid base64.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodeError(data_encoding::DecodeError);

impl EmbeddedData {
    /// Encode raw font bytes.
    pub fn encode(bytes: &[u8]) -> Self {
        EmbeddedData(BASE64.encode(bytes))
    }

    /// Wrap existing base64 text, checking that it decodes.
    pub fn from_base64(text: impl Into<String>) -> Result<Self, DecodeError> {
        let text = text.into();
        BASE64.decode(text.as_bytes()).map_err(DecodeError)?;
        Ok(EmbeddedData(text))
    }

    /// Recover the original font bytes.
    pub fn decode(&self) -> Result<Vec<u8>, DecodeError> {
        BASE64.decode(self.0.as_bytes()).map_err(DecodeError)
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    /// A `data:` URI a browser can load the font from.
    pub fn data_uri(&self) -> String {
        format!("data:font/ttf;base64,{}", self.0)
    }
}

impl TryFrom<String> for EmbeddedData {
    type Error = DecodeError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        EmbeddedData::from_base64(text)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for EmbeddedData {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl std::fmt::Debug for EmbeddedData {
    // fonts are large; the text itself is never useful in debug output
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmbeddedData({} base64 bytes)", self.0.len())
    }
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "embedded font data is not valid base64: {}", self.0)
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.0)
    }
}
