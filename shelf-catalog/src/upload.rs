//! Accepting a batch of uploaded font files.

use std::path::Path;

use rayon::prelude::*;
use shelf_read::{metadata, FontMetadata, ParseError};

use crate::{
    catalog::FontCatalog,
    record::FontRecord,
    store::{CatalogStore, StoreError},
};

/// Limits applied to uploads.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogConfig {
    /// The most files accepted in a single upload.
    pub max_files: usize,
    /// File extensions accepted for upload, without the leading dot.
    ///
    /// Compared case-insensitively.
    pub allowed_extensions: Vec<String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            max_files: 10,
            allowed_extensions: vec!["ttf".into()],
        }
    }
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn allowed_extensions<I, T>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.allowed_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// `true` if `filename` ends in one of the allowed extensions.
    pub fn accepts(&self, filename: &str) -> bool {
        Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                self.allowed_extensions
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(ext))
            })
    }
}

/// A single uploaded file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, data: impl Into<Vec<u8>>) -> Self {
        Upload {
            filename: filename.into(),
            data: data.into(),
        }
    }
}

/// The outcome of an upload: registered fonts and the files that were skipped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UploadReport {
    /// Registered fonts, in upload order.
    pub registered: Vec<FontRecord>,
    /// Rejected files, in upload order.
    pub failures: Vec<UploadFailure>,
}

/// A file that was not registered.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct UploadFailure {
    /// Position of the file in the upload.
    pub index: usize,
    pub filename: String,
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_reason"))]
    pub reason: UploadFailureReason,
}

/// Why a single file was not registered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadFailureReason {
    UnsupportedExtension,
    Parse(ParseError),
    /// The file parsed, but the store refused the record.
    Store(StoreError),
}

/// An upload that was rejected as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadError {
    NoFiles,
    TooManyFiles { max: usize, found: usize },
}

impl<S: CatalogStore> FontCatalog<S> {
    /// Parse and register a batch of uploaded files.
    ///
    /// The batch is rejected up front if it is empty or larger than
    /// [`CatalogConfig::max_files`]. Otherwise files are parsed in parallel,
    /// and every file that parses is registered, in upload order. A file
    /// that fails, whether in parsing or in the store, is reported and does
    /// not affect the others.
    pub fn upload(&mut self, files: Vec<Upload>) -> Result<UploadReport, UploadError> {
        if files.is_empty() {
            return Err(UploadError::NoFiles);
        }
        if files.len() > self.config.max_files {
            return Err(UploadError::TooManyFiles {
                max: self.config.max_files,
                found: files.len(),
            });
        }

        let config = &self.config;
        let parsed: Vec<Result<FontMetadata, UploadFailureReason>> = files
            .par_iter()
            .map(|file| {
                if !config.accepts(&file.filename) {
                    return Err(UploadFailureReason::UnsupportedExtension);
                }
                metadata::parse(&file.data).map_err(UploadFailureReason::Parse)
            })
            .collect();

        let mut report = UploadReport::default();
        for (index, (file, result)) in files.into_iter().zip(parsed).enumerate() {
            let result = result.and_then(|metadata| {
                self.insert_record(&file.filename, metadata, &file.data)
                    .map_err(UploadFailureReason::Store)
            });
            match result {
                Ok(record) => report.registered.push(record),
                Err(reason) => {
                    log::warn!("skipping '{}': {reason}", file.filename);
                    report.failures.push(UploadFailure {
                        index,
                        filename: file.filename,
                        reason,
                    });
                }
            }
        }
        Ok(report)
    }
}

#[cfg(feature = "serde")]
fn serialize_reason<S: serde::Serializer>(
    reason: &UploadFailureReason,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(reason)
}

impl std::fmt::Display for UploadFailureReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadFailureReason::UnsupportedExtension => write!(f, "unsupported file extension"),
            UploadFailureReason::Parse(err) => write!(f, "{err}"),
            UploadFailureReason::Store(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for UploadFailureReason {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            UploadFailureReason::Parse(err) => Some(err),
            UploadFailureReason::Store(err) => Some(err),
            UploadFailureReason::UnsupportedExtension => None,
        }
    }
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::NoFiles => write!(f, "no fonts uploaded"),
            UploadError::TooManyFiles { max, found } => {
                write!(f, "{found} files uploaded, at most {max} are accepted")
            }
        }
    }
}

impl std::error::Error for UploadError {}
