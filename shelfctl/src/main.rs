//! Catalogue font files from the command line.
//!
//! Every input file goes through the same upload pipeline a server would
//! use; the resulting catalogue is printed to stdout as JSON. Files that
//! are rejected are logged (set `RUST_LOG` to see more) and listed under
//! `failures`.

use std::path::Path;

use serde_json::{json, Value};
use shelf_catalog::{CatalogConfig, FontCatalog, FontRecord, MemoryStore, Upload};

fn main() -> Result<(), Error> {
    env_logger::init();
    let args = flags::Args::from_env().map_err(Error::new)?;
    let output = run(&args)?;
    let text = serde_json::to_string_pretty(&output).map_err(Error::new)?;
    println!("{text}");
    Ok(())
}

fn run(args: &flags::Args) -> Result<Value, Error> {
    let uploads = args
        .fonts
        .iter()
        .map(|path| {
            std::fs::read(path)
                .map(|data| Upload::new(display_name(path), data))
                .map_err(|e| Error(format!("failed to read '{}': {e}", path.display())))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut config = CatalogConfig::new();
    if let Some(max_files) = args.max_files {
        config = config.max_files(max_files);
    }
    let mut catalog = FontCatalog::with_config(MemoryStore::new(), config);
    let report = catalog.upload(uploads).map_err(Error::new)?;

    if args.group {
        let members: Vec<_> = report.registered.iter().map(|font| font.identity).collect();
        match catalog.create_group(members) {
            Ok(group) => log::info!("grouped {} fonts as {}", group.members.len(), group.identity),
            Err(e) => log::warn!("fonts were not grouped: {e}"),
        }
    }

    let fonts = catalog
        .fonts()
        .map_err(Error::new)?
        .iter()
        .map(|font| font_json(font, args.embed))
        .collect::<Result<Vec<_>, _>>()?;
    let groups = catalog.groups().map_err(Error::new)?;
    Ok(json!({
        "fonts": fonts,
        "groups": groups,
        "failures": report.failures,
    }))
}

/// Serialize a font, leaving out the base64 payload unless asked for it.
fn font_json(font: &FontRecord, embed: bool) -> Result<Value, Error> {
    let mut value = serde_json::to_value(font).map_err(Error::new)?;
    if !embed {
        if let Some(fields) = value.as_object_mut() {
            fields.remove("embeddedData");
        }
    }
    Ok(value)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

#[derive(Debug, Clone)]
struct Error(String);

impl Error {
    fn new(t: impl std::fmt::Display) -> Self {
        Self(t.to_string())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for Error {}

mod flags {
    use std::path::PathBuf;

    xflags::xflags! {
        /// Catalogue font files and print the result as JSON
        cmd args {
            repeated fonts: PathBuf
                /// Put every registered font into one group
                optional -g, --group
                /// Include each font's base64 data in the output
                optional -e, --embed
                /// The most files accepted at once (default 10)
                optional -m, --max-files max_files: usize
            }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use shelf_test_data::fonts;

    use super::*;

    fn write_fonts(dir: &Path, files: &[(&str, Vec<u8>)]) -> Vec<PathBuf> {
        files
            .iter()
            .map(|(name, data)| {
                let path = dir.join(name);
                std::fs::write(&path, data).unwrap();
                path
            })
            .collect()
    }

    fn args(fonts: Vec<PathBuf>) -> flags::Args {
        flags::Args {
            fonts,
            group: false,
            embed: false,
            max_files: None,
        }
    }

    #[test]
    fn catalogue_without_embedding() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fonts(
            dir.path(),
            &[
                ("Regular.ttf", fonts::open_sans_regular()),
                ("Bold.ttf", fonts::open_sans_bold()),
            ],
        );
        let mut args = args(paths);
        args.group = true;
        let output = run(&args).unwrap();

        let fonts = output["fonts"].as_array().unwrap();
        assert_eq!(fonts.len(), 2);
        assert_eq!(fonts[0]["filename"], "Regular.ttf");
        assert_eq!(fonts[1]["fullName"], "Open Sans Bold");
        assert!(fonts[0].get("embeddedData").is_none());
        assert_eq!(output["groups"][0]["members"], json!([0, 1]));
        assert_eq!(output["failures"], json!([]));
    }

    #[test]
    fn embedding_and_failures() {
        let dir = tempfile::tempdir().unwrap();
        let paths = write_fonts(
            dir.path(),
            &[
                ("Lato.otf", fonts::lato_light_names_only()),
                ("Lato.ttf", fonts::lato_light_names_only()),
            ],
        );
        let mut args = args(paths);
        args.embed = true;
        args.group = true;
        let output = run(&args).unwrap();

        assert!(output["fonts"][0]["embeddedData"].is_string());
        // a single font can't be grouped
        assert_eq!(output["groups"], json!([]));
        assert_eq!(output["failures"][0]["index"], 0);
        assert_eq!(
            output["failures"][0]["reason"],
            "unsupported file extension"
        );
    }

    #[test]
    fn batch_errors() {
        assert!(run(&args(Vec::new())).is_err());

        let dir = tempfile::tempdir().unwrap();
        let paths = write_fonts(
            dir.path(),
            &[
                ("a.ttf", fonts::open_sans_regular()),
                ("b.ttf", fonts::open_sans_bold()),
            ],
        );
        let mut args = args(paths);
        args.max_files = Some(1);
        let err = run(&args).unwrap_err();
        assert_eq!(err.to_string(), "2 files uploaded, at most 1 are accepted");
    }

    #[test]
    fn missing_file() {
        let err = run(&args(vec![PathBuf::from("/definitely/not/here.ttf")])).unwrap_err();
        assert!(err.0.starts_with("failed to read '/definitely/not/here.ttf'"));
    }
}
