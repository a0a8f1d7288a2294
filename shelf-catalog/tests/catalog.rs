//! Exercising the catalogue through its public api, the way an upload
//! service drives it.

use pretty_assertions::assert_eq;
use shelf_catalog::{
    CatalogConfig, CatalogError, FontCatalog, FontId, MemoryStore, Upload, UploadError,
    UploadFailureReason, ValidationError,
};
use shelf_read::ParseError;
use shelf_test_data::fonts;
use shelf_types::Weight;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn upload_group_and_preview() {
    init_logging();
    let regular = fonts::open_sans_regular();
    let bold = fonts::open_sans_bold();
    let mut catalog = FontCatalog::new(MemoryStore::new());

    let report = catalog
        .upload(vec![
            Upload::new("OpenSans-Regular.ttf", regular.clone()),
            Upload::new("notes.txt", b"hello".to_vec()),
            Upload::new("OpenSans-Bold.ttf", bold.clone()),
            Upload::new("Lato-Light.ttf", fonts::lato_light_names_only()),
        ])
        .unwrap();

    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].index, 1);
    assert_eq!(
        report.failures[0].reason,
        UploadFailureReason::UnsupportedExtension
    );

    let weights: Vec<_> = report.registered.iter().map(|font| font.weight).collect();
    assert_eq!(
        weights,
        [Some(Weight::NORMAL), Some(Weight::BOLD), Some(Weight::LIGHT)]
    );

    // the stored bytes are exactly what was uploaded
    let stored = catalog.font(report.registered[1].identity).unwrap();
    assert_eq!(stored.embedded_data.decode().unwrap(), bold);
    assert!(stored
        .font_face_rule()
        .contains("src: url('data:font/ttf;base64,"));

    let ids: Vec<FontId> = report.registered.iter().map(|font| font.identity).collect();
    let group = catalog.create_group(ids[..2].to_vec()).unwrap();
    let group = catalog.update_group(group.identity, ids.clone()).unwrap();
    assert_eq!(catalog.groups().unwrap(), [group.clone()]);

    catalog.delete_group(group.identity).unwrap();
    assert!(catalog.groups().unwrap().is_empty());
    assert_eq!(
        catalog.delete_group(group.identity),
        Err(CatalogError::Validation(ValidationError::GroupNotFound(
            group.identity
        )))
    );
}

#[test]
fn same_file_twice_is_two_fonts() {
    init_logging();
    let data = fonts::open_sans_regular();
    let mut catalog = FontCatalog::new(MemoryStore::new());
    let report = catalog
        .upload(vec![
            Upload::new("a.ttf", data.clone()),
            Upload::new("a.ttf", data),
        ])
        .unwrap();
    assert_eq!(report.registered.len(), 2);
    assert_ne!(
        report.registered[0].identity,
        report.registered[1].identity
    );
    assert_eq!(
        report.registered[0].embedded_data,
        report.registered[1].embedded_data
    );
}

#[test]
fn batch_limits() {
    init_logging();
    let config = CatalogConfig::new().max_files(1);
    let mut catalog = FontCatalog::with_config(MemoryStore::new(), config);
    assert_eq!(catalog.upload(Vec::new()), Err(UploadError::NoFiles));
    let files = vec![
        Upload::new("a.ttf", fonts::open_sans_regular()),
        Upload::new("b.ttf", fonts::open_sans_bold()),
    ];
    assert_eq!(
        catalog.upload(files),
        Err(UploadError::TooManyFiles { max: 1, found: 2 })
    );
    assert!(catalog.fonts().unwrap().is_empty());
}

#[test]
fn malformed_files_are_reported_in_order() {
    init_logging();
    let mut truncated = fonts::open_sans_bold();
    truncated.truncate(20);
    let mut catalog = FontCatalog::new(MemoryStore::new());
    let report = catalog
        .upload(vec![
            Upload::new("short.ttf", vec![0, 1]),
            Upload::new("ok.ttf", fonts::open_sans_bold()),
            Upload::new("truncated.ttf", truncated),
            Upload::new("no-names.ttf", fonts::no_name_table()),
        ])
        .unwrap();
    assert_eq!(report.registered.len(), 1);
    let failures: Vec<_> = report
        .failures
        .into_iter()
        .map(|failure| (failure.index, failure.reason))
        .collect();
    assert_eq!(
        failures,
        [
            (0, UploadFailureReason::Parse(ParseError::MalformedHeader)),
            (
                2,
                UploadFailureReason::Parse(ParseError::MalformedTableDirectory)
            ),
            (3, UploadFailureReason::Parse(ParseError::MissingNameTable)),
        ]
    );
}

#[cfg(feature = "serde")]
#[test]
fn json_field_names() {
    let mut catalog = FontCatalog::new(MemoryStore::new());
    let data = fonts::open_sans_bold();
    let metadata = shelf_read::metadata::parse(&data).unwrap();
    let font = catalog.register("OpenSans-Bold.ttf", metadata, &data).unwrap();
    let group = catalog.create_group(vec![font.identity, font.identity]).unwrap();

    let json = serde_json::to_value(&font).unwrap();
    let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
    let mut expected = vec![
        "embeddedData",
        "family",
        "filename",
        "fullName",
        "identity",
        "style",
        "weight",
    ];
    expected.sort();
    assert_eq!(keys, expected);
    assert_eq!(json["weight"], 700);
    assert_eq!(json["fullName"], "Open Sans Bold");

    let json = serde_json::to_value(&group).unwrap();
    assert_eq!(json, serde_json::json!({ "identity": 0, "members": [0, 0] }));

    let back: shelf_catalog::FontRecord =
        serde_json::from_value(serde_json::to_value(&font).unwrap()).unwrap();
    assert_eq!(back, font);
}
