#![no_main]
use std::error::Error;

use libfuzzer_sys::fuzz_target;
use shelf_read::{tables::name::NameId, FontRef, TableProvider};

fn do_name_things(data: &[u8]) -> Result<(), Box<dyn Error>> {
    let font = FontRef::new(data)?;
    let name = font.name()?;

    for nr in name.name_record() {
        let _ = nr.string(name.string_data()).map(|ns| ns.to_string());
    }

    if let Some(lang_tags) = name.lang_tag_record() {
        for tag in lang_tags {
            let _ = tag.lang_tag(name.string_data()).map(|ns| ns.to_string());
        }
    }

    for id in [NameId::FAMILY_NAME, NameId::SUBFAMILY_NAME, NameId::FULL_NAME] {
        let _ = shelf_read::metadata::resolve_name(&name, id);
    }

    Ok(())
}

fuzz_target!(|data: &[u8]| {
    let _ = do_name_things(data);
});
