//! Archive inspection helpers

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

/// Read every entry of a ZIP archive into `name -> content`
pub fn zip_entries(archive: &[u8]) -> BTreeMap<String, Vec<u8>> {
    let mut zip = zip::ZipArchive::new(Cursor::new(archive.to_vec())).expect("valid ZIP archive");
    let mut entries = BTreeMap::new();

    for index in 0..zip.len() {
        let mut file = zip.by_index(index).expect("readable entry");
        let mut content = Vec::new();
        file.read_to_end(&mut content).expect("entry content");
        entries.insert(file.name().to_string(), content);
    }

    entries
}

/// Assert that an archive holds exactly `names`
pub fn assert_entry_names(archive: &[u8], names: &[&str]) {
    let entries = zip_entries(archive);
    let mut actual: Vec<&str> = entries.keys().map(String::as_str).collect();
    let mut expected = names.to_vec();
    actual.sort_unstable();
    expected.sort_unstable();
    assert_eq!(actual, expected, "archive entry names differ");
}
