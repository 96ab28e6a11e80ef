#![cfg(feature = "std")]

use std::io::Cursor;

use nrb::prelude::*;
use pretty_assertions::assert_eq;

fn etude() -> &'static [u8] {
    include_bytes!("../test-asset/Etude.nrb")
}

#[test]
fn parse_from_reader_leaves_trailing_data() {
    let mut data = etude().to_vec();
    data.extend(b"tail");
    let mut cursor = Cursor::new(data);

    let parsed = Document::parse_reader(&mut cursor).unwrap();
    assert_eq!(parsed.document.note_count(), 7);
    assert_eq!(cursor.position() as usize, etude().len());
}

#[test]
fn truncated_reader_is_out_of_bounds() {
    let failure = Document::parse_reader(&etude()[..100]).unwrap_err();
    assert_eq!(failure.version, VersionStatus::Supported);
    assert!(failure.error.is_out_of_bounds());
}

#[test]
fn serialize_to_writer() {
    let doc = Document::parse(etude()).unwrap().document;
    let mut out: Vec<u8> = Vec::new();
    doc.serialize_writer(&mut out).unwrap();
    assert_eq!(out, etude());
}

#[test]
fn parse_path_round_trip() {
    let path = std::env::temp_dir().join(format!("nrb-io-test-{}.nrb", std::process::id()));
    let doc = Document::parse(etude()).unwrap().document;
    doc.serialize_writer(std::fs::File::create(&path).unwrap())
        .unwrap();

    let parsed = parse_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(parsed.document, doc);
}

#[test]
fn missing_file_is_unreadable() {
    let failure = parse_path("/this/path/does/not/exist.nrb").unwrap_err();
    assert_eq!(failure.version, VersionStatus::Unreadable);
    assert_eq!(
        failure.error.error_kind(),
        &ReaderErrorKind::Io(std::io::ErrorKind::NotFound)
    );
}
