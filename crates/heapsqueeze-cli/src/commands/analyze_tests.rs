use std::io::Write;
use std::path::PathBuf;

use heapsqueeze_core::BasicType;
use heapsqueeze_hprof::{HprofWriter, encode_fields};
use heapsqueeze_lib::AnalysisError;

use super::CommandError;
use super::analyze::{AnalyzeArgs, render};
use super::estimates::{self, EstimatesArgs};

fn write_dump() -> tempfile::NamedTempFile {
    let mut w = HprofWriter::new(Vec::new(), 8).unwrap();
    w.class_dump(1, "java/lang/Object", 0, &[]).unwrap();
    w.class_dump(
        2,
        "java/lang/String",
        1,
        &[("value", BasicType::Object), ("hash", BasicType::Int)],
    )
    .unwrap();
    w.char_array_dump(10, "hello");
    w.instance_dump(
        11,
        2,
        &encode_fields(8, &[(BasicType::Object, 10), (BasicType::Int, 0)]),
    );
    let dump = w.finish().unwrap();

    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(&dump).unwrap();
    file
}

fn analyze_args(heapdump: PathBuf, json: bool) -> AnalyzeArgs {
    AnalyzeArgs {
        heapdump,
        text_class: "java/lang/String".to_owned(),
        json,
    }
}

#[test]
fn table_has_header_and_four_rows() {
    let file = write_dump();
    let mut out = Vec::new();
    render(&analyze_args(file.path().to_owned(), false), &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("\"       total\""));
    assert!(lines[4].ends_with("\"x86-64 compressed oops, 16-byte aligned\""));
}

#[test]
fn json_report() {
    let file = write_dump();
    let mut out = Vec::new();
    render(&analyze_args(file.path().to_owned(), true), &mut out).unwrap();

    let json: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(json["rows"].as_array().unwrap().len(), 4);
}

#[test]
fn missing_file_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut out = Vec::<u8>::new();
    let err = render(&analyze_args(dir.path().join("nope.hprof"), false), &mut out).unwrap_err();

    assert!(matches!(err, CommandError::Analysis(AnalysisError::Hprof(_))));
    assert!(out.is_empty());
}

#[test]
fn estimates_print_every_model() {
    let file = write_dump();
    let mut out = Vec::new();
    let args = EstimatesArgs {
        heapdump: file.path().to_owned(),
        class: "java/lang/String".to_owned(),
    };
    estimates::render(&args, &mut out).unwrap();

    let text = String::from_utf8(out).unwrap();
    let headings: Vec<&str> = text.lines().filter(|l| l.starts_with("***** ")).collect();
    insta::assert_snapshot!(headings.join("\n"), @r"
    ***** x86 32-bit, 8-byte aligned
    ***** x86-64, 8-byte aligned
    ***** x86-64 compressed oops, 8-byte aligned
    ***** x86-64 compressed oops, 16-byte aligned
    ");
}

#[test]
fn estimates_unknown_class() {
    let file = write_dump();
    let args = EstimatesArgs {
        heapdump: file.path().to_owned(),
        class: "Nope".to_owned(),
    };
    let err = estimates::render(&args, &mut Vec::<u8>::new()).unwrap_err();
    assert_eq!(err.to_string(), "class Nope not found in heap dump");
}
