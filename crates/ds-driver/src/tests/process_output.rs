use crate::{MAX_CAPTURED_BYTES, ProcessOutput};

use googletest::assert_that;
use googletest::prelude::{contains_substring, eq, not};
use tempfile::TempDir;

#[test]
fn given_missing_files_when_read_then_empty_output() {
    let temp = TempDir::new().unwrap();

    let output = ProcessOutput::read_from(&temp.path().join("a"), &temp.path().join("b"));

    assert!(output.is_empty());
    assert_that!(output.to_string(), eq(""));
}

#[test]
fn given_small_files_when_read_then_full_content_and_labelled_display() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("stdout.log");
    let err = temp.path().join("stderr.log");
    std::fs::write(&out, "listening\n").unwrap();
    std::fs::write(&err, "warning: slow disk\n").unwrap();

    let output = ProcessOutput::read_from(&out, &err);

    assert_that!(output.stdout, eq("listening\n"));
    assert_that!(output.stderr, eq("warning: slow disk\n"));
    let rendered = output.to_string();
    assert_that!(
        rendered,
        contains_substring("--- server stdout ---\nlistening")
    );
    assert_that!(
        rendered,
        contains_substring("--- server stderr ---\nwarning: slow disk")
    );
}

#[test]
fn given_oversized_file_when_read_then_only_tail_kept() {
    let temp = TempDir::new().unwrap();
    let out = temp.path().join("stdout.log");
    let mut content = "x".repeat(MAX_CAPTURED_BYTES as usize);
    content.insert_str(0, "FIRST-LINE\n");
    content.push_str("LAST-LINE");
    std::fs::write(&out, &content).unwrap();

    let output = ProcessOutput::read_from(&out, &temp.path().join("none"));

    assert_that!(output.stdout, contains_substring("earlier bytes omitted"));
    assert_that!(output.stdout, contains_substring("LAST-LINE"));
    assert_that!(output.stdout, not(contains_substring("FIRST-LINE")));
}
