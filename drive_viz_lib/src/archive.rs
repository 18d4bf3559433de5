use std::{
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use crate::error::ExtractError;

/// Returns the text of the 1-based `line_number` in the file at `path`.
/// Reads sequentially up to the target line and no further.
pub fn nth_line(path: &Path, line_number: usize) -> Result<String, ExtractError> {
    if line_number == 0 {
        return Err(ExtractError::LineOutOfRange {
            line_number,
            lines_read: 0,
        });
    }

    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut lines_read = 0;
    for line in reader.lines() {
        let line = line?;
        lines_read += 1;
        if lines_read == line_number {
            return Ok(line);
        }
    }

    Err(ExtractError::LineOutOfRange {
        line_number,
        lines_read,
    })
}

#[cfg(test)]
fn write_temp_archive(name: &str, content: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("drive_viz_{}_{}", std::process::id(), name));
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn returns_the_requested_line() {
    let path = write_temp_archive("nth", "first\nsecond\nthird\n");
    assert_eq!(nth_line(&path, 2).unwrap(), "second");
    std::fs::remove_file(path).unwrap();
}

#[test]
fn line_past_the_end_is_a_fault() {
    let path = write_temp_archive("short", "only\n");
    let err = nth_line(&path, 5).unwrap_err();
    assert!(matches!(
        err,
        ExtractError::LineOutOfRange { line_number: 5, lines_read: 1 }
    ));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn line_zero_is_a_fault() {
    let path = write_temp_archive("zero", "only\n");
    assert!(matches!(
        nth_line(&path, 0).unwrap_err(),
        ExtractError::LineOutOfRange { line_number: 0, .. }
    ));
    std::fs::remove_file(path).unwrap();
}

#[test]
fn missing_file_is_an_io_fault() {
    let path = std::env::temp_dir().join("drive_viz_does_not_exist.csv");
    assert!(matches!(nth_line(&path, 1).unwrap_err(), ExtractError::Io(_)));
}
