use std::fs;

use disclosure_engine::{ensure_output_dir, CommitOutcome, StreamingFileWriter};
use tempfile::TempDir;

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("PDFs");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[cfg(unix)]
#[test]
fn new_output_dir_is_not_group_or_world_writable() {
    use std::os::unix::fs::PermissionsExt;

    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("PDFs");
    ensure_output_dir(&new_dir).unwrap();
    let mode = fs::metadata(&new_dir).unwrap().permissions().mode();
    assert_eq!(mode & 0o022, 0);
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("PDFs");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn committed_stream_lands_under_final_name() {
    let temp = TempDir::new().unwrap();
    let mut writer = StreamingFileWriter::create(temp.path(), 4).unwrap();
    writer.write_chunk(b"%PDF-").unwrap();
    writer.write_chunk(b"1.7").unwrap();

    let outcome = writer.commit("sheet.pdf").unwrap();
    let path = temp.path().join("sheet.pdf");
    assert_eq!(
        outcome,
        CommitOutcome::Written {
            path: path.clone(),
            bytes: 8
        }
    );
    assert_eq!(fs::read(&path).unwrap(), b"%PDF-1.7");
}

#[test]
fn commit_never_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("sheet.pdf");
    fs::write(&path, "original").unwrap();

    let mut writer = StreamingFileWriter::create(temp.path(), 8192).unwrap();
    writer.write_chunk(b"replacement").unwrap();
    let outcome = writer.commit("sheet.pdf").unwrap();

    assert_eq!(outcome, CommitOutcome::AlreadyExists { path: path.clone() });
    assert_eq!(fs::read_to_string(&path).unwrap(), "original");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn abandoned_stream_leaves_nothing_behind() {
    let temp = TempDir::new().unwrap();
    let mut writer = StreamingFileWriter::create(temp.path(), 8192).unwrap();
    writer.write_chunk(b"partial").unwrap();
    drop(writer);

    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
}
