use goan::chunker::{chunk_path, clean_chunks, split_file, ChunkPlan};
use std::path::Path;

fn write_source(dir: &Path, content: &[u8]) -> ChunkPlan {
    let source = dir.join("routines-trace.txt");
    std::fs::write(&source, content).unwrap();
    ChunkPlan::new(source, content.len() as u64, 7).unwrap()
}

#[test]
fn test_split_concatenation_equals_source() {
    let dir = tempfile::tempdir().unwrap();
    let content = b"goroutine 1 [running]:\nmain.main()\n\ngoroutine 2 [idle]:\nf()\n";
    let plan = write_source(dir.path(), content);

    let written = split_file(&plan).unwrap();

    assert_eq!(written.len() as u64, plan.parts());
    let joined: Vec<u8> = written
        .iter()
        .flat_map(|p| std::fs::read(p).unwrap())
        .collect();
    assert_eq!(joined, content);
}

#[test]
fn test_split_names_chunks_after_source() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write_source(dir.path(), b"0123456789");

    let written = split_file(&plan).unwrap();

    assert_eq!(
        written,
        vec![
            dir.path().join("routines-trace_1.txt"),
            dir.path().join("routines-trace_2.txt"),
        ]
    );
    assert_eq!(written[0], chunk_path(&plan.source, 1));
}

#[test]
fn test_split_then_clean_removes_exactly_chunks() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write_source(dir.path(), b"abcdefghijklmnopqrstu");

    let written = split_file(&plan).unwrap();
    let removed = clean_chunks(&plan).unwrap();

    assert_eq!(removed, written.len());
    assert!(written.iter().all(|p| !p.exists()));
    assert!(plan.source.exists());
}

#[test]
fn test_exact_multiple_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write_source(dir.path(), b"abcdefghijklmn");

    let written = split_file(&plan).unwrap();

    assert_eq!(plan.parts(), 3);
    assert_eq!(written.len(), 2);
    assert_eq!(clean_chunks(&plan).unwrap(), 2);
}

#[test]
fn test_clean_twice_fails() {
    let dir = tempfile::tempdir().unwrap();
    let plan = write_source(dir.path(), b"abc");

    split_file(&plan).unwrap();
    clean_chunks(&plan).unwrap();

    assert!(clean_chunks(&plan).is_err());
}

#[test]
fn test_split_missing_source_fails() {
    let dir = tempfile::tempdir().unwrap();
    let plan = ChunkPlan::new(dir.path().join("gone.txt"), 10, 4).unwrap();

    assert!(split_file(&plan).is_err());
}
