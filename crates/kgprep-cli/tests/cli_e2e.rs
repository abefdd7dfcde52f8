use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::tempdir;

fn kgprep_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_kgprep"))
}

fn run_kgprep(cwd: &Path, args: &[&str]) -> Output {
    Command::new(kgprep_bin())
        .current_dir(cwd)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("spawn kgprep")
}

fn write_dataset(dir: &Path) {
    fs::write(dir.join("train_1.txt"), "u1 i1 i2\n").unwrap();
    fs::write(dir.join("test_1.txt"), "u2 i2\n").unwrap();
    fs::write(dir.join("kg.txt"), "a r1 b\nb r1 c\n").unwrap();
}

#[test]
fn run_with_defaults_writes_processed_dataset() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let output = run_kgprep(dir.path(), &["run"]);
    assert!(
        output.status.success(),
        "kgprep run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = dir.path().join("processed_dataset");
    assert_eq!(
        fs::read_to_string(out.join("train_triplets.csv")).unwrap(),
        "user,item,rating\nu1,i1,1\nu1,i2,1\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("test_triplets.csv")).unwrap(),
        "user,item,rating\nu2,i2,1\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("entities.csv")).unwrap(),
        "a,0\nb,1\nc,2\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("relations.csv")).unwrap(),
        "r1,0\n"
    );
    assert_eq!(
        fs::read_to_string(out.join("kg_processed.csv")).unwrap(),
        "head,relation,tail\n0,0,1\n1,0,2\n"
    );
}

#[test]
fn run_honors_config_file_and_flags() {
    let dir = tempdir().unwrap();
    let data = dir.path().join("data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("train_1.txt"), "u1 i1 i1\n").unwrap();
    fs::write(data.join("test_1.txt"), "u1 i2\n").unwrap();
    fs::write(data.join("graph.txt"), "x r y\n").unwrap();
    fs::write(
        dir.path().join("kgprep.json"),
        r#"{ "input_dir": "data", "kg_file": "graph.txt", "output_dir": "from_config" }"#,
    )
    .unwrap();

    let output = run_kgprep(
        dir.path(),
        &[
            "run",
            "--config",
            "kgprep.json",
            "--output-dir",
            "from_flag",
            "--dedup",
        ],
    );
    assert!(
        output.status.success(),
        "kgprep run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let out = dir.path().join("from_flag");
    assert!(!dir.path().join("from_config").exists());
    assert_eq!(
        fs::read_to_string(out.join("train_triplets.csv")).unwrap(),
        "user,item,rating\nu1,i1,1\n"
    );
    assert!(out.join("graph_processed.csv").exists());
}

#[test]
fn malformed_triple_fails_without_graph_outputs() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());
    fs::write(dir.path().join("kg.txt"), "a r1 b\nb r1\n").unwrap();

    let output = run_kgprep(dir.path(), &["run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("expected 3 tokens"),
        "unexpected stderr: {stderr}"
    );

    let out = dir.path().join("processed_dataset");
    assert!(out.join("train_triplets.csv").exists());
    assert!(!out.join("entities.csv").exists());
    assert!(!out.join("relations.csv").exists());
    assert!(!out.join("kg_processed.csv").exists());
}

#[test]
fn skip_malformed_flag_keeps_going() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());
    fs::write(dir.path().join("kg.txt"), "a r1 b\nb r1\nb r1 c\n").unwrap();

    let output = run_kgprep(dir.path(), &["run", "--skip-malformed"]);
    assert!(
        output.status.success(),
        "kgprep run failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("processed_dataset/kg_processed.csv")).unwrap(),
        "head,relation,tail\n0,0,1\n1,0,2\n"
    );
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let output = run_kgprep(dir.path(), &["run"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("input file not found"),
        "unexpected stderr: {stderr}"
    );
}

#[test]
fn triplets_and_index_subcommands() {
    let dir = tempdir().unwrap();
    write_dataset(dir.path());

    let output = run_kgprep(
        dir.path(),
        &["triplets", "train_1.txt", "-o", "single/train.csv"],
    );
    assert!(output.status.success());
    assert_eq!(
        fs::read_to_string(dir.path().join("single/train.csv")).unwrap(),
        "user,item,rating\nu1,i1,1\nu1,i2,1\n"
    );

    let output = run_kgprep(dir.path(), &["index", "kg.txt", "--out-dir", "graph_out"]);
    assert!(output.status.success());
    let out = dir.path().join("graph_out");
    assert_eq!(fs::read_to_string(out.join("relations.csv")).unwrap(), "r1,0\n");
    assert!(out.join("kg_processed.csv").exists());
}
