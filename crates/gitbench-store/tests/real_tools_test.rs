// Integration tests against the real git and sqlite3 binaries.
// Each test returns early when a tool is not installed.

use std::process::Command;

use gitbench_core::config::GitIdentity;
use gitbench_store::db;
use gitbench_store::tools::tool_available;
use gitbench_store::{BenchPaths, Dumper, GitCli, Sqlite3Dumper, Vcs};
use tempfile::TempDir;

fn tools_present(tools: &[&str]) -> bool {
    let missing: Vec<&&str> = tools.iter().filter(|t| !tool_available(t)).collect();
    if !missing.is_empty() {
        eprintln!("skipping: {:?} not installed", missing);
        return false;
    }
    true
}

fn identity() -> Option<GitIdentity> {
    Some(GitIdentity {
        name: "gitbench".to_string(),
        email: "gitbench@example.com".to_string(),
    })
}

fn commit_count(workdir: &std::path::Path) -> usize {
    let out = Command::new("git")
        .current_dir(workdir)
        .args(["rev-list", "--count", "HEAD"])
        .output()
        .unwrap();
    String::from_utf8_lossy(&out.stdout).trim().parse().unwrap()
}

#[test]
fn test_sqlite3_dump_contains_schema_and_rows() {
    if !tools_present(&["sqlite3"]) {
        return;
    }
    let temp = TempDir::new().unwrap();
    let paths = BenchPaths::resolve(temp.path().join("work")).unwrap();
    paths.reset().unwrap();
    db::create_schema(&paths.db_file(), 2, 3).unwrap();
    db::execute_op(
        &paths.db_file(),
        "insert into table1 (field0,field1,field2) values (7,8,9)",
    )
    .unwrap();

    let size = Sqlite3Dumper::default()
        .dump(&paths.db_file(), &paths.dump_file())
        .unwrap();

    let dump = std::fs::read_to_string(paths.dump_file()).unwrap();
    assert_eq!(size, dump.len() as u64);
    assert!(dump.contains("CREATE TABLE table0"));
    assert!(dump.contains("CREATE TABLE table1"));
    assert!(dump.contains("VALUES(1,7,8,9);"));
}

#[test]
fn test_git_commit_and_gc() {
    if !tools_present(&["git"]) {
        return;
    }
    let temp = TempDir::new().unwrap();
    let paths = BenchPaths::resolve(temp.path().join("work")).unwrap();
    paths.reset().unwrap();

    let git = GitCli::new("git", paths.root()).with_identity(identity());
    git.init().unwrap();
    assert!(paths.git_dir().is_dir());

    std::fs::write(paths.dump_file(), "-- first\n").unwrap();
    git.commit(&paths.dump_file(), "Commit empty database").unwrap();
    std::fs::write(paths.dump_file(), "-- second\n").unwrap();
    git.commit(&paths.dump_file(), "Operation #0: insert table #0")
        .unwrap();

    assert_eq!(commit_count(paths.root()), 2);

    git.gc_aggressive().unwrap();
    assert_eq!(commit_count(paths.root()), 2);
}

#[test]
fn test_unchanged_dump_still_records_a_commit() {
    if !tools_present(&["git"]) {
        return;
    }
    let temp = TempDir::new().unwrap();
    let paths = BenchPaths::resolve(temp.path().join("work")).unwrap();
    paths.reset().unwrap();

    let git = GitCli::new("git", paths.root()).with_identity(identity());
    git.init().unwrap();
    std::fs::write(paths.dump_file(), "-- same\n").unwrap();
    git.commit(&paths.dump_file(), "Commit empty database").unwrap();
    git.commit(&paths.dump_file(), "Operation #0: update table #0")
        .unwrap();

    assert_eq!(commit_count(paths.root()), 2);
}
