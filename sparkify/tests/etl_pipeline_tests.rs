use anyhow::{Context, Result};
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Abstraction for managing the Sparkify test environment.
struct SparkifyTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl SparkifyTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let project_root = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .context("Workspace root not found")?
            .join("fixtures/sample_project");

        let dest = tmp.path().join("sample_project");
        Self::copy_dir(&project_root, &dest)?;

        Ok(Self {
            _tmp: tmp,
            root: dest,
        })
    }

    fn copy_dir(src: &PathBuf, dst: &PathBuf) -> std::io::Result<()> {
        let mut options = fs_extra::dir::CopyOptions::new();
        options.skip_exist = true;
        options.content_only = true;

        std::fs::create_dir_all(dst)?;
        fs_extra::dir::copy(src, dst, &options)
            .map(|_| ())
            .map_err(|e| std::io::Error::other(e.to_string()))
    }

    fn sparkify(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("sparkify"));
        cmd.current_dir(&self.root);
        cmd.env_remove("SPARKIFY_DB_PATH")
            .env_remove("SPARKIFY_TARGET_PATH")
            .env_remove("SPARKIFY_LOG_PATTERN")
            .env_remove("SPARKIFY_SONG_PATTERN");
        cmd
    }

    fn count(&self, sql: &str) -> Result<i64> {
        let conn = duckdb::Connection::open(self.root.join("sparkify.duckdb"))?;
        Ok(conn.query_row(sql, [], |row| row.get(0))?)
    }
}

#[test]
fn test_run_loads_star_schema() -> Result<()> {
    let env = SparkifyTestEnv::new()?;

    env.sparkify()
        .arg("run")
        .assert()
        .success()
        .stdout(predicate::str::contains("SUCCESS"));

    assert_eq!(env.count("SELECT count(*) FROM songplays")?, 5);
    assert_eq!(env.count("SELECT count(*) FROM users")?, 3);
    assert_eq!(env.count("SELECT count(*) FROM songs")?, 3);
    assert_eq!(env.count("SELECT count(*) FROM artists")?, 3);
    assert_eq!(env.count("SELECT count(*) FROM \"time\"")?, 5);

    // Plays without a catalog match keep null references
    assert_eq!(
        env.count("SELECT count(*) FROM songplays WHERE song_id IS NULL AND artist_id IS NULL")?,
        2
    );
    // Every time row shares its key with a fact row
    assert_eq!(
        env.count(
            "SELECT count(*) FROM \"time\" t JOIN songplays s ON s.songplay_id = t.songplay_id"
        )?,
        5
    );
    assert_eq!(
        env.count("SELECT count(*) FROM \"time\" WHERE weekday NOT BETWEEN 0 AND 6")?,
        0
    );
    // User 15 upgraded from free to paid
    assert_eq!(env.count("SELECT count(*) FROM users WHERE user_id = 15")?, 2);

    let results = std::fs::read_to_string(env.root.join("target/run_results.json"))?;
    assert!(results.contains("\"matched_plays\": 3"));
    Ok(())
}

#[test]
fn test_run_is_repeatable() -> Result<()> {
    let env = SparkifyTestEnv::new()?;

    env.sparkify().arg("run").assert().success();
    env.sparkify().arg("run").assert().success();

    assert_eq!(env.count("SELECT count(*) FROM songplays")?, 5);
    assert_eq!(env.count("SELECT count(*) FROM users")?, 3);
    Ok(())
}

#[test]
fn test_malformed_log_fails_run() -> Result<()> {
    let env = SparkifyTestEnv::new()?;
    std::fs::write(
        env.root.join("data/log_data/2018/11/2018-11-03-events.json"),
        "{\"page\": \"NextSong\", \"userId\": \n",
    )?;

    env.sparkify()
        .arg("run")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed record"));

    assert!(!env.root.join("target/run_results.json").exists());
    Ok(())
}

#[test]
fn test_skip_file_policy_tolerates_malformed_log() -> Result<()> {
    let env = SparkifyTestEnv::new()?;
    std::fs::write(env.root.join("sparkify.yaml"), "on-malformed: skip_file\n")?;
    std::fs::write(
        env.root.join("data/log_data/2018/11/2018-11-03-events.json"),
        "not json at all\n",
    )?;

    env.sparkify().arg("run").assert().success();

    assert_eq!(env.count("SELECT count(*) FROM songplays")?, 5);
    Ok(())
}

#[test]
fn test_inspect_and_query_after_run() -> Result<()> {
    let env = SparkifyTestEnv::new()?;
    env.sparkify().arg("run").assert().success();

    env.sparkify()
        .args(["inspect", "--table", "artists"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Planet P Project"))
        .stdout(predicate::str::contains("artist_id"));

    env.sparkify()
        .args(["query", "SELECT title FROM songs ORDER BY year DESC"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Pink World"));
    Ok(())
}

#[test]
fn test_inspect_without_database() -> Result<()> {
    let env = SparkifyTestEnv::new()?;
    env.sparkify()
        .args(["inspect", "--table", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Database not found"));
    Ok(())
}

#[test]
fn test_ddl_lists_every_table() -> Result<()> {
    let env = SparkifyTestEnv::new()?;
    let assert = env.sparkify().arg("ddl").assert().success();

    let output = String::from_utf8(assert.get_output().stdout.clone())?;
    for table in ["songplays", "users", "songs", "artists", "time"] {
        assert!(output.contains(&format!("DROP TABLE IF EXISTS \"{table}\"")));
        assert!(output.contains(&format!("CREATE TABLE IF NOT EXISTS \"{table}\"")));
    }
    Ok(())
}
