//! Git repository management and setup utilities
//!
//! Provides throwaway repositories plus a matching config file so the binary
//! under test never reads the developer's own configuration.

#![allow(dead_code)]

use pushy::core::config::PushyConfig;
use pushy::core::error::{PushyError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// A repository plus the config file the binary is pointed at.
///
/// Both TempDirs must stay alive for the duration of the test.
pub struct TestRepo {
    pub temp_dir: TempDir,
    pub path: PathBuf,
    pub config_dir: TempDir,
    pub config_path: PathBuf,
}

impl TestRepo {
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The pushy binary, run inside the repository with the test config
    pub fn pushy(&self) -> Result<assert_cmd::Command> {
        let mut cmd = assert_cmd::Command::cargo_bin("pushy")
            .map_err(|e| PushyError::process_spawn("pushy", std::io::Error::other(e.to_string())))?;
        cmd.arg("--config")
            .arg(&self.config_path)
            .current_dir(&self.path)
            .env_remove("RUST_LOG");
        Ok(cmd)
    }

    pub fn write_config(&self, config: &PushyConfig) -> Result<()> {
        config.save_to(&self.config_path)
    }
}

/// Runs git in the repository and returns its stdout
pub fn git(repo_path: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_path)
        .output()?;
    if !output.status.success() {
        return Err(PushyError::process(
            format!("git {}", args.join(" ")),
            output.status.code(),
            &[String::from_utf8_lossy(&output.stderr).to_string()],
        ));
    }
    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

/// Sets up a fresh git repository with a committer identity and default config
pub fn setup_test_repo() -> Result<TestRepo> {
    let temp_dir = TempDir::new()?;
    let repo_path = temp_dir.path().to_path_buf();
    let config_dir = TempDir::new()?;
    let config_path = config_dir.path().join("config.json");

    git(&repo_path, &["init", "--quiet"])?;
    git(&repo_path, &["config", "user.name", "Test User"])?;
    git(&repo_path, &["config", "user.email", "test@example.com"])?;
    git(&repo_path, &["config", "commit.gpgsign", "false"])?;

    let repo = TestRepo {
        temp_dir,
        path: repo_path,
        config_dir,
        config_path,
    };
    repo.write_config(&PushyConfig::default())?;
    Ok(repo)
}

/// Creates a file, and any missing parent folders, with the given content
pub fn create_file(repo_path: &Path, filename: &str, content: &str) -> Result<()> {
    let path = repo_path.join(filename);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

pub fn remove_file(repo_path: &Path, filename: &str) -> Result<()> {
    fs::remove_file(repo_path.join(filename))?;
    Ok(())
}

pub fn git_add(repo_path: &Path, filename: &str) -> Result<()> {
    git(repo_path, &["add", "--all", "--", filename])?;
    Ok(())
}

pub fn git_commit(repo_path: &Path, message: &str) -> Result<()> {
    git(repo_path, &["commit", "--quiet", "-m", message])?;
    Ok(())
}

pub fn git_mv(repo_path: &Path, from: &str, to: &str) -> Result<()> {
    if let Some(parent) = repo_path.join(to).parent() {
        fs::create_dir_all(parent)?;
    }
    git(repo_path, &["mv", from, to])?;
    Ok(())
}

/// Number of commits reachable from HEAD, zero before the first commit
pub fn commit_count(repo_path: &Path) -> Result<usize> {
    match git(repo_path, &["rev-list", "--count", "HEAD"]) {
        Ok(count) => Ok(count.trim().parse().unwrap_or(0)),
        Err(_) => Ok(0),
    }
}

/// `Name <email>|subject` of the last commit
pub fn last_commit(repo_path: &Path) -> Result<String> {
    Ok(git(repo_path, &["log", "-1", "--format=%an <%ae>|%s"])?
        .trim()
        .to_string())
}

/// Paths touched by the last commit, with their status letter
pub fn last_commit_files(repo_path: &Path) -> Result<Vec<String>> {
    let output = git(
        repo_path,
        &["show", "--name-status", "--format=", "--find-renames", "HEAD"],
    )?;
    Ok(output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect())
}
