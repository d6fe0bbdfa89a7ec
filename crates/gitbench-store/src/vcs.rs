//! Version-control seam
//!
//! The engine only ever talks to `dyn Vcs`. `GitCli` drives the real `git`
//! binary; `NoVcs` backs the dump-only variant.

#![allow(clippy::result_large_err)]

use std::path::{Path, PathBuf};
use std::process::Command;

use gitbench_core::config::GitIdentity;

use crate::errors::Result;
use crate::tools::run_tool;

pub trait Vcs {
    /// Create an empty repository in the work directory
    fn init(&self) -> Result<()>;

    /// Stage `path` and record a commit with `message`
    ///
    /// A commit is recorded even when `path` is unchanged.
    fn commit(&self, path: &Path, message: &str) -> Result<()>;

    /// Repack the repository as tightly as the tool allows
    fn gc_aggressive(&self) -> Result<()>;

    /// Repository metadata directory, if this implementation keeps one
    fn repo_dir(&self) -> Option<PathBuf>;
}

/// Drives the `git` command-line client inside the work directory
#[derive(Debug, Clone)]
pub struct GitCli {
    bin: String,
    workdir: PathBuf,
    identity: Option<GitIdentity>,
}

impl GitCli {
    pub fn new(bin: impl Into<String>, workdir: impl Into<PathBuf>) -> Self {
        Self {
            bin: bin.into(),
            workdir: workdir.into(),
            identity: None,
        }
    }

    /// Commit as `identity` instead of the user's git configuration
    pub fn with_identity(mut self, identity: Option<GitIdentity>) -> Self {
        self.identity = identity;
        self
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(&self.workdir);
        if let Some(identity) = &self.identity {
            cmd.env("GIT_AUTHOR_NAME", &identity.name)
                .env("GIT_AUTHOR_EMAIL", &identity.email)
                .env("GIT_COMMITTER_NAME", &identity.name)
                .env("GIT_COMMITTER_EMAIL", &identity.email);
        }
        cmd
    }
}

impl Vcs for GitCli {
    fn init(&self) -> Result<()> {
        run_tool("git_init", self.git().arg("init"))?;
        Ok(())
    }

    fn commit(&self, path: &Path, message: &str) -> Result<()> {
        run_tool("git_add", self.git().arg("add").arg(path))?;
        let output = run_tool(
            "git_commit",
            self.git().args(["commit", "--allow-empty", "-m", message]),
        )?;
        let stdout = output.stdout_lossy();
        tracing::debug!(
            component = module_path!(),
            op = "git_commit",
            summary = stdout.lines().next().unwrap_or_default(),
        );
        Ok(())
    }

    fn gc_aggressive(&self) -> Result<()> {
        run_tool("git_gc", self.git().args(["gc", "--aggressive"]))?;
        Ok(())
    }

    fn repo_dir(&self) -> Option<PathBuf> {
        Some(self.workdir.join(".git"))
    }
}

/// No version control: every operation succeeds without side effects
#[derive(Debug, Clone, Copy, Default)]
pub struct NoVcs;

impl Vcs for NoVcs {
    fn init(&self) -> Result<()> {
        Ok(())
    }

    fn commit(&self, _path: &Path, _message: &str) -> Result<()> {
        Ok(())
    }

    fn gc_aggressive(&self) -> Result<()> {
        Ok(())
    }

    fn repo_dir(&self) -> Option<PathBuf> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_vcs_is_inert() {
        let vcs = NoVcs;
        vcs.init().unwrap();
        vcs.commit(Path::new("bench.sql"), "msg").unwrap();
        vcs.gc_aggressive().unwrap();
        assert!(vcs.repo_dir().is_none());
    }

    #[test]
    fn test_git_repo_dir_is_inside_workdir() {
        let git = GitCli::new("git", "/tmp/work");
        assert_eq!(git.repo_dir(), Some(PathBuf::from("/tmp/work/.git")));
    }

    #[test]
    fn test_identity_is_exported_to_git() {
        let git = GitCli::new("git", "/tmp/work").with_identity(Some(GitIdentity {
            name: "Bench".to_string(),
            email: "bench@example.com".to_string(),
        }));
        let cmd = git.git();
        let envs: Vec<(String, String)> = cmd
            .get_envs()
            .filter_map(|(k, v)| {
                Some((k.to_string_lossy().into_owned(), v?.to_string_lossy().into_owned()))
            })
            .collect();

        assert!(envs.contains(&("GIT_AUTHOR_NAME".to_string(), "Bench".to_string())));
        assert!(envs.contains(&(
            "GIT_COMMITTER_EMAIL".to_string(),
            "bench@example.com".to_string()
        )));
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/tmp/work")));
    }
}
