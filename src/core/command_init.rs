//! Centralized initialization for the repository commands.
//!
//! Every command needs the same setup: load the configuration, find the
//! working tree, and build the page lookup and classifier over it.
//! [`CommandInit`] does that once and hands back a [`CommandContext`].
//!
//! # Initialization Steps
//! 1. **Configuration**: explicit `--config` file, else the default location
//! 2. **Repository discovery**: `--repo` or the current directory, walking up
//! 3. **Collaborators**: page lookup rooted at the working tree, classifier

use crate::core::classifier::ChangeClassifier;
use crate::core::config::PushyConfig;
use crate::core::content::FilesystemPages;
use crate::core::error::Result;
use crate::core::identity::{Author, GitConfigIdentity, IdentityProvider, StaticIdentity};
use crate::core::process::ProcessRunner;
use crate::core::repo::PushyRepo;
use crate::core::router::RequestRouter;
use std::env;
use std::path::{Path, PathBuf};

/// Everything a command needs to talk to the repository
pub struct CommandContext {
    pub config: PushyConfig,
    pub repo: PushyRepo,
    pub lookup: FilesystemPages,
    pub classifier: ChangeClassifier,
}

pub struct CommandInit;

impl CommandInit {
    pub fn initialize(repo_dir: Option<&Path>, config_path: Option<&Path>) -> Result<CommandContext> {
        let config = PushyConfig::load(config_path)?;

        let start = Self::start_dir(repo_dir)?;
        let repo = PushyRepo::open(&start, &config)?;
        log::debug!("Using working tree at {}", repo.root().display());

        let lookup = FilesystemPages::new(repo.root(), &config);
        let classifier = ChangeClassifier::new(&config);

        Ok(CommandContext {
            config,
            repo,
            lookup,
            classifier,
        })
    }

    /// Resolve the working tree directory without loading anything else
    pub fn start_dir(repo_dir: Option<&Path>) -> Result<PathBuf> {
        match repo_dir {
            Some(dir) => Ok(dir.to_path_buf()),
            None => Ok(env::current_dir()?),
        }
    }
}

/// Author overrides given on the command line
#[derive(Debug, Clone, Default)]
pub struct AuthorOverride {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl CommandContext {
    /// Who to attribute a publish to: flags first, then the config file, then git config
    pub fn identity(&self, flags: &AuthorOverride) -> Result<Box<dyn IdentityProvider>> {
        let email = flags
            .email
            .clone()
            .or_else(|| self.config.author.email.clone());
        if let Some(email) = email {
            let name = flags
                .name
                .clone()
                .or_else(|| self.config.author.name.clone())
                .unwrap_or_default();
            log::debug!("Publishing as configured author {email}");
            return Ok(Box::new(StaticIdentity::new(Author::new(name, email))));
        }

        log::debug!("No configured author, reading git config");
        Ok(Box::new(GitConfigIdentity::open(self.repo.root())?))
    }

    pub fn router<'a>(&'a self, identity: &'a dyn IdentityProvider) -> RequestRouter<'a, ProcessRunner> {
        RequestRouter::new(&self.repo, &self.classifier, &self.lookup, identity)
    }
}
