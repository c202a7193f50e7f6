//! Who a publish is attributed to.

use crate::core::error::{PushyError, Result};
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub full_name: String,
    pub email: String,
}

impl Author {
    pub fn new(full_name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            email: email.into(),
        }
    }

    /// Name to put in the commit; falls back to the local part of the email
    pub fn display_name(&self) -> &str {
        let name = self.full_name.trim();
        if !name.is_empty() {
            return name;
        }
        self.email
            .split('@')
            .next()
            .map(str::trim)
            .unwrap_or_default()
    }
}

/// Formats as git's `Name <email>` author string
impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.display_name(), self.email.trim())
    }
}

pub trait IdentityProvider {
    fn current_user(&self) -> Result<Author>;
}

/// A fixed identity, from command line flags or the config file
pub struct StaticIdentity {
    author: Author,
}

impl StaticIdentity {
    pub fn new(author: Author) -> Self {
        Self { author }
    }
}

impl IdentityProvider for StaticIdentity {
    fn current_user(&self) -> Result<Author> {
        Ok(self.author.clone())
    }
}

/// Reads `user.name` and `user.email` from the repository's git configuration
pub struct GitConfigIdentity {
    repo: git2::Repository,
}

impl GitConfigIdentity {
    pub fn open(repo_root: &Path) -> Result<Self> {
        Ok(Self {
            repo: git2::Repository::open(repo_root)?,
        })
    }
}

impl IdentityProvider for GitConfigIdentity {
    fn current_user(&self) -> Result<Author> {
        let config = self.repo.config()?;
        let name = config.get_string("user.name").unwrap_or_default();
        let email = config
            .get_string("user.email")
            .map_err(|_| PushyError::missing_identity("user.email is not set"))?;
        Ok(Author::new(name, email))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_author_format() {
        let author = Author::new("Jane Editor", "jane@example.com");
        assert_eq!(author.to_string(), "Jane Editor <jane@example.com>");
    }

    #[test]
    fn test_author_name_falls_back_to_email() {
        let author = Author::new("  ", "editor@example.com");
        assert_eq!(author.to_string(), "editor <editor@example.com>");
    }

    #[test]
    fn test_static_identity() {
        let provider = StaticIdentity::new(Author::new("A", "a@example.com"));
        assert_eq!(provider.current_user().unwrap().full_name, "A");
    }

    #[test]
    fn test_git_config_identity() {
        let dir = TempDir::new().unwrap();
        let repo = git2::Repository::init(dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();

        let provider = GitConfigIdentity::open(dir.path()).unwrap();
        assert_eq!(
            provider.current_user().unwrap(),
            Author::new("Test User", "test@example.com")
        );
    }
}
