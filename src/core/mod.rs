//! Core functionality for pushy.
//!
//! This module provides the building blocks for listing a site's pending
//! changes and publishing a selection of them as one commit.

pub mod classifier;
pub mod command_init;
pub mod config;
pub mod content;
pub mod dirs;
pub mod error;
pub mod identity;
pub mod output;
pub mod process;
pub mod publish;
pub mod registry;
pub mod repo;
pub mod router;
pub mod status_flag;
pub mod status_parser;

// === Error handling ===
pub use error::{PushyError, Result};

// === Configuration ===
pub use config::PushyConfig;

// === Running git ===
// The runner trait is the seam tests replace with a fake
pub use process::{CommandRunner, ProcessOutput, ProcessRunner, NOOP_EXIT_CODE};
pub use repo::{discover_root, is_git_initialized, PushyRepo};

// === Listing changes ===
pub use classifier::ChangeClassifier;
pub use content::{ContentLookup, FilesystemPages, PageInfo};
pub use registry::{ChangeSetRegistry, ChangedItem, ItemType};
pub use status_flag::StatusFlag;
pub use status_parser::{ChangeRecord, StatusFilter, StatusParser};

// === Publishing ===
pub use identity::{Author, GitConfigIdentity, IdentityProvider, StaticIdentity};
pub use publish::{PublishCoordinator, PublishOutcome, PublishRequest, PublishResult, Selection};

// === Requests ===
pub use router::{RequestRouter, RouterResponse, PUBLISH_ITEMS, READ_ITEMS};

// === Command initialization ===
pub use command_init::{AuthorOverride, CommandContext, CommandInit};

// === Output formatting ===
pub use output::{print_error, print_info, print_items, print_section_header, print_success};
