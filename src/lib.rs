//! Pushy - publish a site's content changes from its admin panel to git.
//!
//! The library lists the pending changes under a site's tracked folders,
//! classifies them as pages, modules, config or other files, and commits an
//! editor's selection as one attributed commit.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module:
//! - Change listing: [`PushyRepo`], [`ChangeClassifier`], [`ChangeSetRegistry`]
//! - Publishing: [`PublishCoordinator`], [`PublishRequest`], [`PublishResult`]
//! - Request dispatch: [`RequestRouter`]
//! - Error handling and result types

pub mod commands;
pub mod core;

pub use core::{
    // Listing
    ChangeClassifier,
    ChangeRecord,
    ChangeSetRegistry,
    ChangedItem,
    // Running git
    CommandRunner,
    ContentLookup,
    FilesystemPages,
    ItemType,

    // Publishing
    Author,
    IdentityProvider,
    PublishCoordinator,
    PublishRequest,
    PublishResult,
    Selection,

    // Error handling
    PushyError,
    PushyConfig,
    PushyRepo,
    RequestRouter,
    Result,
    RouterResponse,
    StatusFlag,
};
