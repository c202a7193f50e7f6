//! Shared utilities for the pushy integration tests
//!
//! Every test runs the real binary against a throwaway git repository laid
//! out like a site's user folder.

pub mod assertions;
pub mod fixtures;
pub mod repository;
