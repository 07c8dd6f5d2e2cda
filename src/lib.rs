//! Kotobaten - a command-line companion for the Kotobaten Japanese vocabulary service.
//!
//! This library provides the core functionality behind the `kotobaten` binary: a
//! rotating practice-word display that survives restarts through a local cache,
//! one-shot navigation commands that coordinate with it through the same store,
//! and thin commands for login, adding words and searching.
//!
//! # Public API
//! The main public interface is re-exported from the [`core`] module, which provides:
//! - The API client and its async seams
//! - The practice cache, rotation flag and credentials over a key-value store
//! - The rotation controller
//! - Error handling and result types

pub mod commands;
pub mod core;

// Re-export the core public API for external users
pub use core::{
    ApiClient,
    Config,
    Credentials,
    Direction,
    DisplayWord,
    FileStore,
    KeyValueStore,
    // Error handling
    KotobatenError,
    MemoryStore,
    PracticeCache,
    PracticeWordsCache,
    Result,
    RotationController,
    RotationState,
    RotationStatus,
};
