//! Core functionality for the kotobaten tool.
//!
//! This module provides the building blocks shared by the commands: the API
//! client, the persistent store and the practice cache on top of it, the
//! rotation controller, error handling and output formatting.

pub mod api;
pub mod cache;
pub mod command_init;
pub mod config;
pub mod controller;
pub mod credentials;
pub mod dirs;
pub mod error;
pub mod models;
pub mod navigation;
pub mod output;
pub mod practice;
pub mod profanity;
pub mod rotation_state;
pub mod search_session;
pub mod state;
pub mod store;
pub mod validation;

// === Error handling ===
// Core error types and result type used throughout the application
pub use error::{KotobatenError, Result};

// === Remote API ===
// HTTP client plus the seams the controller and search session depend on
pub use api::{ApiClient, Searcher};
pub use practice::PracticeSource;

// === Persistence ===
// Key-value store and the typed views the commands use on top of it
pub use cache::PracticeCache;
pub use credentials::Credentials;
pub use rotation_state::RotationState;
pub use store::{FileStore, KeyValueStore, MemoryStore};

// === State management ===
// Data structures shared between the display and the companion commands
pub use state::{Direction, DisplayWord, PracticeWordsCache};

// === Rotation display ===
pub use controller::{MenuAction, Redraw, RotationController, RotationStatus, RotationTiming};

// === Configuration ===
pub use config::{Config, PracticeConfig};

// === Output formatting ===
// Unified output formatting for consistent CLI presentation
pub use output::{print_error, print_info, print_notification, print_section_header, print_success};
