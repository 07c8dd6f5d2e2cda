//! Consolidated test utilities for kotobaten
//!
//! This module provides unified testing utilities for integration tests. Every
//! test runs the real binary against its own temporary home directory.

pub mod assertions;
pub mod home;
