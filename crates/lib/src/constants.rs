//! Constants used throughout the Heredity library.
//!
//! This module provides central definitions for limits shared between the
//! store adapter and the backing record stores.

/// Maximum length, in bytes, of an attribute name.
///
/// Matches the column width a typical host schema gives the `name` column.
pub const MAX_NAME_LEN: usize = 50;
