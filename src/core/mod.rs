//! Component-independent engines.
//!
//! This module contains the pieces that know nothing about URL structure:
//! - Percent-encoding and decoding of URI components and query strings
//! - Pattern matching over strings
//! - The text/byte codec used to persist the crate's value types

pub mod codec;
pub mod matcher;
pub mod percent;

// Re-export main functionality
pub use matcher::{glob_to_regex, Pattern, PatternType};
pub use percent::{Charset, QueryParam};
