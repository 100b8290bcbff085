//! Constants used throughout the dotted library.
//!
//! This module provides central definitions for the dotted key syntax.

/// Separator between the segments of a dotted key.
pub const SEPARATOR: char = '.';
