//! Core data types for matching document references to image files.
//!
//! This module provides the fundamental types used throughout the library:
//!
//! - [`Candidate`]: An image file reported by storage, with an optional link
//! - [`ParsedSegment`]: One audience-specific reference detected in a document line
//! - [`Audience`]: The fixed audience vocabulary and its display forms
//!
//! ## Reference Lines
//!
//! Documents mark the places where an image link belongs with a placeholder
//! marker on an "Email Comp" line:
//!
//! | Style    | Example                                      |
//! |----------|----------------------------------------------|
//! | Pairs    | `Email Comp: Mass [LINK] Leadership [LINK]`  |
//! | Reversed | `Email Comp: [LINK] Mass [LINK] Leadership`  |
//! | Legacy   | `Email Comp: EOY URGENCY 12/30 7a MASS`      |

pub mod candidate;
pub mod sample;
pub mod segment;
pub mod types;
