//! Matchix Value - runtime values and structural patterns.
//!
//! This crate provides:
//! - Runtime value types (`Value`, `Heap`, `ValueKind`)
//! - The closed pattern type (`Pattern`) and its `WILDCARD` sentinel
//! - The structural matcher (`matches`)
//! - Typed extraction errors (`ValueError`)
//!
//! # Matching Model
//!
//! Values come from a closed set of kinds: primitives, ordered lists, and
//! string-keyed records. Patterns mirror that shape:
//! - `Wildcard` matches anything at any depth
//! - `Literal` compares by same-value equality
//! - `Sequence` matches a list of exactly the same length, position by position
//! - `Partial` matches a record containing at least the named keys
//!
//! The matcher is total: a shape mismatch is `false`, never an error.

mod errors;
mod matcher;
mod pattern;
mod stack;
mod value;

pub use errors::ValueError;
pub use matcher::matches;
pub use pattern::{Pattern, WILDCARD};
pub use value::{Fields, Heap, Value, ValueKind};
