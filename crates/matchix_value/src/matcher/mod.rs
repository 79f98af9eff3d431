//! Structural matching of values against patterns.
//!
//! Dispatch happens once per level on the pattern variant, then on the
//! value kind the variant expects:
//!
//! 1. `Wildcard` matches unconditionally.
//! 2. `Literal` matches under same-value equality.
//! 3. `Sequence` needs a `List` of exactly the same length.
//! 4. `Partial` needs a `Record` holding every pattern key.
//! 5. Any other pairing is a mismatch.
//!
//! # Stack Safety
//!
//! Nested patterns recurse once per level, and literal comparison recurses
//! through `Value`'s equality. Both grow the stack on demand, so deep
//! subjects and deep literals cannot overflow the native stack.

use crate::pattern::Pattern;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Whether `value` structurally conforms to `pattern`.
///
/// Total: shape mismatches yield `false`.
pub fn matches(value: &Value, pattern: &Pattern) -> bool {
    match pattern {
        Pattern::Wildcard => true,
        Pattern::Literal(literal) => value == literal,
        Pattern::Sequence(patterns) => match value {
            Value::List(items) => {
                items.len() == patterns.len()
                    && items
                        .iter()
                        .zip(patterns)
                        .all(|(item, pat)| matches_nested(item, pat))
            }
            _ => false,
        },
        Pattern::Partial(fields) => match value {
            Value::Record(record) => fields.iter().all(|(key, pat)| {
                record
                    .get(key)
                    .is_some_and(|field| matches_nested(field, pat))
            }),
            _ => false,
        },
    }
}

#[inline]
fn matches_nested(value: &Value, pattern: &Pattern) -> bool {
    ensure_sufficient_stack(|| matches(value, pattern))
}

#[cfg(test)]
mod tests;
