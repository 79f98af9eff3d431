//! The closed pattern type.
//!
//! A pattern is one of four shapes. The wildcard is its own variant rather
//! than a magic value, so no `Value` can ever be mistaken for it.
//!
//! Lifting a value into a pattern recurses per nesting level under stack
//! growth, and `Drop` releases nested patterns iteratively.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::matcher::matches;
use crate::stack::ensure_sufficient_stack;
use crate::value::Value;

/// Structural pattern tested against a `Value`.
#[derive(Clone, Debug, PartialEq)]
pub enum Pattern {
    /// Matches anything, at any depth.
    Wildcard,
    /// Matches a value equal to this one under same-value equality.
    ///
    /// Composite literals compare exactly, not partially. Use
    /// `Pattern::from(value)` to get the structural reading instead.
    Literal(Value),
    /// Matches a list of the same length whose items match position by position.
    Sequence(Vec<Pattern>),
    /// Matches a record holding every listed key with a matching value.
    /// Keys not listed are unconstrained.
    Partial(FxHashMap<String, Pattern>),
}

/// The wildcard sentinel.
pub const WILDCARD: Pattern = Pattern::Wildcard;

impl Pattern {
    /// Literal pattern compared by same-value equality.
    #[inline]
    pub fn literal(value: impl Into<Value>) -> Self {
        Pattern::Literal(value.into())
    }

    /// Positional pattern over a list.
    pub fn sequence<P: Into<Pattern>>(items: impl IntoIterator<Item = P>) -> Self {
        Pattern::Sequence(items.into_iter().map(Into::into).collect())
    }

    /// Partial record pattern from `(key, pattern)` entries.
    ///
    /// ```text
    /// let ok = Pattern::partial([("status", Pattern::from("ok"))]);
    /// ```
    pub fn partial<K: Into<String>, P: Into<Pattern>>(
        entries: impl IntoIterator<Item = (K, P)>,
    ) -> Self {
        Pattern::Partial(
            entries
                .into_iter()
                .map(|(k, p)| (k.into(), p.into()))
                .collect(),
        )
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Pattern::Wildcard)
    }

    /// Test `value` against this pattern.
    #[inline]
    pub fn matches(&self, value: &Value) -> bool {
        matches(value, self)
    }

    /// The pattern of `value`'s own shape.
    fn lift(value: &Value) -> Self {
        match value {
            Value::List(items) => Pattern::Sequence(
                items
                    .iter()
                    .map(|item| ensure_sufficient_stack(|| Pattern::lift(item)))
                    .collect(),
            ),
            Value::Record(fields) => Pattern::Partial(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), ensure_sufficient_stack(|| Pattern::lift(v))))
                    .collect(),
            ),
            primitive => Pattern::Literal(primitive.clone()),
        }
    }

    /// Move nested patterns into `out`, leaving this one empty.
    fn detach_children(&mut self, out: &mut Vec<Pattern>) {
        match self {
            Pattern::Sequence(items) => out.append(items),
            Pattern::Partial(fields) => out.extend(fields.drain().map(|(_, pattern)| pattern)),
            Pattern::Wildcard | Pattern::Literal(_) => {}
        }
    }
}

impl Drop for Pattern {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut pattern) = pending.pop() {
            pattern.detach_children(&mut pending);
        }
    }
}

/// Lifts a value into the pattern of its own shape: lists become sequences,
/// records become partial patterns, and primitives become literals.
impl From<Value> for Pattern {
    fn from(value: Value) -> Self {
        Pattern::lift(&value)
    }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self {
        Pattern::Literal(Value::Bool(b))
    }
}

impl From<i64> for Pattern {
    fn from(n: i64) -> Self {
        Pattern::Literal(Value::Int(n))
    }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self {
        Pattern::Literal(Value::from(n))
    }
}

impl From<f64> for Pattern {
    fn from(n: f64) -> Self {
        Pattern::Literal(Value::Float(n))
    }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self {
        Pattern::Literal(Value::string(s))
    }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self {
        Pattern::Literal(Value::string(s))
    }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(items: Vec<Pattern>) -> Self {
        Pattern::Sequence(items)
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pattern::Wildcard => write!(f, "_"),
            Pattern::Literal(value) => write!(f, "{value}"),
            Pattern::Sequence(items) => ensure_sufficient_stack(|| {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }),
            Pattern::Partial(fields) => ensure_sufficient_stack(|| {
                let mut keys: Vec<&String> = fields.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {}", fields[key])?;
                }
                if fields.is_empty() {
                    write!(f, "..}}")
                } else {
                    write!(f, ", ..}}")
                }
            }),
        }
    }
}
