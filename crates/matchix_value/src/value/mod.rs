//! Runtime values that subjects and literal patterns are made of.
//!
//! # Closed Kind Set
//!
//! Every `Value` is one of three shapes, and the matcher dispatches on
//! exactly these:
//!
//! - primitives: `Null`, `Bool`, `Int`, `Float`, `Str`
//! - ordered sequences: `List`
//! - keyed records: `Record`
//!
//! # Heap Enforcement
//!
//! Composite payloads sit behind `Heap<T>`, whose constructor is private to
//! this module. Build them through the factory methods:
//!
//! ```text
//! let s = Value::string("hello");
//! let list = Value::list(vec![Value::Int(1), Value::Int(2)]);
//! let rec = Value::record([("status", Value::from("ok"))]);
//! ```
//!
//! # Equality
//!
//! `PartialEq` is same-value equality: `NaN` equals `NaN`, `0.0` and `-0.0`
//! differ, and `Int(1)` never equals `Float(1.0)`. That relation is
//! reflexive, so `Value` is also `Eq`, and `Hash` agrees with it: every
//! `NaN` hashes alike and record hashes ignore key order.
//!
//! # Depth
//!
//! Equality, hashing and `Display` grow the stack per nesting level, and
//! `Drop` releases nested composites iteratively, so deeply nested values
//! are safe to compare, render and discard.

mod heap;

use std::fmt;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHashMap;

use crate::errors::ValueError;
use crate::stack::ensure_sufficient_stack;

pub use heap::Heap;

/// Fields of a record value.
pub type Fields = FxHashMap<String, Value>;

/// Runtime value.
#[derive(Clone, Debug)]
pub enum Value {
    // Primitives (inline, no heap allocation)
    /// Absent value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),

    // Heap types
    /// String value.
    Str(Heap<String>),
    /// Ordered sequence of values.
    List(Heap<Vec<Value>>),
    /// String-keyed record. Key order carries no meaning.
    Record(Heap<Fields>),
}

/// Discriminant of a `Value`, used in diagnostics.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Int,
    Float,
    Str,
    List,
    Record,
}

impl ValueKind {
    /// Human-readable name of the kind.
    pub fn type_name(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Str => "str",
            ValueKind::List => "list",
            ValueKind::Record => "record",
        }
    }

    /// Whether values of this kind are compared only by value equality.
    pub fn is_primitive(self) -> bool {
        !matches!(self, ValueKind::List | ValueKind::Record)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

// Factory methods (the only way to construct heap values)

impl Value {
    /// Create a string value.
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::Str(Heap::new(s.into()))
    }

    /// Create a list value.
    #[inline]
    pub fn list(items: Vec<Value>) -> Self {
        Value::List(Heap::new(items))
    }

    /// Create a record value from `(key, value)` entries.
    ///
    /// A repeated key keeps its last value.
    ///
    /// ```text
    /// let user = Value::record([("id", Value::Int(7)), ("name", Value::from("ada"))]);
    /// ```
    pub fn record<K: Into<String>>(entries: impl IntoIterator<Item = (K, Value)>) -> Self {
        let fields = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Value::Record(Heap::new(fields))
    }

    /// Create a record value from an already built field map.
    #[inline]
    pub fn from_fields(fields: Fields) -> Self {
        Value::Record(Heap::new(fields))
    }
}

// Inspection

impl Value {
    /// The kind of this value.
    pub fn kind(&self) -> ValueKind {
        match self {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Int(_) => ValueKind::Int,
            Value::Float(_) => ValueKind::Float,
            Value::Str(_) => ValueKind::Str,
            Value::List(_) => ValueKind::List,
            Value::Record(_) => ValueKind::Record,
        }
    }

    /// Name of this value's kind.
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    pub fn as_record(&self) -> Option<&Fields> {
        match self {
            Value::Record(fields) => Some(fields.as_ref()),
            _ => None,
        }
    }

    /// Look up a record field. `None` for missing keys and non-records.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_record()?.get(key)
    }

    /// Look up a list item. `None` when out of bounds or not a list.
    pub fn index(&self, index: usize) -> Option<&Value> {
        self.as_list()?.get(index)
    }

    /// Look up a record field, reporting why it could not be read.
    pub fn field(&self, key: &str) -> Result<&Value, ValueError> {
        let fields = self
            .as_record()
            .ok_or_else(|| ValueError::mismatch(ValueKind::Record, self.kind()))?;
        fields.get(key).ok_or_else(|| ValueError::MissingField {
            field: key.to_string(),
        })
    }
}

/// Bits of a float with every NaN collapsed to one payload.
///
/// Signed zeros keep distinct bits.
#[inline]
fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else {
        n.to_bits()
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Str(a), Value::Str(b)) => Heap::ptr_eq(a, b) || **a == **b,
            (Value::List(a), Value::List(b)) => {
                Heap::ptr_eq(a, b) || ensure_sufficient_stack(|| **a == **b)
            }
            (Value::Record(a), Value::Record(b)) => {
                Heap::ptr_eq(a, b) || ensure_sufficient_stack(|| **a == **b)
            }
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(n) => canonical_bits(*n).hash(state),
            Value::Str(s) => s.as_str().hash(state),
            Value::List(items) => ensure_sufficient_stack(|| items.as_slice().hash(state)),
            Value::Record(fields) => {
                // Iteration order varies, so hash in key order.
                fields.len().hash(state);
                let mut keys: Vec<&String> = fields.keys().collect();
                keys.sort();
                ensure_sufficient_stack(|| {
                    for key in keys {
                        key.hash(state);
                        fields[key].hash(state);
                    }
                });
            }
        }
    }
}

impl Drop for Value {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut value) = pending.pop() {
            value.detach_children(&mut pending);
        }
    }
}

impl Value {
    /// Move the children of a uniquely owned composite into `out`, leaving
    /// it empty. Shared composites are left alone.
    fn detach_children(&mut self, out: &mut Vec<Value>) {
        match self {
            Value::List(items) => {
                if let Some(items) = Heap::get_mut(items) {
                    out.append(items);
                }
            }
            Value::Record(fields) => {
                if let Some(fields) = Heap::get_mut(fields) {
                    out.extend(fields.drain().map(|(_, value)| value));
                }
            }
            Value::Null | Value::Bool(_) | Value::Int(_) | Value::Float(_) | Value::Str(_) => {}
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => write!(f, "null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n:?}"),
            Value::Str(s) => write!(f, "{:?}", s.as_str()),
            Value::List(items) => ensure_sufficient_stack(|| {
                write!(f, "[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                write!(f, "]")
            }),
            Value::Record(fields) => ensure_sufficient_stack(|| {
                let mut keys: Vec<&String> = fields.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{key:?}: {}", fields[key])?;
                }
                write!(f, "}}")
            }),
        }
    }
}

// Conversions into Value

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::string(s)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::string(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::list(items)
    }
}

impl From<Fields> for Value {
    fn from(fields: Fields) -> Self {
        Value::from_fields(fields)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Value::list(iter.into_iter().collect())
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Value::record(iter)
    }
}

// Typed extraction out of Value

impl TryFrom<&Value> for bool {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_bool()
            .ok_or_else(|| ValueError::mismatch(ValueKind::Bool, value.kind()))
    }
}

impl TryFrom<&Value> for i64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_int()
            .ok_or_else(|| ValueError::mismatch(ValueKind::Int, value.kind()))
    }
}

impl TryFrom<&Value> for f64 {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_float()
            .ok_or_else(|| ValueError::mismatch(ValueKind::Float, value.kind()))
    }
}

impl TryFrom<&Value> for String {
    type Error = ValueError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| ValueError::mismatch(ValueKind::Str, value.kind()))
    }
}
