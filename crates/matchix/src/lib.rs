//! Matchix - runtime structural pattern matching.
//!
//! Declare an ordered list of rules against a value and get back the result
//! of the first one that holds:
//!
//! ```
//! use matchix::{resolve, Pattern, Value, WILDCARD};
//!
//! let shape = resolve(Value::list(vec![Value::Int(1), Value::Int(2), Value::Int(3)]))
//!     .with_pattern(Pattern::sequence([Pattern::from(1), WILDCARD, Pattern::from(3)]), |_| "ok")
//!     .resolve_else(|_| "no");
//! assert_eq!(shape, "ok");
//!
//! let data = resolve(Value::record([("status", Value::from("ok")), ("data", Value::Int(999))]))
//!     .with_pattern(Pattern::partial([("status", "ok")]), |v| v.get("data").and_then(Value::as_int))
//!     .resolve_else(|_| Some(0));
//! assert_eq!(data, Some(999));
//! ```
//!
//! # Crates
//!
//! - `matchix_value`: values, patterns, and the structural matcher
//!   (re-exported here)
//! - this crate: the resolution chain and deferred outcomes
//!
//! # Deferred Handlers
//!
//! Handlers declare whether they produce a value now or a future. Chains
//! that never use a `_deferred` rule return the plain value; chains that do
//! return an [`Outcome`], which can be awaited either way.

mod outcome;
mod resolve;

use std::sync::Once;

pub use matchix_value::{matches, Fields, Heap, Pattern, Value, ValueError, ValueKind, WILDCARD};
pub use outcome::{BoxFuture, Outcome};
pub use resolve::{Immediate, Mixed, Mode, Resolve};

/// Begin a resolution chain around `subject`.
pub fn resolve<'a, T>(subject: impl Into<Value>) -> Resolve<'a, T> {
    Resolve::new(subject.into())
}

static TRACING_INIT: Once = Once::new();

/// Install a stderr subscriber filtered by `RUST_LOG`.
///
/// Safe to call multiple times. Does nothing when `RUST_LOG` is unset or
/// unparsable, or when the host already installed a global subscriber.
/// `RUST_LOG=matchix=trace` logs every rule that fires.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        let Ok(filter) = EnvFilter::try_from_default_env() else {
            return;
        };
        let installed = tracing_subscriber::registry()
            .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
            .with(filter)
            .try_init();
        if installed.is_ok() {
            tracing::debug!("tracing initialized");
        }
    });
}
