//! The resolution chain.
//!
//! A `Resolve` owns its subject and is threaded by value through every rule:
//! each link consumes the chain and returns it, and the terminal call
//! consumes it for good. At most one handler ever runs per chain.
//!
//! # Modes
//!
//! Whether the result may be deferred is part of the chain's type:
//!
//! - `Immediate`: only immediate handlers so far; `resolve_else` returns `T`.
//! - `Mixed`: some deferred rule was chained; the terminal returns
//!   `Outcome<'a, T>`, `Ready` or `Deferred` depending on which handler won.
//!
//! Chaining any `_deferred` rule moves the chain into `Mixed`, whether or not
//! that rule fires.

use std::fmt;
use std::future::Future;
use std::marker::PhantomData;

use matchix_value::{matches, Pattern, Value};

use crate::outcome::Outcome;

mod sealed {
    pub trait Sealed {}
    impl Sealed for super::Immediate {}
    impl Sealed for super::Mixed {}
}

/// Chain mode: no deferred rule chained.
#[derive(Debug)]
pub enum Immediate {}

/// Chain mode: at least one deferred rule chained.
#[derive(Debug)]
pub enum Mixed {}

/// How a chain stores its captured result and what its terminal returns.
pub trait Mode<'a, T>: sealed::Sealed {
    /// Storage for the captured handler output.
    type Slot;
    /// Return type of the terminal call.
    type Output;

    #[doc(hidden)]
    fn ready(value: T) -> Self::Slot;
    #[doc(hidden)]
    fn into_outcome(slot: Self::Slot) -> Outcome<'a, T>;
    #[doc(hidden)]
    fn finish(slot: Self::Slot) -> Self::Output;
}

impl<'a, T> Mode<'a, T> for Immediate {
    type Slot = T;
    type Output = T;

    #[inline]
    fn ready(value: T) -> T {
        value
    }

    #[inline]
    fn into_outcome(slot: T) -> Outcome<'a, T> {
        Outcome::Ready(slot)
    }

    #[inline]
    fn finish(slot: T) -> T {
        slot
    }
}

impl<'a, T> Mode<'a, T> for Mixed {
    type Slot = Outcome<'a, T>;
    type Output = Outcome<'a, T>;

    #[inline]
    fn ready(value: T) -> Outcome<'a, T> {
        Outcome::Ready(value)
    }

    #[inline]
    fn into_outcome(slot: Outcome<'a, T>) -> Outcome<'a, T> {
        slot
    }

    #[inline]
    fn finish(slot: Outcome<'a, T>) -> Outcome<'a, T> {
        slot
    }
}

/// What kind of rule fired, for tracing.
#[derive(Copy, Clone, Debug)]
enum RuleKind {
    Pattern,
    Predicate,
}

/// A resolution chain over one subject.
///
/// Built with [`resolve`](crate::resolve). `T` is the handlers' result type.
#[must_use = "a resolution chain yields nothing until `resolve_else` is called"]
pub struct Resolve<'a, T, M: Mode<'a, T> = Immediate> {
    subject: Value,
    /// Output of the handler that fired. `Some` means resolved.
    captured: Option<M::Slot>,
    /// Number of rules chained so far.
    rules: usize,
    _mode: PhantomData<fn() -> (M, Outcome<'a, T>)>,
}

impl<'a, T> Resolve<'a, T> {
    /// Start an unresolved chain around `subject`.
    pub fn new(subject: Value) -> Self {
        Resolve {
            subject,
            captured: None,
            rules: 0,
            _mode: PhantomData,
        }
    }
}

impl<'a, T, M: Mode<'a, T>> Resolve<'a, T, M> {
    /// The value being matched.
    pub fn subject(&self) -> &Value {
        &self.subject
    }

    /// Whether some rule has already fired.
    pub fn is_resolved(&self) -> bool {
        self.captured.is_some()
    }

    /// Fire `handler` if the chain is unresolved and the subject matches
    /// `pattern`.
    pub fn with_pattern(
        mut self,
        pattern: impl Into<Pattern>,
        handler: impl FnOnce(&Value) -> T,
    ) -> Self {
        let position = self.next_rule();
        if self.captured.is_none() && matches(&self.subject, &pattern.into()) {
            self.capture(position, RuleKind::Pattern, |subject| M::ready(handler(subject)));
        }
        self
    }

    /// Fire `handler` if the chain is unresolved and `predicate` holds for
    /// the subject. The predicate is not called once the chain is resolved.
    pub fn with_predicate(
        mut self,
        predicate: impl FnOnce(&Value) -> bool,
        handler: impl FnOnce(&Value) -> T,
    ) -> Self {
        let position = self.next_rule();
        if self.captured.is_none() && predicate(&self.subject) {
            self.capture(position, RuleKind::Predicate, |subject| M::ready(handler(subject)));
        }
        self
    }

    /// Like [`with_pattern`](Self::with_pattern), for a handler producing a
    /// future. The future is captured, not polled.
    pub fn with_pattern_deferred<F>(
        self,
        pattern: impl Into<Pattern>,
        handler: impl FnOnce(&Value) -> F,
    ) -> Resolve<'a, T, Mixed>
    where
        F: Future<Output = T> + Send + 'a,
    {
        let mut chain = self.into_mixed();
        let position = chain.next_rule();
        if chain.captured.is_none() && matches(&chain.subject, &pattern.into()) {
            chain.capture(position, RuleKind::Pattern, |subject| {
                Outcome::deferred(handler(subject))
            });
        }
        chain
    }

    /// Like [`with_predicate`](Self::with_predicate), for a handler producing
    /// a future.
    pub fn with_predicate_deferred<F>(
        self,
        predicate: impl FnOnce(&Value) -> bool,
        handler: impl FnOnce(&Value) -> F,
    ) -> Resolve<'a, T, Mixed>
    where
        F: Future<Output = T> + Send + 'a,
    {
        let mut chain = self.into_mixed();
        let position = chain.next_rule();
        if chain.captured.is_none() && predicate(&chain.subject) {
            chain.capture(position, RuleKind::Predicate, |subject| {
                Outcome::deferred(handler(subject))
            });
        }
        chain
    }

    /// Terminate the chain.
    ///
    /// Returns the captured result when a rule fired; `handler` is not
    /// called in that case. Otherwise `handler` runs on the subject and its
    /// output is returned.
    pub fn resolve_else(self, handler: impl FnOnce(&Value) -> T) -> M::Output {
        let slot = match self.captured {
            Some(slot) => slot,
            None => {
                tracing::debug!(rules = self.rules, "no rule matched, running fallback");
                M::ready(handler(&self.subject))
            }
        };
        M::finish(slot)
    }

    /// Terminate the chain with a fallback producing a future.
    pub fn resolve_else_deferred<F>(self, handler: impl FnOnce(&Value) -> F) -> Outcome<'a, T>
    where
        F: Future<Output = T> + Send + 'a,
    {
        match self.captured {
            Some(slot) => M::into_outcome(slot),
            None => {
                tracing::debug!(rules = self.rules, "no rule matched, running deferred fallback");
                Outcome::deferred(handler(&self.subject))
            }
        }
    }

    fn into_mixed(self) -> Resolve<'a, T, Mixed> {
        Resolve {
            subject: self.subject,
            captured: self.captured.map(M::into_outcome),
            rules: self.rules,
            _mode: PhantomData,
        }
    }

    /// Count a newly chained rule and return its 1-based position.
    fn next_rule(&mut self) -> usize {
        self.rules = self.rules.saturating_add(1);
        self.rules
    }

    fn capture(
        &mut self,
        position: usize,
        kind: RuleKind,
        handler: impl FnOnce(&Value) -> M::Slot,
    ) {
        tracing::trace!(rule = position, ?kind, subject = %self.subject.kind(), "rule matched");
        self.captured = Some(handler(&self.subject));
    }
}

impl<'a, T, M: Mode<'a, T>> fmt::Debug for Resolve<'a, T, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolve")
            .field("subject", &self.subject)
            .field("resolved", &self.is_resolved())
            .field("rules", &self.rules)
            .finish_non_exhaustive()
    }
}
