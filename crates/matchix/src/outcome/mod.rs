//! Results that are either available now or produced later.

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;

/// Boxed, sendable future yielding `T`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Result of a resolution chain that contained deferred rules.
///
/// The variant records what the winning handler declared: `Ready` for an
/// immediate handler, `Deferred` for one that returned a future. The builder
/// never awaits a deferred result; it hands the same future back.
///
/// Both variants can be awaited uniformly through `IntoFuture`.
pub enum Outcome<'a, T> {
    Ready(T),
    Deferred(BoxFuture<'a, T>),
}

impl<'a, T> Outcome<'a, T> {
    /// Wrap a future as a deferred outcome.
    pub fn deferred(future: impl Future<Output = T> + Send + 'a) -> Self {
        Outcome::Deferred(Box::pin(future))
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Outcome::Ready(_))
    }

    pub fn is_deferred(&self) -> bool {
        matches!(self, Outcome::Deferred(_))
    }

    /// The immediate value, or the outcome itself when it is deferred.
    pub fn into_ready(self) -> Result<T, Self> {
        match self {
            Outcome::Ready(value) => Ok(value),
            deferred @ Outcome::Deferred(_) => Err(deferred),
        }
    }

    /// Transform the eventual value, keeping immediacy.
    pub fn map<U, F>(self, f: F) -> Outcome<'a, U>
    where
        F: FnOnce(T) -> U + Send + 'a,
        T: 'a,
        U: 'a,
    {
        match self {
            Outcome::Ready(value) => Outcome::Ready(f(value)),
            Outcome::Deferred(future) => Outcome::deferred(async move { f(future.await) }),
        }
    }
}

impl<'a, T: Send + 'a> IntoFuture for Outcome<'a, T> {
    type Output = T;
    type IntoFuture = BoxFuture<'a, T>;

    fn into_future(self) -> Self::IntoFuture {
        match self {
            Outcome::Ready(value) => Box::pin(std::future::ready(value)),
            Outcome::Deferred(future) => future,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Ready(value) => f.debug_tuple("Ready").field(value).finish(),
            Outcome::Deferred(_) => f.write_str("Deferred(..)"),
        }
    }
}
