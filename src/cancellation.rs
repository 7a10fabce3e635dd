//! # Cooperative cancellation
//!
//! A [`CancellationToken`] is a cheap, cloneable handle that long-running work
//! polls at its checkpoints. Tokens form a tree: a child derived with
//! [`CancellationToken::child`] observes its own flag, its own deadline and every
//! ancestor, while cancelling the child leaves the parent untouched. The pipeline
//! stages use this to stop sibling work units after the first failure without
//! touching the caller's token.
//!
//! A deadline is just another way for a token to become cancelled; an expired
//! deadline is reported as [`CancelReason::DeadlineExceeded`] and takes the same
//! path through the engine as an explicit [`CancellationToken::cancel`].
//!
//! ## Example
//!
//! ```rust
//! use evolvr::cancellation::{CancelReason, CancellationToken};
//!
//! let root = CancellationToken::new();
//! let stage = root.child();
//!
//! stage.cancel();
//! assert_eq!(stage.reason(), Some(CancelReason::Cancelled));
//! assert!(!root.is_cancelled());
//!
//! root.cancel();
//! assert!(root.child().check().is_err());
//! ```

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::error::{GeneticError, Result};

/// Why a token reports itself as cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// [`CancellationToken::cancel`] was called on the token or an ancestor.
    Cancelled,
    /// The deadline of the token or an ancestor has passed.
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("context cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    cancelled: AtomicBool,
    deadline: Option<Instant>,
    parent: Option<CancellationToken>,
}

/// A cloneable cancellation signal shared between the control thread and the
/// work units it dispatches.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    inner: Arc<Inner>,
}

impl CancellationToken {
    /// Creates a root token that is only cancelled by an explicit call to
    /// [`cancel`](Self::cancel).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a root token that cancels itself once `deadline` has passed.
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: Some(deadline),
                ..Inner::default()
            }),
        }
    }

    /// Creates a root token that cancels itself after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Derives a child scope. The child is cancelled whenever this token is;
    /// cancelling the child does not affect this token.
    pub fn child(&self) -> Self {
        Self {
            inner: Arc::new(Inner {
                parent: Some(self.clone()),
                ..Inner::default()
            }),
        }
    }

    /// Derives a child scope that additionally expires after `timeout`.
    pub fn child_with_timeout(&self, timeout: Duration) -> Self {
        Self {
            inner: Arc::new(Inner {
                deadline: Some(Instant::now() + timeout),
                parent: Some(self.clone()),
                ..Inner::default()
            }),
        }
    }

    /// Signals cancellation to this token and all of its descendants.
    pub fn cancel(&self) {
        self.inner.cancelled.store(true, Ordering::Release);
    }

    /// Returns the reason this token is cancelled, or `None` if it is still live.
    ///
    /// An explicit cancellation takes precedence over an expired deadline on the
    /// same token; ancestors are consulted only when this token itself is live.
    pub fn reason(&self) -> Option<CancelReason> {
        if self.inner.cancelled.load(Ordering::Acquire) {
            return Some(CancelReason::Cancelled);
        }
        if let Some(deadline) = self.inner.deadline {
            if Instant::now() >= deadline {
                return Some(CancelReason::DeadlineExceeded);
            }
        }
        self.inner.parent.as_ref().and_then(CancellationToken::reason)
    }

    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// Returns `Err(GeneticError::Cancelled)` if the token is cancelled.
    pub fn check(&self) -> Result<()> {
        match self.reason() {
            Some(reason) => Err(GeneticError::Cancelled(reason)),
            None => Ok(()),
        }
    }

    /// Returns the deadline set directly on this token, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.inner.deadline
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_new_token_is_live() {
        let token = CancellationToken::new();
        assert!(!token.is_cancelled());
        assert!(token.check().is_ok());
        assert!(token.deadline().is_none());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let token = CancellationToken::new();
        let clone = token.clone();

        clone.cancel();

        assert_eq!(token.reason(), Some(CancelReason::Cancelled));
    }

    #[test]
    fn test_child_follows_parent_but_not_the_reverse() {
        let parent = CancellationToken::new();
        let child = parent.child();
        let grandchild = child.child();

        child.cancel();
        assert!(grandchild.is_cancelled());
        assert!(!parent.is_cancelled());

        let other_child = parent.child();
        parent.cancel();
        assert!(other_child.is_cancelled());
    }

    #[test]
    fn test_deadline_expiry() {
        let token = CancellationToken::with_timeout(Duration::from_millis(5));
        thread::sleep(Duration::from_millis(20));

        assert_eq!(token.reason(), Some(CancelReason::DeadlineExceeded));
        assert!(matches!(
            token.check(),
            Err(GeneticError::Cancelled(CancelReason::DeadlineExceeded))
        ));
        assert!(token.child().is_cancelled());
    }

    #[test]
    fn test_expired_deadline_in_the_past() {
        let token = CancellationToken::with_deadline(Instant::now());
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_child_with_timeout_leaves_parent_live() {
        let parent = CancellationToken::new();
        let child = parent.child_with_timeout(Duration::ZERO);

        assert_eq!(child.reason(), Some(CancelReason::DeadlineExceeded));
        assert!(!parent.is_cancelled());
    }

    #[test]
    fn test_cancel_from_another_thread() {
        let token = CancellationToken::new();
        let remote = token.clone();

        thread::spawn(move || remote.cancel())
            .join()
            .expect("cancelling thread panicked");

        assert!(token.is_cancelled());
    }
}
