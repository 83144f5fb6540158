use alloc::{boxed::Box, vec::Vec};
use core::{error::Error, fmt};

use crate::{leaves::Links, multi_error::SharedError};

/// A view of the leaves of a [`MultiError`](crate::MultiError), one error at a
/// time.
///
/// Generic error handling code walks errors through
/// [`Error::source`], which can only return a single error. When a
/// [`MultiError`](crate::MultiError) has more than one leaf, its source is a
/// [`Chain`] positioned on the first leaf:
///
/// - it displays exactly like its [`head`](Self::head) leaf;
/// - its own source is a [`Chain`] positioned on the next leaf, or `None` if
///   the head is the last leaf.
///
/// A [`MultiError`](crate::MultiError) with exactly one leaf returns that leaf
/// as its source directly, and one without leaves returns `None`.
///
/// # Examples
///
/// ```
/// use core::error::Error;
///
/// use multierror::{Chain, join};
///
/// let err = join!("a", join!("b", "c")).unwrap();
///
/// let chain = err.source().unwrap().downcast_ref::<Chain>().unwrap();
/// assert_eq!(chain.to_string(), "a");
/// assert_eq!(chain.remaining(), 2);
///
/// let next = chain.source().unwrap();
/// assert_eq!(next.to_string(), "b");
/// ```
pub struct Chain {
    leaves: triomphe::Arc<Vec<SharedError>>,
    position: usize,
    rest: spin::Once<Box<Chain>>,
}

impl Chain {
    pub(crate) fn new(leaves: Vec<SharedError>) -> Self {
        Self::at(triomphe::Arc::new(leaves), 0)
    }

    fn at(leaves: triomphe::Arc<Vec<SharedError>>, position: usize) -> Self {
        debug_assert!(position < leaves.len());
        Self {
            leaves,
            position,
            rest: spin::Once::new(),
        }
    }

    /// The leaves from the head to the end.
    pub(crate) fn suffix(&self) -> &[SharedError] {
        &self.leaves[self.position..]
    }

    /// Returns the leaf this link is positioned on.
    #[must_use]
    pub fn head(&self) -> &(dyn Error + Send + Sync + 'static) {
        &**self.leaves[self.position]
    }

    /// Returns how many leaves come after the head.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.leaves.len() - self.position - 1
    }

    /// Returns `true` if the head, or an error in its source chain, has type
    /// `E` and equals `target`.
    ///
    /// Only the head is checked; the remaining leaves are reached through
    /// [`source`](Error::source).
    #[must_use]
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        Links::from_error(self.head())
            .any(|error| error.downcast_ref::<E>().is_some_and(|error| error == target))
    }

    /// Returns the head, or the first error in its source chain, of type `E`.
    #[must_use]
    pub fn find<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        Links::from_error(self.head()).find_map(|error| error.downcast_ref::<E>())
    }
}

impl fmt::Display for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.head(), f)
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain")
            .field("head", &self.head())
            .field("remaining", &self.remaining())
            .finish()
    }
}

impl Error for Chain {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        if self.remaining() == 0 {
            return None;
        }

        let rest: &Chain = self
            .rest
            .call_once(|| Box::new(Chain::at(self.leaves.clone(), self.position + 1)));
        Some(rest)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::{MultiError, join};

    fn links(err: &MultiError) -> Vec<(alloc::string::String, usize)> {
        let mut links = Vec::new();
        let mut current = err.source();
        while let Some(link) = current {
            let chain = link.downcast_ref::<Chain>().map(|chain| chain.remaining());
            links.push((link.to_string(), chain.unwrap_or(usize::MAX)));
            current = link.source();
        }
        links
    }

    #[test]
    fn test_chain_send_sync() {
        static_assertions::assert_impl_all!(Chain: Send, Sync, Error);
        static_assertions::assert_not_impl_any!(Chain: Clone, Copy);
    }

    #[test]
    fn test_single_leaf_source_is_the_leaf() {
        #[derive(Debug, thiserror::Error)]
        #[error("only")]
        struct Only;

        let err = join!(Only).unwrap();
        let source = err.source().unwrap();
        assert!(source.is::<Only>());
        assert!(source.source().is_none());
    }

    #[test]
    fn test_chain_walks_flattened_leaves() {
        let err = join!(join!("a", "b"), join!("c", "d")).unwrap();
        assert_eq!(
            links(&err),
            [
                ("a".to_string(), 3),
                ("b".to_string(), 2),
                ("c".to_string(), 1),
                ("d".to_string(), 0),
            ]
        );
    }

    #[test]
    fn test_chain_is_memoized() {
        let err = join!("a", "b").unwrap();
        let first = err.source().unwrap() as *const dyn Error as *const ();
        let second = err.source().unwrap() as *const dyn Error as *const ();
        assert_eq!(first, second);
    }

    #[test]
    fn test_chain_delegates_to_head() {
        #[derive(Debug, PartialEq, thiserror::Error)]
        #[error("code {0}")]
        struct Code(u32);

        let err = join!(Code(1), Code(2)).unwrap();
        let chain = err.source().unwrap().downcast_ref::<Chain>().unwrap();
        assert!(chain.is(&Code(1)));
        assert!(!chain.is(&Code(2)));
        assert_eq!(chain.find::<Code>(), Some(&Code(1)));

        let next = chain.source().unwrap().downcast_ref::<Chain>().unwrap();
        assert!(next.is(&Code(2)));
        assert_eq!(next.remaining(), 0);
        assert!(next.source().is_none());
    }
}
