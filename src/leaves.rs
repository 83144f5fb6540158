use alloc::{vec, vec::Vec};
use core::{error::Error, iter::FusedIterator};

use crate::{
    Chain, MultiError,
    multi_error::{Node, SharedError},
};

/// An iterator over the leaf errors of a [`MultiError`], in order.
///
/// Nested [`MultiError`]s are expanded in place, depth first, so the iterator
/// only ever yields errors that are not themselves a [`MultiError`]. Nested
/// groups without any errors contribute nothing.
///
/// Created by [`MultiError::leaves`].
///
/// # Examples
///
/// ```
/// use multierror::join;
///
/// let err = join!(join!("a", "b"), "c", join!("d")).unwrap();
/// let leaves: Vec<String> = err.leaves().map(|leaf| leaf.to_string()).collect();
/// assert_eq!(leaves, ["a", "b", "c", "d"]);
/// ```
#[derive(Clone)]
#[must_use]
pub struct Leaves<'a> {
    stack: Vec<core::slice::Iter<'a, Node>>,
}

impl<'a> Leaves<'a> {
    pub(crate) fn new(children: &'a [Node]) -> Self {
        Self {
            stack: vec![children.iter()],
        }
    }

    /// Returns the next leaf without dereferencing the shared handle.
    pub(crate) fn next_shared(&mut self) -> Option<&'a SharedError> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(Node::Leaf(error)) => return Some(error),
                Some(Node::Group(group)) => self.stack.push(group.children().iter()),
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a (dyn Error + Send + Sync + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        self.next_shared().map(|error| &***error)
    }
}

impl FusedIterator for Leaves<'_> {}

impl core::fmt::Debug for Leaves<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

enum Pending<'a> {
    Leaves(Leaves<'a>),
    Suffix(core::slice::Iter<'a, SharedError>),
}

impl<'a> Pending<'a> {
    fn next(&mut self) -> Option<&'a (dyn Error + 'static)> {
        match self {
            Pending::Leaves(leaves) => leaves.next().map(|error| error as &(dyn Error + 'static)),
            Pending::Suffix(suffix) => suffix
                .next()
                .map(|error| &***error as &(dyn Error + 'static)),
        }
    }
}

/// Depth-first walk over every error reachable from a set of leaves.
///
/// Each leaf is yielded, followed by its `source()` chain. A link that is a
/// [`MultiError`] or a [`Chain`] is yielded too, and then expanded into its
/// own leaves instead of following its `source()`, which would only revisit
/// the same leaves one at a time.
pub(crate) struct Links<'a> {
    pending: Vec<Pending<'a>>,
    current: Option<&'a (dyn Error + 'static)>,
}

impl<'a> Links<'a> {
    pub(crate) fn from_leaves(leaves: Leaves<'a>) -> Self {
        Self {
            pending: vec![Pending::Leaves(leaves)],
            current: None,
        }
    }

    pub(crate) fn from_error(error: &'a (dyn Error + 'static)) -> Self {
        Self {
            pending: Vec::new(),
            current: Some(error),
        }
    }
}

impl<'a> Iterator for Links<'a> {
    type Item = &'a (dyn Error + 'static);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(error) = self.current.take() {
                if let Some(multi) = error.downcast_ref::<MultiError>() {
                    self.pending.push(Pending::Leaves(multi.leaves()));
                } else if let Some(chain) = error.downcast_ref::<Chain>() {
                    self.pending.push(Pending::Suffix(chain.suffix().iter()));
                } else {
                    self.current = error.source();
                }
                return Some(error);
            }

            let top = self.pending.last_mut()?;
            match top.next() {
                Some(error) => self.current = Some(error),
                None => {
                    self.pending.pop();
                }
            }
        }
    }
}

impl FusedIterator for Links<'_> {}

#[cfg(test)]
mod tests {
    use alloc::{string::ToString, vec::Vec};

    use super::*;
    use crate::join;

    #[test]
    fn test_leaves_skip_empty_groups() {
        let empty = MultiError::from_children(Vec::new());
        let err = MultiError::from_children(alloc::vec![
            Node::Group(empty.clone()),
            Node::Group(join!("a").unwrap()),
            Node::Group(empty),
            Node::Group(join!("b", "c").unwrap()),
        ]);

        let leaves: Vec<_> = err.leaves().map(|leaf| leaf.to_string()).collect();
        assert_eq!(leaves, ["a", "b", "c"]);
    }

    #[test]
    fn test_leaves_deep_nesting() {
        let mut err = join!("0").unwrap();
        for depth in 1..50 {
            err = join!(err, depth.to_string()).unwrap();
        }

        assert_eq!(err.len(), 50);
        let leaves: Vec<_> = err.leaves().map(|leaf| leaf.to_string()).collect();
        let expected: Vec<_> = (0..50).map(|depth| depth.to_string()).collect();
        assert_eq!(leaves, expected);
    }

    #[test]
    fn test_links_expand_nested_multi_errors() {
        #[derive(Debug, thiserror::Error)]
        #[error("wrapper")]
        struct Wrapper(#[source] MultiError);

        let err = join!("a", Wrapper(join!("b", "c").unwrap()), "d").unwrap();
        let links: Vec<_> = Links::from_leaves(err.leaves())
            .filter(|link| !link.is::<MultiError>())
            .map(|link| link.to_string())
            .collect();
        assert_eq!(links, ["a", "wrapper", "b", "c", "d"]);
    }

    static_assertions::assert_impl_all!(Leaves<'static>: Clone, Send, Sync, FusedIterator);
    static_assertions::assert_not_impl_any!(Leaves<'static>: Copy);
}
