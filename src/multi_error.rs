use alloc::{boxed::Box, string::ToString, sync::Arc, vec::Vec};
use core::{error::Error, fmt};

use crate::{
    BoxError, Chain,
    leaves::{Leaves, Links},
};

/// A leaf error, shared between clones of a [`MultiError`] and its [`Chain`].
pub(crate) type SharedError = triomphe::Arc<BoxError>;

/// A child of a [`MultiError`].
#[derive(Clone)]
pub(crate) enum Node {
    Leaf(SharedError),
    Group(MultiError),
}

impl Node {
    /// Wraps an error, recognising nested [`MultiError`]s whatever type they
    /// were boxed from.
    pub(crate) fn new(error: BoxError) -> Self {
        match MultiError::from_boxed(error) {
            Ok(group) => Node::Group(group),
            Err(error) => Node::Leaf(triomphe::Arc::new(error)),
        }
    }
}

/// An error made of other errors.
///
/// A [`MultiError`] is created with [`join()`](crate::join()) or
/// [`append()`](crate::append()) (or their macro forms) and is immutable
/// afterwards. It keeps the errors in the order they were added, and may
/// contain other [`MultiError`]s as nested groups. All of its queries work on
/// the flattened list of leaf errors returned by [`leaves`](Self::leaves), so
/// nesting only matters for how it was built, never for what it reports.
///
/// # Rendering
///
/// | Format               | Output for `join!("a", "b")`           |
/// |----------------------|----------------------------------------|
/// | `Display`            | `Found 2 errors:\n\ta\n\tb\n`          |
/// | `Debug`              | `[2]error{"a","b"}`                    |
/// | [`to_json`]          | `"a, b"`                               |
/// | [`encode_text`]      | same bytes as `Display`                |
/// | [`encode_binary`]    | `Display` output as a bincode `String` |
///
/// A single error is announced as `Found one error:`.
///
/// [`to_json`]: Self::to_json
/// [`encode_text`]: Self::encode_text
/// [`encode_binary`]: Self::encode_binary
///
/// # Examples
///
/// ```
/// use multierror::{MultiError, join};
///
/// #[derive(Debug, PartialEq)]
/// struct Timeout(u32);
///
/// impl std::fmt::Display for Timeout {
///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
///         write!(f, "timed out after {}s", self.0)
///     }
/// }
///
/// impl std::error::Error for Timeout {}
///
/// let err: MultiError = join!("connection refused", Timeout(30)).unwrap();
///
/// assert_eq!(
///     err.to_string(),
///     "Found 2 errors:\n\tconnection refused\n\ttimed out after 30s\n"
/// );
/// assert!(err.is(&Timeout(30)));
/// assert_eq!(err.find::<Timeout>(), Some(&Timeout(30)));
/// ```
pub struct MultiError {
    children: Vec<Node>,
    chain: spin::Once<Chain>,
}

impl MultiError {
    pub(crate) fn from_children(children: Vec<Node>) -> Self {
        Self {
            children,
            chain: spin::Once::new(),
        }
    }

    /// Builds a new error from already filtered errors, or `None` if there
    /// are none.
    pub(crate) fn from_errors<I>(errors: I) -> Option<Self>
    where
        I: IntoIterator<Item = BoxError>,
    {
        let children: Vec<Node> = errors.into_iter().map(Node::new).collect();
        if children.is_empty() {
            None
        } else {
            Some(Self::from_children(children))
        }
    }

    /// Recovers a [`MultiError`] from a boxed error, also when it was boxed
    /// as a `Box<MultiError>` or an `Arc<MultiError>`.
    pub(crate) fn from_boxed(error: BoxError) -> Result<Self, BoxError> {
        let error = match error.downcast::<MultiError>() {
            Ok(multi) => return Ok(*multi),
            Err(error) => error,
        };
        let error = match error.downcast::<Box<MultiError>>() {
            Ok(multi) => return Ok(**multi),
            Err(error) => error,
        };
        match error.downcast_ref::<Arc<MultiError>>() {
            Some(multi) => Ok(MultiError::clone(multi)),
            None => Err(error),
        }
    }

    pub(crate) fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns a new error with `errors` added after the existing ones.
    ///
    /// `None` entries are skipped. Unlike [`join()`](crate::join()), this does
    /// not add a level of nesting: the existing errors and the new ones end up
    /// side by side.
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::join;
    ///
    /// let err = join!("a").unwrap();
    /// let err = err.append([Some("b"), None, Some("c")]);
    /// assert_eq!(err.to_string(), "Found 3 errors:\n\ta\n\tb\n\tc\n");
    /// ```
    #[must_use]
    pub fn append<I, E>(self, errors: I) -> Self
    where
        I: IntoIterator<Item = Option<E>>,
        E: Into<BoxError>,
    {
        let mut children = self.children;
        children.extend(errors.into_iter().flatten().map(|error| Node::new(error.into())));
        Self::from_children(children)
    }

    /// Returns an iterator over the flattened leaf errors, in order.
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::join;
    ///
    /// let err = join!(join!("a", "b"), join!("c", "d")).unwrap();
    /// let leaves: Vec<String> = err.leaves().map(|leaf| leaf.to_string()).collect();
    /// assert_eq!(leaves, ["a", "b", "c", "d"]);
    /// ```
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves::new(&self.children)
    }

    /// Returns the number of leaf errors.
    ///
    /// Nested groups are not counted themselves, only the errors inside them.
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::join;
    ///
    /// let err = join!(join!("a", "b"), "c").unwrap();
    /// assert_eq!(err.len(), 3);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.leaves().count()
    }

    /// Returns `true` if there are no leaf errors.
    ///
    /// [`join()`](crate::join()) and [`append()`](crate::append()) never
    /// return an empty error, so this is `false` for every error they build.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.leaves().next().is_none()
    }

    /// Returns `true` if `target` is one of the contained errors.
    ///
    /// Every leaf is checked, together with the errors in its
    /// [`source`](Error::source) chain. An error matches when it has type `E`
    /// and compares equal to `target`. A [`MultiError`] found along the way is
    /// searched through its own leaves. The search stops at the first match.
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::join;
    ///
    /// #[derive(Debug, PartialEq)]
    /// struct NotFound(&'static str);
    ///
    /// impl std::fmt::Display for NotFound {
    ///     fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    ///         write!(f, "{} not found", self.0)
    ///     }
    /// }
    ///
    /// impl std::error::Error for NotFound {}
    ///
    /// let err = join!(NotFound("a.txt"), join!(NotFound("b.txt"))).unwrap();
    /// assert!(err.is(&NotFound("b.txt")));
    /// assert!(!err.is(&NotFound("c.txt")));
    /// ```
    #[must_use]
    pub fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        self.links()
            .any(|error| error.downcast_ref::<E>().is_some_and(|error| error == target))
    }

    /// Returns the first contained error of type `E`.
    ///
    /// Leaves are searched in order, with the same traversal as
    /// [`is`](Self::is).
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::join;
    ///
    /// let parse_error = "x".parse::<u8>().unwrap_err();
    /// let err = join!("first", parse_error.clone(), "last").unwrap();
    /// assert_eq!(err.find::<std::num::ParseIntError>(), Some(&parse_error));
    /// assert!(err.find::<std::fmt::Error>().is_none());
    /// ```
    #[must_use]
    pub fn find<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        self.links().find_map(|error| error.downcast_ref::<E>())
    }

    /// Stores the first contained error of type `E` in `slot`.
    ///
    /// Returns `true` if an error was found. If none was found, `slot` is
    /// left untouched and `false` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::num::ParseIntError;
    ///
    /// use multierror::join;
    ///
    /// let err = join!("first", "x".parse::<u8>().unwrap_err()).unwrap();
    ///
    /// let mut slot: Option<&ParseIntError> = None;
    /// assert!(err.extract_into(&mut slot));
    /// assert!(slot.is_some());
    /// ```
    pub fn extract_into<'a, E>(&'a self, slot: &mut Option<&'a E>) -> bool
    where
        E: Error + 'static,
    {
        match self.find::<E>() {
            Some(found) => {
                *slot = Some(found);
                true
            }
            None => false,
        }
    }

    pub(crate) fn links(&self) -> Links<'_> {
        Links::from_leaves(self.leaves())
    }
}

impl Clone for MultiError {
    fn clone(&self) -> Self {
        Self::from_children(self.children.clone())
    }
}

impl fmt::Display for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.len() {
            0 => return Ok(()),
            1 => writeln!(f, "Found one error:")?,
            count => writeln!(f, "Found {count} errors:")?,
        }
        for leaf in self.leaves() {
            writeln!(f, "\t{leaf}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for MultiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]error{{", self.len())?;
        for (index, leaf) in self.leaves().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{:?}", leaf.to_string())?;
        }
        f.write_str("}")
    }
}

impl Error for MultiError {
    /// Returns the next error in the chain.
    ///
    /// With a single leaf, that leaf is the source. With more, the source is
    /// a [`Chain`] positioned on the first leaf.
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        let mut leaves = self.leaves();
        let first: &(dyn Error + 'static) = leaves.next()?;
        if leaves.next().is_none() {
            return Some(first);
        }

        let chain = self.chain.call_once(|| {
            let mut leaves = self.leaves();
            Chain::new(core::iter::from_fn(|| leaves.next_shared().cloned()).collect())
        });
        Some(chain)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{format, string::String, vec};

    use super::*;
    use crate::join;

    #[test]
    fn test_multi_error_send_sync() {
        static_assertions::assert_impl_all!(MultiError: Send, Sync, Error);
        static_assertions::assert_impl_all!(Node: Send, Sync);
    }

    #[test]
    fn test_multi_error_copy_clone() {
        static_assertions::assert_impl_all!(MultiError: Clone);
        static_assertions::assert_not_impl_any!(MultiError: Copy);
    }

    #[test]
    fn test_empty_multi_error() {
        let err = MultiError::from_children(vec![]);
        assert!(err.is_empty());
        assert_eq!(err.len(), 0);
        assert_eq!(format!("{err}"), "");
        assert_eq!(format!("{err:?}"), "[0]error{}");
        assert!(err.source().is_none());
        assert!(err.find::<core::fmt::Error>().is_none());
        assert!(!err.is(&core::fmt::Error));
    }

    #[test]
    fn test_nested_empty_groups_render_empty() {
        let err = MultiError::from_children(vec![
            Node::Group(MultiError::from_children(vec![])),
            Node::Group(MultiError::from_children(vec![])),
        ]);
        assert!(err.is_empty());
        assert_eq!(format!("{err}"), "");
    }

    #[test]
    fn test_node_recognises_boxed_multi_error() {
        let boxed: BoxError = join!("a", "b").unwrap().into();
        assert!(matches!(Node::new(boxed), Node::Group(_)));

        let boxed: BoxError = "a".into();
        assert!(matches!(Node::new(boxed), Node::Leaf(_)));
    }

    #[test]
    fn test_node_recognises_wrapped_multi_error() {
        let boxed: BoxError = Box::new(Box::new(join!("a", "b").unwrap()));
        assert!(matches!(Node::new(boxed), Node::Group(_)));

        let shared: BoxError = Box::new(Arc::new(join!("a", "b").unwrap()));
        assert!(matches!(Node::new(shared), Node::Group(_)));

        let err = join!(Box::new(join!("a", "b").unwrap()), "c").unwrap();
        assert_eq!(err.len(), 3);
        assert_eq!(format!("{err}"), "Found 3 errors:\n\ta\n\tb\n\tc\n");

        let err = join!(Arc::new(join!("a", "b").unwrap()), "c").unwrap();
        assert_eq!(format!("{err:?}"), r#"[3]error{"a","b","c"}"#);
    }

    #[test]
    fn test_clone_shares_leaves() {
        let err = join!("a", "b").unwrap();
        let clone = err.clone();

        let original: vec::Vec<_> = err.leaves().map(|leaf| leaf as *const _ as *const ()).collect();
        let cloned: vec::Vec<_> = clone.leaves().map(|leaf| leaf as *const _ as *const ()).collect();
        assert_eq!(original, cloned);
    }

    #[test]
    fn test_debug_escapes_leaves() {
        let err = join!("say \"hi\"", "two\nlines").unwrap();
        assert_eq!(format!("{err:?}"), r#"[2]error{"say \"hi\"","two\nlines"}"#);
    }

    #[test]
    fn test_display_keeps_leaf_text() {
        let text = String::from("  padded\twith tabs  ");
        let err = join!(text.clone()).unwrap();
        assert_eq!(format!("{err}"), format!("Found one error:\n\t{text}\n"));
    }
}
