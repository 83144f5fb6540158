//! Collecting every error of an iterator of `Result`s.

use alloc::vec::Vec;
use core::iter::FusedIterator;

use crate::{BoxError, MultiError};

/// Extension methods for iterators over `Result` types to collect errors.
///
/// The standard library's [`Iterator::collect`] stops at the first error.
/// [`collect_errors`](IteratorExt::collect_errors) keeps going and gathers
/// every error into one [`MultiError`], in the order they were produced.
///
/// ```rust
/// use multierror::prelude::*;
///
/// let inputs = vec!["1", "2", "invalid", "4", "bad"];
///
/// // Standard collect stops at first error
/// let standard: Result<Vec<u8>, _> = inputs.iter().map(|s| s.parse::<u8>()).collect();
/// assert!(standard.is_err());
///
/// // collect_errors processes ALL items and collects ALL errors
/// let result: Result<Vec<u8>, MultiError> =
///     inputs.into_iter().map(|s| s.parse::<u8>()).collect_errors();
/// let all_errors = result.unwrap_err();
/// assert_eq!(all_errors.len(), 2);
/// ```
pub trait IteratorExt<A, E>: Sized + Iterator<Item = Result<A, E>> {
    /// Collects successful values into a container, or all errors into a
    /// [`MultiError`].
    ///
    /// Once an error has been seen, the remaining successful values are
    /// dropped but the remaining errors are still collected.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::collections::BTreeSet;
    ///
    /// use multierror::prelude::*;
    ///
    /// let inputs = vec!["1", "2", "2"];
    /// let result: Result<BTreeSet<u8>, MultiError> =
    ///     inputs.into_iter().map(|s| s.parse::<u8>()).collect_errors();
    /// assert_eq!(result.unwrap(), BTreeSet::from([1u8, 2]));
    /// ```
    fn collect_errors<Container>(self) -> Result<Container, MultiError>
    where
        Container: FromIterator<A>,
        E: Into<BoxError>;
}

struct IteratorWrapper<'a, Iter> {
    iter: Iter,
    errors: &'a mut Option<MultiError>,
}

impl<'a, Iter, Object, Error> Iterator for IteratorWrapper<'a, Iter>
where
    Iter: Iterator<Item = Result<Object, Error>>,
    Error: Into<BoxError>,
{
    type Item = Object;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.errors.is_some() {
            return None;
        }

        match self.iter.next() {
            Some(Ok(object)) => Some(object),
            Some(Err(err)) => {
                let rest: Vec<_> = (&mut self.iter).filter_map(Result::err).map(Some).collect();
                *self.errors = crate::append(Some(err), rest);
                None
            }
            None => None,
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.errors.is_some() {
            (0, Some(0))
        } else {
            let (_, upper) = self.iter.size_hint();
            (0, upper)
        }
    }
}

impl<'a, Iter, Object, Error> FusedIterator for IteratorWrapper<'a, Iter>
where
    Iter: FusedIterator<Item = Result<Object, Error>>,
    Error: Into<BoxError>,
{
}

impl<A, E, I> IteratorExt<A, E> for I
where
    I: Iterator<Item = Result<A, E>>,
{
    #[inline]
    fn collect_errors<Container>(self) -> Result<Container, MultiError>
    where
        Container: FromIterator<A>,
        E: Into<BoxError>,
    {
        let mut errors = None;
        let result = Container::from_iter(IteratorWrapper {
            iter: self,
            errors: &mut errors,
        });
        match errors {
            Some(errors) => Err(errors),
            None => Ok(result),
        }
    }
}
