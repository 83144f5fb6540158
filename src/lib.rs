#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    unsafe_code,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Combine multiple independent errors into a single error value.
//!
//! ## Overview
//!
//! Sometimes an operation fails more than once before it gives up: a batch
//! job where several items are invalid, a shutdown sequence where several
//! subsystems fail to stop, a validation pass that should report every
//! problem instead of the first one. This crate provides [`MultiError`], an
//! error that holds any number of other errors and still behaves like a
//! normal [`Error`](core::error::Error):
//!
//! - It renders deterministically, both for humans ([`Display`]) and for
//!   machines (JSON through `serde`, binary through `bincode`).
//! - It can be searched for a specific error value ([`MultiError::is`]) or
//!   for an error of a specific type ([`MultiError::find`]).
//! - It can be walked with [`Error::source`](core::error::Error::source) like
//!   any other error chain, one error at a time.
//!
//! [`Display`]: core::fmt::Display
//!
//! ## Quick Example
//!
//! ```
//! use multierror::join;
//!
//! let err = join!("something bad happened", "something is broken").unwrap();
//! assert_eq!(
//!     err.to_string(),
//!     "Found 2 errors:\n\tsomething bad happened\n\tsomething is broken\n"
//! );
//! ```
//!
//! ## Join and Append
//!
//! There are two ways to build a [`MultiError`]:
//!
//! - [`join()`] combines errors as they are. If one of them is already a
//!   [`MultiError`], it is kept as a nested group. Use it to combine results
//!   of independent subsystems.
//! - [`append()`] adds errors onto an existing [`MultiError`] without adding
//!   a level of nesting. Use it to accumulate errors in a loop.
//!
//! Both skip `None` inputs and return `None` when nothing is left, so an
//! `Option<MultiError>` is always "no error" or "at least one error". Nesting
//! never shows up in the output: every query works on the *flattened* list of
//! leaf errors, in the order they were added.
//!
//! ```
//! use multierror::{append, join};
//!
//! let first = join!("a", "b");
//! let second = join!("c", "d");
//! let nested = join!(first.clone(), second).unwrap();
//! let flat = append!(first, "c", "d").unwrap();
//!
//! assert_eq!(nested.to_string(), flat.to_string());
//! assert_eq!(nested.len(), 4);
//! ```
//!
//! ## Walking the chain
//!
//! Generic error walkers only follow [`source`](core::error::Error::source),
//! one error at a time. The source of a [`MultiError`] with more than one leaf
//! is a [`Chain`]: it displays the first leaf, and its own source is a
//! [`Chain`] over the remaining leaves.
//!
//! ```
//! use core::error::Error;
//!
//! let err = multierror::join!("a", "b", "c").unwrap();
//! let mut seen = Vec::new();
//! let mut current = err.source();
//! while let Some(link) = current {
//!     seen.push(link.to_string());
//!     current = link.source();
//! }
//! assert_eq!(seen, ["a", "b", "c"]);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support in dependencies.
//! - `serde` (default): implements `serde::Serialize` and adds
//!   [`MultiError::to_json`].
//! - `bincode` (default): implements `bincode::Encode` and adds
//!   [`MultiError::encode_binary`].
//!
//! Without default features the crate is `no_std` and only needs `alloc`.

extern crate alloc;

#[macro_use]
mod macros;

mod chain;
mod encoding;
mod leaves;
mod multi_error;

pub mod iterator_ext;
pub mod option_ext;
pub mod prelude;

use alloc::boxed::Box;
use core::error::Error;

pub use self::{
    chain::Chain, encoding::EncodeError, leaves::Leaves, multi_error::MultiError,
};

/// The boxed error type every input of [`join()`] and [`append()`] is
/// converted into.
///
/// Anything that implements [`Error`] + [`Send`] + [`Sync`] converts into it,
/// as do `&str` and `String` messages.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// Combines errors into a [`MultiError`].
///
/// `None` entries are skipped and the order of the remaining errors is kept.
/// If nothing is left, `None` is returned; an empty [`MultiError`] is never
/// produced. Errors that are themselves a [`MultiError`] are kept as nested
/// groups, which only affects the internal structure: rendering and queries
/// always see the flattened list of leaf errors.
///
/// The [`join!`] macro accepts a mix of errors and `Option`s of errors and is
/// usually more convenient.
///
/// # Examples
///
/// ```
/// use multierror::{BoxError, join};
///
/// let errors: [Option<BoxError>; 3] = [Some("disk full".into()), None, Some("timeout".into())];
/// let err = join(errors).unwrap();
/// assert_eq!(err.len(), 2);
///
/// assert!(join(Vec::<Option<BoxError>>::new()).is_none());
/// ```
#[must_use]
pub fn join<I, E>(errors: I) -> Option<MultiError>
where
    I: IntoIterator<Item = Option<E>>,
    E: Into<BoxError>,
{
    MultiError::from_errors(errors.into_iter().flatten().map(Into::into))
}

/// Appends errors onto `primary`.
///
/// If `primary` is a [`MultiError`], the new errors are added to its own list
/// instead of nesting it. Otherwise this behaves exactly like [`join()`]
/// called with `primary` followed by `errors`. Returns `None` when there is
/// no error at all.
///
/// See also [`append!`] and [`MultiError::append`].
///
/// # Examples
///
/// ```
/// use multierror::{BoxError, MultiError, append};
///
/// let mut accumulated: Option<MultiError> = None;
/// for input in ["1", "x", "3", "y"] {
///     if let Err(err) = input.parse::<u8>() {
///         accumulated = append(accumulated, [Some(err)]);
///     }
/// }
/// assert_eq!(accumulated.unwrap().len(), 2);
///
/// assert!(append(None::<BoxError>, [None::<BoxError>, None]).is_none());
/// ```
#[must_use]
pub fn append<P, I, E>(primary: Option<P>, errors: I) -> Option<MultiError>
where
    P: Into<BoxError>,
    I: IntoIterator<Item = Option<E>>,
    E: Into<BoxError>,
{
    let errors = errors.into_iter().flatten().map(Into::into);
    match primary.map(Into::into) {
        Some(primary) => match MultiError::from_boxed(primary) {
            Ok(multi) => {
                let multi = multi.append(errors.map(Some));
                Some(multi).filter(|multi| !multi.is_empty())
            }
            Err(primary) => MultiError::from_errors(core::iter::once(primary).chain(errors)),
        },
        None => MultiError::from_errors(errors),
    }
}

// Not public API. Referenced by macro-generated code.
#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use alloc::vec;

    use alloc::vec::Vec;

    use crate::{BoxError, MultiError};

    #[doc(hidden)]
    #[must_use]
    pub fn join_slots(slots: Vec<Option<BoxError>>) -> Option<MultiError> {
        crate::join(slots)
    }

    #[doc(hidden)]
    #[must_use]
    pub fn append_slots(primary: Option<BoxError>, slots: Vec<Option<BoxError>>) -> Option<MultiError> {
        crate::append(primary, slots)
    }

    #[doc(hidden)]
    pub mod kind {
        use crate::BoxError;

        #[doc(hidden)]
        pub struct Wrap<'a, T>(pub &'a T);

        #[doc(hidden)]
        #[derive(Copy, Clone)]
        pub struct OptionSlot;

        #[doc(hidden)]
        #[derive(Copy, Clone)]
        pub struct ErrorSlot;

        impl OptionSlot {
            #[doc(hidden)]
            #[inline(always)]
            pub fn into_slot<E: Into<BoxError>>(self, error: Option<E>) -> Option<BoxError> {
                error.map(Into::into)
            }
        }

        impl ErrorSlot {
            #[doc(hidden)]
            #[inline(always)]
            pub fn into_slot<E: Into<BoxError>>(self, error: E) -> Option<BoxError> {
                Some(error.into())
            }
        }

        #[doc(hidden)]
        pub trait OptionKind {
            #[inline(always)]
            fn slot_kind(&self) -> OptionSlot {
                OptionSlot
            }
        }

        impl<E> OptionKind for &Wrap<'_, Option<E>> where E: Into<BoxError> {}

        #[doc(hidden)]
        pub trait ErrorKind {
            #[inline(always)]
            fn slot_kind(&self) -> ErrorSlot {
                ErrorSlot
            }
        }

        impl<E> ErrorKind for Wrap<'_, E> where E: Into<BoxError> {}
    }
}
