//! Queries on an `Option<MultiError>` that treat `None` as "no error".
//!
//! [`join()`](crate::join()) and [`append()`](crate::append()) return
//! `Option<MultiError>`, where `None` means that nothing went wrong. The
//! [`OptionExt`] trait lets you query such a value without unwrapping it
//! first, with `None` giving the neutral answer:
//!
//! | Method                            | `None` gives          |
//! |-----------------------------------|-----------------------|
//! | [`is`](OptionExt::is)             | `false`               |
//! | [`find`](OptionExt::find)         | `None`                |
//! | [`render`](OptionExt::render)     | an empty `String`     |
//! | [`to_json`](OptionExt::to_json)   | no bytes and no error |
//! | [`encode_binary`](OptionExt::encode_binary) | no bytes and no error |
//!
//! # Examples
//!
//! ```
//! use multierror::{join, option_ext::OptionExt};
//!
//! let nothing = join!(None::<&str>);
//! assert_eq!(nothing.render(), "");
//! assert!(nothing.to_json().unwrap().is_empty());
//!
//! let something = join!("disk full");
//! assert_eq!(something.render(), "Found one error:\n\tdisk full\n");
//! ```

use alloc::string::{String, ToString};
#[cfg(any(feature = "serde", feature = "bincode"))]
use alloc::vec::Vec;
use core::{borrow::Borrow, error::Error};

#[cfg(any(feature = "serde", feature = "bincode"))]
use crate::EncodeError;
use crate::MultiError;

/// Extension methods for `Option<MultiError>` and `Option<&MultiError>`.
///
/// See the [module documentation](self) for an overview.
pub trait OptionExt {
    /// Returns `true` if this is `Some` and [`MultiError::is`] matches
    /// `target`.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::fmt;
    ///
    /// use multierror::{join, option_ext::OptionExt};
    ///
    /// let err = join!(None::<fmt::Error>, fmt::Error);
    /// assert!(err.is(&fmt::Error));
    /// assert!(!join!(None::<fmt::Error>).is(&fmt::Error));
    /// ```
    fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static;

    /// Returns the first contained error of type `E`, or `None` if this is
    /// `None`.
    ///
    /// See [`MultiError::find`].
    fn find<E>(&self) -> Option<&E>
    where
        E: Error + 'static;

    /// Returns the `Display` output, or an empty string if this is `None`.
    fn render(&self) -> String;

    /// Returns [`MultiError::to_json`], or no bytes if this is `None`.
    ///
    /// This differs from serializing the `Option` itself, which produces
    /// `null` for `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use multierror::{MultiError, join, option_ext::OptionExt};
    ///
    /// let nothing: Option<MultiError> = None;
    /// assert_eq!(nothing.to_json().unwrap(), b"");
    /// assert_eq!(serde_json::to_vec(&nothing).unwrap(), b"null");
    ///
    /// assert_eq!(join!("x", "y").to_json().unwrap(), br#""x, y""#);
    /// ```
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    fn to_json(&self) -> Result<Vec<u8>, EncodeError>;

    /// Returns [`MultiError::encode_binary`], or no bytes if this is `None`.
    #[cfg(feature = "bincode")]
    #[cfg_attr(docsrs, doc(cfg(feature = "bincode")))]
    fn encode_binary(&self) -> Result<Vec<u8>, EncodeError>;
}

fn get<T>(option: &Option<T>) -> Option<&MultiError>
where
    T: Borrow<MultiError>,
{
    option.as_ref().map(|multi| multi.borrow())
}

impl<T> OptionExt for Option<T>
where
    T: Borrow<MultiError>,
{
    fn is<E>(&self, target: &E) -> bool
    where
        E: Error + PartialEq + 'static,
    {
        get(self).is_some_and(|multi| multi.is(target))
    }

    fn find<E>(&self) -> Option<&E>
    where
        E: Error + 'static,
    {
        get(self).and_then(MultiError::find::<E>)
    }

    fn render(&self) -> String {
        get(self).map(MultiError::to_string).unwrap_or_default()
    }

    #[cfg(feature = "serde")]
    fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        get(self).map_or_else(|| Ok(Vec::new()), MultiError::to_json)
    }

    #[cfg(feature = "bincode")]
    fn encode_binary(&self) -> Result<Vec<u8>, EncodeError> {
        get(self).map_or_else(|| Ok(Vec::new()), MultiError::encode_binary)
    }
}

#[cfg(test)]
mod tests {
    use core::fmt;

    use super::*;
    use crate::join;

    #[test]
    fn test_none_is_neutral() {
        let none: Option<MultiError> = None;
        assert!(!none.is(&fmt::Error));
        assert!(none.find::<fmt::Error>().is_none());
        assert_eq!(none.render(), "");

        #[cfg(feature = "serde")]
        assert!(none.to_json().unwrap().is_empty());

        #[cfg(feature = "bincode")]
        assert!(none.encode_binary().unwrap().is_empty());
    }

    #[test]
    fn test_borrowed_option() {
        let err = join!("a", fmt::Error).unwrap();
        let borrowed: Option<&MultiError> = Some(&err);
        assert!(borrowed.is(&fmt::Error));
        assert_eq!(borrowed.find::<fmt::Error>(), Some(&fmt::Error));
        assert_eq!(borrowed.render(), err.to_string());
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_some_encodes_like_the_error() {
        let err = join!("a", "b");
        let inner = err.as_ref().unwrap().encode_binary().unwrap();
        assert_eq!(err.encode_binary().unwrap(), inner);
    }
}
