//! Text, JSON and binary encodings of a [`MultiError`].
//!
//! All encodings work on the rendered form. The tree of nested groups is not
//! preserved, and nothing can be decoded back into a [`MultiError`].

use alloc::{string::ToString, vec::Vec};
#[cfg(feature = "serde")]
use core::fmt;

use crate::MultiError;

/// An error returned when a [`MultiError`] could not be encoded.
///
/// The underlying encoder error is kept as the [`source`](core::error::Error::source).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// Encoding as JSON failed.
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    /// Encoding with bincode failed.
    #[cfg(feature = "bincode")]
    #[cfg_attr(docsrs, doc(cfg(feature = "bincode")))]
    #[error("binary encoding failed: {0}")]
    Binary(#[from] bincode::error::EncodeError),
}

/// Leaf descriptions separated by `", "`.
#[cfg(feature = "serde")]
struct Joined<'a>(&'a MultiError);

#[cfg(feature = "serde")]
impl fmt::Display for Joined<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, leaf) in self.0.leaves().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            fmt::Display::fmt(leaf, f)?;
        }
        Ok(())
    }
}

impl MultiError {
    /// Returns the text encoding, byte for byte the same as the `Display`
    /// output.
    ///
    /// # Examples
    ///
    /// ```
    /// let err = multierror::join!("a").unwrap();
    /// assert_eq!(err.encode_text(), b"Found one error:\n\ta\n");
    /// ```
    #[must_use]
    pub fn encode_text(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }

    /// Encodes the error as a JSON string holding the leaf descriptions joined
    /// by `", "`.
    ///
    /// This is the same output as `serde_json::to_vec(&self)`.
    ///
    /// # Examples
    ///
    /// ```
    /// let err = multierror::join!("x", "y").unwrap();
    /// assert_eq!(err.to_json().unwrap(), br#""x, y""#);
    /// ```
    #[cfg(feature = "serde")]
    #[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
    pub fn to_json(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(serde_json::to_vec(self)?)
    }

    /// Encodes the `Display` output as a single bincode `String`, using
    /// [`bincode::config::standard`].
    ///
    /// The bytes can be decoded as a `String` by any bincode decoder with the
    /// same configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// let err = multierror::join!("a", "b").unwrap();
    /// let bytes = err.encode_binary().unwrap();
    ///
    /// let (decoded, _): (String, usize) =
    ///     bincode::decode_from_slice(&bytes, bincode::config::standard()).unwrap();
    /// assert_eq!(decoded, err.to_string());
    /// ```
    #[cfg(feature = "bincode")]
    #[cfg_attr(docsrs, doc(cfg(feature = "bincode")))]
    pub fn encode_binary(&self) -> Result<Vec<u8>, EncodeError> {
        Ok(bincode::encode_to_vec(self, bincode::config::standard())?)
    }
}

#[cfg(feature = "serde")]
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
impl serde::Serialize for MultiError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(&Joined(self))
    }
}

#[cfg(feature = "bincode")]
#[cfg_attr(docsrs, doc(cfg(feature = "bincode")))]
impl bincode::Encode for MultiError {
    fn encode<E: bincode::enc::Encoder>(
        &self,
        encoder: &mut E,
    ) -> Result<(), bincode::error::EncodeError> {
        bincode::Encode::encode(&self.to_string(), encoder)
    }
}

#[cfg(test)]
mod tests {
    use alloc::{string::String, vec::Vec};

    use super::*;
    use crate::join;

    #[cfg(feature = "serde")]
    #[test]
    fn test_joined_separator() {
        let err = join!(join!("a", "b"), "c").unwrap();
        assert_eq!(Joined(&err).to_string(), "a, b, c");
    }

    #[test]
    fn test_encode_text_matches_display() {
        let err = join!("a", "b", "c").unwrap();
        assert_eq!(err.encode_text(), err.to_string().into_bytes());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_escapes_leaves() {
        let err = join!("quote \"here\"", "tab\there").unwrap();
        assert_eq!(
            String::from_utf8(err.to_json().unwrap()).unwrap(),
            r#""quote \"here\", tab\there""#
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_inside_structures() {
        let errors = [join!("a").unwrap(), join!("b", "c").unwrap()];
        assert_eq!(serde_json::to_string(&errors).unwrap(), r#"["a","b, c"]"#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_json_empty_is_empty_string() {
        let err = MultiError::from_children(Vec::new());
        assert_eq!(err.to_json().unwrap(), br#""""#);
    }

    #[cfg(feature = "bincode")]
    #[test]
    fn test_binary_is_length_prefixed_string() {
        let err = join!("a").unwrap();
        let rendered = err.to_string();
        let bytes = err.encode_binary().unwrap();

        assert_eq!(usize::from(bytes[0]), rendered.len());
        assert_eq!(&bytes[1..], rendered.as_bytes());
        assert_eq!(
            bytes,
            bincode::encode_to_vec(&rendered, bincode::config::standard()).unwrap()
        );
    }

    #[test]
    fn test_encode_error_messages() {
        #[cfg(feature = "serde")]
        {
            let json = serde_json::from_str::<u8>("x").unwrap_err();
            let err = EncodeError::from(json);
            assert!(err.to_string().starts_with("json encoding failed: "));
            assert!(core::error::Error::source(&err).is_some());
        }

        #[cfg(feature = "bincode")]
        {
            let err = EncodeError::from(bincode::error::EncodeError::Other("out of space"));
            assert!(err.to_string().starts_with("binary encoding failed: "));
        }
    }
}
