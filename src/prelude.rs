//! Commonly used items for convenient importing.
//!
//! The prelude module re-exports the most frequently used types, traits, and
//! macros of this crate, so a single use statement is enough in most code.
//!
//! # Usage
//!
//! ```rust
//! use multierror::prelude::*;
//!
//! fn shutdown(results: [Result<(), std::fmt::Error>; 3]) -> Result<(), MultiError> {
//!     match join(results.into_iter().map(Result::err)) {
//!         Some(err) => Err(err),
//!         None => Ok(()),
//!     }
//! }
//!
//! fn main() {
//!     let err = shutdown([Ok(()), Err(std::fmt::Error), Ok(())]).unwrap_err();
//!     assert_eq!(err.len(), 1);
//!     assert!(shutdown([Ok(()), Ok(()), Ok(())]).is_ok());
//! }
//! ```
//!
//! # What's Included
//!
//! - **[`MultiError`]** and **[`BoxError`]**
//! - **[`join()`]** and **[`append()`]**, and the **[`join!`]** and
//!   **[`append!`]** macros
//! - **[`OptionExt`]**: queries on `Option<MultiError>`
//! - **[`IteratorExt`]**: collecting every error of an iterator

pub use crate::{
    BoxError, MultiError, append, iterator_ext::IteratorExt, join, option_ext::OptionExt,
};
