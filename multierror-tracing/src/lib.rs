#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Tracing events for multierror errors.
//!
//! A [`MultiError`] usually ends up in a log. Logging its `Display` output in
//! one event works, but loses the structure: log pipelines see one opaque
//! multi-line message. This crate emits one [`tracing`] event per leaf error
//! instead, with the position of the leaf as structured fields, followed by a
//! summary event.
//!
//! # Quick Start
//!
//! ```
//! use multierror::join;
//! use multierror_tracing::TraceErrors;
//! use tracing::Level;
//!
//! let err = join!("disk full", "connection reset").unwrap();
//! err.trace_errors(Level::WARN);
//! ```
//!
//! With a `fmt` subscriber installed, this logs:
//!
//! ```text
//!  WARN multierror_tracing: error index=0 total=2 error=disk full
//!  WARN multierror_tracing: error index=1 total=2 error=connection reset
//!  WARN multierror_tracing: found errors total=2
//! ```
//!
//! Results can be traced in passing with [`TraceResultExt::trace_err`]:
//!
//! ```
//! use multierror::{MultiError, join};
//! use multierror_tracing::TraceResultExt;
//! use tracing::Level;
//!
//! fn validate() -> Result<(), MultiError> {
//!     Err(join!("name is empty", "age is negative").unwrap())
//! }
//!
//! let result = validate().trace_err(Level::ERROR);
//! assert!(result.is_err());
//! ```
//!
//! # Environment Variables
//!
//! - `MULTIERROR_TRACING` - Comma-separated options:
//!   - `summary` - Only emit the summary event, not one event per leaf

use std::{borrow::Borrow, sync::OnceLock};

use multierror::MultiError;
use tracing::Level;

macro_rules! event_at {
    ($level:expr, $($args:tt)+) => {{
        let level = $level;
        if level == Level::ERROR {
            tracing::event!(Level::ERROR, $($args)+);
        } else if level == Level::WARN {
            tracing::event!(Level::WARN, $($args)+);
        } else if level == Level::INFO {
            tracing::event!(Level::INFO, $($args)+);
        } else if level == Level::DEBUG {
            tracing::event!(Level::DEBUG, $($args)+);
        } else {
            tracing::event!(Level::TRACE, $($args)+);
        }
    }};
}

/// Controls which events [`TraceErrors`] emits.
///
/// # Examples
///
/// ```
/// use multierror::join;
/// use multierror_tracing::{TraceErrors, TraceOptions};
/// use tracing::Level;
///
/// let options = TraceOptions { per_leaf: false };
/// join!("a", "b").unwrap().trace_errors_with(Level::INFO, options);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct TraceOptions {
    /// Whether to emit one event per leaf error before the summary event.
    pub per_leaf: bool,
}

#[derive(Debug)]
struct MultierrorTracingEnvOptions {
    summary_only: bool,
}

impl MultierrorTracingEnvOptions {
    fn get() -> &'static Self {
        static MULTIERROR_TRACING_FLAGS: OnceLock<MultierrorTracingEnvOptions> = OnceLock::new();

        MULTIERROR_TRACING_FLAGS.get_or_init(|| {
            let mut summary_only = false;

            if let Some(var) = std::env::var_os("MULTIERROR_TRACING") {
                for v in var.to_string_lossy().split(',') {
                    if v.trim().eq_ignore_ascii_case("summary") {
                        summary_only = true;
                    }
                }
            }

            MultierrorTracingEnvOptions { summary_only }
        })
    }
}

impl TraceOptions {
    /// Creates [`TraceOptions`] from the environment.
    ///
    /// # Environment Variables
    ///
    /// - `MULTIERROR_TRACING` - Comma-separated options:
    ///   - `summary` - Only emit the summary event, not one event per leaf
    #[must_use]
    pub fn new() -> Self {
        let env_options = MultierrorTracingEnvOptions::get();

        Self {
            per_leaf: !env_options.summary_only,
        }
    }
}

impl Default for TraceOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Emits [`tracing`] events describing the contained errors.
pub trait TraceErrors {
    /// Emits events at `level` with the options from the environment.
    ///
    /// See [`TraceOptions::new`].
    fn trace_errors(&self, level: Level) {
        self.trace_errors_with(level, TraceOptions::new());
    }

    /// Emits events at `level`.
    ///
    /// When `options.per_leaf` is set, one event is emitted per leaf error,
    /// in order, with the fields `index`, `total` and `error` (the leaf's
    /// `Display` output). Then a summary event with the field `total` is
    /// emitted.
    fn trace_errors_with(&self, level: Level, options: TraceOptions);
}

impl TraceErrors for MultiError {
    fn trace_errors_with(&self, level: Level, options: TraceOptions) {
        let total = self.len();
        if options.per_leaf {
            for (index, leaf) in self.leaves().enumerate() {
                event_at!(level, index, total, error = %leaf, "error");
            }
        }
        event_at!(level, total, "found errors");
    }
}

/// `None` means that there is no error, so nothing is emitted.
impl<T> TraceErrors for Option<T>
where
    T: Borrow<MultiError>,
{
    fn trace_errors_with(&self, level: Level, options: TraceOptions) {
        if let Some(multi) = self {
            multi.borrow().trace_errors_with(level, options);
        }
    }
}

/// Extension trait for tracing the error of a `Result` in passing.
pub trait TraceResultExt: Sized {
    /// Emits events for the error, if any, and returns `self` unchanged.
    ///
    /// See [`TraceErrors::trace_errors`].
    fn trace_err(self, level: Level) -> Self;
}

impl<V> TraceResultExt for Result<V, MultiError> {
    fn trace_err(self, level: Level) -> Self {
        if let Err(multi) = &self {
            multi.trace_errors(level);
        }
        self
    }
}
