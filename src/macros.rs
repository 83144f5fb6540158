/// Combines errors into an `Option<MultiError>`.
///
/// Each argument can be an error value, an `Option` of an error value, or a
/// string message; everything that converts into a [`BoxError`] is accepted
/// and `None` arguments are skipped. The result is the same as calling
/// [`join()`] with the arguments in order.
///
/// [`BoxError`]: crate::BoxError
/// [`join()`]: crate::join()
///
/// # Examples
///
/// ```
/// use std::io;
///
/// use multierror::join;
///
/// let missing: Option<io::Error> = None;
/// let err = join!(
///     io::Error::new(io::ErrorKind::NotFound, "config.toml not found"),
///     missing,
///     "retry limit reached",
/// )
/// .unwrap();
///
/// assert_eq!(
///     format!("{err:?}"),
///     r#"[2]error{"config.toml not found","retry limit reached"}"#
/// );
///
/// assert!(join!().is_none());
/// assert!(join!(None::<io::Error>, None::<io::Error>).is_none());
/// ```
#[macro_export]
macro_rules! join {
    ($($error:expr),* $(,)?) => {
        $crate::__private::join_slots($crate::__private::vec![$(
            {
                use $crate::__private::kind::*;
                let error = $error;
                (&&Wrap(&error)).slot_kind().into_slot(error)
            }
        ),*])
    };
}

/// Appends errors onto a primary error, producing an `Option<MultiError>`.
///
/// Arguments are accepted the same way as in [`join!`]. If the primary error
/// is a `MultiError`, the other errors are added to it without nesting; see
/// [`append()`].
///
/// [`append()`]: crate::append()
///
/// # Examples
///
/// ```
/// use multierror::{append, join};
///
/// let err = append!(join!("a", "b"), "c", None::<&str>, "d").unwrap();
/// assert_eq!(err.to_string(), "Found 4 errors:\n\ta\n\tb\n\tc\n\td\n");
///
/// assert!(append!(None::<&str>).is_none());
/// ```
#[macro_export]
macro_rules! append {
    ($primary:expr $(, $error:expr)* $(,)?) => {
        $crate::__private::append_slots(
            {
                use $crate::__private::kind::*;
                let primary = $primary;
                (&&Wrap(&primary)).slot_kind().into_slot(primary)
            },
            $crate::__private::vec![$(
                {
                    use $crate::__private::kind::*;
                    let error = $error;
                    (&&Wrap(&error)).slot_kind().into_slot(error)
                }
            ),*],
        )
    };
}
