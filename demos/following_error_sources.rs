//! Walking a multi error with `Error::source`.
//!
//! Code that only knows about `std::error::Error` follows `source()` one link
//! at a time. This example shows what such code sees for a `MultiError`, and
//! how `is` and `find` look through wrapper errors on each leaf.

use std::{error::Error, io};

use multierror::{Chain, MultiError, join};

#[derive(Debug, thiserror::Error)]
#[error("failed to stop {name}")]
struct StopError {
    name: &'static str,
    #[source]
    source: io::Error,
}

#[derive(Debug, thiserror::Error, PartialEq)]
#[error("timed out after {0}s")]
struct Timeout(u64);

// Generic reporter that knows nothing about MultiError
fn print_sources(error: &(dyn Error + 'static)) {
    println!("error: {}", error.to_string().trim_end());
    let mut depth = 1;
    let mut current = error.source();
    while let Some(link) = current {
        println!("{:indent$}-> {link}", "", indent = depth * 2);
        if let Some(chain) = link.downcast_ref::<Chain>() {
            println!(
                "{:indent$}   ({} more after this one)",
                "",
                chain.remaining(),
                indent = depth * 2
            );
        }
        depth += 1;
        current = link.source();
    }
}

fn shutdown() -> Option<MultiError> {
    let database = StopError {
        name: "database",
        source: io::Error::new(io::ErrorKind::BrokenPipe, "connection closed"),
    };
    let workers = join!(Timeout(30), "worker 3 panicked");
    join!(database, workers, None::<Timeout>, "cache flush skipped")
}

fn main() {
    let Some(error) = shutdown() else {
        println!("clean shutdown");
        return;
    };

    println!("=== Display ===\n");
    println!("{error}");

    println!("=== Walking source() ===\n");
    print_sources(&error);

    println!("\n=== Queries ===\n");
    println!("is(Timeout(30)): {}", error.is(&Timeout(30)));
    println!("is(Timeout(60)): {}", error.is(&Timeout(60)));

    // find looks through the StopError wrapper into its io::Error source
    if let Some(io_error) = error.find::<io::Error>() {
        println!("io error kind: {:?}", io_error.kind());
    }

    let mut timeout: Option<&Timeout> = None;
    if error.extract_into(&mut timeout)
        && let Some(Timeout(seconds)) = timeout
    {
        println!("first timeout: {seconds}s");
    }
}
