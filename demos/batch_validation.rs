// Batch validation with error collection
//
// Validating a batch should report every invalid record, not only the first
// one. This example accumulates errors three ways: with the join! macro, with
// append() in a loop, and with IteratorExt::collect_errors().

use multierror::prelude::*;

#[derive(Debug, thiserror::Error, PartialEq)]
enum RecordError {
    #[error("record {0}: name is empty")]
    EmptyName(usize),
    #[error("record {0}: age {1} is out of range")]
    AgeOutOfRange(usize, i32),
}

#[derive(Debug, thiserror::Error)]
#[error("batch {batch_id} rejected")]
struct BatchRejected {
    batch_id: u32,
    #[source]
    errors: MultiError,
}

struct Record {
    name: &'static str,
    age: i32,
}

fn check_name(index: usize, record: &Record) -> Option<RecordError> {
    record
        .name
        .is_empty()
        .then_some(RecordError::EmptyName(index))
}

fn check_age(index: usize, record: &Record) -> Option<RecordError> {
    (!(0..=150).contains(&record.age)).then_some(RecordError::AgeOutOfRange(index, record.age))
}

// Every check of one record, combined with join!
fn validate_record(index: usize, record: &Record) -> Result<(), MultiError> {
    match join!(check_name(index, record), check_age(index, record)) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

// Accumulate into one flat list with append
fn validate_batch(records: &[Record]) -> Option<MultiError> {
    let mut errors: Option<MultiError> = None;
    for (index, record) in records.iter().enumerate() {
        errors = append(errors, [validate_record(index, record).err()]);
    }
    errors
}

// The same thing as an iterator pipeline
fn validated_names(records: &[Record]) -> Result<Vec<&'static str>, MultiError> {
    records
        .iter()
        .enumerate()
        .map(|(index, record)| validate_record(index, record).map(|()| record.name))
        .collect_errors()
}

fn main() {
    let records = [
        Record { name: "ada", age: 36 },
        Record { name: "", age: 41 },
        Record { name: "grace", age: -3 },
        Record { name: "", age: 200 },
    ];

    let errors = validate_batch(&records);
    println!("{}", errors.render());
    println!("{errors:?}");

    println!("Contains the empty name of record 1: {}", errors.is(&RecordError::EmptyName(1)));
    if let Some(first) = errors.find::<RecordError>() {
        println!("First record error: {first}");
    }

    println!("JSON: {}", String::from_utf8_lossy(&errors.to_json().unwrap_or_default()));

    match validated_names(&records) {
        Ok(names) => println!("All valid: {names:?}"),
        Err(errors) => {
            let rejected = BatchRejected {
                batch_id: 7,
                errors,
            };
            println!("{rejected}");

            // The multi error is still reachable through the wrapper
            let mut source = std::error::Error::source(&rejected);
            while let Some(error) = source {
                println!("  caused by: {}", error.to_string().trim_end());
                source = error.source();
            }
        }
    }

    let valid = [Record { name: "linus", age: 54 }];
    assert!(validate_batch(&valid).is_none());
    assert_eq!(validated_names(&valid).ok(), Some(vec!["linus"]));
}
