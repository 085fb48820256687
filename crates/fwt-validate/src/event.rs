//! Hard assertions on telemetry events

use std::path::Path;

use serde_json::{Value, json};

use crate::assertion::AssertionFailure;
use crate::subset::check_subset;

/// Fail unless `expected` is contained in `event`
#[track_caller]
pub fn assert_event_contains_subset(event: &Value, expected: &Value) -> Result<(), AssertionFailure> {
    match check_subset(event, expected) {
        Ok(()) => Ok(()),
        Err(mismatch) => Err(AssertionFailure::new(mismatch.to_string())),
    }
}

/// Subset check with the expectation loaded from a JSON file
#[track_caller]
pub fn assert_event_contains_subset_file(
    event: &Value,
    expected_file: &Path,
) -> Result<(), AssertionFailure> {
    let content = match std::fs::read_to_string(expected_file) {
        Ok(content) => content,
        Err(e) => {
            return Err(AssertionFailure::new(format!(
                "Cannot read expected event file {}: {e}",
                expected_file.display()
            )));
        }
    };
    let expected: Value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            return Err(AssertionFailure::new(format!(
                "Expected event file {} is not valid JSON: {e}",
                expected_file.display()
            )));
        }
    };
    if expected.is_null() {
        return Err(AssertionFailure::new(format!(
            "Expected event file {} is empty",
            expected_file.display()
        )));
    }
    assert_event_contains_subset(event, &expected)
}

/// Fail unless `events` is a list of exactly `length` elements
#[track_caller]
pub fn assert_events_length_is(events: &Value, length: usize) -> Result<(), AssertionFailure> {
    let Some(items) = events.as_array() else {
        return Err(AssertionFailure::new("Error: Events is not a list."));
    };
    if items.len() != length {
        return Err(AssertionFailure::new(format!(
            "Error: Events list contains {} elements and not {length} elements.",
            items.len()
        )));
    }
    Ok(())
}

/// A `started` event must carry an `agent` object
#[track_caller]
pub fn assert_started_event_is_valid(event: &Value) -> Result<(), AssertionFailure> {
    assert_event_contains_subset(event, &json!({"type": "started", "agent": {}}))
}
