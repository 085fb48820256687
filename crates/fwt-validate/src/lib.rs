//! Event Validation for Firewall Tests
//!
//! This crate provides the checks that test drivers run against telemetry
//! events and HTTP responses:
//! - Subset matching of JSON events (`subset`)
//! - Hard assertions returning a located [`AssertionFailure`] (`assertion`, `event`)
//! - A soft assertion collector that keeps going after a failed check (`collector`)
//!
//! # Example
//!
//! ```ignore
//! use fwt_validate::{AssertionCollector, matches};
//! use serde_json::json;
//!
//! let event = json!({"type": "detected_attack", "attack": {"kind": "sql_injection"}});
//! assert!(matches(&event, &json!({"attack": {"kind": "sql_injection"}})));
//!
//! let mut collector = AssertionCollector::new();
//! collector.soft_assert_subset(&event, &json!({"type": "started"}));
//! collector.finish()?; // prints `[FAIL] ...` and returns the aggregate error
//! ```

pub mod assertion;
pub mod collector;
pub mod event;
pub mod subset;

pub use assertion::{AssertionFailure, AssertionFailures};
pub use collector::AssertionCollector;
pub use event::{
    assert_event_contains_subset, assert_event_contains_subset_file, assert_events_length_is,
    assert_started_event_is_valid,
};
pub use subset::{MismatchKind, SubsetMismatch, check_subset, matches};
