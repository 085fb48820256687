//! Test discovery and selection

use std::collections::HashSet;
use std::path::Path;

use fwt_domain::TestType;
use fwt_domain::error::{Error, Result};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Test ids under `tests_dir` for `test_type`, sorted by name
///
/// A test is a directory directly under `tests_dir` whose name starts with
/// the prefix of the test type.
pub fn discover_tests(tests_dir: &Path, test_type: TestType) -> Result<Vec<String>> {
    if !tests_dir.is_dir() {
        return Err(Error::configuration(format!(
            "Tests directory not found: {}",
            tests_dir.display()
        )));
    }

    let mut ids = Vec::new();
    for entry in WalkDir::new(tests_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| Error::Io {
            message: format!("Failed to read {}", tests_dir.display()),
            source: Some(Box::new(e)),
        })?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "Skipping test directory with a non UTF-8 name");
            continue;
        };
        if test_type.is_test_dir(name) {
            ids.push(name.to_string());
        }
    }

    debug!(count = ids.len(), test_type = %test_type, "Discovered tests");
    Ok(ids)
}

/// Split a user supplied list (`"test_a, test_b test_c"`) into ids
pub fn parse_test_list(raw: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|id| !id.is_empty())
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect()
}

/// Tests to launch and tests to report as skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub run: Vec<String>,
    pub skipped: Vec<String>,
}

/// Apply include and skip sets to the discovered ids
///
/// A non-empty `include` restricts the run to those ids. Ids in `skip` are
/// reported as skipped even when they are also included.
pub fn select_tests(
    test_ids: &[String],
    skip: &HashSet<String>,
    include: &HashSet<String>,
) -> Selection {
    for id in include.iter().filter(|id| !test_ids.contains(id)) {
        warn!(test = %id, "Requested test does not exist");
    }

    let mut selection = Selection::default();
    for id in test_ids {
        if skip.contains(id) {
            selection.skipped.push(id.clone());
        } else if include.is_empty() || include.contains(id) {
            selection.run.push(id.clone());
        }
    }
    selection
}
