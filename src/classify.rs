use crate::report::{Report, TestRecord, TestStatus};

/// Failed tests sharing a label, in first-seen order.
#[derive(Debug, Clone, PartialEq)]
pub struct Group<'a> {
    pub label: String,
    pub tests: Vec<&'a TestRecord>,
}

/// Status buckets and failure groupings for one report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Classification<'a> {
    pub passed: Vec<&'a TestRecord>,
    pub failed: Vec<&'a TestRecord>,
    pub skipped: Vec<&'a TestRecord>,
    pub by_category: Vec<Group<'a>>,
    pub by_error_type: Vec<Group<'a>>,
}

impl<'a> Classification<'a> {
    /// The leading failures that receive detailed suggestions.
    pub fn fix_targets(&self, limit: usize) -> &[&'a TestRecord] {
        &self.failed[..limit.min(self.failed.len())]
    }
}

/// Partition `report.tests` by status. Records with an unrecognized status are
/// left out of every bucket.
pub fn classify(report: &Report) -> Classification<'_> {
    let mut out = Classification::default();

    for test in &report.tests {
        match test.status {
            TestStatus::Passed => out.passed.push(test),
            TestStatus::Skipped => out.skipped.push(test),
            TestStatus::Failed => {
                out.failed.push(test);
                push_grouped(&mut out.by_category, test.category_label(), test);
                push_grouped(&mut out.by_error_type, &error_type(test), test);
            }
            TestStatus::Missing | TestStatus::Other(_) => {}
        }
    }

    out
}

/// Leading part of the error message up to the first `:`, e.g. `TypeError`.
pub fn error_type(test: &TestRecord) -> String {
    match test.error.as_deref() {
        Some(error) if !error.is_empty() => {
            error.split(':').next().unwrap_or(error).trim().to_string()
        }
        _ => "Unknown error".to_string(),
    }
}

fn push_grouped<'a>(groups: &mut Vec<Group<'a>>, label: &str, test: &'a TestRecord) {
    match groups.iter_mut().find(|g| g.label == label) {
        Some(group) => group.tests.push(test),
        None => groups.push(Group {
            label: label.to_string(),
            tests: vec![test],
        }),
    }
}
