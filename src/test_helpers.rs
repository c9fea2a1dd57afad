use crate::report::{TestRecord, TestStatus};

/// Create a `TestRecord` with sensible defaults for tests.
pub fn make_test(name: &str, category: &str, status: &str, error: Option<&str>) -> TestRecord {
    TestRecord {
        name: name.to_string(),
        category: category.to_string(),
        status: TestStatus::from(status.to_string()),
        error: error.map(str::to_string),
        details: None,
        extra: Default::default(),
    }
}
