use serde::Serialize;
use serde_json::Value;

/// Which operation a payload is being validated for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Create,
    Update,
}

/// One rejected field, rendered into the error `details` array.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: &'static str,
    pub error: String,
}

impl FieldViolation {
    pub fn new(field: &'static str, error: impl Into<String>) -> Self {
        Self {
            field,
            error: error.into(),
        }
    }

    pub fn to_json(&self) -> Value {
        serde_json::json!({ "field": self.field, "error": self.error })
    }
}

/// Required fields must be present on create. Empty strings have already
/// been stripped from the payload, so a blank required field reads as absent.
pub fn required(
    field: &'static str,
    present: bool,
    intent: Intent,
    violations: &mut Vec<FieldViolation>,
) {
    if !present && intent == Intent::Create {
        violations.push(FieldViolation::new(field, "required"));
    }
}

/// Calendar years are stored as positive integers.
pub fn year(field: &'static str, value: Option<i32>, violations: &mut Vec<FieldViolation>) {
    if let Some(year) = value {
        if year <= 0 {
            violations.push(FieldViolation::new(field, "must be a positive year"));
        }
    }
}
