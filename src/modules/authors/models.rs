use serde::{Deserialize, Serialize};

/// Author fields accepted on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthorFields {
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Short biography
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Year of birth
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub born: Option<i32>,
}
