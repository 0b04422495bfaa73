use serde::{Deserialize, Serialize};

/// Book fields accepted on create and update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookFields {
    /// Title of the book
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Identifier of the book's author
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// ISBN-10 or ISBN-13
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    /// Year of first publication
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published: Option<i32>,
}
