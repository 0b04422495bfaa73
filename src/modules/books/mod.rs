pub mod models;

use serde_json::{json, Value};
use shelf_kernel::Migration;

use super::resource::{validation, FieldViolation, Intent, Resource};
use models::BookFields;

/// The `books` resource kind, stored apart from authors.
pub struct Book;

impl Resource for Book {
    const SINGULAR: &'static str = "book";
    const PLURAL: &'static str = "books";
    const TITLE: &'static str = "Book";

    type Fields = BookFields;

    fn validate(fields: &BookFields, intent: Intent) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        validation::required("title", fields.title.is_some(), intent, &mut violations);
        validation::year("published", fields.published, &mut violations);
        violations
    }

    fn field_schema() -> Value {
        json!({
            "title": { "type": "string", "description": "Title of the book" },
            "author": { "type": "string", "description": "Identifier of the book's author" },
            "isbn": { "type": "string", "description": "ISBN-10 or ISBN-13" },
            "published": { "type": "integer", "description": "Year of first publication" }
        })
    }

    fn required_fields() -> &'static [&'static str] {
        &["title"]
    }

    fn migrations() -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE IF NOT EXISTS books SCHEMALESS;
                DEFINE FIELD IF NOT EXISTS title     ON books TYPE string ASSERT $value != "";
                DEFINE FIELD IF NOT EXISTS published ON books TYPE option<int>;
                "#,
        }]
    }
}
