pub mod models;

use serde_json::{json, Value};
use shelf_kernel::Migration;

use super::resource::{validation, FieldViolation, Intent, Resource};
use models::AuthorFields;

/// The `authors` resource kind.
pub struct Author;

impl Resource for Author {
    const SINGULAR: &'static str = "author";
    const PLURAL: &'static str = "authors";
    const TITLE: &'static str = "Author";

    type Fields = AuthorFields;

    fn validate(fields: &AuthorFields, intent: Intent) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        validation::required("name", fields.name.is_some(), intent, &mut violations);
        validation::year("born", fields.born, &mut violations);
        violations
    }

    fn field_schema() -> Value {
        json!({
            "name": { "type": "string", "description": "Display name" },
            "bio": { "type": "string", "description": "Short biography" },
            "born": { "type": "integer", "description": "Year of birth" }
        })
    }

    fn required_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn migrations() -> Vec<Migration> {
        vec![Migration {
            id: "001_init",
            up: r#"
                DEFINE TABLE IF NOT EXISTS authors SCHEMALESS;
                DEFINE FIELD IF NOT EXISTS name ON authors TYPE string ASSERT $value != "";
                DEFINE FIELD IF NOT EXISTS born ON authors TYPE option<int>;
                "#,
        }]
    }
}
