use serde_json::{json, Value};

use super::Resource;

fn schema_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/components/schemas/{name}") })
}

fn envelope_schema(key: &str, inner: Value) -> Value {
    let mut properties = serde_json::Map::new();
    properties.insert(key.to_string(), inner);
    json!({
        "type": "object",
        "properties": properties,
        "required": [key]
    })
}

fn json_content(schema: Value) -> Value {
    json!({ "application/json": { "schema": schema } })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": json_content(schema_ref("ErrorResponse"))
    })
}

/// OpenAPI paths and schemas for the five CRUD routes of `R`.
pub fn fragment<R: Resource>() -> Value {
    let record = R::TITLE.to_string();
    let fields = format!("{}Fields", R::TITLE);
    let tag = [R::TITLE];
    let id_param = json!([{
        "name": "id",
        "in": "path",
        "required": true,
        "schema": { "type": "string" }
    }]);
    let request_body = json!({
        "required": true,
        "content": json_content(envelope_schema(R::SINGULAR, schema_ref(&fields)))
    });

    let mut record_properties = R::field_schema();
    record_properties["id"] = json!({
        "type": "string",
        "description": format!("Identifier assigned when the {} was created", R::SINGULAR)
    });
    record_properties["owner"] = json!({
        "type": "string",
        "description": "Identity of the creating caller, when known"
    });

    json!({
        "paths": {
            "/": {
                "get": {
                    "summary": format!("List {}", R::PLURAL),
                    "tags": tag,
                    "responses": {
                        "200": {
                            "description": format!("All {}", R::PLURAL),
                            "content": json_content(envelope_schema(
                                R::PLURAL,
                                json!({ "type": "array", "items": schema_ref(&record) }),
                            ))
                        },
                        "500": error_response("Internal server error")
                    }
                },
                "post": {
                    "summary": format!("Create {}", R::SINGULAR),
                    "description": "Blank strings are dropped before the record is stored.",
                    "tags": tag,
                    "requestBody": request_body,
                    "responses": {
                        "201": {
                            "description": format!("Created {}", R::SINGULAR),
                            "content": json_content(envelope_schema(R::SINGULAR, schema_ref(&record)))
                        },
                        "401": error_response("Caller identity required"),
                        "422": error_response("Validation error")
                    }
                }
            },
            "/{id}": {
                "get": {
                    "summary": format!("Get {}", R::SINGULAR),
                    "tags": tag,
                    "parameters": id_param,
                    "responses": {
                        "200": {
                            "description": R::TITLE,
                            "content": json_content(envelope_schema(R::SINGULAR, schema_ref(&record)))
                        },
                        "404": { "description": "Not found" }
                    }
                },
                "patch": {
                    "summary": format!("Update {}", R::SINGULAR),
                    "description": "Merges the submitted fields. Blank strings are ignored.",
                    "tags": tag,
                    "parameters": id_param,
                    "requestBody": request_body,
                    "responses": {
                        "204": { "description": "Updated" },
                        "401": error_response("Caller does not own this record"),
                        "404": { "description": "Not found" },
                        "422": error_response("Validation error")
                    }
                },
                "delete": {
                    "summary": format!("Delete {}", R::SINGULAR),
                    "tags": tag,
                    "parameters": id_param,
                    "responses": {
                        "204": { "description": "Deleted" },
                        "401": error_response("Caller does not own this record"),
                        "404": { "description": "Not found" }
                    }
                }
            }
        },
        "components": {
            "schemas": {
                record.clone(): {
                    "type": "object",
                    "properties": record_properties,
                    "required": ["id"]
                },
                fields.clone(): {
                    "type": "object",
                    "properties": R::field_schema(),
                    "required": R::required_fields()
                }
            }
        }
    })
}
