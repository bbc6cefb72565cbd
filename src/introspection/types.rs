//! Serde model of the GraphQL introspection payload.
//!
//! Field names mirror the wire format (`queryType`, `ofType`, ...) via
//! camelCase renames so the model deserializes straight out of a standard
//! introspection response, whether it came from an endpoint or a saved file.

use serde::{Deserialize, Serialize};

/// The standard introspection query document.
///
/// Matches the query shipped with graphql-js: full types with fields, args,
/// enum values, input fields, interfaces and possible types, plus schema
/// directives. `ofType` is expanded seven levels deep, enough for any
/// practical wrapping of lists and non-nulls.
pub const INTROSPECTION_QUERY: &str = r#"
query IntrospectionQuery {
  __schema {
    queryType { name }
    mutationType { name }
    subscriptionType { name }
    types {
      ...FullType
    }
    directives {
      name
      description
      locations
      args {
        ...InputValue
      }
    }
  }
}

fragment FullType on __Type {
  kind
  name
  description
  fields(includeDeprecated: true) {
    name
    description
    args {
      ...InputValue
    }
    type {
      ...TypeRef
    }
    isDeprecated
    deprecationReason
  }
  inputFields {
    ...InputValue
  }
  interfaces {
    ...TypeRef
  }
  enumValues(includeDeprecated: true) {
    name
    description
    isDeprecated
    deprecationReason
  }
  possibleTypes {
    ...TypeRef
  }
}

fragment InputValue on __InputValue {
  name
  description
  type { ...TypeRef }
  defaultValue
}

fragment TypeRef on __Type {
  kind
  name
  ofType {
    kind
    name
    ofType {
      kind
      name
      ofType {
        kind
        name
        ofType {
          kind
          name
          ofType {
            kind
            name
            ofType {
              kind
              name
              ofType {
                kind
                name
              }
            }
          }
        }
      }
    }
  }
}
"#;

/// The `kind` discriminator of an introspected type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeKind {
    Scalar,
    Object,
    Interface,
    Union,
    Enum,
    InputObject,
    List,
    NonNull,
}

/// A (possibly wrapped) reference to a type: `[User!]!` is three nested
/// refs ending in a named `OBJECT`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeRef {
    pub kind: TypeKind,
    pub name: Option<String>,
    pub of_type: Option<Box<TypeRef>>,
}

impl TypeRef {
    /// The innermost named type, e.g. `User` for `[User!]!`.
    #[must_use]
    pub fn unwrapped_name(&self) -> Option<&str> {
        match (&self.name, &self.of_type) {
            (Some(name), _) => Some(name),
            (None, Some(inner)) => inner.unwrapped_name(),
            (None, None) => None,
        }
    }

    /// GraphQL notation for this reference (`[Int!]!`, `String`, ...).
    ///
    /// A wrapper with a missing inner type renders as `?`; introspection
    /// never produces that, but templates should not panic if it does.
    #[must_use]
    pub fn render(&self) -> String {
        match self.kind {
            TypeKind::NonNull => match &self.of_type {
                Some(inner) => format!("{}!", inner.render()),
                None => "?".to_string(),
            },
            TypeKind::List => match &self.of_type {
                Some(inner) => format!("[{}]", inner.render()),
                None => "[?]".to_string(),
            },
            _ => self.name.clone().unwrap_or_else(|| "?".to_string()),
        }
    }
}

/// One field of an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// An argument or input-object field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InputValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub type_ref: TypeRef,
    pub default_value: Option<String>,
}

/// One value of an enum type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// A full type as returned by the `types` list of `__schema`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FullType {
    pub kind: TypeKind,
    pub name: String,
    pub description: Option<String>,
    pub fields: Option<Vec<FieldDef>>,
    pub input_fields: Option<Vec<InputValue>>,
    pub interfaces: Option<Vec<TypeRef>>,
    pub enum_values: Option<Vec<EnumValue>>,
    pub possible_types: Option<Vec<TypeRef>>,
}

/// A directive declared by the schema itself (not the embedded-in-prose
/// annotations the splitter extracts).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectiveDef {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub args: Vec<InputValue>,
}

/// Name holder for the root operation types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RootTypeName {
    pub name: String,
}

/// The `__schema` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrospectionSchema {
    pub query_type: RootTypeName,
    pub mutation_type: Option<RootTypeName>,
    pub subscription_type: Option<RootTypeName>,
    pub types: Vec<FullType>,
    #[serde(default)]
    pub directives: Vec<DirectiveDef>,
}

/// `data` wrapper of an introspection response.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionData {
    #[serde(rename = "__schema")]
    pub schema: IntrospectionSchema,
}

/// A GraphQL-level error entry in a response.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// Top-level introspection response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct IntrospectionResponse {
    pub data: Option<IntrospectionData>,
    pub errors: Option<Vec<GraphQlError>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn non_null_list_of(name: &str) -> TypeRef {
        TypeRef {
            kind: TypeKind::NonNull,
            name: None,
            of_type: Some(Box::new(TypeRef {
                kind: TypeKind::List,
                name: None,
                of_type: Some(Box::new(TypeRef {
                    kind: TypeKind::NonNull,
                    name: None,
                    of_type: Some(Box::new(TypeRef {
                        kind: TypeKind::Object,
                        name: Some(name.to_string()),
                        of_type: None,
                    })),
                })),
            })),
        }
    }

    #[test]
    fn test_type_ref_render_wrapping() {
        assert_eq!(non_null_list_of("User").render(), "[User!]!");
    }

    #[test]
    fn test_type_ref_unwrapped_name() {
        assert_eq!(non_null_list_of("User").unwrapped_name(), Some("User"));
    }

    #[test]
    fn test_full_type_deserializes_from_wire_format() {
        let json = r#"{
            "kind": "OBJECT",
            "name": "User",
            "description": "A user. @internal",
            "fields": [
                {
                    "name": "id",
                    "description": null,
                    "args": [],
                    "type": {
                        "kind": "NON_NULL",
                        "name": null,
                        "ofType": { "kind": "SCALAR", "name": "ID", "ofType": null }
                    },
                    "isDeprecated": false,
                    "deprecationReason": null
                }
            ],
            "inputFields": null,
            "interfaces": [],
            "enumValues": null,
            "possibleTypes": null
        }"#;

        let parsed: FullType = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.kind, TypeKind::Object);
        assert_eq!(parsed.name, "User");
        let fields = parsed.fields.unwrap();
        assert_eq!(fields[0].type_ref.render(), "ID!");
    }

    #[test]
    fn test_schema_envelope_deserializes() {
        let json = r#"{
            "data": {
                "__schema": {
                    "queryType": { "name": "Query" },
                    "mutationType": null,
                    "subscriptionType": null,
                    "types": [],
                    "directives": []
                }
            }
        }"#;

        let parsed: IntrospectionResponse = serde_json::from_str(json).unwrap();
        let schema = parsed.data.unwrap().schema;
        assert_eq!(schema.query_type.name, "Query");
        assert!(schema.mutation_type.is_none());
    }
}
