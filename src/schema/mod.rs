//! Template-facing schema model.
//!
//! The raw introspection model carries descriptions exactly as the server
//! sent them, embedded `@directive(...)` annotations included. This module
//! produces the model handed to templates: every description is run through
//! [`split_directives`](crate::directives::split_directives), leaving
//! cleaned prose plus an ordered annotation list on each element.
//!
//! Rendered type notation (`[User!]!`) is precomputed into `type_name`
//! fields so templates don't have to walk `of_type` chains themselves.

use serde::Serialize;

use crate::core::GqldocsError;
use crate::directives::{Annotation, split_directives};
use crate::introspection::{
    DirectiveDef, EnumValue, FieldDef, FullType, InputValue, IntrospectionSchema, TypeKind, TypeRef,
};

/// A schema type with processed descriptions.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedType {
    pub kind: TypeKind,
    pub name: String,
    /// Cleaned prose with annotation markers removed.
    pub description: Option<String>,
    /// Annotations extracted from the description, in order of appearance.
    pub annotations: Vec<Annotation>,
    pub fields: Vec<ParsedField>,
    pub input_fields: Vec<ParsedInputValue>,
    pub interfaces: Vec<TypeRef>,
    pub enum_values: Vec<ParsedEnumValue>,
    pub possible_types: Vec<TypeRef>,
}

impl ParsedType {
    /// Introspection meta types (`__Type`, `__Schema`, ...) get no page of
    /// their own.
    #[must_use]
    pub fn is_internal(&self) -> bool {
        self.name.starts_with("__")
    }
}

/// A field with processed description and pre-rendered type notation.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedField {
    pub name: String,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub args: Vec<ParsedInputValue>,
    pub type_ref: TypeRef,
    /// GraphQL notation of `type_ref`, e.g. `[Int!]!`.
    pub type_name: String,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// An argument or input-object field, processed.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedInputValue {
    pub name: String,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub type_ref: TypeRef,
    pub type_name: String,
    pub default_value: Option<String>,
}

/// An enum value, processed.
#[derive(Debug, Clone, Serialize)]
pub struct ParsedEnumValue {
    pub name: String,
    pub description: Option<String>,
    pub annotations: Vec<Annotation>,
    pub is_deprecated: bool,
    pub deprecation_reason: Option<String>,
}

/// Root context for site-level templates.
#[derive(Debug, Clone, Serialize)]
pub struct SchemaData {
    pub query_type: String,
    pub mutation_type: Option<String>,
    pub subscription_type: Option<String>,
    /// All schema types, internal `__` meta types included; the generator
    /// skips the internal ones when emitting per-type pages.
    pub types: Vec<ParsedType>,
    /// Directives the schema declares (distinct from embedded annotations).
    pub directives: Vec<DirectiveDef>,
}

/// Process a raw introspection schema into the template-facing model.
///
/// # Errors
///
/// Fails with [`GqldocsError::DirectiveSyntax`] naming the offending element
/// when any description contains an unterminated annotation argument list.
/// One malformed description aborts the whole run; emitting a page with
/// silently mangled prose would be worse than failing loudly.
pub fn parse_schema(schema: IntrospectionSchema) -> Result<SchemaData, GqldocsError> {
    let mut types = Vec::with_capacity(schema.types.len());
    for full_type in schema.types {
        types.push(parse_type(full_type)?);
    }

    Ok(SchemaData {
        query_type: schema.query_type.name,
        mutation_type: schema.mutation_type.map(|t| t.name),
        subscription_type: schema.subscription_type.map(|t| t.name),
        types,
        directives: schema.directives,
    })
}

fn parse_type(full_type: FullType) -> Result<ParsedType, GqldocsError> {
    let type_name = full_type.name;
    let (description, annotations) = split_description(&type_name, full_type.description)?;

    let mut fields = Vec::new();
    for field in full_type.fields.unwrap_or_default() {
        fields.push(parse_field(&type_name, field)?);
    }

    let mut input_fields = Vec::new();
    for input in full_type.input_fields.unwrap_or_default() {
        let element = format!("{type_name}.{}", input.name);
        input_fields.push(parse_input_value(&element, input)?);
    }

    let mut enum_values = Vec::new();
    for value in full_type.enum_values.unwrap_or_default() {
        enum_values.push(parse_enum_value(&type_name, value)?);
    }

    Ok(ParsedType {
        kind: full_type.kind,
        name: type_name,
        description,
        annotations,
        fields,
        input_fields,
        interfaces: full_type.interfaces.unwrap_or_default(),
        enum_values,
        possible_types: full_type.possible_types.unwrap_or_default(),
    })
}

fn parse_field(type_name: &str, field: FieldDef) -> Result<ParsedField, GqldocsError> {
    let element = format!("{type_name}.{}", field.name);
    let (description, annotations) = split_description(&element, field.description)?;

    let mut args = Vec::new();
    for arg in field.args {
        let arg_element = format!("{element}({})", arg.name);
        args.push(parse_input_value(&arg_element, arg)?);
    }

    Ok(ParsedField {
        name: field.name,
        description,
        annotations,
        args,
        type_name: field.type_ref.render(),
        type_ref: field.type_ref,
        is_deprecated: field.is_deprecated,
        deprecation_reason: field.deprecation_reason,
    })
}

fn parse_input_value(element: &str, input: InputValue) -> Result<ParsedInputValue, GqldocsError> {
    let (description, annotations) = split_description(element, input.description)?;

    Ok(ParsedInputValue {
        name: input.name,
        description,
        annotations,
        type_name: input.type_ref.render(),
        type_ref: input.type_ref,
        default_value: input.default_value,
    })
}

fn parse_enum_value(type_name: &str, value: EnumValue) -> Result<ParsedEnumValue, GqldocsError> {
    let element = format!("{type_name}.{}", value.name);
    let (description, annotations) = split_description(&element, value.description)?;

    Ok(ParsedEnumValue {
        name: value.name,
        description,
        annotations,
        is_deprecated: value.is_deprecated,
        deprecation_reason: value.deprecation_reason,
    })
}

/// Run the splitter over one optional description, tagging failures with the
/// element they came from.
fn split_description(
    element: &str,
    description: Option<String>,
) -> Result<(Option<String>, Vec<Annotation>), GqldocsError> {
    match description {
        None => Ok((None, Vec::new())),
        Some(text) => {
            let split =
                split_directives(&text).map_err(|source| GqldocsError::DirectiveSyntax {
                    element: element.to_string(),
                    source,
                })?;
            Ok((Some(split.description), split.annotations))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspection::RootTypeName;

    fn scalar_ref(name: &str) -> TypeRef {
        TypeRef {
            kind: TypeKind::Scalar,
            name: Some(name.to_string()),
            of_type: None,
        }
    }

    fn user_type() -> FullType {
        FullType {
            kind: TypeKind::Object,
            name: "User".to_string(),
            description: Some("An account. @internal".to_string()),
            fields: Some(vec![FieldDef {
                name: "email".to_string(),
                description: Some(
                    "Contact address. @deprecated(reason: \"use handles(primary)\")".to_string(),
                ),
                args: vec![],
                type_ref: scalar_ref("String"),
                is_deprecated: false,
                deprecation_reason: None,
            }]),
            input_fields: None,
            interfaces: None,
            enum_values: None,
            possible_types: None,
        }
    }

    fn schema_with(types: Vec<FullType>) -> IntrospectionSchema {
        IntrospectionSchema {
            query_type: RootTypeName {
                name: "Query".to_string(),
            },
            mutation_type: None,
            subscription_type: None,
            types,
            directives: vec![],
        }
    }

    #[test]
    fn test_descriptions_are_split() {
        let data = parse_schema(schema_with(vec![user_type()])).unwrap();

        let user = &data.types[0];
        assert_eq!(user.description.as_deref(), Some("An account. "));
        assert_eq!(user.annotations[0].name, "internal");

        let email = &user.fields[0];
        assert_eq!(email.description.as_deref(), Some("Contact address. "));
        assert_eq!(email.annotations[0].name, "deprecated");
        assert_eq!(
            email.annotations[0].argument_text.as_deref(),
            Some("reason: \"use handles(primary)\"")
        );
        assert_eq!(email.type_name, "String");
    }

    #[test]
    fn test_mismatched_brackets_name_the_element() {
        let mut bad = user_type();
        bad.fields.as_mut().unwrap()[0].description =
            Some("broken @deprecated(reason: \"oops".to_string());

        let err = parse_schema(schema_with(vec![bad])).unwrap_err();
        match err {
            GqldocsError::DirectiveSyntax { element, .. } => assert_eq!(element, "User.email"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_internal_types_flagged() {
        let mut meta = user_type();
        meta.name = "__Type".to_string();
        meta.description = None;
        meta.fields = None;

        let data = parse_schema(schema_with(vec![meta])).unwrap();
        assert!(data.types[0].is_internal());
    }

    #[test]
    fn test_missing_descriptions_stay_missing() {
        let mut plain = user_type();
        plain.description = None;
        plain.fields = None;

        let data = parse_schema(schema_with(vec![plain])).unwrap();
        assert!(data.types[0].description.is_none());
        assert!(data.types[0].annotations.is_empty());
    }
}
