//! GraphQL schema introspection: the query document, the wire-format model,
//! and the client that fetches it.
//!
//! Descriptions in this model are raw — they may still contain embedded
//! `@directive(...)` annotations. The [`crate::schema`] module runs the
//! directive splitter over them to produce the template-facing model.

mod client;
mod types;

pub use client::{SchemaClient, load_schema_file};
pub use types::{
    DirectiveDef, EnumValue, FieldDef, FullType, INTROSPECTION_QUERY, InputValue,
    IntrospectionResponse, IntrospectionSchema, RootTypeName, TypeKind, TypeRef,
};
