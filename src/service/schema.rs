//! Static description of a service.
//!
//! A schema lists the root annotations and the declared fields of a service
//! in declaration order. Fields whose marker type is one of the verb markers
//! become endpoints; every other field is carried but ignored at registration.

use std::any::{type_name, TypeId};

use crate::error::FlashError;
use crate::routing::metadata::ROOT_IDENT;
use crate::routing::tags::Tags;
use crate::routing::verb::{Delete, Get, Options, Patch, Post, Put, Verb};

/// One declared field of a service.
#[derive(Debug, Clone)]
pub struct Field {
    ident: String,
    marker: TypeId,
    marker_name: &'static str,
    tags: Tags,
    handler: Option<String>,
}

impl Field {
    /// Declare a field of marker type `M`.
    pub fn new<M: 'static>(ident: impl Into<String>) -> Self {
        Self {
            ident: ident.into(),
            marker: TypeId::of::<M>(),
            marker_name: type_name::<M>(),
            tags: Tags::default(),
            handler: None,
        }
    }

    pub fn with_tags(mut self, tags: impl Into<Tags>) -> Self {
        self.tags = tags.into();
        self
    }

    /// Bind this field to an explicitly named method instead of the
    /// capitalised field identifier.
    pub fn bind_to(mut self, method: impl Into<String>) -> Self {
        self.handler = Some(method.into());
        self
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn marker_name(&self) -> &'static str {
        self.marker_name
    }

    /// Verb of this field, or `None` for a non-endpoint field.
    pub fn verb(&self) -> Option<Verb> {
        Verb::from_marker(self.marker)
    }

    /// Name of the method this field binds to.
    pub fn method_name(&self) -> String {
        match &self.handler {
            Some(name) => name.clone(),
            None => first_cap(&self.ident),
        }
    }
}

/// Root annotations and declared fields of a service.
#[derive(Debug, Clone, Default)]
pub struct ServiceSchema {
    name: Option<String>,
    root: Tags,
    fields: Vec<Field>,
}

impl ServiceSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the service name derived from the Rust type name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Root-level annotations (`prefix`, `root`, `version`).
    pub fn root(mut self, tags: impl Into<Tags>) -> Self {
        self.root = tags.into();
        self
    }

    /// Declare a field of marker type `M`.
    pub fn field<M: 'static>(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.push(Field::new::<M>(ident).with_tags(tags))
    }

    pub fn push(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn get(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Get>(ident, tags)
    }

    pub fn post(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Post>(ident, tags)
    }

    pub fn put(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Put>(ident, tags)
    }

    pub fn patch(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Patch>(ident, tags)
    }

    pub fn delete(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Delete>(ident, tags)
    }

    pub fn options(self, ident: &str, tags: impl Into<Tags>) -> Self {
        self.field::<Options>(ident, tags)
    }

    pub fn root_tags(&self) -> &Tags {
        &self.root
    }

    /// Look up a field by identifier.
    pub fn field_named(&self, ident: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.ident == ident)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Check the schema describes a named struct and return the service name.
    ///
    /// `type_name` is the Rust type name of the service implementation.
    /// The check is structural: any type whose name ends in a plain
    /// identifier passes, so a primitive such as `u32` or an enum is
    /// accepted under its own name. Only references, pointers, tuples,
    /// slices, arrays and function pointers are told apart by name.
    pub fn validate(&self, type_name: &str) -> Result<String, FlashError> {
        let invalid = |reason: String| FlashError::InvalidServiceType {
            service: type_name.to_string(),
            reason,
        };

        let name = match &self.name {
            Some(name) if is_ident(name) => name.clone(),
            Some(name) => return Err(invalid(format!("`{}` is not a valid service name", name))),
            None => struct_name(type_name)
                .ok_or_else(|| invalid("expects a named struct type".to_string()))?
                .to_string(),
        };

        let mut seen: Vec<&str> = Vec::with_capacity(self.fields.len());
        for field in &self.fields {
            if !is_ident(&field.ident) {
                return Err(invalid(format!("`{}` is not a valid field identifier", field.ident)));
            }
            if field.ident == ROOT_IDENT {
                return Err(invalid(format!("field `{}` shadows the service root", ROOT_IDENT)));
            }
            if seen.contains(&field.ident.as_str()) {
                return Err(invalid(format!("field `{}` is declared twice", field.ident)));
            }
            seen.push(&field.ident);
        }

        Ok(name)
    }
}

/// Last path segment of a plain type path, generics stripped.
///
/// References, pointers, tuples, slices, arrays and function pointers have
/// no struct name. Types declared inside a function or closure body keep
/// their `{{closure}}` parent segments; only the last segment is checked.
fn struct_name(type_name: &str) -> Option<&str> {
    if type_name.starts_with(['&', '*', '(', '[']) || type_name.starts_with("fn(") {
        return None;
    }

    let base = type_name.split('<').next().unwrap_or(type_name);
    let last = base.rsplit("::").next().unwrap_or(base);

    is_ident(last).then_some(last)
}

fn is_ident(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    text != "_" && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Uppercase the first character: `ping` becomes `Ping`.
pub fn first_cap(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
