//! Naming rules mapping Rust types to collections and document metadata.

use std::any::type_name;
use std::collections::BTreeMap;

use ds_config::{ENTITY_NAME_KEY, RUST_TYPE_KEY};
use serde_json::{Map, Value};

const FALLBACK_COLLECTION: &str = "Documents";

/// Client-side conventions shared by every session of a store.
///
/// By default a type's collection is its unqualified name, pluralised:
/// `Greeting` → `Greetings`, `Category` → `Categories`. Individual types can
/// be mapped explicitly with [`Conventions::with_collection_name`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conventions {
    collection_overrides: BTreeMap<String, String>,
}

impl Conventions {
    pub fn with_collection_name<T: ?Sized>(mut self, collection: impl Into<String>) -> Self {
        self.collection_overrides
            .insert(type_name::<T>().to_string(), collection.into());
        self
    }

    pub fn collection_name<T: ?Sized>(&self) -> String {
        let rust_type = type_name::<T>();
        match self.collection_overrides.get(rust_type) {
            Some(collection) => collection.clone(),
            None => default_collection_name(rust_type),
        }
    }

    pub fn rust_type_name<T: ?Sized>(&self) -> &'static str {
        type_name::<T>()
    }

    /// Metadata attached to every document stored from `T`.
    pub fn metadata_for<T: ?Sized>(&self) -> Map<String, Value> {
        let mut metadata = Map::new();
        metadata.insert(
            ENTITY_NAME_KEY.to_string(),
            Value::String(self.collection_name::<T>()),
        );
        metadata.insert(
            RUST_TYPE_KEY.to_string(),
            Value::String(self.rust_type_name::<T>().to_string()),
        );
        metadata
    }
}

/// Collection name derived from a full Rust type name.
pub(crate) fn default_collection_name(rust_type: &str) -> String {
    let without_generics = rust_type.split('<').next().unwrap_or(rust_type);
    let last_segment = without_generics
        .rsplit("::")
        .next()
        .unwrap_or(without_generics);
    let name: String = last_segment
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .collect();

    if name.is_empty() {
        return FALLBACK_COLLECTION.to_string();
    }
    pluralize(&name)
}

fn pluralize(name: &str) -> String {
    let lower = name.to_ascii_lowercase();

    if lower.ends_with('y')
        && !matches!(lower.chars().rev().nth(1), Some('a' | 'e' | 'i' | 'o' | 'u'))
    {
        return format!("{}ies", &name[..name.len() - 1]);
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| lower.ends_with(s)) {
        return format!("{name}es");
    }
    format!("{name}s")
}
