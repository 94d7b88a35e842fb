//! Link resolution and schema decoding for raw CMS payloads.
//!
//! A delivery response carries its matching entries in `items` and every
//! linked entry or asset once in `includes`. Inside `fields`, references are
//! link stubs:
//!
//! ```json
//! { "sys": { "type": "Link", "linkType": "Entry", "id": "4kA9..." } }
//! ```
//!
//! [`LinkIndex::resolve`] swaps each stub for the linked object, recursively,
//! up to a depth budget. A stub that points at nothing (unpublished, deleted,
//! or beyond the depth budget) becomes `null`, and is dropped entirely when it
//! sits inside a list. The typed schema then sees `None` or a shorter list
//! instead of a link stub it cannot deserialize.

use super::ContentError;
use crate::types::{PageFields, content_type};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Hard ceiling on link depth, same as the Contentful API.
pub const MAX_INCLUDE: u8 = 10;

/// Raw collection as returned by the delivery API (or stored in an export).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EntryCollection {
    #[serde(default)]
    pub items: Vec<Value>,
    #[serde(default)]
    pub includes: Includes,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Includes {
    #[serde(default, rename = "Entry")]
    pub entries: Vec<Value>,
    #[serde(default, rename = "Asset")]
    pub assets: Vec<Value>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkType {
    Entry,
    Asset,
}

/// Lookup table of every entry and asset a collection knows about.
#[derive(Debug, Default)]
pub struct LinkIndex {
    entries: HashMap<String, Value>,
    assets: HashMap<String, Value>,
}

impl LinkIndex {
    pub fn from_collection(collection: &EntryCollection) -> Self {
        let mut index = LinkIndex::default();
        for entry in collection.items.iter().chain(&collection.includes.entries) {
            if let Some(id) = sys_id(entry) {
                index.entries.insert(id.to_string(), entry.clone());
            }
        }
        for asset in &collection.includes.assets {
            if let Some(id) = sys_id(asset) {
                index.assets.insert(id.to_string(), asset.clone());
            }
        }
        index
    }

    /// Return a copy of `value` with links expanded up to `depth` levels.
    pub fn resolve(&self, value: &Value, depth: u8) -> Value {
        match value {
            Value::Object(map) => match as_link(map) {
                Some(_) => self.resolve_link(map, depth).unwrap_or(Value::Null),
                None => Value::Object(
                    map.iter()
                        .map(|(k, v)| (k.clone(), self.resolve_field(k, v, depth)))
                        .collect(),
                ),
            },
            Value::Array(items) => Value::Array(
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::Object(map) if as_link(map).is_some() => {
                            self.resolve_link(map, depth)
                        }
                        other => Some(self.resolve(other, depth)),
                    })
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    // `sys` blocks hold content type links that must stay as they are.
    fn resolve_field(&self, key: &str, value: &Value, depth: u8) -> Value {
        if key == "sys" {
            value.clone()
        } else {
            self.resolve(value, depth)
        }
    }

    fn resolve_link(&self, map: &Map<String, Value>, depth: u8) -> Option<Value> {
        if depth == 0 {
            return None;
        }
        let (link_type, id) = as_link(map)?;
        let target = match link_type {
            LinkType::Entry => self.entries.get(id)?,
            LinkType::Asset => self.assets.get(id)?,
        };
        Some(self.resolve(target, depth - 1))
    }
}

fn as_link(map: &Map<String, Value>) -> Option<(LinkType, &str)> {
    let sys = map.get("sys")?.as_object()?;
    if sys.get("type")?.as_str()? != "Link" {
        return None;
    }
    let link_type = match sys.get("linkType")?.as_str()? {
        "Entry" => LinkType::Entry,
        "Asset" => LinkType::Asset,
        _ => return None,
    };
    Some((link_type, sys.get("id")?.as_str()?))
}

pub fn sys_id(value: &Value) -> Option<&str> {
    value.get("sys")?.get("id")?.as_str()
}

pub fn content_type_id(value: &Value) -> Option<&str> {
    value
        .get("sys")?
        .get("contentType")?
        .get("sys")?
        .get("id")?
        .as_str()
}

/// String value of `fields.<name>`.
pub fn field_str<'a>(value: &'a Value, name: &str) -> Option<&'a str> {
    value.get("fields")?.get(name)?.as_str()
}

/// Deserialize a resolved entry into a schema type, naming the entry on
/// failure.
pub fn decode<T: DeserializeOwned>(value: Value) -> Result<T, ContentError> {
    let content_type = content_type_id(&value).unwrap_or("asset").to_string();
    let id = sys_id(&value).unwrap_or("?").to_string();
    serde_json::from_value(value).map_err(|source| ContentError::Schema {
        content_type,
        id,
        source,
    })
}

/// Decode a resolved page entry into the page variant its content type names.
pub fn decode_page_fields(page: Value) -> Result<PageFields, ContentError> {
    let kind = content_type_id(&page).unwrap_or_default().to_string();
    let id = sys_id(&page).unwrap_or("?").to_string();
    let fields = page.get("fields").cloned().unwrap_or(Value::Null);
    let schema_err = |source| ContentError::Schema {
        content_type: kind.clone(),
        id: id.clone(),
        source,
    };
    match kind.as_str() {
        content_type::PAGE_HOME => serde_json::from_value(fields)
            .map(PageFields::Home)
            .map_err(schema_err),
        content_type::PAGE_PEOPLE => serde_json::from_value(fields)
            .map(PageFields::People)
            .map_err(schema_err),
        content_type::PAGE_PROJECT => serde_json::from_value(fields)
            .map(PageFields::ProjectTemplate)
            .map_err(schema_err),
        _ => Err(ContentError::UnknownPageKind(kind)),
    }
}
