//! Forest construction over JSON objects
//!
//! Records are JSON objects whose identifier fields are named by a
//! [`KeyConfig`]. Each output node is the record object with one extra field,
//! named by `children_key`, holding the array of child nodes.

use anyhow::{anyhow, bail, Context, Result};
use kit::guard::is_nil;
use serde_json::{Map, Value};

use crate::builder::{BuildReport, TreeBuilder};
use crate::key::{resolve_keys, KeyConfig, NodeKey, PartialKeyConfig};
use crate::node::Node;

/// A JSON object record
pub type JsonRecord = Map<String, Value>;

/// Read an identifier from a field value
///
/// Strings and numbers are identifiers; `null` and missing fields are not
/// checked here. Booleans, arrays and objects are rejected.
pub fn node_key(value: &Value) -> Option<NodeKey> {
    match value {
        Value::String(text) => Some(NodeKey::Text(text.clone())),
        Value::Number(number) => number
            .as_i64()
            .map(NodeKey::from)
            .or_else(|| number.as_u64().map(NodeKey::from))
            .or_else(|| number.as_f64().map(NodeKey::from_f64)),
        _ => None,
    }
}

/// Identifier and parent identifier of one record
fn record_keys(record: &JsonRecord, keys: &KeyConfig) -> Result<(NodeKey, Option<NodeKey>)> {
    let id_value = record.get(&keys.id_key);
    if is_nil(id_value) {
        bail!("missing `{}` field", keys.id_key);
    }
    let id = id_value
        .and_then(node_key)
        .ok_or_else(|| anyhow!("`{}` must be a string or a number", keys.id_key))?;

    let parent_value = record.get(&keys.parent_id_key);
    let parent_id = if is_nil(parent_value) {
        None
    } else {
        let parent_id = parent_value.and_then(node_key).ok_or_else(|| {
            anyhow!(
                "`{}` must be a string, a number or null",
                keys.parent_id_key
            )
        })?;
        Some(parent_id)
    };

    Ok((id, parent_id))
}

/// Build the forest over JSON records and keep the dropped parts
pub fn format_with_report(
    records: Vec<Value>,
    keys: Option<PartialKeyConfig>,
) -> Result<(KeyConfig, BuildReport<NodeKey, JsonRecord>)> {
    let keys = resolve_keys(keys);
    let mut builder = TreeBuilder::with_capacity(records.len());

    for (index, value) in records.into_iter().enumerate() {
        let Value::Object(record) = value else {
            bail!("record {} is not an object", index);
        };
        let (id, parent_id) =
            record_keys(&record, &keys).with_context(|| format!("invalid record {}", index))?;
        builder.push(id, parent_id, record);
    }

    Ok((keys, builder.finish_with_report()))
}

/// Build the forest over JSON records
///
/// # Example
///
/// ```
/// use serde_json::json;
///
/// let forest = flat_tree::format(
///     vec![json!({"id": 2, "pid": 1}), json!({"id": 1, "pid": null})],
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(
///     forest,
///     vec![json!({"id": 1, "pid": null, "children": [{"id": 2, "pid": 1, "children": []}]})]
/// );
/// ```
pub fn format(records: Vec<Value>, keys: Option<PartialKeyConfig>) -> Result<Vec<Value>> {
    let (keys, report) = format_with_report(records, keys)?;
    Ok(forest_to_values(report.forest, &keys.children_key))
}

/// Like [`format`], taking the records as a single JSON array
pub fn format_value(records: Value, keys: Option<PartialKeyConfig>) -> Result<Value> {
    let Value::Array(records) = records else {
        bail!("expected an array of records");
    };
    format(records, keys).map(Value::Array)
}

/// Convert one node into its JSON object, writing children under `children_key`
///
/// An existing field of that name in the record is replaced.
pub fn node_to_value(node: Node<JsonRecord>, children_key: &str) -> Value {
    // One node in, one value out
    forest_to_values(vec![node], children_key)
        .pop()
        .unwrap_or_default()
}

/// Convert a forest into a vector of JSON objects
///
/// Works bottom-up over a pre-order listing, so the depth of the forest is
/// not limited by the call stack.
pub fn forest_to_values(forest: Vec<Node<JsonRecord>>, children_key: &str) -> Vec<Value> {
    // Records in pre-order with the position of their parent; position 0
    // stands for the forest itself.
    let mut records: Vec<(JsonRecord, usize)> = Vec::new();
    let mut stack: Vec<(Node<JsonRecord>, usize)> =
        forest.into_iter().rev().map(|node| (node, 0)).collect();
    while let Some((node, parent)) = stack.pop() {
        let Node { record, children } = node;
        records.push((record, parent));
        let position = records.len();
        stack.extend(children.into_iter().rev().map(|child| (child, position)));
    }

    let mut built: Vec<Vec<Value>> = std::iter::repeat_with(Vec::new)
        .take(records.len() + 1)
        .collect();
    while let Some((mut record, parent)) = records.pop() {
        let mut children = std::mem::take(&mut built[records.len() + 1]);
        children.reverse();
        record.insert(children_key.to_string(), Value::Array(children));
        built[parent].push(Value::Object(record));
    }

    let mut roots = std::mem::take(&mut built[0]);
    roots.reverse();
    roots
}
