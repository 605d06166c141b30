//! Field-name configuration and identifier values

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default name of the identifier field
pub const DEFAULT_ID_KEY: &str = "id";
/// Default name of the parent identifier field
pub const DEFAULT_PARENT_ID_KEY: &str = "pid";
/// Default name of the field that receives the children
pub const DEFAULT_CHILDREN_KEY: &str = "children";

/// Field names used to read identifiers from a record and to write children
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct KeyConfig {
    /// Field holding the record's own identifier
    pub id_key: String,
    /// Field holding the parent's identifier (absent or null for roots)
    pub parent_id_key: String,
    /// Field the children array is written to
    pub children_key: String,
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            id_key: DEFAULT_ID_KEY.to_string(),
            parent_id_key: DEFAULT_PARENT_ID_KEY.to_string(),
            children_key: DEFAULT_CHILDREN_KEY.to_string(),
        }
    }
}

impl KeyConfig {
    /// Create a configuration from three explicit field names
    pub fn new(
        id_key: impl Into<String>,
        parent_id_key: impl Into<String>,
        children_key: impl Into<String>,
    ) -> Self {
        Self {
            id_key: id_key.into(),
            parent_id_key: parent_id_key.into(),
            children_key: children_key.into(),
        }
    }
}

/// A caller-supplied configuration where every field may be left out
///
/// Unset fields fall back to [`KeyConfig::default`] in [`PartialKeyConfig::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase", default))]
pub struct PartialKeyConfig {
    #[cfg_attr(feature = "serde", serde(alias = "id"))]
    pub id_key: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "pid"))]
    pub parent_id_key: Option<String>,
    #[cfg_attr(feature = "serde", serde(alias = "children"))]
    pub children_key: Option<String>,
}

impl PartialKeyConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the identifier field name
    pub fn id_key(mut self, key: impl Into<String>) -> Self {
        self.id_key = Some(key.into());
        self
    }

    /// Override the parent identifier field name
    pub fn parent_id_key(mut self, key: impl Into<String>) -> Self {
        self.parent_id_key = Some(key.into());
        self
    }

    /// Override the children field name
    pub fn children_key(mut self, key: impl Into<String>) -> Self {
        self.children_key = Some(key.into());
        self
    }

    /// Fill every unset field from the defaults
    pub fn resolve(self) -> KeyConfig {
        let defaults = KeyConfig::default();
        KeyConfig {
            id_key: self.id_key.unwrap_or(defaults.id_key),
            parent_id_key: self.parent_id_key.unwrap_or(defaults.parent_id_key),
            children_key: self.children_key.unwrap_or(defaults.children_key),
        }
    }
}

impl From<KeyConfig> for PartialKeyConfig {
    fn from(config: KeyConfig) -> Self {
        Self {
            id_key: Some(config.id_key),
            parent_id_key: Some(config.parent_id_key),
            children_key: Some(config.children_key),
        }
    }
}

/// Resolve an optional partial configuration against the defaults
pub fn resolve_keys(keys: Option<PartialKeyConfig>) -> KeyConfig {
    keys.unwrap_or_default().resolve()
}

/// An identifier read from a dynamic record
///
/// Integral numbers are stored as `Int` whatever their source representation,
/// so `1` and `1.0` name the same node. Text never equals a number.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NodeKey {
    Text(String),
    Int(i128),
    /// Bit pattern of a non-integral float
    Float(u64),
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKey::Text(text) => write!(f, "{:?}", text),
            NodeKey::Int(value) => write!(f, "{}", value),
            NodeKey::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
        }
    }
}

impl NodeKey {
    /// Build a key from a float, folding integral values into `Int`
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value.abs() < 1e38 {
            NodeKey::Int(value as i128)
        } else {
            NodeKey::Float(value.to_bits())
        }
    }
}

impl From<&str> for NodeKey {
    fn from(value: &str) -> Self {
        NodeKey::Text(value.to_string())
    }
}

impl From<String> for NodeKey {
    fn from(value: String) -> Self {
        NodeKey::Text(value)
    }
}

impl From<i64> for NodeKey {
    fn from(value: i64) -> Self {
        NodeKey::Int(value.into())
    }
}

impl From<u64> for NodeKey {
    fn from(value: u64) -> Self {
        NodeKey::Int(value.into())
    }
}

impl From<i128> for NodeKey {
    fn from(value: i128) -> Self {
        NodeKey::Int(value)
    }
}
