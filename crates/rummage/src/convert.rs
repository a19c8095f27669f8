//! Building haystacks from serde data.
//!
//! JSON values convert infallibly. YAML allows non-scalar mapping keys, which
//! cannot be addressed by a [`Key`], so that conversion is fallible.

use serde_json::Value as Json;
use serde_yaml::Value as Yaml;

use crate::error::{Result, RummageError};
use crate::node::{Key, Node, Scalar};

impl Node {
    /// Parses JSON text into a node.
    ///
    /// # Example
    ///
    /// ```
    /// use rummage::Node;
    ///
    /// let node = Node::from_json_str(r#"{"a": [1, 2]}"#).unwrap();
    /// assert_eq!(node, Node::map([("a", Node::seq([1, 2]))]));
    /// ```
    pub fn from_json_str(input: &str) -> Result<Node> {
        let value: Json = serde_json::from_str(input)?;
        Ok(Node::from(value))
    }

    /// Parses YAML text into a node.
    pub fn from_yaml_str(input: &str) -> Result<Node> {
        let value: Yaml = serde_yaml::from_str(input)?;
        Node::try_from(value)
    }
}

fn json_number(n: &serde_json::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else {
        // u64 above i64::MAX, or a float
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

fn yaml_number(n: &serde_yaml::Number) -> Scalar {
    if let Some(i) = n.as_i64() {
        Scalar::Int(i)
    } else {
        Scalar::Float(n.as_f64().unwrap_or(f64::NAN))
    }
}

impl From<Json> for Node {
    fn from(value: Json) -> Self {
        match value {
            Json::Null => Node::null(),
            Json::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Json::Number(n) => Node::Scalar(json_number(&n)),
            Json::String(s) => Node::Scalar(Scalar::Text(s)),
            Json::Array(items) => Node::Seq(items.into_iter().map(Node::from).collect()),
            Json::Object(entries) => Node::Map(
                entries
                    .into_iter()
                    .map(|(k, v)| (Key::Text(k), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

fn yaml_key(value: Yaml) -> Result<Key> {
    match value {
        Yaml::Null => Ok(Key::Text("null".to_string())),
        Yaml::Bool(b) => Ok(Key::Bool(b)),
        Yaml::Number(n) => Ok(match n.as_i64() {
            Some(i) => Key::Int(i),
            None => Key::Text(n.to_string()),
        }),
        Yaml::String(s) => Ok(Key::Text(s)),
        Yaml::Sequence(_) => Err(RummageError::UnsupportedKey { kind: "sequence" }),
        Yaml::Mapping(_) => Err(RummageError::UnsupportedKey { kind: "mapping" }),
        Yaml::Tagged(tagged) => yaml_key(tagged.value),
    }
}

impl TryFrom<Yaml> for Node {
    type Error = RummageError;

    fn try_from(value: Yaml) -> Result<Self> {
        Ok(match value {
            Yaml::Null => Node::null(),
            Yaml::Bool(b) => Node::Scalar(Scalar::Bool(b)),
            Yaml::Number(n) => Node::Scalar(yaml_number(&n)),
            Yaml::String(s) => Node::Scalar(Scalar::Text(s)),
            Yaml::Sequence(items) => Node::Seq(
                items
                    .into_iter()
                    .map(Node::try_from)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Yaml::Mapping(entries) => {
                let mut map = std::collections::BTreeMap::new();
                for (k, v) in entries {
                    map.insert(yaml_key(k)?, Node::try_from(v)?);
                }
                Node::Map(map)
            }
            Yaml::Tagged(tagged) => Node::try_from(tagged.value)?,
        })
    }
}
