use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use uuid::Uuid;

/// Opaque identifier of a block in the outline store.
///
/// Deserializes from either a string or an integer so that both uuid-style
/// and numeric entity references are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "RawId", into = "String")]
pub struct BlockId(String);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for BlockId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        }
    }
}

impl From<BlockId> for String {
    fn from(id: BlockId) -> Self {
        id.0
    }
}

impl BlockId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn generate() -> Self {
        Self::from(Uuid::new_v4())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<Uuid> for BlockId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid.to_string())
    }
}

impl From<&str> for BlockId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl fmt::Display for BlockId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    pub id: BlockId,
}

/// A lazy reference from a block to one of its children.
///
/// The wire shape is a JSON array whose first element is the tag `"uuid"`
/// and whose second element is the child identifier. Anything else is kept
/// as [`ChildRef::Unrecognized`] and never followed.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildRef {
    Uuid(BlockId),
    Unrecognized(Value),
}

impl ChildRef {
    pub const TAG: &'static str = "uuid";

    pub fn from_value(value: Value) -> Self {
        let id = match value.as_array().map(Vec::as_slice) {
            Some([tag, id, ..]) if tag.as_str() == Some(Self::TAG) => match id {
                Value::String(s) => Some(BlockId::new(s.clone())),
                Value::Number(n) => Some(BlockId::new(n.to_string())),
                _ => None,
            },
            _ => None,
        };
        match id {
            Some(id) => Self::Uuid(id),
            None => Self::Unrecognized(value),
        }
    }

    /// The referenced block, if this reference has the valid shape.
    pub fn target(&self) -> Option<&BlockId> {
        match self {
            Self::Uuid(id) => Some(id),
            Self::Unrecognized(_) => None,
        }
    }
}

impl From<BlockId> for ChildRef {
    fn from(id: BlockId) -> Self {
        Self::Uuid(id)
    }
}

impl Serialize for ChildRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Uuid(id) => (Self::TAG, id).serialize(serializer),
            Self::Unrecognized(raw) => raw.serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ChildRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Self::from_value)
    }
}

/// An outline block as exposed by the block store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalNode {
    pub id: BlockId,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub parent: Option<ParentRef>,
    #[serde(default)]
    pub children: Vec<ChildRef>,
}

impl ExternalNode {
    pub fn new(id: impl Into<BlockId>, content: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            content: content.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn with_parent(mut self, parent: impl Into<BlockId>) -> Self {
        self.parent = Some(ParentRef { id: parent.into() });
        self
    }

    pub fn with_child(mut self, child: impl Into<BlockId>) -> Self {
        self.children.push(ChildRef::Uuid(child.into()));
        self
    }

    /// Identifiers of the well-formed child references, in order.
    pub fn child_ids(&self) -> impl Iterator<Item = &BlockId> {
        self.children.iter().filter_map(ChildRef::target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn child_ref_accepts_uuid_tag() {
        let r = ChildRef::from_value(json!(["uuid", "abc"]));
        assert_eq!(r.target(), Some(&BlockId::new("abc")));
    }

    #[test]
    fn child_ref_ignores_extra_elements() {
        let r = ChildRef::from_value(json!(["uuid", "abc", {"extra": true}]));
        assert_eq!(r.target(), Some(&BlockId::new("abc")));
    }

    #[test]
    fn child_ref_rejects_wrong_shapes() {
        for raw in [
            json!(["not-uuid", "x"]),
            json!(["uuid"]),
            json!([]),
            json!("uuid"),
            json!(null),
            json!(["uuid", null]),
            json!({"uuid": "x"}),
        ] {
            let r = ChildRef::from_value(raw.clone());
            assert_eq!(r, ChildRef::Unrecognized(raw));
        }
    }

    #[test]
    fn node_deserializes_host_shape() {
        let node: ExternalNode = serde_json::from_value(json!({
            "id": "root",
            "content": "hello",
            "parent": {"id": 42},
            "children": [["uuid", "c1"], ["ref", "c2"], ["uuid", "c3"]]
        }))
        .unwrap();

        assert_eq!(node.parent, Some(ParentRef { id: BlockId::new("42") }));
        assert_eq!(
            node.child_ids().collect::<Vec<_>>(),
            vec![&BlockId::new("c1"), &BlockId::new("c3")]
        );
    }

    #[test]
    fn node_without_children_or_parent() {
        let node: ExternalNode =
            serde_json::from_value(json!({"id": "leaf", "content": "x", "parent": null})).unwrap();
        assert!(node.parent.is_none());
        assert!(node.children.is_empty());
    }

    #[test]
    fn child_refs_serialize_back_to_their_shape() {
        let node = ExternalNode::new("p", "x").with_child("c");
        let value = serde_json::to_value(&node).unwrap();
        assert_eq!(value["children"], json!([["uuid", "c"]]));
    }

    #[test]
    fn generated_ids_are_uuids() {
        let id = BlockId::generate();
        assert!(Uuid::parse_str(id.as_str()).is_ok());
    }
}
