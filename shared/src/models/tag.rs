//! Tag Model

use serde::{Deserialize, Serialize};

/// Tag entity, always owned by exactly one user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Tag {
    pub id: String,
    pub user_id: i64,
    pub name: String,
}

/// Create tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagCreate {
    pub name: String,
}

/// Update tag payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagUpdate {
    pub name: String,
}

/// One entry of a task's desired tag set
///
/// `{"id": "..."}` relates an existing tag, `{"name": "..."}` creates a new
/// tag and relates it. An entry carrying both is a relate: the name is
/// ignored so relating can never rename a tag. Owner fields sent by the
/// client are dropped during deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagSpec {
    Existing { id: String },
    New { name: String },
}

impl TagSpec {
    pub fn existing(id: impl Into<String>) -> Self {
        Self::Existing { id: id.into() }
    }

    pub fn new_named(name: impl Into<String>) -> Self {
        Self::New { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_spec_by_id() {
        let spec: TagSpec = serde_json::from_str(r#"{"id":"t1"}"#).unwrap();
        assert_eq!(spec, TagSpec::existing("t1"));
    }

    #[test]
    fn test_tag_spec_by_name() {
        let spec: TagSpec = serde_json::from_str(r#"{"name":"bills","user_id":99}"#).unwrap();
        assert_eq!(spec, TagSpec::new_named("bills"));
    }

    #[test]
    fn test_tag_spec_with_id_and_name_relates() {
        let spec: TagSpec = serde_json::from_str(r#"{"id":"t1","name":"renamed"}"#).unwrap();
        assert_eq!(spec, TagSpec::existing("t1"));
    }

    #[test]
    fn test_tag_spec_rejects_empty_object() {
        assert!(serde_json::from_str::<TagSpec>("{}").is_err());
    }
}
