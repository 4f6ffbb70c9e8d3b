use serde::{Deserialize, Serialize};
use std::fmt;

use super::position::Position;

/// A single roster item as held by the remote collection.
///
/// Field names match the collection's wire format exactly. `position` is
/// omitted from JSON when absent so plain `{id, title, completed}` records
/// round-trip unchanged.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Item {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl Item {
    /// Returns a copy of this item with `completed` replaced.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        write!(f, "{:>6} [{}] {}", self.id, mark, self.title)?;
        if let Some(position) = self.position {
            write!(f, " ({})", position)?;
        }
        Ok(())
    }
}

/// Fields for creating a new item. The collection assigns the id, so a
/// locally-held item has none until the create round-trip completes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewItem {
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl NewItem {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            completed: false,
            position: None,
        }
    }

    pub fn with_position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_json_roundtrip() {
        let item = Item {
            id: 7,
            title: "Warm up".to_string(),
            completed: true,
            position: Some(Position::Defender),
        };

        let json = serde_json::to_string(&item).unwrap();
        let parsed: Item = serde_json::from_str(&json).unwrap();
        assert_eq!(item, parsed);
    }

    #[test]
    fn test_plain_item_omits_position() {
        let item = Item {
            id: 1,
            title: "A".to_string(),
            completed: false,
            position: None,
        };

        let json = serde_json::to_string(&item).unwrap();
        assert_eq!(json, r#"{"id":1,"title":"A","completed":false}"#);
    }

    #[test]
    fn test_item_ignores_unknown_fields() {
        // jsonplaceholder records carry an extra userId field
        let parsed: Item =
            serde_json::from_str(r#"{"userId":1,"id":5,"title":"B","completed":true}"#).unwrap();
        assert_eq!(parsed.id, 5);
        assert!(parsed.completed);
        assert_eq!(parsed.position, None);
    }

    #[test]
    fn test_with_completed_replaces_flag_only() {
        let item = Item {
            id: 3,
            title: "C".to_string(),
            completed: false,
            position: Some(Position::Forward),
        };

        let updated = item.clone().with_completed(true);
        assert!(updated.completed);
        assert_eq!(updated.id, item.id);
        assert_eq!(updated.title, item.title);
        assert_eq!(updated.position, item.position);
    }

    #[test]
    fn test_new_item_payload_has_no_id() {
        let fields = NewItem::new("Messi").with_position(Position::Forward);
        let json = serde_json::to_string(&fields).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Messi","completed":false,"position":"Forward"}"#
        );
    }

    #[test]
    fn test_item_display() {
        let item = Item {
            id: 2,
            title: "Train".to_string(),
            completed: true,
            position: None,
        };
        let output = format!("{}", item);
        assert!(output.contains("[x]"));
        assert!(output.contains("Train"));
    }
}
