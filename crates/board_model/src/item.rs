//! Placeable board items

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default token color for new items
pub const DEFAULT_ITEM_COLOR: &str = "#ffffff";

/// Item type used for emoji tokens
pub const EMOJI_ITEM_TYPE: &str = "emoji";

/// Item type used for free text notes
pub const TEXT_ITEM_TYPE: &str = "text";

/// One placeable object on the tabletop (emoji token or text note).
///
/// Identity is `id`; two items with the same id describe the same object.
/// `x` and `y` are logical canvas coordinates, independent of display scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Client-generated identifier, unique within a document
    pub id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Horizontal position on the canvas
    pub x: f64,
    /// Vertical position on the canvas
    pub y: f64,
    /// Item category (e.g. "emoji", "text")
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Emoji glyph rendered for the token
    #[serde(default)]
    pub emoji: String,
    /// Token color
    #[serde(default)]
    pub color: String,
    /// Set for free text notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_text: Option<bool>,
}

impl Item {
    /// Create a new emoji token with a freshly generated id
    pub fn new(name: impl Into<String>, emoji: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: Self::generate_id(),
            name: name.into(),
            x,
            y,
            kind: EMOJI_ITEM_TYPE.to_string(),
            emoji: emoji.into(),
            color: DEFAULT_ITEM_COLOR.to_string(),
            is_text: None,
        }
    }

    /// Create a free text note with a freshly generated id
    pub fn text_note(text: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            id: Self::generate_id(),
            name: text.into(),
            x,
            y,
            kind: TEXT_ITEM_TYPE.to_string(),
            emoji: String::new(),
            color: DEFAULT_ITEM_COLOR.to_string(),
            is_text: Some(true),
        }
    }

    /// Generate a new unique item id
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }

    /// Replace the generated id (useful when the caller owns id assignment)
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the item color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the item type
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Move the item to a new position
    pub fn move_to(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    /// Whether this item is a text note
    pub fn is_text_note(&self) -> bool {
        self.is_text.unwrap_or(false)
    }

    /// Whether both coordinates are finite numbers
    pub fn has_finite_position(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_item_defaults() {
        let item = Item::new("Dragon", "🐉", 10.0, 20.0);
        assert_eq!(item.name, "Dragon");
        assert_eq!(item.emoji, "🐉");
        assert_eq!(item.kind, EMOJI_ITEM_TYPE);
        assert_eq!(item.color, DEFAULT_ITEM_COLOR);
        assert!(!item.is_text_note());
        assert!(Uuid::parse_str(&item.id).is_ok());
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = Item::new("a", "🎲", 0.0, 0.0);
        let b = Item::new("a", "🎲", 0.0, 0.0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_text_note() {
        let note = Item::text_note("Remember the trap", 5.0, 6.0);
        assert!(note.is_text_note());
        assert_eq!(note.kind, TEXT_ITEM_TYPE);
        assert_eq!(note.name, "Remember the trap");
    }

    #[test]
    fn test_builders() {
        let item = Item::new("Goblin", "👺", 0.0, 0.0)
            .with_id("g1")
            .with_color("#00ff00")
            .with_kind("token");

        assert_eq!(item.id, "g1");
        assert_eq!(item.color, "#00ff00");
        assert_eq!(item.kind, "token");
        assert!(!item.is_text_note());

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "token");
    }

    #[test]
    fn test_wire_format_uses_camel_case() {
        let note = Item::text_note("hi", 1.0, 2.0).with_id("n1");
        let json = serde_json::to_value(&note).unwrap();
        assert_eq!(json["id"], "n1");
        assert_eq!(json["type"], TEXT_ITEM_TYPE);
        assert_eq!(json["isText"], true);
        assert!(json.get("kind").is_none());
    }

    #[test]
    fn test_is_text_omitted_when_absent() {
        let item = Item::new("a", "🎲", 0.0, 0.0);
        let json = serde_json::to_value(&item).unwrap();
        assert!(json.get("isText").is_none());
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let item: Item = serde_json::from_str(r#"{"id":"a","x":1.5,"y":-2,"extra":true}"#).unwrap();
        assert_eq!(item.id, "a");
        assert_eq!(item.x, 1.5);
        assert_eq!(item.y, -2.0);
        assert!(item.name.is_empty());
        assert_eq!(item.is_text, None);
    }

    #[test]
    fn test_decode_rejects_missing_position() {
        let result = serde_json::from_str::<Item>(r#"{"id":"a","x":1.5}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_move_to() {
        let mut item = Item::new("a", "🎲", 0.0, 0.0);
        item.move_to(3.0, 4.0);
        assert_eq!((item.x, item.y), (3.0, 4.0));
        assert!(item.has_finite_position());

        item.move_to(f64::NAN, 0.0);
        assert!(!item.has_finite_position());
    }
}
