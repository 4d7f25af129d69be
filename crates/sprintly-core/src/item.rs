//! Work item and product models, as deserialized from the tracker feed.

use serde::{Deserialize, Serialize};

/// Kind of work item, determining its display color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemType {
    Story,
    Task,
    Defect,
    Test,
    /// Forward-compatible catch-all for wire values this build doesn't know;
    /// renders with no color.
    #[serde(other)]
    Unknown,
}

impl ItemType {
    /// Palette name used to colorize the item number, if any.
    #[must_use]
    pub const fn color_name(self) -> Option<&'static str> {
        match self {
            Self::Story => Some("GREEN"),
            Self::Task => Some("GREY"),
            Self::Defect => Some("RED"),
            Self::Test => Some("CYAN"),
            Self::Unknown => None,
        }
    }
}

/// Lifecycle status of a work item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ItemStatus {
    Backlog,
    InProgress,
    Completed,
    Accepted,
    /// Wire value outside the upstream data contract; such records are
    /// skipped by the printer rather than failing the whole render.
    #[serde(other)]
    Unknown,
}

impl ItemStatus {
    /// Heading text for the status group.
    #[must_use]
    pub const fn heading(self) -> &'static str {
        match self {
            Self::Backlog => "Backlog",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Accepted => "Accepted",
            Self::Unknown => "",
        }
    }

    /// Whether items in this status render dimmed.
    #[must_use]
    pub const fn is_closed(self) -> bool {
        matches!(self, Self::Completed | Self::Accepted)
    }
}

/// Embedded parent reference carried by child records in the raw feed.
///
/// The feed embeds the parent's own metadata alongside its number, which is
/// what lets `build_forest` synthesize a stand-in when the parent itself was
/// filtered out of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentRef {
    pub number: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<ItemType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ItemStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl ParentRef {
    /// Reference a parent by number alone.
    #[must_use]
    pub const fn new(number: u64) -> Self {
        Self {
            number,
            item_type: None,
            status: None,
            title: None,
        }
    }
}

/// A single work item.
///
/// `parent` is present only on records that arrived as children in the raw
/// feed; `build_forest` consumes it. An assembled node carries its children
/// in `children` and never a parent reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Stable identifier, unique within a product.
    pub number: u64,

    #[serde(rename = "type")]
    pub item_type: ItemType,

    pub status: ItemStatus,

    /// Display text; may contain arbitrary Unicode.
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentRef>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Item>,
}

impl Item {
    /// Create a leaf item.
    #[must_use]
    pub fn new(
        number: u64,
        item_type: ItemType,
        status: ItemStatus,
        title: impl Into<String>,
    ) -> Self {
        Self {
            number,
            item_type,
            status,
            title: title.into(),
            parent: None,
            children: Vec::new(),
        }
    }

    /// Mark this item as a child of another, the way the raw feed does.
    #[must_use]
    pub fn with_parent(mut self, parent: ParentRef) -> Self {
        self.parent = Some(parent);
        self
    }
}

/// A named grouping of work items (one tracker project).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u64,
    pub name: String,

    /// Assembled forest of top-level items, ordered by `build_forest`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<Item>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn deserializes_a_feed_record() {
        let item: Item = serde_json::from_str(
            r#"{
                "number": 54,
                "type": "defect",
                "status": "in-progress",
                "title": "Login button 404s",
                "score": "M",
                "assigned_by": "someone"
            }"#,
        )
        .unwrap();

        assert_eq!(
            item,
            Item::new(54, ItemType::Defect, ItemStatus::InProgress, "Login button 404s")
        );
    }

    #[test]
    fn deserializes_an_embedded_parent() {
        let item: Item = serde_json::from_str(
            r#"{
                "number": 11,
                "type": "task",
                "status": "backlog",
                "title": "Fix typo",
                "parent": {"number": 10, "type": "story", "status": "backlog", "title": "Add login"}
            }"#,
        )
        .unwrap();

        let parent = item.parent.expect("parent ref");
        assert_eq!(parent.number, 10);
        assert_eq!(parent.item_type, Some(ItemType::Story));
        assert_eq!(parent.status, Some(ItemStatus::Backlog));
        assert_eq!(parent.title.as_deref(), Some("Add login"));
    }

    #[test]
    fn unknown_wire_values_do_not_fail_deserialization() {
        let item: Item = serde_json::from_str(
            r#"{"number": 7, "type": "epic", "status": "someday", "title": "x"}"#,
        )
        .unwrap();

        assert_eq!(item.item_type, ItemType::Unknown);
        assert_eq!(item.status, ItemStatus::Unknown);
        assert_eq!(item.item_type.color_name(), None);
    }

    #[test]
    fn status_headings_and_dimming() {
        assert_eq!(ItemStatus::InProgress.heading(), "In Progress");
        assert!(ItemStatus::Completed.is_closed());
        assert!(ItemStatus::Accepted.is_closed());
        assert!(!ItemStatus::Backlog.is_closed());
    }
}
