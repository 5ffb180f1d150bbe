use serde_json::{Number, Value};

use tracing::log;

use super::{scalar, text, ListField};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentaryRsp {
    /// Upstream order, oldest first. `None` marks an element that was not a mapping.
    pub items: Vec<Option<CommentaryItem>>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CommentaryItem {
    pub over: Option<Number>,
    pub ball: Option<Number>,
    pub text: Option<String>,
}

impl From<&Value> for CommentaryRsp {
    fn from(raw: &Value) -> Self {
        let field = ListField::read(raw, "commentaryList");
        if let ListField::WrongType(found) = field {
            log::warn!("[COMMENTARY] Expected 'commentaryList' to be a list, got {found}");
        }
        CommentaryRsp {
            items: field.items().iter()
                .map(|item| item.is_object().then(|| CommentaryItem::from(item)))
                .collect(),
        }
    }
}

impl From<&Value> for CommentaryItem {
    fn from(raw: &Value) -> Self {
        CommentaryItem {
            over: scalar(raw, "overNumber").and_then(|e| e.to_number()),
            ball: scalar(raw, "ballNumber").and_then(|e| e.to_number()),
            text: text(raw, "commText"),
        }
    }
}

impl CommentaryRsp {
    pub fn malformed_count(&self) -> usize {
        self.items.iter().filter(|e| e.is_none()).count()
    }
}
