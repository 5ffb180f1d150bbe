use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::models_external::commentary::CommentaryItem;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CommentaryEntry {
    pub over: Option<Number>,
    pub ball: Option<Number>,
    pub text: String,
}

impl From<&CommentaryItem> for CommentaryEntry {
    fn from(item: &CommentaryItem) -> Self {
        CommentaryEntry {
            over: item.over.clone(),
            ball: item.ball.clone(),
            text: item.text.clone().unwrap_or_else(|| "...".to_string()),
        }
    }
}
