use serde::{Deserialize, Serialize};

/// One tagged unit of a message.
///
/// The set of kinds is closed: deserialization fails on an unknown `type` tag,
/// on a missing `content` payload and on any extra field, so malformed blocks
/// never reach storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case", deny_unknown_fields)]
pub enum ContentBlock {
    /// Plain text.
    Text {
        #[serde(alias = "text")]
        content: String,
    },
    /// An image, referenced by URL or carried as a data URI.
    Image {
        #[serde(alias = "image_url")]
        content: String,
    },
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        ContentBlock::Text { content: content.into() }
    }

    pub fn image(content: impl Into<String>) -> Self {
        ContentBlock::Image { content: content.into() }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ContentBlock::Text { .. } => "text",
            ContentBlock::Image { .. } => "image",
        }
    }
}

/// An ordered sequence of content blocks
pub type Message = Vec<ContentBlock>;
