use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A content block of an email template. The `type` tag is the on-disk
/// discriminant, so renaming a variant is a format change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Text { text: String },
    Heading { level: u8, text: String },
    Quote { text: String },
    Button { label: String, url: String },
    Image { src: String, alt: String },
    Divider,
    Spacer,
    Footer { text: String },
    Html { source: String },
}

impl Block {
    #[must_use]
    pub fn kind_label(&self) -> &'static str {
        match self {
            Block::Text { .. } => "Text",
            Block::Heading { level: 1, .. } => "Heading 1",
            Block::Heading { level: 2, .. } => "Heading 2",
            Block::Heading { .. } => "Heading 3",
            Block::Quote { .. } => "Quote",
            Block::Button { .. } => "Button",
            Block::Image { .. } => "Image",
            Block::Divider => "Divider",
            Block::Spacer => "Spacer",
            Block::Footer { .. } => "Footer",
            Block::Html { .. } => "HTML",
        }
    }

    #[must_use]
    pub fn glyph(&self) -> &'static str {
        match self {
            Block::Text { .. } => "¶",
            Block::Heading { .. } => "#",
            Block::Quote { .. } => "❝",
            Block::Button { .. } => "▣",
            Block::Image { .. } => "◫",
            Block::Divider => "─",
            Block::Spacer => "␣",
            Block::Footer { .. } => "⌄",
            Block::Html { .. } => "<>",
        }
    }

    /// Text content editable through the inline editor panel, if any.
    #[must_use]
    pub fn editable_text(&self) -> Option<&str> {
        match self {
            Block::Text { text }
            | Block::Heading { text, .. }
            | Block::Quote { text }
            | Block::Footer { text } => Some(text),
            Block::Html { source } => Some(source),
            _ => None,
        }
    }

    pub fn set_text(&mut self, new_text: String) {
        match self {
            Block::Text { text }
            | Block::Heading { text, .. }
            | Block::Quote { text }
            | Block::Footer { text } => *text = new_text,
            Block::Html { source } => *source = new_text,
            _ => {}
        }
    }

    /// One-line preview for the block list.
    #[must_use]
    pub fn preview(&self) -> String {
        match self {
            Block::Button { label, url } => format!("{label} → {url}"),
            Block::Image { src, alt } => format!("{alt} ({src})"),
            Block::Divider | Block::Spacer => String::new(),
            other => other
                .editable_text()
                .and_then(|t| t.lines().next())
                .unwrap_or("")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub blocks: Vec<Block>,
    // Runtime-only; stamped after a successful save.
    #[serde(skip)]
    pub saved_at: Option<DateTime<Local>>,
}

impl Document {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
            saved_at: None,
        }
    }

    /// The document a fresh template starts from.
    #[must_use]
    pub fn starter() -> Self {
        Self {
            title: "Untitled template".to_string(),
            blocks: vec![
                Block::Heading {
                    level: 1,
                    text: "Hello {{user.name}}".to_string(),
                },
                Block::Text {
                    text: "Write your email here. Type / to insert a block.".to_string(),
                },
            ],
            saved_at: None,
        }
    }

    #[must_use]
    pub fn has_footer(&self) -> bool {
        self.blocks
            .iter()
            .any(|b| matches!(b, Block::Footer { .. }))
    }
}

/// Snapshot of editor state consumed by slash-command activation predicates
/// and the engine's `allow` gate. Derived fresh per keystroke, never stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EditorContext {
    /// The cursor is inside a raw HTML block; slash insertion would corrupt
    /// literal markup, so the palette must refuse to open.
    pub in_raw_html: bool,
    pub has_footer: bool,
    pub block_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_json_round_trip() {
        let doc = Document {
            title: "Welcome".to_string(),
            blocks: vec![
                Block::Heading {
                    level: 2,
                    text: "Hi".to_string(),
                },
                Block::Divider,
                Block::Button {
                    label: "Open".to_string(),
                    url: "https://example.com".to_string(),
                },
            ],
            saved_at: None,
        };

        let json = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn block_tag_is_snake_case() {
        let json = serde_json::to_string(&Block::Html {
            source: "<b>x</b>".to_string(),
        })
        .unwrap();
        assert!(json.contains(r#""type":"html""#));
    }

    #[test]
    fn saved_at_is_not_persisted() {
        let mut doc = Document::new("t");
        doc.saved_at = Some(Local::now());
        let json = serde_json::to_string(&doc).unwrap();
        assert!(!json.contains("saved_at"));
    }

    #[test]
    fn preview_uses_first_line() {
        let block = Block::Text {
            text: "first\nsecond".to_string(),
        };
        assert_eq!(block.preview(), "first");
        assert_eq!(Block::Divider.preview(), "");
    }
}
