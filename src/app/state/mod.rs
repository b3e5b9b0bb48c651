use super::keymap::{KeyConfig, KeyMap};
use super::persistence::Config;
use crate::app::slash::catalog::{self, Catalog};
use crate::domain::models::{Block, Document, EditorContext};
use crate::theme::{PaletteType, Theme};
use ratatui::widgets::ListState;
use std::path::PathBuf;
use std::sync::Arc;

pub mod error;
pub mod input;
pub mod slash;

// Re-exports
pub use error::{ErrorSeverity, ErrorState};
pub use input::AppTextArea;
pub use slash::SlashMenuState;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppMode {
    Welcome,   // No template open; pick a recent one or start fresh
    Normal,    // Navigating the block list
    EditBlock, // Editing a block's text (the palette lives here)
    Help,      // Keybinding overlay
}

#[derive(Debug)]
pub struct AppState<'a> {
    // --- Status ---
    pub should_quit: bool,
    pub mode: AppMode,
    pub last_error: Option<ErrorState>,
    pub status_message: Option<String>,
    pub is_loading: bool,

    // --- Template (the "source of truth") ---
    pub document: Option<Document>,
    pub template_path: Option<PathBuf>,
    pub dirty: bool,

    // --- UI state ---
    pub list_state: ListState,
    pub editor: AppTextArea<'a>,
    pub editing_index: Option<usize>,

    // --- Slash palette ---
    pub slash: Option<SlashMenuState>,
    pub catalog: Catalog,

    // --- Config ---
    pub keymap: Arc<KeyMap>,
    pub palette_type: PaletteType,
    pub theme: Theme,
    pub recent: Vec<PathBuf>,

    // --- Animation ---
    pub frame_count: u64,
}

impl AppState<'_> {
    #[must_use]
    pub fn new(config: &Config, template_path: Option<PathBuf>) -> Self {
        Self {
            mode: if template_path.is_some() {
                AppMode::Normal
            } else {
                AppMode::Welcome
            },
            template_path,
            keymap: Arc::new(KeyMap::from_config(&config.keymap)),
            palette_type: config.palette,
            theme: Theme::from_palette_type(config.palette),
            recent: super::persistence::load_recent(),
            ..Default::default()
        }
    }

    #[must_use]
    pub fn selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    #[must_use]
    pub fn selected_block(&self) -> Option<&Block> {
        let document = self.document.as_ref()?;
        document.blocks.get(self.selected_index()?)
    }

    /// Editor-state snapshot for activation predicates and the allow gate.
    #[must_use]
    pub fn editor_context(&self) -> EditorContext {
        let Some(document) = &self.document else {
            return EditorContext::default();
        };
        let in_raw_html = self
            .editing_index
            .and_then(|i| document.blocks.get(i))
            .is_some_and(|b| matches!(b, Block::Html { .. }));
        EditorContext {
            in_raw_html,
            has_footer: document.has_footer(),
            block_count: document.blocks.len(),
        }
    }

    /// Start editing the block at `index`, if it has editable text.
    pub fn begin_edit(&mut self, index: usize) {
        let Some(text) = self
            .document
            .as_ref()
            .and_then(|d| d.blocks.get(index))
            .and_then(Block::editable_text)
        else {
            return;
        };
        self.editor = AppTextArea::from_text(text);
        self.editing_index = Some(index);
        self.mode = AppMode::EditBlock;
    }

    /// Write the editor buffer back into the block being edited.
    pub fn commit_editor(&mut self) {
        if let (Some(index), Some(document)) = (self.editing_index, self.document.as_mut()) {
            if let Some(block) = document.blocks.get_mut(index) {
                block.set_text(self.editor.text());
            }
        }
    }

    /// Tear down the palette. Safe on every exit path; the overlay is
    /// disposed before the state is dropped so a late draw cannot revive it.
    pub fn close_palette(&mut self) {
        if let Some(mut slash) = self.slash.take() {
            slash.overlay.dispose();
        }
    }
}

impl Default for AppState<'_> {
    fn default() -> Self {
        Self {
            should_quit: false,
            mode: AppMode::Welcome,
            last_error: None,
            status_message: None,
            is_loading: false,
            document: None,
            template_path: None,
            dirty: false,
            list_state: ListState::default(),
            editor: AppTextArea::default(),
            editing_index: None,
            slash: None,
            catalog: catalog::default_catalog(),
            keymap: Arc::new(KeyMap::from_config(&KeyConfig::default())),
            palette_type: PaletteType::default(),
            theme: Theme::default(),
            recent: Vec::new(),
            frame_count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_blocks(blocks: Vec<Block>) -> AppState<'static> {
        AppState {
            document: Some(Document {
                title: "t".to_string(),
                blocks,
                saved_at: None,
            }),
            ..AppState::default()
        }
    }

    #[test]
    fn editor_context_tracks_raw_html_and_footer() {
        let mut state = with_blocks(vec![
            Block::Html {
                source: "<b>".to_string(),
            },
            Block::Footer {
                text: "bye".to_string(),
            },
        ]);

        // Not editing anything yet: not inside a raw region.
        let ctx = state.editor_context();
        assert!(!ctx.in_raw_html);
        assert!(ctx.has_footer);
        assert_eq!(ctx.block_count, 2);

        state.begin_edit(0);
        assert!(state.editor_context().in_raw_html);
    }

    #[test]
    fn begin_edit_skips_blocks_without_text() {
        let mut state = with_blocks(vec![Block::Divider]);
        state.begin_edit(0);
        assert_eq!(state.mode, AppMode::Welcome);
        assert_eq!(state.editing_index, None);
    }

    #[test]
    fn commit_editor_writes_back_multiline_text() {
        let mut state = with_blocks(vec![Block::Text {
            text: "old".to_string(),
        }]);
        state.begin_edit(0);
        state.editor = AppTextArea::from_text("new\ncontent");
        state.commit_editor();

        assert_eq!(
            state.document.as_ref().unwrap().blocks[0],
            Block::Text {
                text: "new\ncontent".to_string()
            }
        );
    }

    #[test]
    fn close_palette_disposes_the_overlay() {
        let mut state = AppState::default();
        state.slash = Some(SlashMenuState::open(String::new(), Vec::new(), (1, 1)));
        state.close_palette();
        assert!(state.slash.is_none());
        // Idempotent on every exit path.
        state.close_palette();
    }
}
