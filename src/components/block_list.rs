use crate::domain::models::Document;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{List, ListItem, ListState, StatefulWidget},
};

/// The document rendered as a selectable list, one row per block.
pub struct BlockList<'a> {
    pub document: &'a Document,
    pub theme: &'a Theme,
    pub editing_index: Option<usize>,
}

impl StatefulWidget for BlockList<'_> {
    type State = ListState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut ListState) {
        let items: Vec<ListItem> = self
            .document
            .blocks
            .iter()
            .enumerate()
            .map(|(i, block)| {
                let mut spans = vec![
                    Span::styled(format!(" {:>2} ", block.glyph()), self.theme.block_glyph),
                    Span::styled(format!("{:<10}", block.kind_label()), self.theme.block_kind),
                    Span::styled(block.preview(), self.theme.block_preview),
                ];
                if self.editing_index == Some(i) {
                    spans.push(Span::styled("  (editing)", self.theme.dimmed));
                }
                ListItem::new(Line::from(spans)).style(self.theme.list_item)
            })
            .collect();

        let list = List::new(items).highlight_style(self.theme.list_selected);
        StatefulWidget::render(list, area, buf, state);
    }
}
