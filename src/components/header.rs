use crate::app::state::AppState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Header<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Header<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let state = self.state;
        let theme = self.theme;

        let title = state
            .document
            .as_ref()
            .map_or_else(|| "—".to_string(), |d| d.title.clone());

        let mut spans = vec![
            Span::styled(" LETTERPRESS ", theme.header_logo),
            Span::raw(" "),
            Span::styled(title, theme.header_active),
        ];

        if state.dirty {
            spans.push(Span::styled(" ●", theme.status_warn));
        }

        if let Some(path) = &state.template_path {
            spans.push(Span::styled(
                format!("  {}", path.display()),
                theme.header_item,
            ));
        }

        if let Some(saved_at) = state.document.as_ref().and_then(|d| d.saved_at) {
            spans.push(Span::styled(
                format!("  saved {}", saved_at.format("%H:%M:%S")),
                theme.header_item,
            ));
        }

        if let Some(document) = &state.document {
            spans.push(Span::styled(
                format!("  {} blocks", document.blocks.len()),
                theme.header_item,
            ));
        }

        Paragraph::new(Line::from(spans))
            .style(theme.header)
            .render(area, buf);
    }
}
