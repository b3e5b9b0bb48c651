use crate::app::state::{AppMode, AppState, ErrorSeverity};
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct FooterItem {
    pub key: &'static str,
    pub desc: &'static str,
}

fn hints_for(mode: AppMode, palette_open: bool) -> Vec<FooterItem> {
    match mode {
        AppMode::Welcome => vec![
            FooterItem { key: "n", desc: "new template" },
            FooterItem { key: "1-9", desc: "open recent" },
            FooterItem { key: "q", desc: "quit" },
        ],
        AppMode::Normal => vec![
            FooterItem { key: "j/k", desc: "navigate" },
            FooterItem { key: "e", desc: "edit" },
            FooterItem { key: "n", desc: "new block" },
            FooterItem { key: "d", desc: "delete" },
            FooterItem { key: "J/K", desc: "move" },
            FooterItem { key: "s", desc: "save" },
            FooterItem { key: "x", desc: "export" },
            FooterItem { key: "?", desc: "help" },
        ],
        AppMode::EditBlock if palette_open => vec![
            FooterItem { key: "↑/↓", desc: "navigate" },
            FooterItem { key: "↵", desc: "select" },
            FooterItem { key: "→", desc: "enter menu" },
            FooterItem { key: "←", desc: "leave menu" },
            FooterItem { key: "esc", desc: "dismiss" },
        ],
        AppMode::EditBlock => vec![
            FooterItem { key: "/", desc: "insert block" },
            FooterItem { key: "esc", desc: "done" },
        ],
        AppMode::Help => vec![FooterItem { key: "esc", desc: "close" }],
    }
}

pub struct Footer<'a> {
    pub state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Footer<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let state = self.state;

        // Status segment
        let status_span = if let Some(err) = &state.last_error {
            let style = match err.severity {
                ErrorSeverity::Warning => theme.status_warn,
                ErrorSeverity::Error => theme.status_error,
            };
            Span::styled(format!("  {}  ", err.message), style)
        } else if state.is_loading {
            Span::styled("  LOADING  ", theme.status_info)
        } else if let Some(msg) = &state.status_message {
            Span::styled(format!("  {msg}  "), theme.status_info)
        } else {
            Span::styled("  READY  ", theme.status_ready)
        };

        let mut spans = vec![status_span, Span::raw("  ")];

        let available_width = area.width.saturating_sub(2) as usize;
        let mut current_width = spans.iter().map(Span::width).sum::<usize>();

        for item in hints_for(state.mode, state.slash.is_some()) {
            let key_str = format!(" {} ", item.key);
            let desc_str = format!("{} ", item.desc);
            let item_width = key_str.chars().count() + desc_str.chars().count() + 1;
            if current_width + item_width > available_width {
                break;
            }
            spans.push(Span::styled(key_str, theme.footer_segment_key));
            spans.push(Span::styled(desc_str, theme.footer_segment_val));
            spans.push(Span::raw(" "));
            current_width += item_width;
        }

        Paragraph::new(Line::from(spans))
            .style(theme.footer)
            .render(area, buf);
    }
}
