use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Clear, Row, Table, Widget},
};

use super::helpers::{centered_rect, draw_drop_shadow};

pub struct HelpModal<'a> {
    pub theme: &'a Theme,
}

impl Widget for HelpModal<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let help_area = centered_rect(70, 80, area);
        if help_area.width == 0 || help_area.height == 0 {
            return;
        }

        draw_drop_shadow(buf, help_area, area);
        Clear.render(help_area, buf);

        let block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(" HELP - KEYBINDINGS ", self.theme.header_active),
                Span::raw(" "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus);

        let key_style = self.theme.footer_segment_key;
        let desc_style = self.theme.list_item;
        let category_style = self.theme.header_item;

        let rows = vec![
            Row::new(vec![
                Cell::from(Span::styled("Blocks", category_style)),
                Cell::from(""),
            ]),
            Row::new(vec![Cell::from(Span::styled(" j / ↓", key_style)), Cell::from(Span::styled("Select next block", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" k / ↑", key_style)), Cell::from(Span::styled("Select previous block", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" e / Enter", key_style)), Cell::from(Span::styled("Edit the selected block", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" n", key_style)), Cell::from(Span::styled("Insert a text block below", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" d", key_style)), Cell::from(Span::styled("Delete the selected block", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" J / K", key_style)), Cell::from(Span::styled("Move block down / up", desc_style))]),
            Row::new(vec![Cell::from(""), Cell::from("")]),

            Row::new(vec![
                Cell::from(Span::styled("Editing", category_style)),
                Cell::from(""),
            ]),
            Row::new(vec![Cell::from(Span::styled(" /", key_style)), Cell::from(Span::styled("Open the block palette", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" ↑ ↓", key_style)), Cell::from(Span::styled("Navigate palette entries", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" → / ←", key_style)), Cell::from(Span::styled("Enter / leave a sub-menu", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" Enter", key_style)), Cell::from(Span::styled("Insert the selected entry", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" Esc", key_style)), Cell::from(Span::styled("Dismiss palette / stop editing", desc_style))]),
            Row::new(vec![Cell::from(""), Cell::from("")]),

            Row::new(vec![
                Cell::from(Span::styled("Template", category_style)),
                Cell::from(""),
            ]),
            Row::new(vec![Cell::from(Span::styled(" s", key_style)), Cell::from(Span::styled("Save the template", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" x", key_style)), Cell::from(Span::styled("Export to HTML", desc_style))]),
            Row::new(vec![Cell::from(""), Cell::from("")]),

            Row::new(vec![
                Cell::from(Span::styled("General", category_style)),
                Cell::from(""),
            ]),
            Row::new(vec![Cell::from(Span::styled(" ?", key_style)), Cell::from(Span::styled("Show this help", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" Esc", key_style)), Cell::from(Span::styled("Close modal / Clear errors", desc_style))]),
            Row::new(vec![Cell::from(Span::styled(" q", key_style)), Cell::from(Span::styled("Quit", desc_style))]),
        ];

        let table = Table::new(rows, [Constraint::Percentage(30), Constraint::Percentage(70)])
            .block(block);

        Widget::render(table, help_area, buf);
    }
}
