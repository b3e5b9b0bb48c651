use crate::app::state::SlashMenuState;
use crate::theme::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, StatefulWidget, Widget},
};

use super::helpers::draw_drop_shadow;

const POPUP_WIDTH: u16 = 44;
const MAX_POPUP_HEIGHT: u16 = 14;

/// Width and height the popup wants for the current view, borders and the
/// hint line included.
#[must_use]
pub fn desired_size(state: &SlashMenuState) -> (u16, u16) {
    let rows: usize = state.view.iter().map(|g| 1 + g.commands.len()).sum();
    let height = (rows as u16).saturating_add(3).min(MAX_POPUP_HEIGHT);
    (POPUP_WIDTH, height)
}

/// The palette popup: group headers, command rows, a hint line. Records the
/// on-screen position of every visible command row back into the state for
/// mouse hit-testing.
pub struct SlashMenu<'a> {
    pub theme: &'a Theme,
    pub frame_area: Rect,
}

enum MenuRow<'r> {
    Title(&'r str),
    Command(usize, usize),
}

impl StatefulWidget for SlashMenu<'_> {
    type State = SlashMenuState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut SlashMenuState) {
        state.row_hits.clear();
        if area.width == 0 || area.height == 0 || state.view.is_empty() {
            return;
        }

        draw_drop_shadow(buf, area, self.frame_area);
        Clear.render(area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(self.theme.border_focus)
            .style(self.theme.palette_item);
        let inner = block.inner(area);
        block.render(area, buf);
        if inner.width == 0 || inner.height < 2 {
            return;
        }

        // Flatten groups into rows, tracking where the selection lands.
        let mut rows: Vec<MenuRow<'_>> = Vec::new();
        let mut selected_flat = 0usize;
        for (group_index, group) in state.view.iter().enumerate() {
            rows.push(MenuRow::Title(&group.title));
            for command_index in 0..group.commands.len() {
                if (group_index, command_index)
                    == (state.navigator.group_index, state.navigator.command_index)
                {
                    selected_flat = rows.len();
                }
                rows.push(MenuRow::Command(group_index, command_index));
            }
        }

        let list_height = (inner.height - 1) as usize; // last line is the hint
        let offset = if selected_flat >= list_height {
            selected_flat + 1 - list_height
        } else {
            0
        };

        let mut hits: Vec<(Rect, (usize, usize))> = Vec::new();
        for (line_index, row) in rows.iter().skip(offset).take(list_height).enumerate() {
            let y = inner.y + line_index as u16;
            match row {
                MenuRow::Title(title) => {
                    let line = Line::from(Span::styled(
                        format!(" {:<width$}", title.to_uppercase(), width = inner.width as usize),
                        self.theme.palette_group_title,
                    ));
                    buf.set_line(inner.x, y, &line, inner.width);
                }
                MenuRow::Command(group_index, command_index) => {
                    let cmd = &state.view[*group_index].commands[*command_index];
                    let coord = (*group_index, *command_index);
                    let is_selected = coord
                        == (state.navigator.group_index, state.navigator.command_index);
                    let is_hovered = state.navigator.hovered == Some(coord);

                    let style = if is_selected {
                        self.theme.palette_item_selected
                    } else if is_hovered {
                        self.theme.palette_item_hovered
                    } else {
                        self.theme.palette_item
                    };
                    let prefix = if is_selected { "> " } else { "  " };

                    let mut spans = vec![
                        Span::styled(prefix, style),
                        Span::styled(format!("{:<16}", cmd.title), style),
                    ];
                    if let Some(desc) = &cmd.description {
                        spans.push(Span::styled(format!(" {desc}"), self.theme.dimmed));
                    }
                    if cmd.is_menu {
                        spans.push(Span::styled(" ›", self.theme.palette_menu_marker));
                    }

                    // Pad the row so the selection background spans the width.
                    let used: usize = spans.iter().map(Span::width).sum();
                    let pad = (inner.width as usize).saturating_sub(used);
                    spans.push(Span::styled(" ".repeat(pad), style));

                    buf.set_line(inner.x, y, &Line::from(spans), inner.width);
                    hits.push((Rect::new(inner.x, y, inner.width, 1), coord));
                }
            }
        }
        state.row_hits = hits;

        let hint_y = inner.y + inner.height - 1;
        let hint = Line::from(Span::styled(
            format!(
                " {:<width$}",
                "↑↓ navigate · ↵ select · esc dismiss",
                width = inner.width as usize
            ),
            self.theme.palette_hint,
        ));
        buf.set_line(inner.x, hint_y, &hint, inner.width);
    }
}
