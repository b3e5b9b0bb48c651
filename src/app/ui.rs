use crate::app::state::{AppMode, AppState};
use crate::components::block_list::BlockList;
use crate::components::footer::Footer;
use crate::components::header::Header;
use crate::components::modals::help::HelpModal;
use crate::components::modals::helpers::centered_rect;
use crate::components::modals::slash_menu::{self, SlashMenu};
use crate::components::welcome::Welcome;
use crate::theme::Theme;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

pub struct AppLayout {
    pub main: Vec<Rect>,
    pub body: Vec<Rect>,
}

pub fn get_layout(area: Rect, app_state: &AppState) -> AppLayout {
    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Footer
        ])
        .split(area)
        .to_vec();

    let editing = app_state.mode == AppMode::EditBlock;
    let body = if main.len() > 1 {
        Layout::default()
            .direction(Direction::Vertical)
            .constraints(if editing {
                [Constraint::Min(0), Constraint::Length(9)]
            } else {
                [Constraint::Min(0), Constraint::Length(0)]
            })
            .split(main[1])
            .to_vec()
    } else {
        vec![Rect::default(), Rect::default()]
    };

    AppLayout { main, body }
}

pub fn draw(f: &mut Frame, app_state: &mut AppState, theme: &Theme) {
    if f.area().width == 0 || f.area().height == 0 {
        return;
    }

    if app_state.mode == AppMode::Welcome {
        let welcome = Welcome { app_state, theme };
        f.render_widget(welcome, f.area());
        return;
    }

    let layout = get_layout(f.area(), app_state);

    // --- Header ---
    if layout.main[0].width > 0 && layout.main[0].height > 0 {
        let header = Header {
            state: app_state,
            theme,
        };
        f.render_widget(header, layout.main[0]);
    }

    // --- Block list ---
    let list_block = Block::default()
        .title(Line::from(vec![
            Span::raw(" "),
            Span::styled(
                "TEMPLATE",
                if app_state.mode == AppMode::Normal {
                    theme.header_active
                } else {
                    theme.header_item
                },
            ),
            Span::raw(" "),
        ]))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(if app_state.mode == AppMode::Normal {
            theme.border_focus
        } else {
            theme.border
        });

    if layout.body[0].width > 0 && layout.body[0].height > 0 {
        let inner = list_block.inner(layout.body[0]);
        if let Some(document) = app_state.document.take() {
            let list = BlockList {
                document: &document,
                theme,
                editing_index: app_state.editing_index,
            };
            f.render_stateful_widget(list, inner, &mut app_state.list_state);
            app_state.document = Some(document);
        } else {
            let loading = Paragraph::new(Line::from(vec![Span::styled(
                "Loading template…",
                theme.dimmed,
            )]))
            .alignment(Alignment::Center);
            let centered = Rect {
                x: inner.x,
                y: inner.y + inner.height / 2,
                width: inner.width,
                height: 1.min(inner.height),
            };
            if centered.height > 0 {
                f.render_widget(loading, centered);
            }
        }
        f.render_widget(list_block, layout.body[0]);
    }

    // --- Inline editor panel ---
    let mut editor_inner: Option<Rect> = None;
    if app_state.mode == AppMode::EditBlock
        && layout.body[1].width > 0
        && layout.body[1].height > 0
    {
        let kind = app_state
            .editing_index
            .and_then(|i| app_state.document.as_ref().and_then(|d| d.blocks.get(i)))
            .map_or("Block", |b| b.kind_label());
        let editor_block = Block::default()
            .title(Line::from(vec![
                Span::raw(" "),
                Span::styled(format!("EDIT: {kind}"), theme.header_active),
                Span::raw(" "),
            ]))
            .title_bottom(Line::from(vec![
                Span::raw(" "),
                Span::styled("/", theme.footer_segment_key),
                Span::raw(": insert block "),
                Span::styled("esc", theme.footer_segment_key),
                Span::raw(": done "),
            ]))
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme.border_focus);

        let inner = editor_block.inner(layout.body[1]);
        f.render_widget(editor_block, layout.body[1]);
        if inner.width > 0 && inner.height > 0 {
            f.render_widget(&app_state.editor, inner);
            editor_inner = Some(inner);
        }
    }

    // --- Footer ---
    if layout.main.len() > 2 && layout.main[2].width > 0 && layout.main[2].height > 0 {
        let footer = Footer {
            state: app_state,
            theme,
        };
        f.render_widget(footer, layout.main[2]);
    }

    // --- Help overlay ---
    if app_state.mode == AppMode::Help {
        f.render_widget(HelpModal { theme }, f.area());
    }

    // --- Error modal ---
    if let Some(err) = &app_state.last_error {
        let area = centered_rect(60, 20, f.area());
        if area.width > 0 && area.height > 0 {
            f.render_widget(Clear, area);
            let block = Block::default()
                .title(Line::from(vec![
                    Span::raw(" "),
                    Span::styled(" ERROR ", theme.status_error),
                    Span::raw(" "),
                ]))
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(theme.status_error);

            let text_lines = vec![
                Line::from(""),
                Line::from(Span::styled(err.message.clone(), theme.list_item)),
                Line::from(""),
                Line::from(vec![
                    Span::raw(" Press "),
                    Span::styled("Esc", theme.footer_segment_key),
                    Span::raw(" to acknowledge "),
                ]),
            ];

            let paragraph = Paragraph::new(text_lines)
                .alignment(Alignment::Center)
                .block(block);
            f.render_widget(paragraph, area);
        }
    }

    // --- Slash palette popup (drawn last, above everything) ---
    if app_state.mode == AppMode::EditBlock {
        if let (Some(inner), Some(mut slash)) = (editor_inner, app_state.slash.take()) {
            let (cursor_row, cursor_col) = app_state.editor.cursor();
            let anchor = (
                inner.x + (cursor_col as u16).min(inner.width.saturating_sub(1)),
                inner.y + (cursor_row as u16).min(inner.height.saturating_sub(1)),
            );
            slash.overlay.update_anchor(anchor);

            if !slash.view.is_empty() {
                let (width, height) = slash_menu::desired_size(&slash);
                if let Some(popup_area) = slash.overlay.rect(f.area(), width, height) {
                    let menu = SlashMenu {
                        theme,
                        frame_area: f.area(),
                    };
                    f.render_stateful_widget(menu, popup_area, &mut slash);
                }
            }
            app_state.slash = Some(slash);
        }
    }
}
