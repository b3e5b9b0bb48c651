use crate::app::{action::Action, state::AppMode, state::AppState, ui};
use crossterm::event::{Event, KeyCode, MouseButton, MouseEventKind};
use ratatui::layout::Size;

/// Map a clicked row inside the block list to a block index.
fn resolve_clicked_block(app_state: &AppState<'_>, clicked_row: usize) -> Option<usize> {
    let document = app_state.document.as_ref()?;
    let index = app_state.list_state.offset() + clicked_row;
    (index < document.blocks.len()).then_some(index)
}

pub fn map_event_to_action(
    event: Event,
    app_state: &AppState<'_>,
    terminal_size: Size,
) -> Option<Action> {
    if let Event::Key(key) = &event {
        if key.kind == crossterm::event::KeyEventKind::Release {
            return None;
        }
    }

    match app_state.mode {
        AppMode::Welcome => match event {
            Event::Key(key) => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Char('n') | KeyCode::Enter => Some(Action::NewTemplate),
                KeyCode::Char(c @ '1'..='9') => {
                    let index = (c as usize) - ('1' as usize);
                    (index < app_state.recent.len()).then(|| Action::OpenRecent(index))
                }
                _ => None,
            },
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        },

        AppMode::Help => match event {
            Event::Key(key) => match key.code {
                KeyCode::Esc | KeyCode::Char('q' | '?') => Some(Action::ToggleHelp),
                _ => None,
            },
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        },

        AppMode::EditBlock => match event {
            Event::Key(key) => match key.code {
                // Esc peels one layer: first the palette, then edit mode.
                KeyCode::Esc => {
                    if app_state.slash.is_some() {
                        Some(Action::ClosePalette)
                    } else {
                        Some(Action::CancelMode)
                    }
                }
                _ => Some(Action::TextAreaInput(key)),
            },
            Event::Mouse(mouse) if app_state.slash.is_some() => match mouse.kind {
                MouseEventKind::Moved => Some(Action::PaletteHover(mouse.column, mouse.row)),
                MouseEventKind::Down(MouseButton::Left) => {
                    Some(Action::PaletteClick(mouse.column, mouse.row))
                }
                _ => None,
            },
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        },

        AppMode::Normal => match event {
            Event::Key(key) => app_state.keymap.get_action(key),
            Event::Mouse(mouse) => {
                let area =
                    ratatui::layout::Rect::new(0, 0, terminal_size.width, terminal_size.height);
                let layout = ui::get_layout(area, app_state);
                let list_area = layout.body[0];

                match mouse.kind {
                    MouseEventKind::ScrollUp => Some(Action::SelectPrevBlock),
                    MouseEventKind::ScrollDown => Some(Action::SelectNextBlock),
                    MouseEventKind::Down(MouseButton::Left) => {
                        if mouse.column > list_area.x
                            && mouse.column < list_area.x + list_area.width.saturating_sub(1)
                            && mouse.row > list_area.y
                            && mouse.row < list_area.y + list_area.height.saturating_sub(1)
                        {
                            let clicked_row = (mouse.row - (list_area.y + 1)) as usize;
                            resolve_clicked_block(app_state, clicked_row)
                                .map(Action::SelectBlockIndex)
                        } else {
                            None
                        }
                    }
                    _ => None,
                }
            }
            Event::Resize(w, h) => Some(Action::Resize(w, h)),
            _ => None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, KeyModifiers};

    fn key_event(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn welcome_mode_maps_quit_and_new() {
        let state = AppState::default();
        let size = Size::new(80, 24);
        assert_eq!(
            map_event_to_action(key_event(KeyCode::Char('q')), &state, size),
            Some(Action::Quit)
        );
        assert_eq!(
            map_event_to_action(key_event(KeyCode::Char('n')), &state, size),
            Some(Action::NewTemplate)
        );
        // No recent entries: digits do nothing.
        assert_eq!(
            map_event_to_action(key_event(KeyCode::Char('1')), &state, size),
            None
        );
    }

    #[test]
    fn esc_in_edit_mode_targets_palette_first() {
        let mut state = AppState {
            document: Some(crate::domain::models::Document::starter()),
            ..AppState::default()
        };
        state.mode = AppMode::EditBlock;
        state.editing_index = Some(1);
        let size = Size::new(80, 24);

        assert_eq!(
            map_event_to_action(key_event(KeyCode::Esc), &state, size),
            Some(Action::CancelMode)
        );

        state.slash = Some(crate::app::state::SlashMenuState::open(
            String::new(),
            Vec::new(),
            (0, 0),
        ));
        assert_eq!(
            map_event_to_action(key_event(KeyCode::Esc), &state, size),
            Some(Action::ClosePalette)
        );
    }

    #[test]
    fn key_release_events_are_ignored() {
        let mut state = AppState::default();
        state.mode = AppMode::Normal;
        let mut key = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::empty());
        key.kind = crossterm::event::KeyEventKind::Release;
        assert_eq!(
            map_event_to_action(Event::Key(key), &state, Size::new(80, 24)),
            None
        );
    }
}
