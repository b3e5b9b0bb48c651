use super::{
    action::Action,
    command::Command,
    state::{AppMode, AppState, ErrorState, SlashMenuState},
};
use crate::app::slash::catalog::CommandAction;
use crate::app::slash::navigator::{NavEffect, NavResponse};
use crate::app::slash::{engine, trigger};
use crate::domain::models::{Block, Document};
use chrono::Local;

pub fn update(state: &mut AppState, action: Action) -> Option<Command> {
    match action {
        // --- Block list navigation ---
        Action::SelectNextBlock => {
            let len = state.document.as_ref().map_or(0, |d| d.blocks.len());
            if len == 0 {
                return None;
            }
            let i = match state.list_state.selected() {
                Some(i) if i + 1 < len => i + 1,
                _ => 0,
            };
            state.list_state.select(Some(i));
        }
        Action::SelectPrevBlock => {
            let len = state.document.as_ref().map_or(0, |d| d.blocks.len());
            if len == 0 {
                return None;
            }
            let i = match state.list_state.selected() {
                Some(0) | None => len - 1,
                Some(i) => i - 1,
            };
            state.list_state.select(Some(i));
        }
        Action::SelectBlockIndex(i) => {
            let len = state.document.as_ref().map_or(0, |d| d.blocks.len());
            if i < len {
                state.list_state.select(Some(i));
            }
        }
        Action::DeleteBlock => {
            if let (Some(i), Some(document)) = (state.list_state.selected(), state.document.as_mut())
            {
                if i < document.blocks.len() {
                    document.blocks.remove(i);
                    state.dirty = true;
                    if document.blocks.is_empty() {
                        state.list_state.select(None);
                    } else {
                        state.list_state.select(Some(i.min(document.blocks.len() - 1)));
                    }
                }
            }
        }
        Action::MoveBlockUp => {
            if let (Some(i), Some(document)) = (state.list_state.selected(), state.document.as_mut())
            {
                if i > 0 && i < document.blocks.len() {
                    document.blocks.swap(i, i - 1);
                    state.list_state.select(Some(i - 1));
                    state.dirty = true;
                }
            }
        }
        Action::MoveBlockDown => {
            if let (Some(i), Some(document)) = (state.list_state.selected(), state.document.as_mut())
            {
                if i + 1 < document.blocks.len() {
                    document.blocks.swap(i, i + 1);
                    state.list_state.select(Some(i + 1));
                    state.dirty = true;
                }
            }
        }
        Action::InsertTextBlockBelow => {
            if let Some(document) = state.document.as_mut() {
                let at = state
                    .list_state
                    .selected()
                    .map_or(document.blocks.len(), |i| i + 1)
                    .min(document.blocks.len());
                document.blocks.insert(
                    at,
                    Block::Text {
                        text: String::new(),
                    },
                );
                state.list_state.select(Some(at));
                state.dirty = true;
            }
        }

        // --- Mode transitions ---
        Action::EditBlock => {
            if let Some(i) = state.list_state.selected() {
                state.begin_edit(i);
            }
        }
        Action::CancelMode => match state.mode {
            AppMode::EditBlock => {
                state.close_palette();
                state.commit_editor();
                state.editing_index = None;
                state.mode = AppMode::Normal;
            }
            AppMode::Help => state.mode = AppMode::Normal,
            AppMode::Normal => {
                state.last_error = None;
                state.status_message = None;
            }
            AppMode::Welcome => {}
        },
        Action::ToggleHelp => {
            state.mode = match state.mode {
                AppMode::Help => AppMode::Normal,
                _ => AppMode::Help,
            };
        }
        Action::Quit => {
            state.should_quit = true;
        }

        // --- Inline editor & palette ---
        Action::TextAreaInput(key) => {
            if state.mode != AppMode::EditBlock {
                return None;
            }

            // The palette sees navigation keys before the text area does;
            // unhandled keys fall through and move the caret as usual.
            let response = state
                .slash
                .as_mut()
                .map(|slash| slash.navigator.on_key(&slash.view, key.code, &slash.query));
            match response {
                Some(NavResponse::Handled(Some(effect))) => {
                    apply_nav_effect(state, effect);
                    return None;
                }
                Some(NavResponse::Handled(None)) => return None,
                Some(NavResponse::NotHandled) | None => {}
            }

            if state.editor.input(key) {
                state.dirty = true;
            }
            refresh_palette(state);
        }
        Action::ClosePalette => {
            // Esc: the popup goes away, the typed trigger text stays.
            state.close_palette();
        }
        Action::PaletteHover(column, row) => {
            if let Some(slash) = state.slash.as_mut() {
                slash.navigator.hovered = slash.hit(column, row);
            }
        }
        Action::PaletteClick(column, row) => {
            if state.slash.is_none() {
                return None;
            }
            let hit = state.slash.as_ref().and_then(|s| s.hit(column, row));
            match hit {
                Some((group, command)) => {
                    let response = state.slash.as_mut().map(|slash| {
                        slash
                            .navigator
                            .select_at(&slash.view, group, command, &slash.query)
                    });
                    if let Some(NavResponse::Handled(Some(effect))) = response {
                        apply_nav_effect(state, effect);
                    }
                }
                // A press outside the popup dismisses it.
                None => state.close_palette(),
            }
        }

        // --- Template intents ---
        Action::NewTemplate => {
            state.document = Some(Document::starter());
            state.template_path = Some(std::path::PathBuf::from("untitled.json"));
            state.list_state.select(Some(0));
            state.mode = AppMode::Normal;
            state.dirty = true;
        }
        Action::OpenRecent(i) => {
            if let Some(path) = state.recent.get(i).cloned() {
                state.template_path = Some(path.clone());
                state.is_loading = true;
                state.mode = AppMode::Normal;
                return Some(Command::Load(path));
            }
        }
        Action::SaveTemplate => {
            state.commit_editor();
            if let (Some(document), Some(path)) =
                (state.document.clone(), state.template_path.clone())
            {
                return Some(Command::Save(document, path));
            }
        }
        Action::ExportHtml => {
            state.commit_editor();
            if let (Some(document), Some(path)) =
                (state.document.clone(), state.template_path.clone())
            {
                return Some(Command::Export(document, path.with_extension("html")));
            }
        }

        // --- Async results ---
        Action::TemplateLoaded(document) => {
            state.document = Some(*document);
            state.is_loading = false;
            state.dirty = false;
            state.close_palette();
            state.editing_index = None;
            if state.mode == AppMode::Welcome || state.mode == AppMode::EditBlock {
                state.mode = AppMode::Normal;
            }
            if state.list_state.selected().is_none() {
                state.list_state.select(Some(0));
            }
            state.status_message = Some("Template loaded".to_string());
        }
        Action::TemplateSaved(path) => {
            state.dirty = false;
            if let Some(document) = state.document.as_mut() {
                document.saved_at = Some(Local::now());
            }
            state.status_message = Some(format!("Saved {}", path.display()));
            // Written back to disk once, on exit.
            state.recent = super::persistence::push_recent(std::mem::take(&mut state.recent), path);
        }
        Action::OperationStarted(msg) => {
            state.status_message = Some(msg);
        }
        Action::OperationCompleted(result) => match result {
            Ok(msg) => state.status_message = Some(msg),
            Err(err) => state.last_error = Some(ErrorState::error(err)),
        },
        Action::ErrorOccurred(err) => {
            state.last_error = Some(ErrorState::error(err));
            state.is_loading = false;
        }
        Action::ExternalChangeDetected => {
            if !state.dirty && state.mode != AppMode::EditBlock {
                if let Some(path) = state.template_path.clone() {
                    state.is_loading = true;
                    return Some(Command::Load(path));
                }
            } else {
                state.last_error = Some(ErrorState::warning(
                    "Template changed on disk; not reloading over unsaved edits",
                ));
            }
        }

        Action::Tick => {
            state.frame_count = state.frame_count.wrapping_add(1);
        }

        Action::Resize(..) => {}
    }
    None
}

/// Execute a navigator effect against the host editor. Everything funnels
/// through the trigger range: if it is gone (palette torn down under a late
/// callback), this is a no-op rather than a fault.
fn apply_nav_effect(state: &mut AppState, effect: NavEffect) {
    match effect {
        NavEffect::Run(action) => run_command_action(state, action),
        NavEffect::Ascend {
            query,
            group_index,
            command_index,
        } => {
            let Some(trig) = trigger::detect(state.editor.lines(), state.editor.cursor()) else {
                return;
            };
            if let Some(slash) = state.slash.as_mut() {
                slash.pending_restore = Some((group_index, command_index));
            }
            trigger::replace(&mut state.editor, &trig, &format!("/{query}"));
            state.dirty = true;
            refresh_palette(state);
        }
    }
}

fn run_command_action(state: &mut AppState, action: CommandAction) {
    let Some(trig) = trigger::detect(state.editor.lines(), state.editor.cursor()) else {
        return;
    };
    match action {
        CommandAction::InsertInline(text) => {
            trigger::replace(&mut state.editor, &trig, &text);
            state.dirty = true;
            // Closes the palette unless `text` re-established a trigger,
            // which is exactly how menu descent stays open.
            refresh_palette(state);
        }
        CommandAction::InsertBlock(block) => {
            trigger::replace(&mut state.editor, &trig, "");
            state.commit_editor();
            if let Some(document) = state.document.as_mut() {
                let at = state
                    .editing_index
                    .map_or(document.blocks.len(), |i| i + 1)
                    .min(document.blocks.len());
                document.blocks.insert(at, block);
            }
            state.dirty = true;
            refresh_palette(state);
        }
    }
}

/// Re-derive the palette from the current trigger context. Runs after every
/// text mutation; this is the single place the palette opens, refreshes, and
/// closes, so every exit path releases the overlay.
fn refresh_palette(state: &mut AppState) {
    if state.mode != AppMode::EditBlock {
        state.close_palette();
        return;
    }
    let ctx = state.editor_context();
    match trigger::detect(state.editor.lines(), state.editor.cursor()) {
        Some(trig) => {
            if let Some(mut slash) = state.slash.take() {
                if trig.query != slash.query {
                    slash.view = engine::filter(&state.catalog, &trig.query, &ctx);
                    slash.query = trig.query;
                    // The coordinate resets on every view change — except
                    // when an ascend scheduled a restoration to run against
                    // the post-re-filter view.
                    match slash.pending_restore.take() {
                        Some((group, command)) => {
                            slash.navigator.restore(&slash.view, group, command);
                        }
                        None => slash.navigator.reset(),
                    }
                }
                state.slash = Some(slash);
            } else if engine::allow(&ctx) {
                let view = engine::filter(&state.catalog, &trig.query, &ctx);
                state.slash = Some(SlashMenuState::open(trig.query, view, (0, 0)));
            }
        }
        None => state.close_palette(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Action {
        Action::TextAreaInput(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn typed(c: char) -> Action {
        key(KeyCode::Char(c))
    }

    fn editing_state() -> AppState<'static> {
        let mut state = AppState {
            document: Some(Document {
                title: "t".to_string(),
                blocks: vec![
                    Block::Heading {
                        level: 1,
                        text: "Hi".to_string(),
                    },
                    Block::Text {
                        text: String::new(),
                    },
                ],
                saved_at: None,
            }),
            ..AppState::default()
        };
        state.mode = AppMode::Normal;
        state.list_state.select(Some(1));
        state.begin_edit(1);
        state
    }

    fn type_str(state: &mut AppState, s: &str) {
        for c in s.chars() {
            update(state, typed(c));
        }
    }

    #[test]
    fn slash_opens_the_palette() {
        let mut state = editing_state();
        assert!(state.slash.is_none());

        update(&mut state, typed('/'));
        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.query, "");
        assert!(!slash.view.is_empty());
        assert!(!slash.overlay.is_disposed());
    }

    #[test]
    fn typing_refines_the_query_and_resets_the_cursor() {
        let mut state = editing_state();
        type_str(&mut state, "/");
        update(&mut state, key(KeyCode::Down));
        assert_ne!(
            (0, 0),
            {
                let nav = &state.slash.as_ref().unwrap().navigator;
                (nav.group_index, nav.command_index)
            }
        );

        type_str(&mut state, "tex");
        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.query, "tex");
        assert_eq!(slash.view.len(), 1);
        assert_eq!(slash.view[0].commands[0].id, "text");
        assert_eq!(
            (slash.navigator.group_index, slash.navigator.command_index),
            (0, 0)
        );
    }

    #[test]
    fn escape_closes_palette_but_keeps_text() {
        let mut state = editing_state();
        type_str(&mut state, "/but");
        assert!(state.slash.is_some());

        update(&mut state, Action::ClosePalette);
        assert!(state.slash.is_none());
        assert!(state.editor.text().contains("/but"));
    }

    #[test]
    fn enter_on_leaf_inserts_block_once_and_closes_palette() {
        let mut state = editing_state();
        let before = state.document.as_ref().unwrap().blocks.len();

        type_str(&mut state, "/divider");
        assert!(state.slash.is_some());
        update(&mut state, key(KeyCode::Enter));

        let document = state.document.as_ref().unwrap();
        assert_eq!(document.blocks.len(), before + 1);
        assert_eq!(document.blocks[2], Block::Divider);
        // Exactly one close: the palette is gone and the trigger text too.
        assert!(state.slash.is_none());
        assert!(!state.editor.text().contains("/divider"));
    }

    #[test]
    fn backspacing_past_the_slash_closes_the_palette() {
        let mut state = editing_state();
        type_str(&mut state, "/");
        assert!(state.slash.is_some());

        update(&mut state, key(KeyCode::Backspace));
        assert!(state.slash.is_none());
    }

    #[test]
    fn right_descends_into_menu_and_left_restores() {
        let mut state = editing_state();
        type_str(&mut state, "/vari");

        // Move onto the Variable menu entry (sole match).
        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.view.len(), 1);
        assert!(slash.view[0].commands[0].is_menu);

        update(&mut state, key(KeyCode::Right));
        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.query, "variable.");
        assert_eq!(slash.view[0].source_id.as_deref(), Some("variable"));

        // Walk down inside the namespace, then ascend.
        update(&mut state, key(KeyCode::Down));
        update(&mut state, key(KeyCode::Left));

        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.query, "vari");
        assert!(slash.view[0].source_id.is_none());
        // The pre-descent coordinate came back with the pre-descent query.
        assert_eq!(
            (slash.navigator.group_index, slash.navigator.command_index),
            (0, 0)
        );
        assert!(state.editor.text().contains("/vari"));
    }

    #[test]
    fn enter_on_menu_inserts_prefix_and_keeps_palette_open() {
        let mut state = editing_state();
        type_str(&mut state, "/social");
        let before = state.document.as_ref().unwrap().blocks.len();

        update(&mut state, key(KeyCode::Enter));
        // Zero closes, zero block mutations: only the prefix was inserted.
        let slash = state.slash.as_ref().unwrap();
        assert_eq!(slash.query, "social.");
        assert_eq!(state.document.as_ref().unwrap().blocks.len(), before);
        assert!(state.editor.text().contains("/social."));
    }

    #[test]
    fn selecting_inside_namespace_inserts_inline_text() {
        let mut state = editing_state();
        type_str(&mut state, "/variable.email");

        update(&mut state, key(KeyCode::Enter));
        assert!(state.slash.is_none());
        assert!(state.editor.text().contains("{{user.email}}"));
    }

    #[test]
    fn palette_never_opens_inside_raw_html_blocks() {
        let mut state = AppState {
            document: Some(Document {
                title: "t".to_string(),
                blocks: vec![Block::Html {
                    source: String::new(),
                }],
                saved_at: None,
            }),
            ..AppState::default()
        };
        state.mode = AppMode::Normal;
        state.list_state.select(Some(0));
        state.begin_edit(0);

        type_str(&mut state, "/");
        assert!(state.slash.is_none());
    }

    #[test]
    fn footer_predicate_reflects_document_state() {
        let mut state = editing_state();
        type_str(&mut state, "/foot");
        assert!(state
            .slash
            .as_ref()
            .unwrap()
            .view
            .iter()
            .any(|g| g.commands.iter().any(|c| c.id == "footer")));
        update(&mut state, Action::ClosePalette);

        state
            .document
            .as_mut()
            .unwrap()
            .blocks
            .push(Block::Footer {
                text: String::new(),
            });
        // Retype the trigger so the view is rebuilt from scratch.
        type_str(&mut state, " ");
        type_str(&mut state, "/foot");
        assert!(state.slash.is_none() || state
            .slash
            .as_ref()
            .unwrap()
            .view
            .iter()
            .all(|g| g.commands.iter().all(|c| c.id != "footer")));
    }

    #[test]
    fn leaving_edit_mode_closes_the_palette_and_commits_text() {
        let mut state = editing_state();
        type_str(&mut state, "hello");
        type_str(&mut state, " /tex");
        assert!(state.slash.is_some());

        update(&mut state, Action::CancelMode);
        assert!(state.slash.is_none());
        assert_eq!(state.mode, AppMode::Normal);
        let document = state.document.as_ref().unwrap();
        assert!(document.blocks[1]
            .editable_text()
            .unwrap()
            .contains("hello"));
    }

    #[test]
    fn block_selection_wraps_both_directions() {
        let mut state = AppState {
            document: Some(Document::starter()),
            ..AppState::default()
        };
        state.mode = AppMode::Normal;
        state.list_state.select(Some(1));

        update(&mut state, Action::SelectNextBlock);
        assert_eq!(state.list_state.selected(), Some(0));
        update(&mut state, Action::SelectPrevBlock);
        assert_eq!(state.list_state.selected(), Some(1));
    }

    #[test]
    fn delete_clamps_selection() {
        let mut state = AppState {
            document: Some(Document::starter()),
            ..AppState::default()
        };
        state.mode = AppMode::Normal;
        state.list_state.select(Some(1));

        update(&mut state, Action::DeleteBlock);
        assert_eq!(state.list_state.selected(), Some(0));
        assert!(state.dirty);

        update(&mut state, Action::DeleteBlock);
        assert_eq!(state.list_state.selected(), None);
        // Deleting with nothing selected is a no-op, not a fault.
        update(&mut state, Action::DeleteBlock);
    }

    #[test]
    fn save_requires_document_and_path() {
        let mut state = AppState::default();
        assert!(update(&mut state, Action::SaveTemplate).is_none());

        state.document = Some(Document::starter());
        state.template_path = Some(std::path::PathBuf::from("t.json"));
        assert!(matches!(
            update(&mut state, Action::SaveTemplate),
            Some(Command::Save(..))
        ));
    }

    #[test]
    fn external_change_reloads_only_when_clean() {
        let mut state = AppState {
            document: Some(Document::starter()),
            template_path: Some(std::path::PathBuf::from("t.json")),
            ..AppState::default()
        };
        state.mode = AppMode::Normal;

        assert!(matches!(
            update(&mut state, Action::ExternalChangeDetected),
            Some(Command::Load(_))
        ));

        state.is_loading = false;
        state.dirty = true;
        assert!(update(&mut state, Action::ExternalChangeDetected).is_none());
        assert!(state.last_error.is_some());
    }
}
