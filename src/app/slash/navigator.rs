use crate::app::slash::catalog::CommandAction;
use crate::app::slash::engine::{FilteredCommand, FilteredGroup};
use crossterm::event::KeyCode;

/// Cursor and query captured before descending into a menu namespace, so
/// ascending restores the exact pre-descent position. Written on select,
/// read-and-cleared on ascend. The default (empty query, origin) covers the
/// case where the user typed the namespace prefix by hand.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescentHistory {
    pub query: String,
    pub group_index: usize,
    pub command_index: usize,
}

/// Side effect a handled key asks the host to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum NavEffect {
    /// Execute the selected command's action against the document.
    Run(CommandAction),
    /// Leave the current menu namespace: re-insert `/<query>` at the trigger
    /// and restore the saved coordinate once the resulting re-filter has
    /// produced the new view.
    Ascend {
        query: String,
        group_index: usize,
        command_index: usize,
    },
}

/// `NotHandled` lets the event fall through to the text editor (e.g. Right
/// on a leaf moves the caret instead).
#[derive(Debug, Clone, PartialEq)]
pub enum NavResponse {
    NotHandled,
    Handled(Option<NavEffect>),
}

/// Keyboard cursor over the filtered two-level view. The view itself is
/// owned by the caller and replaced on every query change; the navigator
/// only holds the coordinate, hover, and descent history.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Navigator {
    pub group_index: usize,
    pub command_index: usize,
    pub hovered: Option<(usize, usize)>,
    history: Option<DescentHistory>,
}

impl Navigator {
    /// Back to the origin; called whenever the filtered view changes.
    /// Descent history deliberately survives — it dies with the palette.
    pub fn reset(&mut self) {
        self.group_index = 0;
        self.command_index = 0;
        self.hovered = None;
    }

    /// Place the cursor at a coordinate from a previous view, clamped into
    /// the current one.
    pub fn restore(&mut self, view: &[FilteredGroup], group: usize, command: usize) {
        if view.is_empty() {
            self.reset();
            return;
        }
        self.group_index = group.min(view.len() - 1);
        let len = view[self.group_index].commands.len();
        self.command_index = command.min(len.saturating_sub(1));
        self.hovered = None;
    }

    #[must_use]
    pub fn selected<'a>(&self, view: &'a [FilteredGroup]) -> Option<&'a FilteredCommand> {
        let group = view.get(self.group_index)?;
        group.commands.get(self.command_index)
    }

    /// True while the view shows a menu's children (the synthetic group
    /// carries the menu id that top-level groups never have).
    #[must_use]
    pub fn in_namespace(&self, view: &[FilteredGroup]) -> bool {
        view.get(self.group_index.min(view.len().saturating_sub(1)))
            .is_some_and(|g| g.source_id.is_some())
    }

    pub fn on_key(&mut self, view: &[FilteredGroup], code: KeyCode, query: &str) -> NavResponse {
        match code {
            KeyCode::Down => {
                if view.is_empty() {
                    return NavResponse::NotHandled;
                }
                self.clamp(view);
                let last_in_group = view[self.group_index].commands.len().saturating_sub(1);
                if self.command_index < last_in_group {
                    self.command_index += 1;
                } else {
                    self.command_index = 0;
                    self.group_index = if self.group_index + 1 < view.len() {
                        self.group_index + 1
                    } else {
                        0
                    };
                }
                self.hovered = None;
                NavResponse::Handled(None)
            }
            KeyCode::Up => {
                if view.is_empty() {
                    return NavResponse::NotHandled;
                }
                self.clamp(view);
                if self.command_index > 0 {
                    self.command_index -= 1;
                } else {
                    self.group_index = if self.group_index == 0 {
                        view.len() - 1
                    } else {
                        self.group_index - 1
                    };
                    self.command_index = view[self.group_index].commands.len().saturating_sub(1);
                }
                self.hovered = None;
                NavResponse::Handled(None)
            }
            KeyCode::Enter => {
                if view.is_empty() {
                    return NavResponse::NotHandled;
                }
                self.clamp(view);
                self.select(view, query)
            }
            KeyCode::Right => {
                // Only a menu swallows Right; on a leaf the caret moves.
                self.clamp(view);
                match self.selected(view) {
                    Some(cmd) if cmd.is_menu => self.select(view, query),
                    _ => NavResponse::NotHandled,
                }
            }
            KeyCode::Left => {
                if !self.in_namespace(view) {
                    return NavResponse::NotHandled;
                }
                let history = self.history.take().unwrap_or_default();
                NavResponse::Handled(Some(NavEffect::Ascend {
                    query: history.query,
                    group_index: history.group_index,
                    command_index: history.command_index,
                }))
            }
            _ => NavResponse::NotHandled,
        }
    }

    /// Mouse-driven selection at an explicit coordinate.
    pub fn select_at(
        &mut self,
        view: &[FilteredGroup],
        group: usize,
        command: usize,
        query: &str,
    ) -> NavResponse {
        if view
            .get(group)
            .and_then(|g| g.commands.get(command))
            .is_none()
        {
            return NavResponse::NotHandled;
        }
        self.group_index = group;
        self.command_index = command;
        self.select(view, query)
    }

    fn select(&mut self, view: &[FilteredGroup], query: &str) -> NavResponse {
        let Some(cmd) = self.selected(view) else {
            return NavResponse::NotHandled;
        };
        let action = cmd.action.clone();
        self.history = Some(DescentHistory {
            query: query.to_string(),
            group_index: self.group_index,
            command_index: self.command_index,
        });
        NavResponse::Handled(Some(NavEffect::Run(action)))
    }

    fn clamp(&mut self, view: &[FilteredGroup]) {
        if view.is_empty() {
            self.group_index = 0;
            self.command_index = 0;
            return;
        }
        self.group_index = self.group_index.min(view.len() - 1);
        self.command_index = self
            .command_index
            .min(view[self.group_index].commands.len().saturating_sub(1));
    }
}
