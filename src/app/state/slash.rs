use crate::app::slash::engine::FilteredGroup;
use crate::app::slash::navigator::Navigator;
use crate::app::slash::overlay::Overlay;
use ratatui::layout::Rect;

/// Everything the open palette owns: the filtered view, the keyboard
/// cursor, the popup overlay, and the coordinate waiting to be restored
/// after an ascend re-filter. Dropped wholesale when the palette closes.
#[derive(Debug, Clone, PartialEq)]
pub struct SlashMenuState {
    pub query: String,
    pub view: Vec<FilteredGroup>,
    pub navigator: Navigator,
    pub overlay: Overlay,
    /// Written by the ascend transition, consumed by the first refresh that
    /// follows it — the restoration must observe the post-re-filter view.
    pub pending_restore: Option<(usize, usize)>,
    /// Screen row → coordinate map recorded by the popup widget each frame,
    /// used for mouse hover and click hit-testing.
    pub row_hits: Vec<(Rect, (usize, usize))>,
}

impl SlashMenuState {
    #[must_use]
    pub fn open(query: String, view: Vec<FilteredGroup>, anchor: (u16, u16)) -> Self {
        Self {
            query,
            view,
            navigator: Navigator::default(),
            overlay: Overlay::open(anchor),
            pending_restore: None,
            row_hits: Vec::new(),
        }
    }

    /// Coordinate under a screen position, if any.
    #[must_use]
    pub fn hit(&self, column: u16, row: u16) -> Option<(usize, usize)> {
        self.row_hits
            .iter()
            .find(|(rect, _)| {
                column >= rect.x
                    && column < rect.x + rect.width
                    && row >= rect.y
                    && row < rect.y + rect.height
            })
            .map(|(_, coord)| *coord)
    }
}
