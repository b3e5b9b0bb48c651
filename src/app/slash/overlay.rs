use ratatui::layout::Rect;

/// Owned popup-positioning resource. Created when the palette opens,
/// anchor-updated every frame, disposed on every exit path. A disposed
/// overlay yields no rect, so late callers cannot draw over freed state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    anchor: (u16, u16),
    disposed: bool,
}

impl Overlay {
    #[must_use]
    pub fn open(anchor: (u16, u16)) -> Self {
        Self {
            anchor,
            disposed: false,
        }
    }

    pub fn update_anchor(&mut self, anchor: (u16, u16)) {
        if self.disposed {
            return;
        }
        self.anchor = anchor;
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }

    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Popup placement: above the anchor line when it fits, below otherwise,
    /// clamped into the frame. `None` once disposed or when the frame cannot
    /// hold the popup at all.
    #[must_use]
    pub fn rect(&self, frame: Rect, width: u16, height: u16) -> Option<Rect> {
        if self.disposed || frame.width == 0 || frame.height == 0 {
            return None;
        }
        let width = width.min(frame.width);
        let height = height.min(frame.height);
        if width == 0 || height == 0 {
            return None;
        }

        let (ax, ay) = self.anchor;
        let x = ax
            .max(frame.x)
            .min(frame.x + frame.width - width);
        let y = if ay >= frame.y + height {
            ay - height
        } else {
            (ay + 1).min(frame.y + frame.height - height)
        };
        Some(Rect::new(x, y, width, height))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_placement_above_the_anchor() {
        let overlay = Overlay::open((10, 20));
        let rect = overlay.rect(Rect::new(0, 0, 80, 24), 40, 10).unwrap();
        assert_eq!(rect, Rect::new(10, 10, 40, 10));
    }

    #[test]
    fn falls_below_when_no_room_above() {
        let overlay = Overlay::open((10, 2));
        let rect = overlay.rect(Rect::new(0, 0, 80, 24), 40, 10).unwrap();
        assert_eq!(rect.y, 3);
    }

    #[test]
    fn clamps_into_the_frame() {
        let overlay = Overlay::open((75, 1));
        let rect = overlay.rect(Rect::new(0, 0, 80, 24), 40, 10).unwrap();
        assert!(rect.x + rect.width <= 80);
        assert!(rect.y + rect.height <= 24);
    }

    #[test]
    fn disposed_overlay_yields_nothing() {
        let mut overlay = Overlay::open((10, 10));
        overlay.dispose();
        assert!(overlay.is_disposed());
        assert_eq!(overlay.rect(Rect::new(0, 0, 80, 24), 40, 10), None);

        // Updates after disposal are ignored rather than faulting.
        overlay.update_anchor((1, 1));
        assert_eq!(overlay.rect(Rect::new(0, 0, 80, 24), 40, 10), None);
    }

    #[test]
    fn degenerate_frame_yields_nothing() {
        let overlay = Overlay::open((0, 0));
        assert_eq!(overlay.rect(Rect::new(0, 0, 0, 0), 40, 10), None);
    }
}
