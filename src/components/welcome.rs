use crate::app::state::AppState;
use crate::theme::Theme;
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

pub struct Welcome<'a> {
    pub app_state: &'a AppState<'a>,
    pub theme: &'a Theme,
}

impl Widget for Welcome<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let logo_ascii = [
            r" _      _   _                                  ",
            r"| | ___| |_| |_ ___ _ __ _ __  _ __ ___ ___ ___ ",
            r"| |/ _ \ __| __/ _ \ '__| '_ \| '__/ _ Y __/ __|",
            r"| |  __/ |_| ||  __/ |  | |_) | | |  __|__ \__ \",
            r"|_|\___|\__|\__\___|_|  | .__/|_|  \___|___/___/",
            r"                        |_|                     ",
        ];

        let mut lines: Vec<Line> = logo_ascii
            .iter()
            .map(|l| Line::from(Span::styled(*l, self.theme.header_active)))
            .collect();

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" LETTERPRESS ", self.theme.header_logo),
            Span::raw(" - email templates in your terminal"),
        ]));
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("n", self.theme.footer_segment_key),
            Span::raw(" or "),
            Span::styled("Enter", self.theme.footer_segment_key),
            Span::raw(" to start a new template"),
        ]));

        if !self.app_state.recent.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                "Recent templates:",
                self.theme.header_item,
            )));
            for (i, path) in self.app_state.recent.iter().take(9).enumerate() {
                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), self.theme.footer_segment_key),
                    Span::styled(path.display().to_string(), self.theme.list_item),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::raw("Press "),
            Span::styled("q", self.theme.footer_segment_key),
            Span::raw(" to quit"),
        ]));

        if let Some(err) = &self.app_state.last_error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!("Error: {}", err.message),
                self.theme.status_error,
            )));
        }

        let content_height = lines.len() as u16;
        let paragraph = Paragraph::new(lines).alignment(Alignment::Center);

        let centered_area = Rect {
            x: area.x,
            y: (area.y + area.height / 2).saturating_sub(content_height / 2),
            width: area.width,
            height: content_height.min(area.height),
        };

        if centered_area.width > 0 && centered_area.height > 0 {
            paragraph.render(centered_area, buf);
        }
    }
}
