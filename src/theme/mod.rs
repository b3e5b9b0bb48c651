use ratatui::style::{Modifier, Style};
use serde::{Deserialize, Serialize};

pub mod catppuccin;
pub mod nord;
pub mod palette;

pub use palette::{dim_color, Palette};

#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Style,
    pub border_focus: Style,

    pub header: Style,
    pub header_logo: Style,
    pub header_item: Style,
    pub header_active: Style,

    pub footer: Style,
    pub footer_segment_key: Style,
    pub footer_segment_val: Style,
    pub footer_group_name: Style,

    pub status_ready: Style,
    pub status_info: Style,
    pub status_warn: Style,
    pub status_error: Style,

    pub list_item: Style,
    pub list_selected: Style,
    pub dimmed: Style,

    pub block_glyph: Style,
    pub block_kind: Style,
    pub block_preview: Style,

    pub palette_group_title: Style,
    pub palette_item: Style,
    pub palette_item_selected: Style,
    pub palette_item_hovered: Style,
    pub palette_menu_marker: Style,
    pub palette_hint: Style,
    pub palette_query: Style,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaletteType {
    #[default]
    CatppuccinMocha,
    Nord,
}

impl PaletteType {
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            PaletteType::CatppuccinMocha => "Catppuccin (Mocha)",
            PaletteType::Nord => "Nord",
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_palette_type(PaletteType::default())
    }
}

impl Theme {
    #[must_use]
    pub fn from_palette_type(t: PaletteType) -> Self {
        match t {
            PaletteType::CatppuccinMocha => Self::from_palette(&catppuccin::CATPPUCCIN_MOCHA),
            PaletteType::Nord => Self::from_palette(&nord::NORD),
        }
    }

    #[must_use]
    pub fn from_palette(p: &Palette) -> Self {
        Self {
            border: Style::default().fg(p.border),
            border_focus: Style::default().fg(p.accent),

            header: Style::default().fg(p.muted).bg(p.mantle),
            header_logo: Style::default()
                .fg(p.base)
                .bg(p.accent)
                .add_modifier(Modifier::BOLD),
            header_item: Style::default().fg(p.faint),
            header_active: Style::default().fg(p.accent).add_modifier(Modifier::BOLD),

            footer: Style::default().fg(p.muted).bg(p.mantle),
            footer_segment_key: Style::default()
                .fg(p.accent)
                .add_modifier(Modifier::BOLD),
            footer_segment_val: Style::default().fg(p.muted),
            footer_group_name: Style::default().fg(p.faint).add_modifier(Modifier::ITALIC),

            status_ready: Style::default().fg(p.green),
            status_info: Style::default().fg(p.accent),
            status_warn: Style::default().fg(p.yellow),
            status_error: Style::default().fg(p.red).add_modifier(Modifier::BOLD),

            list_item: Style::default().fg(p.text),
            list_selected: Style::default()
                .fg(p.text)
                .bg(p.surface)
                .add_modifier(Modifier::BOLD),
            dimmed: Style::default().fg(p.faint),

            block_glyph: Style::default().fg(p.accent_alt),
            block_kind: Style::default().fg(p.faint),
            block_preview: Style::default().fg(p.text),

            palette_group_title: Style::default()
                .fg(p.faint)
                .bg(dim_color(p.surface, 0.8))
                .add_modifier(Modifier::BOLD),
            palette_item: Style::default().fg(p.text).bg(p.mantle),
            palette_item_selected: Style::default()
                .fg(p.base)
                .bg(p.accent)
                .add_modifier(Modifier::BOLD),
            palette_item_hovered: Style::default().fg(p.text).bg(p.surface),
            palette_menu_marker: Style::default().fg(p.magenta),
            palette_hint: Style::default().fg(p.faint).bg(p.mantle),
            palette_query: Style::default().fg(p.yellow),
        }
    }
}
