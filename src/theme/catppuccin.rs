use super::palette::Palette;
use ratatui::style::Color;

pub const CATPPUCCIN_MOCHA: Palette = Palette {
    base: Color::Rgb(30, 30, 46),
    mantle: Color::Rgb(24, 24, 37),
    surface: Color::Rgb(49, 50, 68),
    border: Color::Rgb(88, 91, 112),
    text: Color::Rgb(205, 214, 244),
    muted: Color::Rgb(166, 173, 200),
    faint: Color::Rgb(108, 112, 134),
    accent: Color::Rgb(137, 180, 250),
    accent_alt: Color::Rgb(180, 190, 254),
    green: Color::Rgb(166, 227, 161),
    yellow: Color::Rgb(249, 226, 175),
    red: Color::Rgb(243, 139, 168),
    magenta: Color::Rgb(203, 166, 247),
};
