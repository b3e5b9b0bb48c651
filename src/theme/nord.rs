use super::palette::Palette;
use ratatui::style::Color;

pub const NORD: Palette = Palette {
    base: Color::Rgb(46, 52, 64),
    mantle: Color::Rgb(43, 48, 59),
    surface: Color::Rgb(59, 66, 82),
    border: Color::Rgb(67, 76, 94),
    text: Color::Rgb(236, 239, 244),
    muted: Color::Rgb(216, 222, 233),
    faint: Color::Rgb(129, 161, 193),
    accent: Color::Rgb(136, 192, 208),
    accent_alt: Color::Rgb(129, 161, 193),
    green: Color::Rgb(163, 190, 140),
    yellow: Color::Rgb(235, 203, 139),
    red: Color::Rgb(191, 97, 106),
    magenta: Color::Rgb(180, 142, 173),
};
