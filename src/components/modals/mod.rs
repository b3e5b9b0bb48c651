pub mod help;
pub mod helpers;
pub mod slash_menu;
