//! The slash-command palette core: a static two-level command catalog, a
//! pure query-filtering engine, a keyboard navigator over the filtered
//! view, and the popup overlay lifecycle. Everything here is free of
//! terminal and filesystem concerns; the reducer wires it to the host
//! text editor.

pub mod catalog;
pub mod engine;
pub mod navigator;
pub mod overlay;
pub mod trigger;
