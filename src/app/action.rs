use crate::domain::models::Document;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    // --- System / Terminal ---
    Tick,
    Resize(u16, u16),
    Quit,

    // --- Block list navigation & editing ---
    SelectNextBlock,
    SelectPrevBlock,
    SelectBlockIndex(usize),
    DeleteBlock,
    MoveBlockUp,
    MoveBlockDown,
    InsertTextBlockBelow,
    EditBlock,   // Open the inline editor on the selected block
    CancelMode,  // Esc: leave the current mode / clear errors
    ToggleHelp,

    // --- Inline editor & palette ---
    // Raw keystrokes; the reducer consults the palette navigator before the
    // text area sees them, mirroring how the original intercepts keys ahead
    // of the host editor.
    TextAreaInput(crossterm::event::KeyEvent),
    ClosePalette,             // Esc while the palette is open
    PaletteHover(u16, u16),   // Mouse moved over the popup (screen coords)
    PaletteClick(u16, u16),   // Mouse pressed on the popup (screen coords)

    // --- Template intents ---
    NewTemplate,
    OpenRecent(usize),
    SaveTemplate,
    ExportHtml,

    // --- Async results (dispatched by store workers) ---
    TemplateLoaded(Box<Document>),
    TemplateSaved(PathBuf),
    OperationStarted(String),
    OperationCompleted(Result<String, String>),
    ErrorOccurred(String),
    ExternalChangeDetected, // The open template changed on disk
}
