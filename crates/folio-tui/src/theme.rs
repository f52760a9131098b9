use ratatui::style::Color;

/// Runtime palette; every widget draws from these slots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub background: Color,
    /// Tiles, menus and other raised surfaces
    pub surface: Color,
    pub foreground: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
    /// Lightbox backdrop
    pub scrim: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        crate::themes::paper_dark()
    }
}
