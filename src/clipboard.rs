/// Text clipboard used for copy, cut and paste of figures.
pub trait Clipboard {
    fn set_text(&mut self, text: String);

    /// Current clipboard text, `None` if empty or not text.
    fn text(&self) -> Option<String>;
}

/// Clipboard kept in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            contents: Some(text.into()),
        }
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: String) {
        self.contents = Some(text);
    }

    fn text(&self) -> Option<String> {
        self.contents.clone()
    }
}
