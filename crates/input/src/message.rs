/// A pending event delivered to the window by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowMessage {
    /// The user closed the window or asked to quit.
    Quit,
    /// Client area changed size.
    Resized { width: u32, height: u32 },
    /// Keyboard focus gained (`true`) or lost.
    Focus(bool),
}

impl WindowMessage {
    pub fn is_quit(&self) -> bool {
        matches!(self, WindowMessage::Quit)
    }
}
