//! Collaborators driven by the game loop.

/// The main window as seen by the loop driver.
pub trait Window {
    /// Make the window visible. Called once before initialization.
    fn show(&mut self);

    /// Drain pending input and OS events without blocking.
    fn process_messages(&mut self);

    /// True once the user has asked to quit.
    fn did_user_quit(&self) -> bool;
}

/// Presents completed frames.
pub trait Renderer {
    /// Flip the finished frame to the display.
    fn present(&mut self);
}
