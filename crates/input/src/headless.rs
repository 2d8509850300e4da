use std::collections::VecDeque;

use rogue_kernel::Window;

use crate::message::WindowMessage;

/// A window with no platform surface.
///
/// Messages are queued with [`HeadlessWindow::post`] and drained by the game
/// loop. A frame limit turns it into a fixed-length run: after that many
/// message pumps the window reports that the user quit.
#[derive(Debug, Default)]
pub struct HeadlessWindow {
    queue: VecDeque<WindowMessage>,
    visible: bool,
    quit: bool,
    focused: bool,
    size: (u32, u32),
    pumps: u64,
    processed: u64,
    frame_limit: Option<u64>,
}

impl HeadlessWindow {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            focused: true,
            ..Self::default()
        }
    }

    /// Signal quit after `frames` calls to `process_messages`.
    pub fn with_frame_limit(mut self, frames: u64) -> Self {
        self.frame_limit = Some(frames);
        self.check_frame_limit();
        self
    }

    /// Queue a message for the next pump.
    pub fn post(&mut self, message: WindowMessage) {
        self.queue.push_back(message);
    }

    /// Ask to quit through the message queue, like a close button would.
    pub fn request_quit(&mut self) {
        self.post(WindowMessage::Quit);
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn size(&self) -> (u32, u32) {
        self.size
    }

    /// Number of message pumps so far.
    pub fn pumps(&self) -> u64 {
        self.pumps
    }

    /// Total messages drained so far.
    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    fn check_frame_limit(&mut self) {
        if let Some(limit) = self.frame_limit {
            if self.pumps >= limit && !self.quit {
                tracing::debug!(limit, "frame limit reached");
                self.quit = true;
            }
        }
    }
}

impl Window for HeadlessWindow {
    fn show(&mut self) {
        tracing::debug!(width = self.size.0, height = self.size.1, "showing window");
        self.visible = true;
    }

    fn process_messages(&mut self) {
        while let Some(message) = self.queue.pop_front() {
            tracing::debug!(?message, "window message");
            self.processed += 1;
            match message {
                WindowMessage::Quit => self.quit = true,
                WindowMessage::Resized { width, height } => self.size = (width, height),
                WindowMessage::Focus(focused) => self.focused = focused,
            }
        }
        self.pumps += 1;
        self.check_frame_limit();
    }

    fn did_user_quit(&self) -> bool {
        self.quit
    }
}
