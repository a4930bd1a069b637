//! User-facing announcements (status line / screen-reader live region).

use std::cell::RefCell;

/// Something that can surface a short message to the user.
pub trait Announcer {
    fn announce(&self, message: &str);
}

/// Keeps announcements in memory, for embedding UIs that poll for messages.
#[derive(Debug, Default)]
pub struct BufferedAnnouncer {
    messages: RefCell<Vec<String>>,
}

impl BufferedAnnouncer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns and clears the pending messages.
    pub fn drain(&self) -> Vec<String> {
        self.messages.borrow_mut().drain(..).collect()
    }
}

impl Announcer for BufferedAnnouncer {
    fn announce(&self, message: &str) {
        self.messages.borrow_mut().push(message.to_string());
    }
}
