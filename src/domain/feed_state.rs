use crate::domain::message::RenderedEntry;

/// The visible message list. Grows monotonically: entries are appended
/// in arrival order and never mutated or removed before teardown.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedState {
    entries: Vec<RenderedEntry>,
}

impl FeedState {
    pub fn entries(&self) -> &[RenderedEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn append(&mut self, entry: RenderedEntry) {
        self.entries.push(entry);
    }

    /// List offset that keeps the latest entry visible in a viewport of
    /// the given height.
    pub fn scroll_offset(&self, viewport_height: usize) -> usize {
        self.entries.len().saturating_sub(viewport_height)
    }
}
