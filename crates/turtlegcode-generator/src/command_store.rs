//! Segment history recorded from a turtle script.

use turtlegcode_core::Segment;

/// Ordered, append-only history of drawn segments
///
/// Segments are kept exactly as received: no merging, no deduplication, no
/// bound on length. The only removal is [`CommandStore::clear`].
#[derive(Debug, Clone, Default)]
pub struct CommandStore {
    segments: Vec<Segment>,
}

impl CommandStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a segment
    pub fn record(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Drop the whole history
    pub fn clear(&mut self) {
        self.segments.clear();
    }

    /// Recorded segments in arrival order
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl Extend<Segment> for CommandStore {
    fn extend<I: IntoIterator<Item = Segment>>(&mut self, iter: I) {
        self.segments.extend(iter);
    }
}
