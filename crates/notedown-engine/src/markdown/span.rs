use serde::Serialize;

/// A byte range `[start, end)` into the post content.
///
/// Slicing the content with a node's span reproduces its exact source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// The source text covered by this span, if it lies on char boundaries
    /// inside `source`.
    pub fn slice(self, source: &str) -> Option<&str> {
        source.get(self.start..self.end)
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(r: std::ops::Range<usize>) -> Self {
        Self::new(r.start, r.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_saturates() {
        assert_eq!(Span::new(5, 3).len(), 0);
        assert!(Span::new(5, 3).is_empty());
    }

    #[test]
    fn slice_checks_bounds() {
        assert_eq!(Span::new(0, 5).slice("hello world"), Some("hello"));
        assert_eq!(Span::new(6, 50).slice("hello world"), None);
    }

    #[test]
    fn slice_checks_char_boundaries() {
        // "é" is two bytes
        assert_eq!(Span::new(0, 1).slice("é"), None);
    }
}
