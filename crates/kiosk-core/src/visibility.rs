//! User-controlled set of sources that participate in the gallery.

use crate::Capture;
use crate::grouping::Timeline;

/// Sources shown on first launch, regardless of what the store holds.
pub const DEFAULT_SOURCES: &[&str] = &["theguardian.com", "bbc.com", "aljazeera.com"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisibilitySet {
    sources: Vec<String>,
}

impl Default for VisibilitySet {
    fn default() -> Self {
        Self::new(DEFAULT_SOURCES.iter().copied())
    }
}

impl VisibilitySet {
    pub fn new<I, S>(sources: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self {
            sources: Vec::new(),
        };
        for source in sources {
            let source = source.into();
            if !set.is_visible(&source) {
                set.sources.push(source);
            }
        }
        set
    }

    /// Flip membership of `source`. Sources missing from the data are accepted.
    pub fn toggle(&mut self, source: &str) {
        if let Some(pos) = self.sources.iter().position(|s| s == source) {
            self.sources.remove(pos);
        } else {
            self.sources.push(source.to_string());
        }
    }

    pub fn is_visible(&self, source: &str) -> bool {
        self.sources.iter().any(|s| s == source)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

/// Groups that are rendered, in timeline order.
pub fn visible_groups<'a>(
    timeline: &'a Timeline,
    visibility: &'a VisibilitySet,
) -> impl Iterator<Item = (&'a str, &'a [Capture])> {
    timeline
        .iter()
        .filter(move |(source, _)| visibility.is_visible(source))
}

/// Concatenate visible groups into the linear order used for prev/next.
pub fn flat_sequence(timeline: &Timeline, visibility: &VisibilitySet) -> Vec<Capture> {
    visible_groups(timeline, visibility)
        .flat_map(|(_, group)| group.iter().cloned())
        .collect()
}
