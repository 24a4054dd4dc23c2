//! Ordered, bounded set of chosen artist influences.

/// Maximum number of artists blended into one prompt.
pub const MAX_ARTISTS: usize = 3;

/// What a toggle did to the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Added,
    Removed,
    /// The selection was full; nothing changed.
    LimitReached,
}

/// Artist names in the order they were picked. Unique, at most [`MAX_ARTISTS`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtistSelection {
    names: Vec<String>,
}

impl ArtistSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add the artist if absent, remove it if present.
    ///
    /// Adding to a full selection is a no-op reported as `LimitReached`.
    pub fn toggle(&mut self, name: &str) -> ToggleOutcome {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            return ToggleOutcome::Removed;
        }
        if self.names.len() >= MAX_ARTISTS {
            return ToggleOutcome::LimitReached;
        }
        self.names.push(name.to_string());
        ToggleOutcome::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.names.len() >= MAX_ARTISTS
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> ArtistSelection {
        let mut selection = ArtistSelection::new();
        for name in ["Jim Lee", "Jock", "Sana Takeda"] {
            assert_eq!(selection.toggle(name), ToggleOutcome::Added);
        }
        selection
    }

    #[test]
    fn test_fourth_artist_is_noop() {
        let mut selection = full();
        let before = selection.clone();
        assert_eq!(selection.toggle("Peach Momoko"), ToggleOutcome::LimitReached);
        assert_eq!(selection, before);
        assert!(!selection.contains("Peach Momoko"));
    }

    #[test]
    fn test_toggle_removes_exactly_that_artist() {
        let mut selection = full();
        assert_eq!(selection.toggle("Jock"), ToggleOutcome::Removed);
        assert_eq!(selection.names(), &["Jim Lee", "Sana Takeda"]);
    }

    #[test]
    fn test_removing_frees_a_slot() {
        let mut selection = full();
        selection.toggle("Jim Lee");
        assert_eq!(selection.toggle("Peach Momoko"), ToggleOutcome::Added);
        assert_eq!(selection.names(), &["Jock", "Sana Takeda", "Peach Momoko"]);
        assert!(selection.is_full());
    }

    #[test]
    fn test_clear() {
        let mut selection = full();
        selection.clear();
        assert!(selection.is_empty());
    }
}
