//! Submitted lines, browsed with Up/Down.

/// What a history move asks the editor to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Recall {
    /// Nothing to do.
    Unchanged,
    /// Load this entry.
    Entry(String),
    /// Moved past the newest entry: clear the input.
    Clear,
}

#[derive(Debug, Default)]
pub struct History {
    entries: Vec<String>,
    /// Index of the entry shown, or the newest one when not browsing.
    pos: usize,
    browsing: bool,
}

impl History {
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Record a submitted line. Empty lines are not kept.
    pub fn push(&mut self, text: &str) {
        if !text.is_empty() {
            self.entries.push(text.to_string());
        }
        self.pos = self.entries.len().saturating_sub(1);
        self.browsing = false;
    }

    /// Step to an older entry. The first step loads the newest one.
    pub fn up(&mut self) -> Recall {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        if !self.browsing {
            self.browsing = true;
        } else if self.pos == 0 {
            return Recall::Unchanged;
        } else {
            self.pos -= 1;
        }
        Recall::Entry(self.entries[self.pos].clone())
    }

    /// Step to a newer entry, or clear the input past the newest.
    pub fn down(&mut self) -> Recall {
        if self.entries.is_empty() {
            return Recall::Unchanged;
        }
        if self.browsing && self.pos + 1 < self.entries.len() {
            self.pos += 1;
            return Recall::Entry(self.entries[self.pos].clone());
        }
        self.pos = self.entries.len() - 1;
        self.browsing = false;
        Recall::Clear
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn history(lines: &[&str]) -> History {
        let mut history = History::default();
        for line in lines {
            history.push(line);
        }
        history
    }

    #[test]
    fn test_empty_history_is_noop() {
        let mut history = History::default();
        assert_eq!(history.up(), Recall::Unchanged);
        assert_eq!(history.down(), Recall::Unchanged);
    }

    #[test]
    fn test_up_walks_back_and_stops_at_oldest() {
        let mut history = history(&["one", "two", "three"]);
        assert_eq!(history.up(), Recall::Entry("three".into()));
        assert_eq!(history.up(), Recall::Entry("two".into()));
        assert_eq!(history.up(), Recall::Entry("one".into()));
        assert_eq!(history.up(), Recall::Unchanged);
        assert_eq!(history.pos(), 0);
    }

    #[test]
    fn test_down_past_newest_clears() {
        let mut history = history(&["one", "two"]);
        history.up();
        history.up();
        assert_eq!(history.down(), Recall::Entry("two".into()));
        assert_eq!(history.down(), Recall::Clear);
        assert_eq!(history.up(), Recall::Entry("two".into()));
    }

    #[test]
    fn test_push_skips_empty_and_resets_position() {
        let mut history = history(&["one", ""]);
        assert_eq!(history.entries(), ["one"]);
        history.push("two");
        history.up();
        history.up();
        history.push("three");
        assert_eq!(history.pos(), 2);
        assert_eq!(history.up(), Recall::Entry("three".into()));
    }

    proptest! {
        #[test]
        fn pos_stays_in_bounds(moves in proptest::collection::vec(0u8..3, 0..60)) {
            let mut history = History::default();
            let mut pushed = 0;
            for m in moves {
                match m {
                    0 => {
                        history.push("line");
                        pushed += 1;
                    }
                    1 => { history.up(); }
                    _ => { history.down(); }
                }
                prop_assert_eq!(history.entries().len(), pushed);
                if pushed > 0 {
                    prop_assert!(history.pos() < pushed);
                }
            }
        }
    }
}
