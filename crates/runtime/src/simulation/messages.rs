//! Bounded message log shown to the player.

use std::collections::VecDeque;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MessageLog {
    entries: VecDeque<String>,
    capacity: usize,
}

impl MessageLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.max(1)),
            capacity: capacity.max(1),
        }
    }

    pub fn push(&mut self, message: impl Into<String>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(message.into());
    }

    /// Last `count` entries, oldest first.
    pub fn recent(&self, count: usize) -> impl Iterator<Item = &str> {
        let skip = self.entries.len().saturating_sub(count);
        self.entries.iter().skip(skip).map(String::as_str)
    }

    pub fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn oldest_entries_are_evicted() {
        let mut log = MessageLog::new(3);
        for i in 0..5 {
            log.push(format!("m{i}"));
        }
        assert_eq!(log.len(), 3);
        assert_eq!(log.recent(3).collect::<Vec<_>>(), ["m2", "m3", "m4"]);
        assert_eq!(log.recent(1).collect::<Vec<_>>(), ["m4"]);
        assert_eq!(log.last(), Some("m4"));
    }

    #[test]
    fn recent_handles_short_logs() {
        let mut log = MessageLog::new(10);
        log.push("only");
        assert_eq!(log.recent(3).collect::<Vec<_>>(), ["only"]);
    }
}
