//! Story viewer navigation.
//!
//! The viewer is either closed or showing one position of the media list.
//! Stepping wraps around both ends. Every navigation re-arms autoplay.

use serde::Serialize;

use crate::error::CoreError;
use crate::media::{index_of, MediaRecord};
use crate::types::MediaId;

/// Viewer state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ViewerState {
    #[default]
    Closed,
    Viewing { index: usize },
}

/// Tracks which story is open and whether it should autoplay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoryNavigator {
    state: ViewerState,
    autoplay: bool,
}

impl Default for StoryNavigator {
    fn default() -> Self {
        Self {
            state: ViewerState::Closed,
            autoplay: true,
        }
    }
}

impl StoryNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ViewerState {
        self.state
    }

    pub fn autoplay(&self) -> bool {
        self.autoplay
    }

    pub fn set_autoplay(&mut self, enabled: bool) {
        self.autoplay = enabled;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, ViewerState::Viewing { .. })
    }

    /// Index being viewed, if any.
    pub fn current_index(&self) -> Option<usize> {
        match self.state {
            ViewerState::Viewing { index } => Some(index),
            ViewerState::Closed => None,
        }
    }

    /// The record being viewed. `None` when closed or when the index no
    /// longer points into `records`.
    pub fn current<'a>(&self, records: &'a [MediaRecord]) -> Option<&'a MediaRecord> {
        self.current_index().and_then(|i| records.get(i))
    }

    /// Open the viewer on the record with `id`.
    ///
    /// An unknown id leaves the state untouched.
    pub fn open(&mut self, records: &[MediaRecord], id: MediaId) -> Result<usize, CoreError> {
        let index = index_of(records, id).ok_or(CoreError::NotFound {
            entity: "Story",
            id,
        })?;
        self.state = ViewerState::Viewing { index };
        self.autoplay = true;
        Ok(index)
    }

    /// Step forward, wrapping to the first record. No-op when closed or
    /// when the collection is empty.
    pub fn next(&mut self, len: usize) -> ViewerState {
        self.step(len, 1)
    }

    /// Step backward, wrapping to the last record. No-op when closed or
    /// when the collection is empty.
    pub fn previous(&mut self, len: usize) -> ViewerState {
        self.step(len, len.saturating_sub(1))
    }

    fn step(&mut self, len: usize, offset: usize) -> ViewerState {
        if len == 0 {
            return self.state;
        }
        if let ViewerState::Viewing { index } = self.state {
            self.state = ViewerState::Viewing {
                index: (index % len + offset) % len,
            };
            self.autoplay = true;
        }
        self.state
    }

    pub fn close(&mut self) {
        self.state = ViewerState::Closed;
    }

    /// Keep the viewer consistent after the record at `removed` was taken
    /// out of a list that now holds `new_len` records.
    pub fn reconcile_after_removal(&mut self, removed: usize, new_len: usize) {
        let ViewerState::Viewing { index } = self.state else {
            return;
        };
        if new_len == 0 || index == removed {
            self.close();
        } else if index > removed {
            self.state = ViewerState::Viewing { index: index - 1 };
        } else if index >= new_len {
            self.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::{sample, seed_records, MediaType};
    use assert_matches::assert_matches;

    fn records(n: i64) -> Vec<MediaRecord> {
        (1..=n)
            .map(|id| sample(id, MediaType::Photo, "2024-01-01 00:00:00"))
            .collect()
    }

    #[test]
    fn starts_closed_with_autoplay() {
        let nav = StoryNavigator::new();
        assert_eq!(nav.state(), ViewerState::Closed);
        assert!(nav.autoplay());
        assert!(nav.current(&records(3)).is_none());
    }

    #[test]
    fn open_then_next_wraps_to_first_seed() {
        let seeds = seed_records();
        let mut nav = StoryNavigator::new();
        nav.open(&seeds, 2).unwrap();
        nav.next(seeds.len());
        assert_eq!(nav.current(&seeds).map(|r| r.id), Some(1));
        assert_eq!(nav.state(), ViewerState::Viewing { index: 0 });
    }

    #[test]
    fn previous_from_first_wraps_to_last() {
        let list = records(4);
        let mut nav = StoryNavigator::new();
        nav.open(&list, 1).unwrap();
        nav.previous(list.len());
        assert_eq!(nav.current_index(), Some(3));
    }

    #[test]
    fn next_then_previous_is_identity_from_every_index() {
        for len in 1..=6 {
            let list = records(len);
            for record in &list {
                let mut nav = StoryNavigator::new();
                let start = nav.open(&list, record.id).unwrap();
                nav.next(list.len());
                nav.previous(list.len());
                assert_eq!(nav.current_index(), Some(start), "len {len}");
            }
        }
    }

    #[test]
    fn unknown_id_is_not_found_and_keeps_state() {
        let list = records(2);
        let mut nav = StoryNavigator::new();
        nav.open(&list, 2).unwrap();
        assert_matches!(
            nav.open(&list, 99),
            Err(CoreError::NotFound { id: 99, .. })
        );
        assert_eq!(nav.current_index(), Some(1));
    }

    #[test]
    fn stepping_empty_or_closed_is_noop() {
        let mut nav = StoryNavigator::new();
        assert_eq!(nav.next(3), ViewerState::Closed);

        nav.open(&records(2), 1).unwrap();
        assert_eq!(nav.next(0), ViewerState::Viewing { index: 0 });
        assert_eq!(nav.previous(0), ViewerState::Viewing { index: 0 });
    }

    #[test]
    fn navigation_rearms_autoplay() {
        let list = records(3);
        let mut nav = StoryNavigator::new();
        nav.open(&list, 1).unwrap();
        nav.set_autoplay(false);
        nav.next(list.len());
        assert!(nav.autoplay());
    }

    #[test]
    fn close_returns_to_closed() {
        let mut nav = StoryNavigator::new();
        nav.open(&records(2), 2).unwrap();
        nav.close();
        assert!(!nav.is_open());
    }

    #[test]
    fn removal_of_viewed_record_closes() {
        let mut nav = StoryNavigator::new();
        nav.open(&records(3), 2).unwrap();
        nav.reconcile_after_removal(1, 2);
        assert_eq!(nav.state(), ViewerState::Closed);
    }

    #[test]
    fn removal_before_viewed_record_shifts_index() {
        let mut nav = StoryNavigator::new();
        nav.open(&records(3), 3).unwrap();
        nav.reconcile_after_removal(0, 2);
        assert_eq!(nav.state(), ViewerState::Viewing { index: 1 });
    }

    #[test]
    fn removal_after_viewed_record_keeps_index() {
        let mut nav = StoryNavigator::new();
        nav.open(&records(3), 1).unwrap();
        nav.reconcile_after_removal(2, 2);
        assert_eq!(nav.state(), ViewerState::Viewing { index: 0 });
    }
}
