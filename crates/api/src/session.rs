//! The per-process application state that the UI mutates.
//!
//! One user, one session: the record list is the source of truth while the
//! server runs and the data file mirrors it after every mutation. Viewer
//! and UI flags are never persisted.

use dronemap_core::error::CoreError;
use dronemap_core::media::{self, MediaFilter, MediaRecord};
use dronemap_core::navigator::StoryNavigator;
use dronemap_core::types::{LatLon, MediaId};
use serde::{Deserialize, Serialize};

/// Transient UI flags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UiFlags {
    /// Whether the upload form is showing.
    pub upload_form_open: bool,
    /// Location chosen on the picker map, used to prefill the upload form.
    pub selected_location: Option<LatLon>,
    /// Active story-list filter.
    pub filter: MediaFilter,
}

/// Everything the UI reads and writes.
#[derive(Debug, Clone)]
pub struct Session {
    pub records: Vec<MediaRecord>,
    pub navigator: StoryNavigator,
    pub ui: UiFlags,
}

impl Session {
    pub fn new(records: Vec<MediaRecord>) -> Self {
        Self {
            records,
            navigator: StoryNavigator::new(),
            ui: UiFlags::default(),
        }
    }

    pub fn find(&self, id: MediaId) -> Option<&MediaRecord> {
        media::find(&self.records, id)
    }

    /// Append a record and open the viewer on it.
    pub fn add(&mut self, record: MediaRecord) -> &MediaRecord {
        let id = record.id;
        self.records.push(record);
        // The id was just pushed, so opening cannot miss.
        let index = self.navigator.open(&self.records, id).unwrap_or(self.records.len() - 1);
        &self.records[index]
    }

    /// Take the record out of the list, keeping the viewer consistent.
    /// `None` when no record has `id`.
    pub fn remove(&mut self, id: MediaId) -> Option<MediaRecord> {
        let index = media::index_of(&self.records, id)?;
        let removed = self.records.remove(index);
        self.navigator
            .reconcile_after_removal(index, self.records.len());
        Some(removed)
    }

    pub fn open_story(&mut self, id: MediaId) -> Result<&MediaRecord, CoreError> {
        let index = self.navigator.open(&self.records, id)?;
        Ok(&self.records[index])
    }

    pub fn next_story(&mut self) -> Option<&MediaRecord> {
        self.navigator.next(self.records.len());
        self.current_story()
    }

    pub fn previous_story(&mut self) -> Option<&MediaRecord> {
        self.navigator.previous(self.records.len());
        self.current_story()
    }

    pub fn close_story(&mut self) {
        self.navigator.close();
    }

    pub fn current_story(&self) -> Option<&MediaRecord> {
        self.navigator.current(&self.records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dronemap_core::media::seed_records;

    #[test]
    fn add_opens_viewer_on_new_record() {
        let mut session = Session::new(seed_records());
        let mut record = seed_records()[0].clone();
        record.id = 3;
        assert_eq!(session.add(record).id, 3);
        assert_eq!(session.current_story().map(|r| r.id), Some(3));
    }

    #[test]
    fn removing_viewed_record_closes_viewer() {
        let mut session = Session::new(seed_records());
        session.open_story(1).unwrap();
        assert!(session.remove(1).is_some());
        assert!(session.current_story().is_none());
        assert_eq!(session.records.len(), 1);
    }

    #[test]
    fn removing_unknown_id_is_noop() {
        let mut session = Session::new(seed_records());
        assert!(session.remove(42).is_none());
        assert_eq!(session.records, seed_records());
    }

    #[test]
    fn next_wraps_through_session() {
        let mut session = Session::new(seed_records());
        session.open_story(2).unwrap();
        assert_eq!(session.next_story().map(|r| r.id), Some(1));
        assert_eq!(session.previous_story().map(|r| r.id), Some(2));
    }
}
