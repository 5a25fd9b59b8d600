// Playlist - the ordered outcome of a chaining run
// Append-only while being built; once returned the order never changes

use crate::library::Track;

/// An ordered set of tracks as produced by the sequencer. Uniqueness by
/// location is guaranteed by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Playlist {
    tracks: Vec<Track>,
}

impl Playlist {
    pub(crate) fn new(tracks: Vec<Track>) -> Self {
        Self { tracks }
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Track> {
        self.tracks.iter()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    /// Mean tempo across entries that carry a parseable tempo.
    pub fn average_bpm(&self) -> Option<f64> {
        let tempos: Vec<f64> = self
            .tracks
            .iter()
            .map(|t| t.bpm)
            .filter(|bpm| !bpm.is_nan())
            .collect();

        if tempos.is_empty() {
            return None;
        }
        Some(tempos.iter().sum::<f64>() / tempos.len() as f64)
    }

    /// Lowest and highest tempo in the set, entries without a parseable
    /// tempo excluded.
    pub fn bpm_range(&self) -> Option<(f64, f64)> {
        let mut range: Option<(f64, f64)> = None;
        for bpm in self.tracks.iter().map(|t| t.bpm).filter(|b| !b.is_nan()) {
            range = match range {
                Some((low, high)) => Some((low.min(bpm), high.max(bpm))),
                None => Some((bpm, bpm)),
            };
        }
        range
    }
}
