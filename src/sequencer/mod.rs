// Sequencer - greedy track chaining under tempo/key admissibility
// Every pick is final; there is no backtracking and no threshold relaxation

pub mod playlist;

pub use playlist::Playlist;

use std::collections::HashSet;
use thiserror::Error;
use tracing::debug;

use crate::library::Track;

#[derive(Debug, Error, PartialEq)]
pub enum SequenceError {
    #[error("start track not found in the collection: {0}")]
    StartTrackNotFound(String),
}

/// Build a set by greedy chaining: starting from `start_location`, repeatedly
/// append the unused track with the lowest transition score until
/// `target_length` is reached or nothing admissible remains.
///
/// `jazzy_factor` widens both admissibility gates linearly. At 0 only an
/// identical key index passes and tempo may drift at most 5 BPM; at 10 the
/// set is allowed to wander. Values outside [0, 10] are accepted and scale
/// the same way.
///
/// The only error is an unknown `start_location`. Tracks whose tempo or key
/// index failed to parse never pass admissibility and are skipped silently.
pub fn build_playlist(
    tracks: &[Track],
    start_location: &str,
    jazzy_factor: f64,
    target_length: usize,
) -> Result<Playlist, SequenceError> {
    let start = tracks
        .iter()
        .find(|track| track.location == start_location)
        .ok_or_else(|| SequenceError::StartTrackNotFound(start_location.to_string()))?;

    // Both gates widen linearly with the jazzy factor; the tempo gate keeps
    // a floor of 5 BPM even at zero.
    let key_threshold = jazzy_factor / 2.0;
    let bpm_threshold = 5.0 + jazzy_factor * 2.0;

    let mut used: HashSet<&str> = HashSet::new();
    used.insert(start.location.as_str());

    let mut ordered = vec![start.clone()];
    let mut current = start;

    while ordered.len() < target_length {
        let mut best: Option<&Track> = None;
        let mut best_score = f64::INFINITY;

        for candidate in tracks.iter().filter(|t| !used.contains(t.location.as_str())) {
            let bpm_diff = (current.bpm - candidate.bpm).abs();
            let key_diff = (current.key_index - candidate.key_index).abs();

            // NaN fields fail both checks, dropping the candidate
            if bpm_diff <= bpm_threshold && key_diff <= key_threshold {
                let score = transition_score(bpm_diff, key_diff);
                // strict < keeps the earliest candidate on score ties
                if score < best_score {
                    best_score = score;
                    best = Some(candidate);
                }
            }
        }

        let Some(next) = best else {
            debug!("No admissible follow-up after {} tracks", ordered.len());
            break;
        };

        debug!("Chained '{}' (score {:.2})", next.display_title(), best_score);
        used.insert(next.location.as_str());
        ordered.push(next.clone());
        current = next;
    }

    Ok(Playlist::new(ordered))
}

// Tempo drift counts once, key drift twice.
fn transition_score(bpm_diff: f64, key_diff: f64) -> f64 {
    bpm_diff + key_diff * 2.0
}
