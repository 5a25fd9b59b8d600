// Export module - writes a finished set as a CSV artifact
// One row per track in playlist order, nothing reordered or filtered

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::info;

use crate::sequencer::Playlist;

#[derive(Serialize)]
struct CsvRow<'a> {
    #[serde(rename = "TITLE")]
    title: &'a str,
    #[serde(rename = "ARTIST")]
    artist: &'a str,
    #[serde(rename = "ALBUM")]
    album: &'a str,
    #[serde(rename = "GENRE")]
    genre: &'a str,
    #[serde(rename = "BPM")]
    bpm: String,
    #[serde(rename = "KEY")]
    key: &'a str,
}

/// Write the playlist as CSV with a `TITLE,ARTIST,ALBUM,GENRE,BPM,KEY`
/// header and one row per track, in playlist order.
pub fn write_csv<P: AsRef<Path>>(playlist: &Playlist, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;

    for track in playlist.iter() {
        writer.serialize(CsvRow {
            title: &track.title,
            artist: &track.artist,
            album: &track.album,
            genre: &track.genre,
            bpm: format_tempo(track.bpm),
            key: &track.key,
        })?;
    }

    writer
        .flush()
        .with_context(|| format!("failed to write {}", path.display()))?;

    info!("Exported {} tracks to {}", playlist.len(), path.display());
    Ok(())
}

// Rekordbox exports carry two decimals ("122.00"); keep that on the way out.
// An unparseable tempo renders as an empty cell.
fn format_tempo(bpm: f64) -> String {
    if bpm.is_nan() {
        return String::new();
    }
    format!("{bpm:.2}")
}
