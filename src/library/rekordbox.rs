// Rekordbox XML loader - turns a collection export into flat track records
// Only COLLECTION entries count; the PLAYLISTS section references the same
// tracks again and must not be double-loaded

use anyhow::{Context, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use super::Track;

/// Load every track in the COLLECTION section of a Rekordbox XML export,
/// preserving document order. Document order is what downstream tie-breaks
/// run over, so no sorting happens here.
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<Vec<Track>> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read library export {}", path.display()))?;

    let tracks = parse_collection(&content)
        .with_context(|| format!("failed to parse library export {}", path.display()))?;

    if tracks.is_empty() {
        warn!("No tracks found in the collection at {}", path.display());
    } else {
        info!("Loaded {} tracks from {}", tracks.len(), path.display());
    }

    Ok(tracks)
}

fn parse_collection(xml: &str) -> Result<Vec<Track>> {
    let mut reader = Reader::from_str(xml);
    let mut tracks = Vec::new();
    let mut in_collection = false;

    loop {
        match reader.read_event()? {
            Event::Start(element) if element.name().as_ref() == b"COLLECTION" => {
                in_collection = true;
            }
            Event::End(element) if element.name().as_ref() == b"COLLECTION" => {
                in_collection = false;
            }
            Event::Start(element) | Event::Empty(element)
                if in_collection && element.name().as_ref() == b"TRACK" =>
            {
                tracks.push(parse_track(&element)?);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(tracks)
}

fn parse_track(element: &BytesStart<'_>) -> Result<Track> {
    let mut track = Track::default();

    for attr in element.attributes() {
        let attr = attr?;
        let value = attr.unescape_value()?;
        match attr.key.as_ref() {
            b"Location" => track.location = value.into_owned(),
            b"Name" => track.title = value.into_owned(),
            b"Artist" => track.artist = value.into_owned(),
            b"Album" => track.album = value.into_owned(),
            b"Genre" => track.genre = value.into_owned(),
            b"BPM" => track.bpm = parse_tempo(&value),
            b"KeyIndex" => track.key_index = parse_key_index(&value),
            b"Key" => track.key = value.into_owned(),
            _ => {}
        }
    }

    Ok(track)
}

fn parse_tempo(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

// Key indexes are whole numbers in well-formed exports; a stray decimal
// truncates toward zero, anything else becomes NaN.
fn parse_key_index(raw: &str) -> f64 {
    raw.trim().parse::<f64>().map(f64::trunc).unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<REKORDBOX Version="1.0.0">
  <PRODUCT Name="rekordbox" Version="6.7.4" Company="Pioneer DJ"/>
  <COLLECTION Entries="3">
    <TRACK Location="file://localhost/Users/dj/Music/one.mp3" Name="One" Artist="Mr. Fingers &amp; Friends" Album="Amnesia" Genre="House" BPM="122.00" KeyIndex="1" Key="8A"/>
    <TRACK Location="file://localhost/Users/dj/Music/two.mp3" Name="Two" Artist="Rhythim Is Rhythim" Album="" Genre="Techno" BPM="124.00" KeyIndex="3" Key="10A">
      <TEMPO Inizio="0.05" Bpm="124.00" Metro="4/4" Battito="1"/>
    </TRACK>
    <TRACK Location="file://localhost/Users/dj/Music/three.mp3" Name="Three" Artist="Larry Heard" Genre="Deep House" BPM="fast" Key="11B"/>
  </COLLECTION>
  <PLAYLISTS>
    <NODE Type="0" Name="ROOT" Count="1">
      <NODE Name="warmup" Type="1" KeyType="0" Entries="1">
        <TRACK Key="1"/>
      </NODE>
    </NODE>
  </PLAYLISTS>
</REKORDBOX>"#;

    #[test]
    fn test_parses_collection_in_document_order() {
        let tracks = parse_collection(SAMPLE).unwrap();
        assert_eq!(tracks.len(), 3);

        let first = &tracks[0];
        assert_eq!(first.location, "file://localhost/Users/dj/Music/one.mp3");
        assert_eq!(first.title, "One");
        assert_eq!(first.album, "Amnesia");
        assert_eq!(first.genre, "House");
        assert_eq!(first.bpm, 122.0);
        assert_eq!(first.key_index, 1.0);
        assert_eq!(first.key, "8A");

        assert_eq!(tracks[1].title, "Two");
        assert_eq!(tracks[2].title, "Three");
    }

    #[test]
    fn test_unescapes_attribute_values() {
        let tracks = parse_collection(SAMPLE).unwrap();
        assert_eq!(tracks[0].artist, "Mr. Fingers & Friends");
    }

    #[test]
    fn test_malformed_numeric_fields_become_nan() {
        let tracks = parse_collection(SAMPLE).unwrap();
        // BPM="fast" and no KeyIndex attribute at all
        assert!(tracks[2].bpm.is_nan());
        assert!(tracks[2].key_index.is_nan());
        // the display label still comes through
        assert_eq!(tracks[2].key, "11B");
    }

    #[test]
    fn test_ignores_tracks_outside_collection() {
        // the PLAYLISTS node carries a TRACK reference that must not count
        let tracks = parse_collection(SAMPLE).unwrap();
        assert!(tracks.iter().all(|t| !t.location.is_empty()));
        assert_eq!(tracks.len(), 3);
    }

    #[test]
    fn test_empty_collection_is_ok() {
        let xml = r#"<REKORDBOX><COLLECTION Entries="0"/></REKORDBOX>"#;
        let tracks = parse_collection(xml).unwrap();
        assert!(tracks.is_empty());
    }

    #[test]
    fn test_key_index_truncates_decimals() {
        assert_eq!(parse_key_index("4"), 4.0);
        assert_eq!(parse_key_index("4.7"), 4.0);
        assert_eq!(parse_key_index(" 12 "), 12.0);
        assert!(parse_key_index("eight").is_nan());
        assert!(parse_key_index("").is_nan());
    }

    #[test]
    fn test_load_collection_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.xml");
        fs::write(&path, SAMPLE).unwrap();

        let tracks = load_collection(&path).unwrap();
        assert_eq!(tracks.len(), 3);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_collection("does-not-exist.xml").unwrap_err();
        assert!(err.to_string().contains("does-not-exist.xml"));
    }

    #[test]
    fn test_truncated_xml_is_an_error() {
        let xml = r#"<REKORDBOX><COLLECTION Entries="1"><TRACK Location="x" BPM="#;
        assert!(parse_collection(xml).is_err());
    }
}
