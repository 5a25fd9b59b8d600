// Library module - track records as they come out of a Rekordbox export
// The collection is flat and read-only; the sequencer only selects from it

pub mod rekordbox;

pub use rekordbox::load_collection;

/// One collection entry. Numeric fields are parsed leniently: anything
/// unparseable becomes NaN and will never pass an admissibility gate.
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub location: String, // library path, doubles as the track's identity
    pub title: String,
    pub artist: String,
    pub album: String,
    pub genre: String,
    pub bpm: f64,       // beats per minute, NaN when the export carried junk
    pub key_index: f64, // key-wheel position, same NaN convention
    pub key: String,    // display label like "8A" or "Am"
}

impl Default for Track {
    fn default() -> Self {
        Self {
            location: String::new(),
            title: String::new(),
            artist: String::new(),
            album: String::new(),
            genre: String::new(),
            bpm: f64::NAN,
            key_index: f64::NAN,
            key: String::new(),
        }
    }
}

impl Track {
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            "Unknown Title"
        } else {
            &self.title
        }
    }

    pub fn display_artist(&self) -> &str {
        if self.artist.is_empty() {
            "Unknown Artist"
        } else {
            &self.artist
        }
    }

    pub fn display_tempo(&self) -> String {
        if self.bpm.is_nan() {
            "? BPM".to_string()
        } else {
            format!("{:.1} BPM", self.bpm)
        }
    }

    pub fn display_key(&self) -> &str {
        if self.key.is_empty() {
            "?"
        } else {
            &self.key
        }
    }
}
