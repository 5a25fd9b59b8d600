// Segue Library - core modules for the Rekordbox set builder
// Loader, sequencer, and exporter are separable; the binary just wires them up

pub mod config;    // settings and preferences
pub mod export;    // CSV artifact writing
pub mod library;   // track records + Rekordbox XML loading
pub mod sequencer; // greedy tempo/key chaining

// Export the stuff other modules actually use
pub use config::Config;
pub use library::{load_collection, Track};
pub use sequencer::{build_playlist, Playlist, SequenceError};
