//! Geteilte Konfiguration für Bibliothek und Binary.

pub mod options;

pub use options::CityOptions;
pub use options::{DEFAULT_BRIDGE_HEIGHT, DEFAULT_EDGE_DISTANCE};
