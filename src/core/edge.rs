//! Repräsentiert eine Straßenkante zwischen zwei benachbarten Kreuzungen.

use serde::{Deserialize, Serialize};

/// Untergrund einer Kreuzung oder Kante
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Auf trockenem Gelände verlegt
    #[default]
    Terrain,
    /// Überspannt Wasser, wird beim Vereinfachen nie entfernt
    Bridge,
}

/// Eine ungerichtete Kante zwischen zwei Gitternachbarn.
///
/// Die Metadaten liegen identisch auf beiden Endpunkten; der Untergrund der
/// Kante ist unabhängig vom Untergrund ihrer Kreuzungen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    /// Gewicht der Kante (positiv)
    pub distance: f32,
    /// Untergrund der Kante
    pub surface_type: SurfaceType,
}

impl Edge {
    /// Erstellt eine neue Kante
    pub fn new(distance: f32, surface_type: SurfaceType) -> Self {
        Self {
            distance,
            surface_type,
        }
    }

    /// Prüft ob die Kante eine Brücke ist
    pub fn is_bridge(&self) -> bool {
        self.surface_type == SurfaceType::Bridge
    }
}
