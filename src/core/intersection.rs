//! Kreuzung (Gitterpunkt) mit Höhe, Untergrund und Adjazenz.

use super::{Edge, SurfaceType};
use glam::IVec2;
use indexmap::IndexMap;

/// Ein Knoten des Straßennetzes an einer ganzzahligen Gitterkoordinate.
///
/// Wird ausschließlich vom `RoadNetwork` angelegt und gelöscht.
#[derive(Debug, Clone)]
pub struct Intersection {
    height: f32,
    surface_type: SurfaceType,
    /// Ausgehende Kanten, indexiert nach Zielkoordinate (keine Duplikate)
    edges: IndexMap<IVec2, Edge>,
}

impl Intersection {
    pub(crate) fn new(height: f32, surface_type: SurfaceType) -> Self {
        Self {
            height,
            surface_type,
            edges: IndexMap::new(),
        }
    }

    /// Höhe der Kreuzung (beim Anlegen festgelegt)
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Untergrund der Kreuzung
    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    /// Setzt oder überschreibt die Kante zum Ziel
    pub(crate) fn add_edge(&mut self, destination: IVec2, edge: Edge) {
        self.edges.insert(destination, edge);
    }

    /// Entfernt die Kante zum Ziel, Reihenfolge der übrigen bleibt erhalten
    pub(crate) fn remove_edge(&mut self, destination: IVec2) -> Option<Edge> {
        self.edges.shift_remove(&destination)
    }

    /// Prüft ob eine Kante zum Ziel existiert, optional mit passendem Untergrund
    pub fn has_edge_to(&self, destination: IVec2, surface_type: Option<SurfaceType>) -> bool {
        match (self.edges.get(&destination), surface_type) {
            (Some(edge), Some(surface)) => edge.surface_type == surface,
            (Some(_), None) => true,
            (None, _) => false,
        }
    }

    /// Liefert die Kante zum Ziel
    pub fn edge_to(&self, destination: IVec2) -> Option<Edge> {
        self.edges.get(&destination).copied()
    }

    /// Iterator über (Ziel, Kante) in Einfügereihenfolge
    pub fn edges(&self) -> impl Iterator<Item = (IVec2, Edge)> + '_ {
        self.edges.iter().map(|(&destination, &edge)| (destination, edge))
    }

    /// Anzahl der anliegenden Kanten
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
