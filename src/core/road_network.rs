//! Das zentrale Straßennetz: Kreuzungen auf einem dünn besetzten Gitter.

use super::lattice::{exact_lattice_value, lerp, LatticeBounds};
use super::{Edge, Intersection, SurfaceType, Terrain};
use glam::IVec2;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Straßennetz als Gittergraph.
///
/// Kreuzungen entstehen beim ersten `add_edge`, das sie referenziert, und
/// verschwinden mit ihrer letzten Kante. Koordinaten dürfen negativ sein.
#[derive(Clone)]
pub struct RoadNetwork {
    /// Alle Kreuzungen, indexiert nach Gitterkoordinate
    intersections: HashMap<IVec2, Intersection>,
    /// Wächst mit jedem Kantenendpunkt, schrumpft nie
    bounds: Option<LatticeBounds>,
    /// Liefert Höhe und Untergrund neuer Kreuzungen
    terrain: Arc<dyn Terrain>,
}

impl RoadNetwork {
    /// Erstellt ein leeres Straßennetz über dem Terrain
    pub fn new(terrain: Arc<dyn Terrain>) -> Self {
        Self {
            intersections: HashMap::new(),
            bounds: None,
            terrain,
        }
    }

    /// Prüft ob an der Koordinate eine Kreuzung existiert
    pub fn has_intersection(&self, x: i32, z: i32) -> bool {
        self.intersections.contains_key(&IVec2::new(x, z))
    }

    /// Liefert die Kreuzung an der Koordinate
    pub fn intersection(&self, x: i32, z: i32) -> Option<&Intersection> {
        self.intersections.get(&IVec2::new(x, z))
    }

    /// Höhe der Kreuzung an der Koordinate
    pub fn intersection_height(&self, x: i32, z: i32) -> Option<f32> {
        self.intersection(x, z).map(Intersection::height)
    }

    /// Untergrund der Kreuzung an der Koordinate
    pub fn intersection_surface_type(&self, x: i32, z: i32) -> Option<SurfaceType> {
        self.intersection(x, z).map(Intersection::surface_type)
    }

    /// Straßenhöhe an einer (ggf. gebrochenen) Kartenkoordinate.
    ///
    /// - Beide Koordinaten ganzzahlig: Höhe der Kreuzung.
    /// - Genau eine gebrochen: lineare Interpolation zwischen den beiden
    ///   Nachbarkreuzungen entlang dieser Achse; `None` wenn eine fehlt.
    /// - Beide gebrochen: immer `None`. Aufrufer fragen nur entlang
    ///   achsparalleler Straßen ab, diagonal wird nicht interpoliert.
    pub fn road_height(&self, x: f32, z: f32) -> Option<f32> {
        match (exact_lattice_value(x), exact_lattice_value(z)) {
            (Some(column), Some(row)) => self.intersection_height(column, row),
            (Some(column), None) => {
                let floor = self.intersection_height(column, z.floor() as i32)?;
                let ceil = self.intersection_height(column, z.ceil() as i32)?;
                Some(lerp(floor, ceil, z - z.floor()))
            }
            (None, Some(row)) => {
                let floor = self.intersection_height(x.floor() as i32, row)?;
                let ceil = self.intersection_height(x.ceil() as i32, row)?;
                Some(lerp(floor, ceil, x - x.floor()))
            }
            (None, None) => None,
        }
    }

    /// Fügt eine Kante zwischen zwei Gitternachbarn hinzu.
    ///
    /// Fehlende Endpunkte werden angelegt: auf trockenem Land mit Terrainhöhe
    /// und `SurfaceType::Terrain`, sonst mit `non_terrain_height` und
    /// `SurfaceType::Bridge`. Eine bestehende Kante wird überschrieben.
    /// Die Endpunkte müssen verschieden und benachbart sein (nicht geprüft).
    #[allow(clippy::too_many_arguments)]
    pub fn add_edge(
        &mut self,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
        non_terrain_height: f32,
        distance: f32,
        surface_type: SurfaceType,
    ) {
        let start = IVec2::new(x1, z1);
        let end = IVec2::new(x2, z2);
        let edge = Edge::new(distance, surface_type);

        for (point, destination) in [(start, end), (end, start)] {
            if !self.intersections.contains_key(&point) {
                let intersection = self.new_intersection(point, non_terrain_height);
                self.intersections.insert(point, intersection);
            }
            if let Some(intersection) = self.intersections.get_mut(&point) {
                intersection.add_edge(destination, edge);
            }
        }

        match self.bounds.as_mut() {
            Some(bounds) => {
                bounds.include(start);
                bounds.include(end);
            }
            None => {
                let mut bounds = LatticeBounds::from_point(start);
                bounds.include(end);
                self.bounds = Some(bounds);
            }
        }
    }

    /// Löst Höhe und Untergrund einer neuen Kreuzung über das Terrain auf
    fn new_intersection(&self, point: IVec2, non_terrain_height: f32) -> Intersection {
        let (x, z) = (point.x as f32, point.y as f32);
        match (
            self.terrain.water_height_at(x, z),
            self.terrain.height_at(x, z),
        ) {
            (Some(water), Some(height)) if water == 0.0 => {
                Intersection::new(height, SurfaceType::Terrain)
            }
            _ => Intersection::new(non_terrain_height, SurfaceType::Bridge),
        }
    }

    /// Entfernt die Kante zwischen zwei Kreuzungen.
    ///
    /// Kreuzungen ohne verbleibende Kante werden gelöscht. Fehlt die Kante
    /// oder ein Endpunkt, passiert nichts.
    pub fn remove_edge(&mut self, x1: i32, z1: i32, x2: i32, z2: i32) {
        let start = IVec2::new(x1, z1);
        let end = IVec2::new(x2, z2);

        for (point, destination) in [(start, end), (end, start)] {
            let Some(intersection) = self.intersections.get_mut(&point) else {
                continue;
            };
            intersection.remove_edge(destination);
            if intersection.edge_count() == 0 {
                self.intersections.remove(&point);
            }
        }
    }

    /// Prüft ob beide Kreuzungen existieren und gegenseitig verbunden sind.
    ///
    /// Mit `surface_type` muss zusätzlich der Untergrund der Kante passen.
    pub fn has_edge_between(
        &self,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
        surface_type: Option<SurfaceType>,
    ) -> bool {
        let start = IVec2::new(x1, z1);
        let end = IVec2::new(x2, z2);

        match (self.intersections.get(&start), self.intersections.get(&end)) {
            (Some(a), Some(b)) => {
                a.has_edge_to(end, surface_type) && b.has_edge_to(start, surface_type)
            }
            _ => false,
        }
    }

    /// Liefert die Metadaten der Kante vom ersten zum zweiten Punkt
    pub fn edge_between(&self, x1: i32, z1: i32, x2: i32, z2: i32) -> Option<Edge> {
        self.intersection(x1, z1)?.edge_to(IVec2::new(x2, z2))
    }

    /// Alle Kanten einer Kreuzung als (Ziel, Kante); `None` ohne Kreuzung
    pub fn edges_from(&self, x: i32, z: i32) -> Option<impl Iterator<Item = (IVec2, Edge)> + '_> {
        self.intersection(x, z).map(Intersection::edges)
    }

    /// Iterator über jede ungerichtete Kante genau einmal als (Start, Ziel, Kante)
    pub fn edges(&self) -> impl Iterator<Item = (IVec2, IVec2, Edge)> + '_ {
        self.intersections.iter().flat_map(|(&start, intersection)| {
            intersection
                .edges()
                .filter(move |(end, _)| (start.x, start.y) < (end.x, end.y))
                .map(move |(end, edge)| (start, end, edge))
        })
    }

    /// Iterator über alle Kreuzungskoordinaten
    pub fn intersection_coords(&self) -> impl Iterator<Item = IVec2> + '_ {
        self.intersections.keys().copied()
    }

    /// Anzahl der Kreuzungen
    pub fn intersection_count(&self) -> usize {
        self.intersections.len()
    }

    /// Anzahl der ungerichteten Kanten
    pub fn edge_count(&self) -> usize {
        let records: usize = self
            .intersections
            .values()
            .map(Intersection::edge_count)
            .sum();
        records / 2
    }

    /// Prüft ob das Netz leer ist
    pub fn is_empty(&self) -> bool {
        self.intersections.is_empty()
    }

    /// Begrenzungsrechteck aller je verwendeten Endpunkte
    pub fn bounds(&self) -> Option<LatticeBounds> {
        self.bounds
    }

    /// Kleinste je verwendete Spalte
    pub fn min_column(&self) -> Option<i32> {
        self.bounds.map(|b| b.min_column)
    }

    /// Größte je verwendete Spalte
    pub fn max_column(&self) -> Option<i32> {
        self.bounds.map(|b| b.max_column)
    }

    /// Kleinste je verwendete Zeile
    pub fn min_row(&self) -> Option<i32> {
        self.bounds.map(|b| b.min_row)
    }

    /// Größte je verwendete Zeile
    pub fn max_row(&self) -> Option<i32> {
        self.bounds.map(|b| b.max_row)
    }
}

impl fmt::Debug for RoadNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoadNetwork")
            .field("intersections", &self.intersections.len())
            .field("edges", &self.edge_count())
            .field("bounds", &self.bounds)
            .finish_non_exhaustive()
    }
}
