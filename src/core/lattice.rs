//! Gemeinsame Gitter-Hilfen: Rechteck-Grenzen, Ganzzahl-Erkennung, Interpolation.

use glam::IVec2;

/// Begrenzungsrechteck aller Gitterkoordinaten, die je Kantenendpunkt waren.
///
/// Wächst nur, schrumpft nie (auch nicht nach dem Löschen von Kanten).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeBounds {
    /// Kleinste Spalte (x)
    pub min_column: i32,
    /// Größte Spalte (x)
    pub max_column: i32,
    /// Kleinste Zeile (z)
    pub min_row: i32,
    /// Größte Zeile (z)
    pub max_row: i32,
}

impl LatticeBounds {
    /// Rechteck, das genau einen Punkt umfasst
    pub fn from_point(point: IVec2) -> Self {
        Self {
            min_column: point.x,
            max_column: point.x,
            min_row: point.y,
            max_row: point.y,
        }
    }

    /// Erweitert das Rechteck um einen Punkt
    pub fn include(&mut self, point: IVec2) {
        self.min_column = self.min_column.min(point.x);
        self.max_column = self.max_column.max(point.x);
        self.min_row = self.min_row.min(point.y);
        self.max_row = self.max_row.max(point.y);
    }
}

/// Liefert den ganzzahligen Gitterwert, falls `value` exakt auf dem Gitter liegt.
pub fn exact_lattice_value(value: f32) -> Option<i32> {
    (value.floor() == value).then_some(value as i32)
}

/// Lineare Interpolation zwischen `start` und `end`.
pub fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start + (end - start) * t
}
