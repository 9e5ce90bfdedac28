//! Zentrale Konfiguration für Terrain, Straßengitter und Vereinfachung.
//!
//! `CityOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use crate::generators::SimplifierOptions;
use serde::{Deserialize, Serialize};

// ── Terrain ─────────────────────────────────────────────────────────

/// Standard-Rastergröße des synthetischen Terrains (Spalten und Zeilen).
pub const TERRAIN_SIZE: u32 = 65;
/// Höhenskala beim Heightmap-Import (normalized_pixel × Faktor = Höhe).
pub const TERRAIN_HEIGHT_SCALE: f32 = 32.0;
/// Alles unterhalb dieser Höhe steht unter Wasser.
pub const WATER_LEVEL: f32 = 0.0;

// ── Straßen ─────────────────────────────────────────────────────────

/// Halbe Kantenlänge des erzeugten Straßengitters.
pub const ROAD_RADIUS: i32 = 24;
/// Höhe von Brückenkreuzungen.
pub const DEFAULT_BRIDGE_HEIGHT: f32 = 1.5;
/// Gewicht einer Gitterkante.
pub const DEFAULT_EDGE_DISTANCE: f32 = 1.0;

// ── Bebauung ────────────────────────────────────────────────────────

/// Manhattan-Radius bebauter Blöcke um das Zentrum.
pub const BUILDING_RADIUS: i32 = 12;

/// Alle zur Laufzeit änderbaren Optionen.
/// Wird als `city_tour_roads.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityOptions {
    // ── Terrain ─────────────────────────────────────────────────
    /// Optionaler Pfad zu einer Graustufen-Heightmap (sonst synthetisch)
    #[serde(default)]
    pub heightmap_path: Option<String>,
    /// Rastergröße des synthetischen Terrains
    #[serde(default = "default_terrain_size")]
    pub terrain_size: u32,
    /// Höhenskala für Heightmap-Import
    #[serde(default = "default_terrain_height_scale")]
    pub terrain_height_scale: f32,
    /// Wasserspiegel
    #[serde(default = "default_water_level")]
    pub water_level: f32,

    // ── Straßen ─────────────────────────────────────────────────
    /// Halbe Kantenlänge des Straßengitters
    #[serde(default = "default_road_radius")]
    pub road_radius: i32,
    /// Höhe von Brückenkreuzungen
    #[serde(default = "default_bridge_height")]
    pub bridge_height: f32,
    /// Gewicht einer Gitterkante
    #[serde(default = "default_edge_distance")]
    pub edge_distance: f32,

    // ── Bebauung ────────────────────────────────────────────────
    /// Manhattan-Radius bebauter Blöcke
    #[serde(default = "default_building_radius")]
    pub building_radius: i32,

    // ── Vereinfachung ───────────────────────────────────────────
    /// Einstellungen des Vereinfachers
    #[serde(default)]
    pub simplifier: SimplifierOptions,
}

impl Default for CityOptions {
    fn default() -> Self {
        Self {
            heightmap_path: None,
            terrain_size: TERRAIN_SIZE,
            terrain_height_scale: TERRAIN_HEIGHT_SCALE,
            water_level: WATER_LEVEL,
            road_radius: ROAD_RADIUS,
            bridge_height: DEFAULT_BRIDGE_HEIGHT,
            edge_distance: DEFAULT_EDGE_DISTANCE,
            building_radius: BUILDING_RADIUS,
            simplifier: SimplifierOptions::default(),
        }
    }
}

fn default_terrain_size() -> u32 {
    TERRAIN_SIZE
}

fn default_terrain_height_scale() -> f32 {
    TERRAIN_HEIGHT_SCALE
}

fn default_water_level() -> f32 {
    WATER_LEVEL
}

fn default_road_radius() -> i32 {
    ROAD_RADIUS
}

fn default_bridge_height() -> f32 {
    DEFAULT_BRIDGE_HEIGHT
}

fn default_edge_distance() -> f32 {
    DEFAULT_EDGE_DISTANCE
}

fn default_building_radius() -> i32 {
    BUILDING_RADIUS
}

impl CityOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("city_tour_roads"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("city_tour_roads.toml")
    }
}
