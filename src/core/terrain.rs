//! Terrain-Höhenfeld mit Land- und Wasserschicht.
//!
//! Das Straßennetz fragt das Terrain nur beim Anlegen neuer Kreuzungen ab.
//! `GridTerrain` ist die mitgelieferte Implementierung: ein regelmäßiges
//! Raster um den Ursprung, bilinear interpoliert. Es kann aus Rohdaten,
//! einer Funktion oder einem Graustufen-Heightmap-Bild erzeugt werden.

use super::lattice::lerp;
use anyhow::{bail, Context, Result};
use image::{DynamicImage, GenericImageView};

/// Höhenabfragen, die das Straßennetz vom Terrain benötigt.
///
/// Alle Abfragen liefern `None` außerhalb der Kartengrenzen.
pub trait Terrain {
    /// Höhe des Bodens
    fn land_height_at(&self, x: f32, z: f32) -> Option<f32>;

    /// Wassertiefe über dem Boden (0.0 = trockenes Land)
    fn water_height_at(&self, x: f32, z: f32) -> Option<f32>;

    /// Boden plus Wasser
    fn height_at(&self, x: f32, z: f32) -> Option<f32> {
        let land = self.land_height_at(x, z)?;
        Some(land + self.water_height_at(x, z).unwrap_or(0.0))
    }

    /// Kartengrenzen in Kartenkoordinaten
    fn bounds(&self) -> WorldBounds;
}

/// Kartengrenzen des Terrains
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Minimale X-Koordinate (links)
    pub min_x: f32,
    /// Minimale Z-Koordinate (oben)
    pub min_z: f32,
    /// Maximale X-Koordinate (rechts)
    pub max_x: f32,
    /// Maximale Z-Koordinate (unten)
    pub max_z: f32,
}

impl WorldBounds {
    /// Erstellt Bounds aus Rastergröße und Abstand (zentriert bei 0,0)
    pub fn centered(columns: u32, rows: u32, scale: f32) -> Self {
        let half_x = (columns.saturating_sub(1)) as f32 * 0.5 * scale;
        let half_z = (rows.saturating_sub(1)) as f32 * 0.5 * scale;
        Self {
            min_x: -half_x,
            min_z: -half_z,
            max_x: half_x,
            max_z: half_z,
        }
    }
}

/// Welche Schicht des Rasters abgefragt wird
#[derive(Debug, Clone, Copy)]
enum Layer {
    Land,
    Water,
}

/// Regelmäßiges Höhenraster mit getrennter Land- und Wasserschicht.
#[derive(Debug, Clone)]
pub struct GridTerrain {
    /// Bodenhöhen, zeilenweise gespeichert
    land: Vec<f32>,
    /// Wassertiefen, zeilenweise gespeichert
    water: Vec<f32>,
    columns: u32,
    rows: u32,
    /// Abstand zweier Rasterpunkte in Kartenkoordinaten
    scale: f32,
    bounds: WorldBounds,
}

impl GridTerrain {
    /// Erstellt ein Terrain aus Rohdaten (jeweils `columns * rows` Werte, zeilenweise).
    pub fn from_layers(
        columns: u32,
        rows: u32,
        scale: f32,
        land: Vec<f32>,
        water: Vec<f32>,
    ) -> Result<Self> {
        if columns == 0 || rows == 0 {
            bail!("Terrain braucht mindestens einen Rasterpunkt ({columns}x{rows})");
        }
        if scale <= 0.0 {
            bail!("Terrain-Rasterabstand muss positiv sein: {scale}");
        }
        let expected = columns as usize * rows as usize;
        if land.len() != expected || water.len() != expected {
            bail!(
                "Terrain-Schichten passen nicht zu {}x{}: land={}, water={}",
                columns,
                rows,
                land.len(),
                water.len()
            );
        }

        Ok(Self {
            land,
            water,
            columns,
            rows,
            scale,
            bounds: WorldBounds::centered(columns, rows, scale),
        })
    }

    /// Erstellt ein Terrain, dessen Rasterpunkte über `sample(map_x, map_z) -> (land, water)` befüllt werden.
    pub fn from_fn(
        columns: u32,
        rows: u32,
        scale: f32,
        sample: impl Fn(f32, f32) -> (f32, f32),
    ) -> Result<Self> {
        let bounds = WorldBounds::centered(columns, rows, scale);
        let count = columns as usize * rows as usize;
        let mut land = Vec::with_capacity(count);
        let mut water = Vec::with_capacity(count);
        for row in 0..rows {
            for column in 0..columns {
                let map_x = bounds.min_x + column as f32 * scale;
                let map_z = bounds.min_z + row as f32 * scale;
                let (land_height, water_height) = sample(map_x, map_z);
                land.push(land_height);
                water.push(water_height.max(0.0));
            }
        }

        Self::from_layers(columns, rows, scale, land, water)
    }

    /// Flaches, trockenes Terrain mit konstanter Höhe
    pub fn flat(columns: u32, rows: u32, height: f32) -> Result<Self> {
        Self::from_fn(columns, rows, 1.0, |_, _| (height, 0.0))
    }

    /// Lädt ein Graustufen-Heightmap-Bild (8- oder 16-Bit).
    ///
    /// Ein Pixel entspricht einer Gittereinheit. Bodenhöhe ist
    /// `normalized_pixel × height_scale`; alles unter `water_level` wird bis
    /// `water_level` mit Wasser aufgefüllt.
    pub fn load(path: &str, height_scale: f32, water_level: f32) -> Result<Self> {
        let image = image::open(path)
            .with_context(|| format!("Fehler beim Laden der Heightmap: {}", path))?;

        Self::from_image(image, height_scale, water_level)
    }

    /// Erstellt ein Terrain aus einem geladenen Bild.
    pub fn from_image(image: DynamicImage, height_scale: f32, water_level: f32) -> Result<Self> {
        let (width, height) = image.dimensions();

        let bit_depth = match image.color() {
            image::ColorType::L16
            | image::ColorType::La16
            | image::ColorType::Rgb16
            | image::ColorType::Rgba16 => 16u8,
            _ => 8u8,
        };

        let normalized: Vec<f32> = if bit_depth == 16 {
            let luma16 = image.into_luma16();
            luma16.pixels().map(|p| p[0] as f32 / 65535.0).collect()
        } else {
            let luma8 = image.into_luma8();
            luma8.pixels().map(|p| p[0] as f32 / 255.0).collect()
        };

        let land: Vec<f32> = normalized.iter().map(|n| n * height_scale).collect();
        let water: Vec<f32> = land.iter().map(|h| (water_level - h).max(0.0)).collect();
        let wet_points = water.iter().filter(|w| **w > 0.0).count();

        log::info!(
            "Heightmap geladen: {}x{} Pixel, {}-Bit, {} Wasserpunkte unter {:.1}",
            width,
            height,
            bit_depth,
            wet_points,
            water_level
        );

        Self::from_layers(width, height, 1.0, land, water)
    }

    /// Rastergröße (Spalten, Zeilen)
    pub fn dimensions(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    fn layer_value(&self, layer: Layer, column: usize, row: usize) -> f32 {
        let index = row * self.columns as usize + column;
        match layer {
            Layer::Land => self.land[index],
            Layer::Water => self.water[index],
        }
    }

    /// Bilineare Interpolation einer Schicht an einer Kartenkoordinate
    fn sample(&self, layer: Layer, x: f32, z: f32) -> Option<f32> {
        let px = (x - self.bounds.min_x) / self.scale;
        let pz = (z - self.bounds.min_z) / self.scale;

        let max_column = (self.columns - 1) as f32;
        let max_row = (self.rows - 1) as f32;
        if !(0.0..=max_column).contains(&px) || !(0.0..=max_row).contains(&pz) {
            return None;
        }

        let x0 = px.floor() as usize;
        let x1 = px.ceil() as usize;
        let z0 = pz.floor() as usize;
        let z1 = pz.ceil() as usize;
        let tx = px - px.floor();
        let tz = pz - pz.floor();

        let top = lerp(
            self.layer_value(layer, x0, z0),
            self.layer_value(layer, x1, z0),
            tx,
        );
        let bottom = lerp(
            self.layer_value(layer, x0, z1),
            self.layer_value(layer, x1, z1),
            tx,
        );

        Some(lerp(top, bottom, tz))
    }
}

impl Terrain for GridTerrain {
    fn land_height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.sample(Layer::Land, x, z)
    }

    fn water_height_at(&self, x: f32, z: f32) -> Option<f32> {
        self.sample(Layer::Water, x, z)
    }

    fn bounds(&self) -> WorldBounds {
        self.bounds
    }
}
