//! City-Tour Straßennetz (Demo).
//!
//! Erzeugt Terrain, Straßengitter und Bebauung, vereinfacht das Netz und
//! gibt eine Zusammenfassung aus.
//! Aufruf: city-tour-roads [pfad_zur_options.toml]

use anyhow::{Context, Result};
use city_tour_roads::{
    CityOptions, GridTerrain, LatticeRoadGenerator, PathFinder, RoadNetworkSimplifier, Terrain,
    ZonedBlockGenerator,
};
use glam::IVec2;
use std::path::PathBuf;
use std::sync::Arc;

fn main() -> Result<()> {
    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("City-Tour Straßennetz v{} startet...", env!("CARGO_PKG_VERSION"));

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(CityOptions::config_path);
    let options = CityOptions::load_from_file(&config_path);

    let terrain = build_terrain(&options)?;
    let center = find_land_center(terrain.as_ref());

    let generator = LatticeRoadGenerator {
        radius: options.road_radius,
        bridge_height: options.bridge_height,
        edge_distance: options.edge_distance,
    };
    let mut network = generator.generate(terrain.clone(), center);
    let blocks = ZonedBlockGenerator {
        radius: options.building_radius,
    }
    .generate(terrain.as_ref(), center);

    let path_finder = PathFinder::new();
    let result = RoadNetworkSimplifier::with_options(&blocks, &path_finder, options.simplifier)
        .simplify(&mut network);

    println!("=== Straßennetz-Vereinfachung ===");
    println!("Zentrum:        ({}, {})", center.x, center.y);
    println!(
        "Bebauung:       {} Blöcke, {} Grundstücke",
        blocks.block_count(),
        blocks.lot_count()
    );
    println!(
        "Nachher:        {} Kreuzungen, {} Kanten",
        network.intersection_count(),
        network.edge_count()
    );
    println!(
        "Durchläufe:     {} ({} entfernt, {} wiederhergestellt, {} Sackgassen behalten)",
        result.passes, result.removed_edges, result.restored_edges, result.kept_dead_ends
    );

    Ok(())
}

/// Lädt die Heightmap aus den Optionen oder erzeugt ein synthetisches Hügelland mit Fluss.
fn build_terrain(options: &CityOptions) -> Result<Arc<dyn Terrain>> {
    if let Some(path) = options.heightmap_path.as_deref() {
        let terrain = GridTerrain::load(path, options.terrain_height_scale, options.water_level)
            .with_context(|| format!("Terrain aus {} nicht ladbar", path))?;
        return Ok(Arc::new(terrain));
    }

    let water_level = options.water_level;
    let terrain = GridTerrain::from_fn(options.terrain_size, options.terrain_size, 1.0, |x, z| {
        let hills = 4.0 + (x * 0.15).sin() * 3.0 + (z * 0.1).cos() * 2.0;
        // Flussbett quer durch die Karte
        let river = (x - z * 0.5 - 6.0).abs();
        let land = if river < 1.5 { hills - 6.0 } else { hills };
        (land, (water_level - land).max(0.0))
    })?;
    Ok(Arc::new(terrain))
}

/// Sucht vom Ursprung nach Norden den ersten trockenen Punkt.
fn find_land_center(terrain: &dyn Terrain) -> IVec2 {
    let min_z = terrain.bounds().min_z.ceil() as i32;
    let mut z = 0;
    while z > min_z && terrain.water_height_at(0.0, z as f32) != Some(0.0) {
        z -= 1;
    }
    IVec2::new(0, z)
}
