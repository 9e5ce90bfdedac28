//! Einfache Bebauung: volle Blöcke im Zentrum, leere Blöcke außen.

use crate::core::{BlockGrid, Lot, Terrain};
use glam::IVec2;

/// Bebaut alle trockenen Blöcke innerhalb eines Radius mit einem vollen Lot
#[derive(Debug, Clone, Copy)]
pub struct ZonedBlockGenerator {
    /// Blöcke mit Manhattan-Abstand ≤ `radius` zum Zentrum werden bebaut
    pub radius: i32,
}

impl ZonedBlockGenerator {
    /// Erzeugt das Blockraster. Blöcke, deren Ecke `(x, z)` im Wasser oder
    /// außerhalb des Terrains liegt, bleiben leer.
    pub fn generate(&self, terrain: &dyn Terrain, center: IVec2) -> BlockGrid {
        let mut blocks = BlockGrid::new();

        for x in (center.x - self.radius)..=(center.x + self.radius) {
            for z in (center.y - self.radius)..=(center.y + self.radius) {
                let offset = IVec2::new(x, z) - center;
                if offset.x.abs() + offset.y.abs() > self.radius {
                    continue;
                }
                if terrain.water_height_at(x as f32, z as f32) != Some(0.0) {
                    continue;
                }
                blocks.add_lot(x, z, Lot::full_block());
            }
        }

        log::debug!(
            "Blöcke bebaut: {} (Radius {})",
            blocks.block_count(),
            self.radius
        );

        blocks
    }
}
