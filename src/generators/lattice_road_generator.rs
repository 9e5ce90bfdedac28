//! Erzeugt ein vollständiges Straßengitter um einen Mittelpunkt.
//!
//! Deterministisch und ohne Zufall; dient als Ausgangsnetz für Demo,
//! Benchmark und Tests.

use crate::core::{RoadNetwork, SurfaceType, Terrain};
use glam::IVec2;
use std::sync::Arc;

/// Gitter-Generator mit festem Radius
#[derive(Debug, Clone, Copy)]
pub struct LatticeRoadGenerator {
    /// Halbe Kantenlänge des Quadrats in Gittereinheiten
    pub radius: i32,
    /// Höhe von Brückenkreuzungen über Wasser
    pub bridge_height: f32,
    /// Gewicht jeder Kante
    pub edge_distance: f32,
}

impl LatticeRoadGenerator {
    /// Verbindet jeden Gitterpunkt im Quadrat um `center` mit seinem östlichen
    /// und südlichen Nachbarn.
    ///
    /// Punkte außerhalb des Terrains werden übersprungen. Eine Kante ist eine
    /// Brücke, sobald einer ihrer Endpunkte im Wasser liegt.
    pub fn generate(&self, terrain: Arc<dyn Terrain>, center: IVec2) -> RoadNetwork {
        let mut network = RoadNetwork::new(terrain.clone());

        for x in (center.x - self.radius)..=(center.x + self.radius) {
            for z in (center.y - self.radius)..=(center.y + self.radius) {
                let Some(start_wet) = Self::is_wet(terrain.as_ref(), x, z) else {
                    continue;
                };

                let neighbors = [
                    (x + 1 <= center.x + self.radius).then_some(IVec2::new(x + 1, z)),
                    (z + 1 <= center.y + self.radius).then_some(IVec2::new(x, z + 1)),
                ];
                for neighbor in neighbors.into_iter().flatten() {
                    let Some(end_wet) = Self::is_wet(terrain.as_ref(), neighbor.x, neighbor.y)
                    else {
                        continue;
                    };
                    let surface_type = if start_wet || end_wet {
                        SurfaceType::Bridge
                    } else {
                        SurfaceType::Terrain
                    };
                    network.add_edge(
                        x,
                        z,
                        neighbor.x,
                        neighbor.y,
                        self.bridge_height,
                        self.edge_distance,
                        surface_type,
                    );
                }
            }
        }

        log::info!(
            "Straßengitter erzeugt: {} Kreuzungen, {} Kanten (Radius {})",
            network.intersection_count(),
            network.edge_count(),
            self.radius
        );

        network
    }

    /// `None` außerhalb des Terrains, sonst ob Wasser über dem Boden steht
    fn is_wet(terrain: &dyn Terrain, x: i32, z: i32) -> Option<bool> {
        terrain
            .water_height_at(x as f32, z as f32)
            .map(|water| water > 0.0)
    }
}
