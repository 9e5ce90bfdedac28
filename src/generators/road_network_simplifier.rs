//! Entfernt überflüssige Straßenkanten ohne Bebauung, ohne das Netz zu zerteilen.
//!
//! Ein Durchlauf fegt das Begrenzungsrechteck viermal (Ost, West, Süd, Nord).
//! Kanten über offenem Gelände, an denen keiner der beiden angrenzenden
//! Blöcke bebaut ist, werden probeweise entfernt. Findet das Orakel danach
//! keinen Weg mehr zwischen den Endpunkten, wird die Kante mit identischen
//! Metadaten wieder eingefügt. Durchläufe werden wiederholt, bis einer nichts
//! mehr entfernt.

use crate::core::{block_fronts_side, BlockSide, Buildings, ReachabilityOracle, RoadNetwork};
use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Einstellungen des Vereinfachers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SimplifierOptions {
    /// Sackgassen ohne Bebauung mit entfernen.
    ///
    /// Verliert ein Endpunkt dabei seine letzte Kante, verschwindet er samt
    /// Verbindung zum Rest des Netzes. Standardmäßig aus: dann bleibt jede
    /// Kreuzung erreichbar.
    #[serde(default)]
    pub prune_dead_ends: bool,
}

/// Fegerichtung eines Teildurchlaufs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepDirection {
    /// (x, z) → (x + 1, z)
    East,
    /// (x, z) → (x - 1, z)
    West,
    /// (x, z) → (x, z + 1)
    South,
    /// (x, z) → (x, z - 1)
    North,
}

impl SweepDirection {
    /// Reihenfolge der Teildurchläufe innerhalb eines Durchlaufs
    pub const ALL: [SweepDirection; 4] = [
        SweepDirection::East,
        SweepDirection::West,
        SweepDirection::South,
        SweepDirection::North,
    ];

    /// Versatz vom Start- zum Zielpunkt der Kante
    pub fn offset(self) -> IVec2 {
        match self {
            SweepDirection::East => IVec2::new(1, 0),
            SweepDirection::West => IVec2::new(-1, 0),
            SweepDirection::South => IVec2::new(0, 1),
            SweepDirection::North => IVec2::new(0, -1),
        }
    }

    /// Die beiden Blöcke links und rechts der Kante ab `cell`, jeweils mit der
    /// Blockseite, die zur Straße zeigt.
    pub fn flanking_blocks(self, cell: IVec2) -> [(IVec2, BlockSide); 2] {
        let (x, z) = (cell.x, cell.y);
        match self {
            SweepDirection::East => [
                (IVec2::new(x, z), BlockSide::Top),
                (IVec2::new(x, z - 1), BlockSide::Bottom),
            ],
            SweepDirection::West => [
                (IVec2::new(x - 1, z), BlockSide::Top),
                (IVec2::new(x - 1, z - 1), BlockSide::Bottom),
            ],
            SweepDirection::South => [
                (IVec2::new(x - 1, z), BlockSide::Right),
                (IVec2::new(x, z), BlockSide::Left),
            ],
            SweepDirection::North => [
                (IVec2::new(x - 1, z - 1), BlockSide::Right),
                (IVec2::new(x, z - 1), BlockSide::Left),
            ],
        }
    }

    /// Sortiert Zellen in die feste Rasterreihenfolge dieser Richtung.
    ///
    /// Außen läuft die Spalte, innen die Zeile. West läuft die Spalten
    /// absteigend ab, Nord die Zeilen; sonst aufsteigend.
    pub fn sort_cells(self, cells: &mut [IVec2]) {
        let descending_columns = self == SweepDirection::West;
        let descending_rows = self == SweepDirection::North;
        cells.sort_unstable_by(|a, b| {
            let columns = if descending_columns {
                b.x.cmp(&a.x)
            } else {
                a.x.cmp(&b.x)
            };
            let rows = if descending_rows {
                b.y.cmp(&a.y)
            } else {
                a.y.cmp(&b.y)
            };
            columns.then(rows)
        });
    }
}

/// Ergebnis einer vollständigen Vereinfachung
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SimplificationResult {
    /// Anzahl der Durchläufe inklusive des letzten ohne Entfernung
    pub passes: u32,
    /// Dauerhaft entfernte Kanten
    pub removed_edges: u32,
    /// Wieder eingefügte Kanten (Entfernen hätte das Netz zerteilt)
    pub restored_edges: u32,
    /// Übersprungene Sackgassen-Kanten (nur ohne `prune_dead_ends`)
    pub kept_dead_ends: u32,
}

impl SimplificationResult {
    /// Prüft ob überhaupt Kanten entfernt wurden
    pub fn had_removals(&self) -> bool {
        self.removed_edges > 0
    }
}

/// Was mit einer Kandidatenkante passiert ist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeOutcome {
    /// Keine Kante, Brücke oder bebaut
    Untouched,
    Removed,
    Restored,
    KeptDeadEnd,
}

/// Vereinfacht ein Straßennetz anhand der Bebauung.
///
/// Bebauung und Orakel werden nur gelesen; das Netz wird direkt verändert.
pub struct RoadNetworkSimplifier<'a> {
    buildings: &'a dyn Buildings,
    oracle: &'a dyn ReachabilityOracle,
    options: SimplifierOptions,
}

impl<'a> RoadNetworkSimplifier<'a> {
    /// Erstellt einen Vereinfacher mit Standard-Einstellungen
    pub fn new(buildings: &'a dyn Buildings, oracle: &'a dyn ReachabilityOracle) -> Self {
        Self::with_options(buildings, oracle, SimplifierOptions::default())
    }

    /// Erstellt einen Vereinfacher mit expliziten Einstellungen
    pub fn with_options(
        buildings: &'a dyn Buildings,
        oracle: &'a dyn ReachabilityOracle,
        options: SimplifierOptions,
    ) -> Self {
        Self {
            buildings,
            oracle,
            options,
        }
    }

    /// Wiederholt Durchläufe, bis einer keine Kante mehr entfernt.
    ///
    /// Terminiert, weil jede stehende Entfernung die Kantenzahl verringert.
    pub fn simplify(&self, network: &mut RoadNetwork) -> SimplificationResult {
        let edges_before = network.edge_count();
        let mut result = SimplificationResult::default();

        loop {
            let pass = self.pass(network);
            result.passes += 1;
            result.removed_edges += pass.removed_edges;
            result.restored_edges += pass.restored_edges;
            result.kept_dead_ends += pass.kept_dead_ends;

            log::debug!(
                "Vereinfachung Durchlauf {}: {} entfernt, {} wiederhergestellt",
                result.passes,
                pass.removed_edges,
                pass.restored_edges
            );

            if pass.removed_edges == 0 {
                break;
            }
        }

        log::info!(
            "Straßennetz vereinfacht: {} → {} Kanten in {} Durchläufen ({} wiederhergestellt)",
            edges_before,
            network.edge_count(),
            result.passes,
            result.restored_edges
        );

        result
    }

    /// Führt einen einzelnen Durchlauf (alle vier Richtungen) aus.
    ///
    /// Gibt die Anzahl dauerhaft entfernter Kanten zurück.
    pub fn run_pass(&self, network: &mut RoadNetwork) -> usize {
        self.pass(network).removed_edges as usize
    }

    fn pass(&self, network: &mut RoadNetwork) -> SimplificationResult {
        let mut stats = SimplificationResult::default();
        for direction in SweepDirection::ALL {
            // Nur Zellen mit Kreuzung können eine Kante haben. Wiedereinfügen
            // setzt beide Endpunkte voraus, legt also keine neuen Kreuzungen an.
            let mut cells: Vec<IVec2> = network.intersection_coords().collect();
            direction.sort_cells(&mut cells);

            for cell in cells {
                match self.process_edge(network, direction, cell) {
                    EdgeOutcome::Untouched => {}
                    EdgeOutcome::Removed => stats.removed_edges += 1,
                    EdgeOutcome::Restored => stats.restored_edges += 1,
                    EdgeOutcome::KeptDeadEnd => stats.kept_dead_ends += 1,
                }
            }
        }

        stats
    }

    /// Prüft ob einer der beiden Blöcke neben der Kante zur Straße hin bebaut ist
    fn has_frontage(&self, direction: SweepDirection, cell: IVec2) -> bool {
        direction
            .flanking_blocks(cell)
            .into_iter()
            .any(|(block, side)| block_fronts_side(self.buildings.block_at(block.x, block.y), side))
    }

    fn process_edge(
        &self,
        network: &mut RoadNetwork,
        direction: SweepDirection,
        cell: IVec2,
    ) -> EdgeOutcome {
        let target = cell + direction.offset();
        let (x, z, tx, tz) = (cell.x, cell.y, target.x, target.y);

        if !network.has_edge_between(x, z, tx, tz, None) {
            return EdgeOutcome::Untouched;
        }
        let Some(edge) = network.edge_between(x, z, tx, tz) else {
            return EdgeOutcome::Untouched;
        };
        if edge.is_bridge() || self.has_frontage(direction, cell) {
            return EdgeOutcome::Untouched;
        }

        if !self.options.prune_dead_ends && Self::is_dead_end(network, cell, target) {
            return EdgeOutcome::KeptDeadEnd;
        }

        network.remove_edge(x, z, tx, tz);

        if network.has_intersection(x, z)
            && network.has_intersection(tx, tz)
            && self.oracle.shortest_path(network, x, z, tx, tz).is_none()
        {
            // Beide Endpunkte existieren noch, Höhe wird nicht neu aufgelöst
            network.add_edge(x, z, tx, tz, 0.0, edge.distance, edge.surface_type);
            log::trace!("Kante {} → {} wiederhergestellt (Netz wäre zerfallen)", cell, target);
            return EdgeOutcome::Restored;
        }

        log::trace!("Kante {} → {} entfernt ({:?})", cell, target, direction);
        EdgeOutcome::Removed
    }

    /// Prüft ob einer der Endpunkte nur noch diese eine Kante hat
    fn is_dead_end(network: &RoadNetwork, start: IVec2, end: IVec2) -> bool {
        [start, end].into_iter().any(|point| {
            network
                .intersection(point.x, point.y)
                .is_some_and(|intersection| intersection.edge_count() == 1)
        })
    }
}

/// Vereinfacht das Netz mit Standard-Einstellungen.
pub fn simplify(
    network: &mut RoadNetwork,
    buildings: &dyn Buildings,
    oracle: &dyn ReachabilityOracle,
) -> SimplificationResult {
    RoadNetworkSimplifier::new(buildings, oracle).simplify(network)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BlockGrid, GridTerrain, Lot, PathFinder, SurfaceType, Terrain};
    use std::cell::Cell;
    use std::sync::Arc;

    /// Orakel, das nie einen Weg findet und die Aufrufe zählt
    #[derive(Default)]
    struct NeverConnected {
        calls: Cell<usize>,
    }

    impl ReachabilityOracle for NeverConnected {
        fn shortest_path(
            &self,
            _network: &RoadNetwork,
            _x1: i32,
            _z1: i32,
            _x2: i32,
            _z2: i32,
        ) -> Option<Vec<IVec2>> {
            self.calls.set(self.calls.get() + 1);
            None
        }
    }

    /// Orakel, das immer einen Weg meldet
    struct AlwaysConnected;

    impl ReachabilityOracle for AlwaysConnected {
        fn shortest_path(
            &self,
            _network: &RoadNetwork,
            x1: i32,
            z1: i32,
            x2: i32,
            z2: i32,
        ) -> Option<Vec<IVec2>> {
            Some(vec![IVec2::new(x1, z1), IVec2::new(x2, z2)])
        }
    }

    fn empty_network() -> RoadNetwork {
        let terrain: Arc<dyn Terrain> = Arc::new(GridTerrain::flat(21, 21, 1.0).expect("Terrain"));
        RoadNetwork::new(terrain)
    }

    /// Quadrat aus vier Kanten um den Block (0,0)
    fn square(surface_type: SurfaceType) -> RoadNetwork {
        let mut network = empty_network();
        network.add_edge(0, 0, 1, 0, 0.0, 1.0, surface_type);
        network.add_edge(1, 0, 1, 1, 0.0, 1.0, surface_type);
        network.add_edge(1, 1, 0, 1, 0.0, 1.0, surface_type);
        network.add_edge(0, 1, 0, 0, 0.0, 1.0, surface_type);
        network
    }

    #[test]
    fn test_sweep_cells_raster_order() {
        let p = IVec2::new;
        let unordered = [p(1, 1), p(0, 0), p(1, 0), p(0, 1)];
        let sorted = |direction: SweepDirection| {
            let mut cells = unordered.to_vec();
            direction.sort_cells(&mut cells);
            cells
        };

        assert_eq!(
            sorted(SweepDirection::East),
            vec![p(0, 0), p(0, 1), p(1, 0), p(1, 1)]
        );
        assert_eq!(
            sorted(SweepDirection::West),
            vec![p(1, 0), p(1, 1), p(0, 0), p(0, 1)]
        );
        assert_eq!(
            sorted(SweepDirection::South),
            vec![p(0, 0), p(0, 1), p(1, 0), p(1, 1)]
        );
        assert_eq!(
            sorted(SweepDirection::North),
            vec![p(0, 1), p(0, 0), p(1, 1), p(1, 0)]
        );
    }

    #[test]
    fn test_far_apart_components_do_not_scan_the_rectangle() {
        let mut network = empty_network();
        network.add_edge(0, 0, 1, 0, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(40_000, 40_000, 40_001, 40_000, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(-40_000, 40_000, -40_000, 40_001, 0.0, 1.0, SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let options = SimplifierOptions {
            prune_dead_ends: true,
        };

        let result = RoadNetworkSimplifier::with_options(&buildings, &PathFinder::new(), options)
            .simplify(&mut network);

        assert_eq!(result.removed_edges, 3);
        assert_eq!(result.passes, 2);
        assert!(network.is_empty());
    }

    #[test]
    fn test_flanking_blocks_face_the_road() {
        let cell = IVec2::new(3, 5);
        assert_eq!(
            SweepDirection::East.flanking_blocks(cell),
            [
                (IVec2::new(3, 5), BlockSide::Top),
                (IVec2::new(3, 4), BlockSide::Bottom)
            ]
        );
        assert_eq!(
            SweepDirection::North.flanking_blocks(cell),
            [
                (IVec2::new(2, 4), BlockSide::Right),
                (IVec2::new(3, 4), BlockSide::Left)
            ]
        );
    }

    #[test]
    fn test_square_keeps_spanning_tree() {
        let mut network = square(SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let finder = PathFinder::new();

        let result = RoadNetworkSimplifier::new(&buildings, &finder).simplify(&mut network);

        assert_eq!(result.removed_edges, 1);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.intersection_count(), 4);
        // Erste Kante im Ost-Durchlauf fällt weg
        assert!(!network.has_edge_between(0, 0, 1, 0, None));
    }

    #[test]
    fn test_bridges_are_never_removed() {
        let mut network = square(SurfaceType::Bridge);
        let buildings = BlockGrid::new();
        let oracle = AlwaysConnected;

        let result = simplify(&mut network, &buildings, &oracle);

        assert_eq!(result.removed_edges, 0);
        assert_eq!(result.passes, 1);
        assert_eq!(network.edge_count(), 4);
    }

    #[test]
    fn test_frontage_protects_edges() {
        let mut network = square(SurfaceType::Terrain);
        let mut buildings = BlockGrid::new();
        // Ein Lot, das alle Kanten des Blocks (0,0) berührt, schützt das ganze Quadrat
        buildings.add_lot(0, 0, Lot::full_block());

        let result = simplify(&mut network, &buildings, &AlwaysConnected);

        assert_eq!(result.removed_edges, 0);
        assert_eq!(network.edge_count(), 4);
    }

    #[test]
    fn test_frontage_only_on_matching_side() {
        let mut network = square(SurfaceType::Terrain);
        let mut buildings = BlockGrid::new();
        // Nur die obere Kante des Blocks ist bebaut: schützt (0,0)-(1,0)
        buildings.add_lot(0, 0, Lot::from_touches(true, false, false, false));
        let finder = PathFinder::new();

        simplify(&mut network, &buildings, &finder);

        assert!(network.has_edge_between(0, 0, 1, 0, None));
        assert_eq!(network.edge_count(), 3);
    }

    #[test]
    fn test_disconnecting_removal_is_restored_with_same_metadata() {
        let mut network = empty_network();
        network.add_edge(0, 0, 1, 0, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(1, 0, 2, 0, 0.0, 2.5, SurfaceType::Terrain);
        network.add_edge(2, 0, 3, 0, 0.0, 1.0, SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let oracle = NeverConnected::default();

        let result = simplify(&mut network, &buildings, &oracle);

        assert_eq!(result.removed_edges, 0);
        assert!(result.restored_edges > 0);
        assert!(oracle.calls.get() > 0);
        assert_eq!(
            network.edge_between(2, 0, 1, 0).map(|e| e.distance),
            Some(2.5)
        );
        assert_eq!(network.edge_count(), 3);
    }

    #[test]
    fn test_dead_ends_kept_by_default() {
        let mut network = empty_network();
        network.add_edge(0, 0, 1, 0, 0.0, 1.0, SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let oracle = NeverConnected::default();

        let result = simplify(&mut network, &buildings, &oracle);

        assert_eq!(result.removed_edges, 0);
        assert!(result.kept_dead_ends > 0);
        assert_eq!(oracle.calls.get(), 0);
        assert!(network.has_intersection(0, 0));
        assert!(network.has_intersection(1, 0));
    }

    #[test]
    fn test_pruned_dead_end_vanishes_without_oracle() {
        let mut network = empty_network();
        network.add_edge(0, 0, 1, 0, 0.0, 1.0, SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let oracle = NeverConnected::default();
        let options = SimplifierOptions {
            prune_dead_ends: true,
        };

        let result =
            RoadNetworkSimplifier::with_options(&buildings, &oracle, options).simplify(&mut network);

        assert_eq!(result.removed_edges, 1);
        assert_eq!(oracle.calls.get(), 0);
        assert!(network.is_empty());
        // Das Rechteck bleibt bestehen
        assert!(network.bounds().is_some());
    }

    #[test]
    fn test_empty_network_single_pass() {
        let mut network = empty_network();
        let result = simplify(&mut network, &BlockGrid::new(), &AlwaysConnected);
        assert_eq!(result.passes, 1);
        assert!(!result.had_removals());
    }

    #[test]
    fn test_run_pass_after_fixpoint_removes_nothing() {
        let mut network = square(SurfaceType::Terrain);
        let buildings = BlockGrid::new();
        let finder = PathFinder::new();
        let simplifier = RoadNetworkSimplifier::new(&buildings, &finder);

        assert_eq!(simplifier.run_pass(&mut network), 1);
        assert_eq!(simplifier.run_pass(&mut network), 0);
    }
}
