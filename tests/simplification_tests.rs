//! Integrationstests für die Vereinfachung des Straßennetzes:
//! - Zusammenhang bleibt erhalten
//! - Idempotenz nach dem Fixpunkt
//! - Brücken werden nie entfernt

use city_tour_roads::{
    simplify, BlockGrid, GridTerrain, LatticeRoadGenerator, Lot, PathFinder, ReachabilityOracle,
    RoadNetwork, RoadNetworkSimplifier, SurfaceType, Terrain, ZonedBlockGenerator,
};
use glam::IVec2;
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

fn flat_terrain() -> Arc<dyn Terrain> {
    Arc::new(GridTerrain::flat(41, 41, 2.0).expect("Terrain"))
}

/// Vollständiges Gitter mit `size × size` Kreuzungen ab (0,0)
fn lattice(size: i32) -> RoadNetwork {
    let mut network = RoadNetwork::new(flat_terrain());
    for x in 0..size {
        for z in 0..size {
            if x + 1 < size {
                network.add_edge(x, z, x + 1, z, 0.0, 1.0, SurfaceType::Terrain);
            }
            if z + 1 < size {
                network.add_edge(x, z, x, z + 1, 0.0, 1.0, SurfaceType::Terrain);
            }
        }
    }
    network
}

/// Alle von `start` aus erreichbaren Kreuzungen (Breitensuche)
fn component(network: &RoadNetwork, start: IVec2) -> HashSet<IVec2> {
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(current) = queue.pop_front() {
        let Some(edges) = network.edges_from(current.x, current.y) else {
            continue;
        };
        for (neighbor, _) in edges {
            if seen.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }
    seen
}

fn assert_reachability_preserved(before: &RoadNetwork, after: &RoadNetwork) {
    let coords: Vec<IVec2> = before.intersection_coords().collect();
    for &start in &coords {
        let reachable_before = component(before, start);
        let reachable_after = component(after, start);
        for target in reachable_before {
            assert!(
                reachable_after.contains(&target),
                "{start} erreicht {target} nach der Vereinfachung nicht mehr"
            );
        }
    }
}

#[test]
fn test_three_by_three_lattice_stays_connected() {
    let mut network = lattice(3);
    let before = network.clone();
    let buildings = BlockGrid::new();
    let finder = PathFinder::new();
    let simplifier = RoadNetworkSimplifier::new(&buildings, &finder);

    let result = simplifier.simplify(&mut network);

    assert!(result.had_removals());
    assert!(result.passes >= 2);
    assert_eq!(network.intersection_count(), 9);
    // Ein aufspannender Baum über 9 Kreuzungen hat genau 8 Kanten
    assert_eq!(network.edge_count(), 8);
    assert_eq!(component(&network, IVec2::new(0, 0)).len(), 9);
    assert_reachability_preserved(&before, &network);
    assert_eq!(simplifier.run_pass(&mut network), 0);
}

#[test]
fn test_second_simplification_removes_nothing() {
    let mut network = lattice(6);
    let mut buildings = BlockGrid::new();
    buildings.add_lot(2, 2, Lot::full_block());
    buildings.add_lot(0, 4, Lot::from_touches(false, true, true, false));
    let finder = PathFinder::new();

    let first = simplify(&mut network, &buildings, &finder);
    let edges_after_first = network.edge_count();
    let second = simplify(&mut network, &buildings, &finder);

    assert!(first.had_removals());
    assert_eq!(second.removed_edges, 0);
    assert_eq!(second.passes, 1);
    assert_eq!(network.edge_count(), edges_after_first);
}

#[test]
fn test_disconnected_components_stay_separate_and_intact() {
    let mut network = lattice(3);
    // Zweites Gitter weit entfernt
    for x in 10..12 {
        network.add_edge(x, 10, x + 1, 10, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(x, 11, x + 1, 11, 0.0, 1.0, SurfaceType::Terrain);
    }
    for x in 10..13 {
        network.add_edge(x, 10, x, 11, 0.0, 1.0, SurfaceType::Terrain);
    }
    let before = network.clone();

    simplify(&mut network, &BlockGrid::new(), &PathFinder::new());

    assert_reachability_preserved(&before, &network);
    assert!(!component(&network, IVec2::new(0, 0)).contains(&IVec2::new(10, 10)));
    assert_eq!(network.intersection_count(), before.intersection_count());
}

#[test]
fn test_far_apart_squares_are_simplified_independently() {
    let mut network = RoadNetwork::new(flat_terrain());
    for offset in [IVec2::new(-5_000, -5_000), IVec2::new(5_000, 5_000)] {
        let (x, z) = (offset.x, offset.y);
        network.add_edge(x, z, x + 1, z, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(x + 1, z, x + 1, z + 1, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(x + 1, z + 1, x, z + 1, 0.0, 1.0, SurfaceType::Terrain);
        network.add_edge(x, z + 1, x, z, 0.0, 1.0, SurfaceType::Terrain);
    }
    let before = network.clone();

    let result = simplify(&mut network, &BlockGrid::new(), &PathFinder::new());

    assert_eq!(result.removed_edges, 2);
    assert_eq!(network.edge_count(), 6);
    assert_eq!(network.intersection_count(), 8);
    assert_reachability_preserved(&before, &network);
}

#[test]
fn test_bridges_survive_regardless_of_buildings() {
    let mut network = lattice(4);
    // Mittlere Spalte als Brücken überschreiben
    for z in 0..4 {
        network.add_edge(1, z, 2, z, 0.0, 1.0, SurfaceType::Bridge);
    }
    let bridges: Vec<(IVec2, IVec2)> = network
        .edges()
        .filter(|(_, _, edge)| edge.is_bridge())
        .map(|(a, b, _)| (a, b))
        .collect();
    assert_eq!(bridges.len(), 4);

    simplify(&mut network, &BlockGrid::new(), &PathFinder::new());

    for (a, b) in bridges {
        assert!(network.has_edge_between(a.x, a.y, b.x, b.y, Some(SurfaceType::Bridge)));
    }
}

#[test]
fn test_simplified_network_is_symmetric_without_isolated_intersections() {
    let mut network = lattice(5);
    let mut buildings = BlockGrid::new();
    buildings.add_lot(1, 1, Lot::from_touches(true, false, false, true));
    simplify(&mut network, &buildings, &PathFinder::new());

    for coord in network.intersection_coords() {
        let edges: Vec<_> = network
            .edges_from(coord.x, coord.y)
            .expect("Kreuzung vorhanden")
            .collect();
        assert!(!edges.is_empty(), "{coord} ohne Kante");
        for (neighbor, edge) in edges {
            assert_eq!(
                network.edge_between(neighbor.x, neighbor.y, coord.x, coord.y),
                Some(edge)
            );
        }
    }
}

#[test]
fn test_generated_city_keeps_built_up_core() {
    let terrain: Arc<dyn Terrain> = flat_terrain();
    let generator = LatticeRoadGenerator {
        radius: 6,
        bridge_height: 1.0,
        edge_distance: 1.0,
    };
    let mut network = generator.generate(terrain.clone(), IVec2::ZERO);
    let blocks = ZonedBlockGenerator { radius: 2 }.generate(terrain.as_ref(), IVec2::ZERO);
    let before = network.clone();

    let result = simplify(&mut network, &blocks, &PathFinder::new());

    assert!(result.had_removals());
    assert_reachability_preserved(&before, &network);
    // Straßen rund um den bebauten Zentrumsblock bleiben
    assert!(network.has_edge_between(0, 0, 1, 0, None));
    assert!(network.has_edge_between(0, 1, 1, 1, None));
    assert!(network.has_edge_between(0, 0, 0, 1, None));
    assert!(network.has_edge_between(1, 0, 1, 1, None));
}

/// Orakel, das einen Weg nur meldet, solange ein Stub-Pfad über eine feste Kreuzung führt
struct ViaHub {
    hub: IVec2,
}

impl ReachabilityOracle for ViaHub {
    fn shortest_path(
        &self,
        network: &RoadNetwork,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
    ) -> Option<Vec<IVec2>> {
        let start = IVec2::new(x1, z1);
        let goal = IVec2::new(x2, z2);
        let reachable = component(network, start);
        (reachable.contains(&goal) && reachable.contains(&self.hub))
            .then(|| vec![start, self.hub, goal])
    }
}

#[test]
fn test_simplifier_works_with_injected_oracle() {
    let mut network = lattice(3);
    let before = network.clone();
    let oracle = ViaHub {
        hub: IVec2::new(1, 1),
    };

    let result = simplify(&mut network, &BlockGrid::new(), &oracle);

    assert!(result.had_removals());
    assert!(network.has_intersection(1, 1));
    assert_reachability_preserved(&before, &network);
}
