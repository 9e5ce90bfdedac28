//! Erreichbarkeits-Abfragen auf dem Straßennetz.
//!
//! Das Orakel bekommt das Netz bei jedem Aufruf übergeben und sieht damit
//! immer den aktuellen, bereits veränderten Zustand.

use super::RoadNetwork;
use glam::IVec2;
use ordered_float::OrderedFloat;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Beantwortet, ob und über welchen Weg zwei Kreuzungen verbunden sind.
pub trait ReachabilityOracle {
    /// Weg von `(x1, z1)` nach `(x2, z2)` inklusive beider Endpunkte, oder `None`
    fn shortest_path(
        &self,
        network: &RoadNetwork,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
    ) -> Option<Vec<IVec2>>;
}

/// Gefundene Route mit Gesamtlänge
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    /// Kreuzungen vom Start bis zum Ziel
    pub path: Vec<IVec2>,
    /// Summe der Kantendistanzen
    pub distance: f32,
}

/// Dijkstra-Suche über die Kantendistanzen des Netzes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PathFinder;

impl PathFinder {
    /// Erstellt einen neuen PathFinder
    pub fn new() -> Self {
        Self
    }

    /// Kürzeste Route zwischen zwei Kreuzungen.
    ///
    /// `None` wenn eine der Kreuzungen fehlt oder kein Weg existiert.
    pub fn shortest_route(&self, network: &RoadNetwork, start: IVec2, goal: IVec2) -> Option<Route> {
        if !network.has_intersection(start.x, start.y) || !network.has_intersection(goal.x, goal.y)
        {
            return None;
        }
        if start == goal {
            return Some(Route {
                path: vec![start],
                distance: 0.0,
            });
        }

        let mut best: HashMap<IVec2, f32> = HashMap::new();
        let mut previous: HashMap<IVec2, IVec2> = HashMap::new();
        // Heap-Einträge: (Distanz, x, y) aufsteigend
        let mut queue = BinaryHeap::new();

        best.insert(start, 0.0);
        queue.push(Reverse((OrderedFloat(0.0f32), start.x, start.y)));

        while let Some(Reverse((OrderedFloat(distance), x, z))) = queue.pop() {
            let current = IVec2::new(x, z);
            if current == goal {
                return Some(Route {
                    path: Self::reconstruct(&previous, start, goal),
                    distance,
                });
            }
            if best.get(&current).is_some_and(|&known| distance > known) {
                continue;
            }

            let Some(edges) = network.edges_from(x, z) else {
                continue;
            };
            for (neighbor, edge) in edges {
                let candidate = distance + edge.distance;
                let improved = best
                    .get(&neighbor)
                    .map_or(true, |&known| candidate < known);
                if improved {
                    best.insert(neighbor, candidate);
                    previous.insert(neighbor, current);
                    queue.push(Reverse((OrderedFloat(candidate), neighbor.x, neighbor.y)));
                }
            }
        }

        None
    }

    fn reconstruct(previous: &HashMap<IVec2, IVec2>, start: IVec2, goal: IVec2) -> Vec<IVec2> {
        let mut path = vec![goal];
        let mut current = goal;
        while current != start {
            match previous.get(&current) {
                Some(&step) => {
                    path.push(step);
                    current = step;
                }
                None => break,
            }
        }
        path.reverse();
        path
    }
}

impl ReachabilityOracle for PathFinder {
    fn shortest_path(
        &self,
        network: &RoadNetwork,
        x1: i32,
        z1: i32,
        x2: i32,
        z2: i32,
    ) -> Option<Vec<IVec2>> {
        self.shortest_route(network, IVec2::new(x1, z1), IVec2::new(x2, z2))
            .map(|route| route.path)
    }
}
