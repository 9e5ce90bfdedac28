//! Core-Domänentypen: Straßennetz, Kreuzungen, Kanten und Kollaborateure.

pub mod buildings;
pub mod edge;
pub mod intersection;
pub mod lattice;
pub mod path_finder;
/// Straßennetz als dünn besetzter Gittergraph
///
/// - RoadNetwork: Container für alle Kreuzungen und Kanten
/// - Intersection: Gitterpunkt mit Höhe, Untergrund und Adjazenz
/// - Edge: ungerichtete Verbindung zweier Gitternachbarn
pub mod road_network;
pub mod terrain;

pub use buildings::{block_fronts_side, BlockGrid, BlockSide, Buildings, Lot};
pub use edge::{Edge, SurfaceType};
pub use intersection::Intersection;
pub use lattice::LatticeBounds;
pub use path_finder::{PathFinder, ReachabilityOracle, Route};
pub use road_network::RoadNetwork;
pub use terrain::{GridTerrain, Terrain, WorldBounds};
