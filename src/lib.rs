//! City-Tour Straßennetz.
//! Gittergraph über einem Terrain-Höhenfeld und zusammenhangserhaltende
//! Vereinfachung, als Library exportiert für Tests und Wiederverwendung.

pub mod core;
pub mod generators;
pub mod shared;

pub use core::{
    BlockGrid, BlockSide, Buildings, Edge, GridTerrain, Intersection, LatticeBounds, Lot,
    PathFinder, ReachabilityOracle, RoadNetwork, Route, SurfaceType, Terrain, WorldBounds,
};
pub use generators::{
    simplify, LatticeRoadGenerator, RoadNetworkSimplifier, SimplificationResult,
    SimplifierOptions, SweepDirection, ZonedBlockGenerator,
};
pub use shared::CityOptions;
