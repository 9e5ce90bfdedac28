//! Generatoren und Nachbearbeitung des Straßennetzes.

pub mod lattice_road_generator;
pub mod road_network_simplifier;
pub mod zoned_block_generator;

pub use lattice_road_generator::LatticeRoadGenerator;
pub use road_network_simplifier::{
    simplify, RoadNetworkSimplifier, SimplificationResult, SimplifierOptions, SweepDirection,
};
pub use zoned_block_generator::ZonedBlockGenerator;
