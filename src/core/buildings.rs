//! Bebauung: Blöcke aus Grundstücken (Lots) mit Randberührungs-Flags.
//!
//! Der Vereinfacher liest nur, ob ein Block an der Straßenseite bebaut ist.

use glam::IVec2;
use std::collections::HashMap;

/// Ein Grundstück innerhalb eines Blocks.
///
/// Die Maße sind Anteile des Blocks in `[0, 1]`: `left`/`right` entlang x,
/// `top`/`bottom` entlang z. Ein Lot berührt eine Blockkante, wenn es genau
/// bis an diese Kante reicht.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lot {
    /// Linke Kante (0.0 = bündig links)
    pub left: f32,
    /// Rechte Kante (1.0 = bündig rechts)
    pub right: f32,
    /// Obere Kante (0.0 = bündig oben)
    pub top: f32,
    /// Untere Kante (1.0 = bündig unten)
    pub bottom: f32,
}

impl Lot {
    /// Erstellt ein Lot aus Blockanteilen
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self {
            left,
            right,
            top,
            bottom,
        }
    }

    /// Lot, das den ganzen Block füllt (berührt alle vier Kanten)
    pub fn full_block() -> Self {
        Self::new(0.0, 1.0, 0.0, 1.0)
    }

    /// Erstellt ein Lot mit den angegebenen Randberührungen.
    ///
    /// Nicht berührende Seiten werden um ein Viertel eingerückt.
    pub fn from_touches(top: bool, bottom: bool, left: bool, right: bool) -> Self {
        Self::new(
            if left { 0.0 } else { 0.25 },
            if right { 1.0 } else { 0.75 },
            if top { 0.0 } else { 0.25 },
            if bottom { 1.0 } else { 0.75 },
        )
    }

    /// Bündig an der oberen Blockkante
    pub fn touches_top(&self) -> bool {
        self.top == 0.0
    }

    /// Bündig an der unteren Blockkante
    pub fn touches_bottom(&self) -> bool {
        self.bottom == 1.0
    }

    /// Bündig an der linken Blockkante
    pub fn touches_left(&self) -> bool {
        self.left == 0.0
    }

    /// Bündig an der rechten Blockkante
    pub fn touches_right(&self) -> bool {
        self.right == 1.0
    }
}

/// Kante eines Blocks, an der eine Straße entlangläuft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSide {
    /// Obere Kante (kleineres z)
    Top,
    /// Untere Kante (größeres z)
    Bottom,
    /// Linke Kante (kleineres x)
    Left,
    /// Rechte Kante (größeres x)
    Right,
}

/// Prüft ob mindestens ein Lot des Blocks bündig an der angegebenen Kante liegt.
pub fn block_fronts_side(block: &[Lot], side: BlockSide) -> bool {
    block.iter().any(|lot| match side {
        BlockSide::Top => lot.touches_top(),
        BlockSide::Bottom => lot.touches_bottom(),
        BlockSide::Left => lot.touches_left(),
        BlockSide::Right => lot.touches_right(),
    })
}

/// Lesezugriff auf die Bebauung.
///
/// Der Block `(x, z)` liegt zwischen den Kreuzungen `(x, z)` und `(x + 1, z + 1)`.
pub trait Buildings {
    /// Grundstücke des Blocks; leer wenn der Block unbebaut ist
    fn block_at(&self, x: i32, z: i32) -> &[Lot];
}

/// Dünn besetztes Blockraster
#[derive(Debug, Clone, Default)]
pub struct BlockGrid {
    blocks: HashMap<IVec2, Vec<Lot>>,
}

impl BlockGrid {
    /// Erstellt ein leeres Raster (kein Block bebaut)
    pub fn new() -> Self {
        Self::default()
    }

    /// Fügt dem Block ein Lot hinzu
    pub fn add_lot(&mut self, x: i32, z: i32, lot: Lot) {
        self.blocks.entry(IVec2::new(x, z)).or_default().push(lot);
    }

    /// Anzahl der bebauten Blöcke
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Gesamtanzahl der Lots
    pub fn lot_count(&self) -> usize {
        self.blocks.values().map(Vec::len).sum()
    }
}

impl Buildings for BlockGrid {
    fn block_at(&self, x: i32, z: i32) -> &[Lot] {
        self.blocks
            .get(&IVec2::new(x, z))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
