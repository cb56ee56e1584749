//! Line/character positions, the core's native coordinate system.

use serde::{Deserialize, Serialize};

/// A zero-based `(line, character)` position.
///
/// `character` is a byte offset within the line, not a UTF-16 code-unit
/// count — the core never performs UTF-16 accounting itself. A protocol
/// front-end that speaks UTF-16 positions is responsible for its own
/// conversion at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[inline]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// A `[start, end)` range expressed as two positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PositionRange {
    pub start: Position,
    pub end: Position,
}

impl PositionRange {
    #[inline]
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}
