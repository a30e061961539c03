//! Static wall layout shared by every collision check.

use topdown_shooter_core::{Rect, WallColor, LEVEL_HEIGHT, LEVEL_WIDTH};

/// Solid rectangle that blocks movement and stops bullets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Wall {
    bounds: Rect,
    color: WallColor,
}

impl Wall {
    /// Creates a wall covering the provided rectangle.
    #[must_use]
    pub const fn new(bounds: Rect, color: WallColor) -> Self {
        Self { bounds, color }
    }

    /// Area covered by the wall.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Appearance of the wall.
    #[must_use]
    pub const fn color(&self) -> WallColor {
        self.color
    }
}

/// Immutable set of walls plus the outer bounds bullets may travel within.
#[derive(Clone, Debug, PartialEq)]
pub struct Level {
    walls: Vec<Wall>,
    bounds: Rect,
}

impl Level {
    /// Creates a level from an ordered list of walls inside the standard bounds.
    #[must_use]
    pub fn new(walls: Vec<Wall>) -> Self {
        Self {
            walls,
            bounds: Rect::new(0.0, 0.0, LEVEL_WIDTH, LEVEL_HEIGHT),
        }
    }

    /// Builds the hand-authored layout: outer boundary, a central room, four
    /// hallway segments, four mid-size rooms, and four isolated rooms.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(STANDARD_LAYOUT.iter().map(|rect| Wall::new(*rect, WallColor::GRAY)).collect())
    }

    /// Walls in authoring order.
    #[must_use]
    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    /// Outer bounds outside of which bullets are discarded.
    #[must_use]
    pub const fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Reports whether any wall intersects the provided collision box.
    #[must_use]
    pub fn blocks(&self, collision_box: &Rect) -> bool {
        self.walls
            .iter()
            .any(|wall| wall.bounds.intersects(collision_box))
    }
}

const STANDARD_LAYOUT: [Rect; 17] = [
    // outer boundary: top, left, right, bottom
    Rect::new(0.0, 0.0, 4000.0, 30.0),
    Rect::new(0.0, 0.0, 30.0, 3000.0),
    Rect::new(3970.0, 0.0, 30.0, 3000.0),
    Rect::new(0.0, 2970.0, 4000.0, 30.0),
    // central room
    Rect::new(1500.0, 1200.0, 1000.0, 600.0),
    // hallways
    Rect::new(1200.0, 1400.0, 300.0, 100.0),
    Rect::new(2500.0, 1400.0, 300.0, 100.0),
    Rect::new(1800.0, 900.0, 400.0, 100.0),
    Rect::new(1800.0, 1900.0, 400.0, 100.0),
    // mid-size rooms
    Rect::new(800.0, 800.0, 400.0, 400.0),
    Rect::new(2800.0, 800.0, 400.0, 400.0),
    Rect::new(800.0, 1800.0, 400.0, 400.0),
    Rect::new(2800.0, 1800.0, 400.0, 400.0),
    // isolated rooms
    Rect::new(500.0, 500.0, 200.0, 200.0),
    Rect::new(3300.0, 500.0, 200.0, 200.0),
    Rect::new(500.0, 2300.0, 200.0, 200.0),
    Rect::new(3300.0, 2300.0, 200.0, 200.0),
];
