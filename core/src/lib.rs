#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the top-down shooter.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Systems read immutable snapshots and
//! answer with [`Command`] values, the world executes those commands via its
//! `apply` entry point, and then reports what happened as [`Event`] values.
//! Commands are applied in the order they were emitted, so the order in which a
//! frame submits its command batches is the order in which the simulation
//! advances.

use glam::Vec2;

/// Title shown by the window that hosts the game.
pub const WINDOW_TITLE: &str = "Top-Down Shooter";

/// Distance the player travels per frame along each held direction.
pub const PLAYER_SPEED: f32 = 4.0;

/// Distance a player-fired bullet travels per frame.
pub const PLAYER_BULLET_SPEED: f32 = 15.0;

/// Distance an enemy travels per frame along its heading.
pub const ENEMY_SPEED: f32 = 2.0;

/// Distance an enemy-fired bullet travels per frame.
pub const ENEMY_BULLET_SPEED: f32 = 10.0;

/// Enemies closer to the player than this distance engage the player.
pub const ENEMY_AGGRO_RADIUS: f32 = 250.0;

/// Number of engaged frames an enemy waits between shots.
pub const ENEMY_SHOOT_DELAY_FRAMES: u32 = 60;

/// Forward displacement from an entity's center at which projectiles spawn.
pub const MUZZLE_OFFSET: f32 = 20.0;

/// Edge length of the square collision box used by the player and enemies.
pub const ENTITY_BOX_SIZE: f32 = 20.0;

/// Edge length of the square collision box used by bullets against walls.
pub const BULLET_BOX_SIZE: f32 = 5.0;

/// Radius of the hit circle around the player and enemies.
pub const ENTITY_RADIUS: f32 = 20.0;

/// Radius of a bullet's hit circle.
pub const BULLET_RADIUS: f32 = 5.0;

/// Number of slots in the bullet pool.
pub const BULLET_POOL_CAPACITY: usize = 10;

/// Number of enemies placed in the standard level.
pub const ENEMY_COUNT: usize = 8;

/// Width of the level's outer bounds in world units.
pub const LEVEL_WIDTH: f32 = 4000.0;

/// Height of the level's outer bounds in world units.
pub const LEVEL_HEIGHT: f32 = 3000.0;

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    /// Starts a new simulation frame.
    Tick,
    /// Points the player's heading at a location in world space.
    AimPlayer {
        /// World-space point the player should face.
        target: Vec2,
    },
    /// Requests a player-originated bullet from the pool.
    FirePlayerBullet,
    /// Requests that the player move one step in a single cardinal direction.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Advances every active bullet along its heading.
    AdvanceBullets,
    /// Turns a living enemy to face the provided heading.
    SteerEnemy {
        /// Identifier of the enemy to turn.
        enemy: EnemyId,
        /// Heading the enemy should adopt.
        heading: Heading,
    },
    /// Requests that a living enemy move one step along its heading.
    MoveEnemy {
        /// Identifier of the enemy attempting to move.
        enemy: EnemyId,
    },
    /// Counts one engaged frame toward the enemy's next shot.
    AdvanceShootTimer {
        /// Identifier of the enemy whose timer advances.
        enemy: EnemyId,
    },
    /// Resets the enemy's shoot timer and requests an enemy-originated bullet.
    ///
    /// The bullet leaves the muzzle point along `heading`. The enemy's own
    /// heading is not changed.
    FireEnemyBullet {
        /// Identifier of the firing enemy.
        enemy: EnemyId,
        /// Direction the shot travels.
        heading: Heading,
    },
    /// Resolves bullet hits against enemies, walls, and the level bounds.
    ResolveBulletHits,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Event {
    /// Indicates that a new frame started.
    FrameAdvanced {
        /// Number of frames simulated so far, including this one.
        frame: u64,
    },
    /// Confirms that the player moved between two positions.
    PlayerMoved {
        /// Direction of the committed step.
        direction: Direction,
        /// Position before the step.
        from: Vec2,
        /// Position after the step.
        to: Vec2,
    },
    /// Reports that a wall rejected the player's step.
    PlayerBlocked {
        /// Direction of the rejected step.
        direction: Direction,
    },
    /// Confirms that a pool slot now holds a live bullet.
    BulletFired {
        /// Slot claimed by the bullet.
        bullet: BulletId,
        /// Side that fired the bullet.
        origin: BulletOrigin,
    },
    /// Reports that a shot was dropped because every pool slot was active.
    ShotDropped {
        /// Side whose shot was dropped.
        origin: BulletOrigin,
    },
    /// Confirms that an enemy moved between two positions.
    EnemyAdvanced {
        /// Identifier of the enemy that moved.
        enemy: EnemyId,
        /// Position before the step.
        from: Vec2,
        /// Position after the step.
        to: Vec2,
    },
    /// Reports that a wall turned an enemy around.
    EnemyReversed {
        /// Identifier of the enemy that reversed.
        enemy: EnemyId,
        /// Heading adopted after the reversal.
        heading: Heading,
    },
    /// Reports that a bullet killed an enemy.
    EnemyKilled {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Slot of the bullet that hit it; the slot is released.
        bullet: BulletId,
    },
    /// Reports that a bullet left play without hitting an enemy.
    BulletExpired {
        /// Slot released by the bullet.
        bullet: BulletId,
        /// Reason the bullet was removed.
        cause: ExpiryCause,
    },
}

/// Reasons a bullet leaves play without hitting an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpiryCause {
    /// The bullet's collision box overlapped a wall.
    Wall,
    /// The bullet left the level's outer bounds.
    OutOfBounds,
}

/// Side that fired a bullet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BulletOrigin {
    /// Fired by the player.
    Player,
    /// Fired by an enemy.
    Enemy,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing y.
    North,
    /// Movement toward increasing x.
    East,
    /// Movement toward increasing y.
    South,
    /// Movement toward decreasing x.
    West,
}

impl Direction {
    /// Unit vector pointing along the direction in world space.
    #[must_use]
    pub const fn unit_vector(self) -> Vec2 {
        match self {
            Self::North => Vec2::new(0.0, -1.0),
            Self::East => Vec2::new(1.0, 0.0),
            Self::South => Vec2::new(0.0, 1.0),
            Self::West => Vec2::new(-1.0, 0.0),
        }
    }
}

/// Held state of the four directional movement inputs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct HeldDirections {
    /// Whether the north input is held.
    pub north: bool,
    /// Whether the south input is held.
    pub south: bool,
    /// Whether the west input is held.
    pub west: bool,
    /// Whether the east input is held.
    pub east: bool,
}

impl HeldDirections {
    /// Held directions in the order the player resolves them: north, south, west, east.
    pub fn iter(self) -> impl Iterator<Item = Direction> {
        [
            (self.north, Direction::North),
            (self.south, Direction::South),
            (self.west, Direction::West),
            (self.east, Direction::East),
        ]
        .into_iter()
        .filter_map(|(held, direction)| held.then_some(direction))
    }
}

/// Player intent captured for a single frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerInput {
    /// Cursor position projected into world space.
    pub cursor_world: Vec2,
    /// Movement inputs held during the frame.
    pub held: HeldDirections,
    /// Whether the fire trigger was pressed on this frame.
    pub fire_pressed: bool,
}

impl PlayerInput {
    /// Input that aims at the provided point without moving or firing.
    #[must_use]
    pub const fn aiming_at(cursor_world: Vec2) -> Self {
        Self {
            cursor_world,
            held: HeldDirections {
                north: false,
                south: false,
                west: false,
                east: false,
            },
            fire_pressed: false,
        }
    }
}

/// Facing direction expressed in degrees, measured clockwise from +x in screen space.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd)]
pub struct Heading(f32);

impl Heading {
    /// Creates a heading from an angle in degrees.
    #[must_use]
    pub const fn from_degrees(degrees: f32) -> Self {
        Self(degrees)
    }

    /// Heading that points from `from` toward `to`.
    ///
    /// Coincident points produce a heading of zero degrees.
    #[must_use]
    pub fn toward(from: Vec2, to: Vec2) -> Self {
        let delta = to - from;
        Self(delta.y.atan2(delta.x).to_degrees())
    }

    /// Angle of the heading in degrees.
    #[must_use]
    pub const fn degrees(&self) -> f32 {
        self.0
    }

    /// Heading turned by 180 degrees, wrapped into `0.0..360.0`.
    #[must_use]
    pub fn reversed(self) -> Self {
        Self((self.0 + 180.0).rem_euclid(360.0))
    }

    /// Unit vector pointing along the heading.
    #[must_use]
    pub fn unit_vector(&self) -> Vec2 {
        let radians = self.0.to_radians();
        Vec2::new(radians.cos(), radians.sin())
    }

    /// Point reached by travelling `distance` from `origin` along the heading.
    #[must_use]
    pub fn advance(&self, origin: Vec2, distance: f32) -> Vec2 {
        origin + self.unit_vector() * distance
    }
}

/// Axis-aligned rectangle in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle from its upper-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle of the provided size centered on `center`.
    #[must_use]
    pub fn from_center(center: Vec2, width: f32, height: f32) -> Self {
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Reports whether the two rectangles overlap. Shared edges do not count.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Reports whether the point lies inside the rectangle, edges included.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }
}

/// Reports whether two circles overlap or touch.
#[must_use]
pub fn circles_intersect(center_a: Vec2, radius_a: f32, center_b: Vec2, radius_b: f32) -> bool {
    center_a.distance(center_b) <= radius_a + radius_b
}

/// Visual appearance applied to a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WallColor {
    red: u8,
    green: u8,
    blue: u8,
}

impl WallColor {
    /// Neutral gray used by every wall in the standard level.
    pub const GRAY: Self = Self::from_rgb(130, 130, 130);

    /// Creates a new wall color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

/// Unique identifier assigned to an enemy: its index in the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Identifier of a bullet pool slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletId(u32);

impl BulletId {
    /// Creates a new bullet identifier with the provided slot index.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Immutable representation of the player's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerSnapshot {
    /// Center of the player in world space.
    pub position: Vec2,
    /// Direction the player faces.
    pub heading: Heading,
    /// Distance the player travels per frame along a held direction.
    pub speed: f32,
}

/// Immutable representation of a single enemy's state used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemySnapshot {
    /// Unique identifier assigned to the enemy.
    pub id: EnemyId,
    /// Center of the enemy in world space.
    pub position: Vec2,
    /// Direction the enemy faces and travels.
    pub heading: Heading,
    /// Distance the enemy travels per frame.
    pub speed: f32,
    /// Whether the enemy is still alive. Dead enemies never act again.
    pub alive: bool,
    /// Whether a wall rejected the enemy's most recent step and turned it around.
    pub blocked: bool,
    /// Engaged frames counted since the enemy last fired.
    pub shoot_timer: u32,
}

/// Read-only snapshot describing every enemy in the roster, dead ones included.
#[derive(Clone, Debug, Default)]
pub struct EnemyView {
    snapshots: Vec<EnemySnapshot>,
}

impl EnemyView {
    /// Creates a new enemy view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<EnemySnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the captured enemy snapshots in roster order.
    pub fn iter(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter()
    }

    /// Iterator over the enemies that are still alive.
    pub fn living(&self) -> impl Iterator<Item = &EnemySnapshot> {
        self.snapshots.iter().filter(|snapshot| snapshot.alive)
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<EnemySnapshot> {
        self.snapshots
    }
}

/// Immutable representation of an active bullet used for queries.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletSnapshot {
    /// Pool slot holding the bullet.
    pub id: BulletId,
    /// Center of the bullet in world space.
    pub position: Vec2,
    /// Direction the bullet travels.
    pub heading: Heading,
    /// Distance the bullet travels per frame.
    pub speed: f32,
    /// Side that fired the bullet.
    pub origin: BulletOrigin,
}

/// Read-only snapshot describing the active bullets in slot order.
#[derive(Clone, Debug, Default)]
pub struct BulletView {
    snapshots: Vec<BulletSnapshot>,
}

impl BulletView {
    /// Creates a new bullet view from the provided snapshots.
    #[must_use]
    pub fn from_snapshots(mut snapshots: Vec<BulletSnapshot>) -> Self {
        snapshots.sort_by_key(|snapshot| snapshot.id);
        Self { snapshots }
    }

    /// Iterator over the active bullets in slot order.
    pub fn iter(&self) -> impl Iterator<Item = &BulletSnapshot> {
        self.snapshots.iter()
    }

    /// Number of active bullets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Reports whether no bullet is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Consumes the view, yielding the underlying snapshots.
    #[must_use]
    pub fn into_vec(self) -> Vec<BulletSnapshot> {
        self.snapshots
    }
}
