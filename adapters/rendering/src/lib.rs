#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for top-down shooter adapters.

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use thiserror::Error;
use topdown_shooter_core::{
    HeldDirections, Heading, PlayerInput, Rect, WallColor, BULLET_RADIUS, ENTITY_RADIUS,
    MUZZLE_OFFSET,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Off-white used to clear the background.
    pub const RAY_WHITE: Self = Self::from_rgb_u8(245, 245, 245);
    /// Fill color of the player.
    pub const BLUE: Self = Self::from_rgb_u8(0, 121, 241);
    /// Fill color of enemies and bullets.
    pub const RED: Self = Self::from_rgb_u8(230, 41, 55);
    /// Fill color of the player's facing indicator.
    pub const BLACK: Self = Self::from_rgb_u8(0, 0, 0);

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

impl From<WallColor> for Color {
    fn from(color: WallColor) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Cursor position projected through the scene camera into world units.
    pub cursor_world_space: Vec2,
    /// Movement keys held during the frame.
    pub held: HeldDirections,
    /// Whether the fire button was pressed on this frame.
    pub fire_pressed: bool,
}

impl FrameInput {
    /// Converts the adapter snapshot into the simulation's input contract.
    #[must_use]
    pub const fn player_input(&self) -> PlayerInput {
        PlayerInput {
            cursor_world: self.cursor_world_space,
            held: self.held,
            fire_pressed: self.fire_pressed,
        }
    }
}

/// Size of the window area the scene is drawn into, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f32,
    height: f32,
}

impl Viewport {
    /// Creates a viewport, rejecting sizes that are not positive and finite.
    pub fn new(width: f32, height: f32) -> Result<Self, RenderingError> {
        let valid = |value: f32| value.is_finite() && value > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RenderingError::InvalidViewport { width, height });
        }
        Ok(Self { width, height })
    }

    /// Horizontal extent in pixels.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent in pixels.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Middle of the viewport in screen space.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Two-dimensional camera that keeps a world-space target under a screen-space offset.
///
/// A world point `p` is drawn at `(p - target) * zoom + offset`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    target: Vec2,
    offset: Vec2,
    zoom: f32,
}

impl Camera {
    /// Creates a camera centred on the viewport looking at the world origin.
    pub fn new(viewport: Viewport, zoom: f32) -> Result<Self, RenderingError> {
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(RenderingError::InvalidZoom { zoom });
        }
        Ok(Self {
            target: Vec2::ZERO,
            offset: viewport.center(),
            zoom,
        })
    }

    /// Re-centres the camera on the provided world position.
    pub fn follow(&mut self, target: Vec2) {
        self.target = target;
    }

    /// World position shown at the camera offset.
    #[must_use]
    pub const fn target(&self) -> Vec2 {
        self.target
    }

    /// Scale applied to world distances.
    #[must_use]
    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// Projects a world-space point into screen space.
    #[must_use]
    pub fn world_to_screen(&self, point: Vec2) -> Vec2 {
        (point - self.target) * self.zoom + self.offset
    }

    /// Projects a screen-space point back into world space.
    #[must_use]
    pub fn screen_to_world(&self, point: Vec2) -> Vec2 {
        (point - self.offset) / self.zoom + self.target
    }
}

/// Wall rectangle drawn in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneWall {
    /// Area covered by the wall.
    pub bounds: Rect,
    /// Fill color of the wall.
    pub color: Color,
}

impl SceneWall {
    /// Creates a new wall descriptor.
    #[must_use]
    pub const fn new(bounds: Rect, color: Color) -> Self {
        Self { bounds, color }
    }
}

/// Player body plus the dot that marks where it faces.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Center of the player's body in world space.
    pub center: Vec2,
    /// Direction the player faces.
    pub heading: Heading,
    /// Radius of the body.
    pub radius: f32,
    /// Fill color of the body.
    pub color: Color,
}

impl PlayerPresentation {
    /// Radius of the facing indicator.
    pub const INDICATOR_RADIUS: f32 = 5.0;
    /// Fill color of the facing indicator.
    pub const INDICATOR_COLOR: Color = Color::BLACK;

    /// Creates a player descriptor with the standard body size and color.
    #[must_use]
    pub const fn new(center: Vec2, heading: Heading) -> Self {
        Self {
            center,
            heading,
            radius: ENTITY_RADIUS,
            color: Color::BLUE,
        }
    }

    /// Center of the facing indicator, one muzzle offset ahead of the body.
    #[must_use]
    pub fn indicator_center(&self) -> Vec2 {
        self.heading.advance(self.center, MUZZLE_OFFSET)
    }
}

/// Living enemy drawn as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Center of the enemy in world space.
    pub center: Vec2,
    /// Radius of the body.
    pub radius: f32,
    /// Fill color of the body.
    pub color: Color,
}

impl EnemyPresentation {
    /// Creates an enemy descriptor with the standard size and color.
    #[must_use]
    pub const fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: ENTITY_RADIUS,
            color: Color::RED,
        }
    }
}

/// Active bullet drawn as a filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletPresentation {
    /// Center of the bullet in world space.
    pub center: Vec2,
    /// Radius of the bullet.
    pub radius: f32,
    /// Fill color of the bullet.
    pub color: Color,
}

impl BulletPresentation {
    /// Creates a bullet descriptor with the standard size and color.
    #[must_use]
    pub const fn new(center: Vec2) -> Self {
        Self {
            center,
            radius: BULLET_RADIUS,
            color: Color::RED,
        }
    }
}

/// Scene description combining the camera, level walls and inhabitants.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Camera used to project world space onto the screen.
    pub camera: Camera,
    /// Walls of the level in authoring order.
    pub walls: Vec<SceneWall>,
    /// The player.
    pub player: PlayerPresentation,
    /// Enemies that are still alive.
    pub enemies: Vec<EnemyPresentation>,
    /// Bullets currently in flight.
    pub bullets: Vec<BulletPresentation>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        camera: Camera,
        walls: Vec<SceneWall>,
        player: PlayerPresentation,
        enemies: Vec<EnemyPresentation>,
        bullets: Vec<BulletPresentation>,
    ) -> Self {
        Self {
            camera,
            walls,
            player,
            enemies,
            bullets,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Requested window size.
    pub viewport: Viewport,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, viewport: Viewport, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            viewport,
            scene,
        }
    }
}

/// Time spent by the update closure, reported back to the backend for frame metrics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameSimulationBreakdown {
    /// Time spent advancing the simulation.
    pub simulation: Duration,
    /// Time spent copying world state into the scene.
    pub scene_population: Duration,
}

/// Rendering backend capable of presenting shooter scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and mutates the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Camera zoom must be positive and finite.
    #[error("camera zoom must be positive and finite (received {zoom})")]
    InvalidZoom {
        /// Provided zoom that failed validation.
        zoom: f32,
    },
    /// Viewport dimensions must be positive and finite.
    #[error("viewport must have a positive size (received {width}x{height})")]
    InvalidViewport {
        /// Provided width that failed validation.
        width: f32,
        /// Provided height that failed validation.
        height: f32,
    },
}
