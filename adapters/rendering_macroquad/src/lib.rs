#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for the top-down shooter.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! The shooter has no sound, so macroquad is used without its default
//! `audio` feature.

use anyhow::Result;
use glam::Vec2;
use log::info;
use macroquad::input::{
    is_key_down, is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton,
};
use std::{
    ops::{AddAssign, Div},
    time::{Duration, Instant},
};
use topdown_shooter_core::{HeldDirections, Rect};
use topdown_shooter_rendering::{
    BulletPresentation, Camera, EnemyPresentation, FrameInput, FrameSimulationBreakdown,
    PlayerPresentation, Presentation, RenderingBackend, Scene, SceneWall,
};

/// Keys sampled once per frame before the scene is updated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyboardState {
    /// `Escape` quits the game loop.
    quit_requested: bool,
    /// `W`, `S`, `A` and `D` move the player.
    held: HeldDirections,
}

impl KeyboardState {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape),
            held: HeldDirections {
                north: is_key_down(KeyCode::W),
                south: is_key_down(KeyCode::S),
                west: is_key_down(KeyCode::A),
                east: is_key_down(KeyCode::D),
            },
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    vsync: bool,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            vsync: true,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a vsynced backend that does not log frame timings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Chooses between presenting once per display refresh and presenting as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.vsync = enabled;
        self
    }

    /// Configures whether the backend logs frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Wall-clock time spent in each phase of one shooter frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct PhaseTimings {
    /// Keyboard, mouse and cursor projection.
    input: Duration,
    /// `Simulation::step` for the frame.
    simulation: Duration,
    /// Copying world snapshots into the scene.
    scene: Duration,
    /// Clearing the window and drawing the scene.
    draw: Duration,
}

impl PhaseTimings {
    fn busy(&self) -> Duration {
        self.input + self.simulation + self.scene + self.draw
    }
}

impl AddAssign for PhaseTimings {
    fn add_assign(&mut self, other: Self) {
        self.input += other.input;
        self.simulation += other.simulation;
        self.scene += other.scene;
        self.draw += other.draw;
    }
}

impl Div<u32> for PhaseTimings {
    type Output = Self;

    fn div(self, frames: u32) -> Self {
        let frames = frames.max(1);
        Self {
            input: self.input / frames,
            simulation: self.simulation / frames,
            scene: self.scene / frames,
            draw: self.draw / frames,
        }
    }
}

/// Statistics for the last second of frames.
#[derive(Clone, Copy, Debug, PartialEq)]
struct FrameStats {
    fps: f32,
    slowest_frame: Duration,
    average: PhaseTimings,
}

/// Accumulates frame times and reports once per second of wall-clock frame time.
#[derive(Debug, Default)]
struct FrameClock {
    elapsed: Duration,
    frames: u32,
    slowest_frame: Duration,
    totals: PhaseTimings,
}

impl FrameClock {
    fn tick(&mut self, frame_dt: Duration, phases: PhaseTimings) -> Option<FrameStats> {
        self.elapsed += frame_dt;
        self.frames = self.frames.saturating_add(1);
        self.slowest_frame = self.slowest_frame.max(frame_dt);
        self.totals += phases;

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let stats = FrameStats {
            fps: self.frames as f32 / self.elapsed.as_secs_f32(),
            slowest_frame: self.slowest_frame,
            average: self.totals / self.frames,
        };
        *self = Self::default();
        Some(stats)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) -> FrameSimulationBreakdown + 'static,
    {
        let Self { vsync, show_fps } = self;

        let Presentation {
            window_title,
            clear_color,
            viewport,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: viewport.width().round() as i32,
            window_height: viewport.height().round() as i32,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        config.platform.swap_interval = Some(i32::from(vsync));

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut clock = FrameClock::default();

            loop {
                let input_start = Instant::now();
                let keyboard = KeyboardState::poll();
                if keyboard.quit_requested {
                    info!("escape pressed, closing window");
                    break;
                }
                let (cursor_x, cursor_y) = mouse_position();
                let frame_input = gather_frame_input_from_observations(
                    &scene.camera,
                    Vec2::new(cursor_x, cursor_y),
                    keyboard.held,
                    is_mouse_button_pressed(MouseButton::Left),
                );
                let input = input_start.elapsed();

                let frame_dt =
                    Duration::from_secs_f32(macroquad::time::get_frame_time().max(0.0));
                let FrameSimulationBreakdown {
                    simulation,
                    scene_population,
                } = update_scene(frame_dt, frame_input, &mut scene);

                let draw_start = Instant::now();
                macroquad::window::clear_background(background);
                draw_walls(&scene.walls, &scene.camera);
                draw_player(&scene.player, &scene.camera);
                draw_enemies(&scene.enemies, &scene.camera);
                draw_bullets(&scene.bullets, &scene.camera);

                let stats = clock.tick(
                    frame_dt,
                    PhaseTimings {
                        input,
                        simulation,
                        scene: scene_population,
                        draw: draw_start.elapsed(),
                    },
                );
                if let Some(stats) = stats.filter(|_| show_fps) {
                    log_frame_stats(&stats);
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn log_frame_stats(stats: &FrameStats) {
    let millis = |duration: Duration| duration.as_secs_f64() * 1_000.0;
    let average = &stats.average;
    info!(
        "{:.1} fps, slowest frame {:.2}ms | input {:.2}ms sim {:.2}ms scene {:.2}ms draw {:.2}ms (busy {:.2}ms)",
        stats.fps,
        millis(stats.slowest_frame),
        millis(average.input),
        millis(average.simulation),
        millis(average.scene),
        millis(average.draw),
        millis(average.busy()),
    );
}

fn gather_frame_input_from_observations(
    camera: &Camera,
    cursor_screen: Vec2,
    held: HeldDirections,
    fire_pressed: bool,
) -> FrameInput {
    FrameInput {
        cursor_world_space: camera.screen_to_world(cursor_screen),
        held,
        fire_pressed,
    }
}

/// Screen-space upper-left corner and size of a world rectangle.
fn project_rect(camera: &Camera, rect: Rect) -> (Vec2, Vec2) {
    let corner = camera.world_to_screen(Vec2::new(rect.x(), rect.y()));
    let size = Vec2::new(rect.width(), rect.height()) * camera.zoom();
    (corner, size)
}

/// Screen-space center and radius of a world circle.
fn project_circle(camera: &Camera, center: Vec2, radius: f32) -> (Vec2, f32) {
    (camera.world_to_screen(center), radius * camera.zoom())
}

fn draw_circle(camera: &Camera, center: Vec2, radius: f32, color: topdown_shooter_rendering::Color) {
    let (center, radius) = project_circle(camera, center, radius);
    macroquad::shapes::draw_circle(center.x, center.y, radius, to_macroquad_color(color));
}

fn draw_walls(walls: &[SceneWall], camera: &Camera) {
    for wall in walls {
        let (corner, size) = project_rect(camera, wall.bounds);
        macroquad::shapes::draw_rectangle(
            corner.x,
            corner.y,
            size.x,
            size.y,
            to_macroquad_color(wall.color),
        );
    }
}

fn draw_player(player: &PlayerPresentation, camera: &Camera) {
    draw_circle(camera, player.center, player.radius, player.color);
    draw_circle(
        camera,
        player.indicator_center(),
        PlayerPresentation::INDICATOR_RADIUS,
        PlayerPresentation::INDICATOR_COLOR,
    );
}

fn draw_enemies(enemies: &[EnemyPresentation], camera: &Camera) {
    for enemy in enemies {
        draw_circle(camera, enemy.center, enemy.radius, enemy.color);
    }
}

fn draw_bullets(bullets: &[BulletPresentation], camera: &Camera) {
    for bullet in bullets {
        draw_circle(camera, bullet.center, bullet.radius, bullet.color);
    }
}

fn to_macroquad_color(color: topdown_shooter_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
