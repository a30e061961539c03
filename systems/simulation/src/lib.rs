#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Frame driver that runs the shooter's systems against the world in a fixed order.

use log::debug;
use topdown_shooter_core::{Command, Event, PlayerInput};
use topdown_shooter_system_enemy_ai::EnemyAi;
use topdown_shooter_system_player_control::PlayerControl;
use topdown_shooter_world::{self as world, query, World};

/// Owns the world and the pure systems and advances them one frame at a time.
#[derive(Debug)]
pub struct Simulation {
    world: World,
    player_control: PlayerControl,
    enemy_ai: EnemyAi,
    commands: Vec<Command>,
    events: Vec<Event>,
}

impl Simulation {
    /// Creates a simulation over the standard level.
    #[must_use]
    pub fn new() -> Self {
        Self::from_world(World::new())
    }

    /// Creates a simulation over a prepared world.
    #[must_use]
    pub fn from_world(world: World) -> Self {
        Self {
            world,
            player_control: PlayerControl::new(),
            enemy_ai: EnemyAi::new(),
            commands: Vec::new(),
            events: Vec::new(),
        }
    }

    /// Read-only access to the authoritative world.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Advances the simulation by one frame and returns the events it produced.
    ///
    /// The frame runs: tick, aim and fire, bullet advance, enemy behaviour,
    /// bullet hit resolution, then player movement.
    pub fn step(&mut self, input: &PlayerInput) -> &[Event] {
        self.events.clear();

        self.commands.push(Command::Tick);
        self.player_control.handle_aim(input, &mut self.commands);
        self.commands.push(Command::AdvanceBullets);
        self.flush();

        let enemies = query::enemy_view(&self.world);
        let player = query::player(&self.world);
        self.enemy_ai.handle(&enemies, &player, &mut self.commands);
        self.flush();

        self.commands.push(Command::ResolveBulletHits);
        self.player_control.handle_movement(input, &mut self.commands);
        self.flush();

        self.log_events();
        &self.events
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }
    }

    fn log_events(&self) {
        for event in &self.events {
            match event {
                Event::ShotDropped { origin } => {
                    debug!("bullet pool full, dropped {origin:?} shot");
                }
                Event::EnemyKilled { enemy, bullet } => {
                    debug!(
                        "enemy {} killed by bullet slot {}",
                        enemy.get(),
                        bullet.get()
                    );
                }
                _ => {}
            }
        }
    }
}

impl Default for Simulation {
    fn default() -> Self {
        Self::new()
    }
}
