#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for the top-down shooter.

mod bullets;
mod enemies;
mod level;

use glam::Vec2;
use topdown_shooter_core::{
    BulletOrigin, Command, EnemyId, Event, ExpiryCause, Heading, Rect,
    BULLET_BOX_SIZE, ENEMY_BULLET_SPEED, ENTITY_BOX_SIZE, ENTITY_RADIUS, MUZZLE_OFFSET,
    PLAYER_BULLET_SPEED, PLAYER_SPEED,
};

use self::bullets::{Bullet, BulletPool};
use self::enemies::{spawn_roster, Enemy, STANDARD_SPAWNS};
pub use self::level::{Level, Wall};

/// Location where the player appears in the standard level.
pub const PLAYER_SPAWN: Vec2 = Vec2::new(2250.0, 1950.0);

/// Position, facing, and per-frame speed shared by every moving entity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Body {
    pub(crate) position: Vec2,
    pub(crate) heading: Heading,
    pub(crate) speed: f32,
}

#[derive(Clone, Debug)]
struct Player {
    body: Body,
}

/// Represents the authoritative shooter world state.
#[derive(Clone, Debug)]
pub struct World {
    level: Level,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: BulletPool,
    frame: u64,
}

impl World {
    /// Creates the standard level with the player and the full enemy roster.
    #[must_use]
    pub fn new() -> Self {
        Self::with_layout(Level::standard(), PLAYER_SPAWN, &STANDARD_SPAWNS)
    }

    /// Creates a world with a custom level, player spawn, and enemy spawn points.
    ///
    /// Enemy identifiers follow the order of `enemy_spawns`.
    #[must_use]
    pub fn with_layout(level: Level, player_spawn: Vec2, enemy_spawns: &[Vec2]) -> Self {
        Self {
            level,
            player: Player {
                body: Body {
                    position: player_spawn,
                    heading: Heading::from_degrees(0.0),
                    speed: PLAYER_SPEED,
                },
            },
            enemies: spawn_roster(enemy_spawns),
            bullets: BulletPool::new(),
            frame: 0,
        }
    }

    fn living_enemy_mut(&mut self, enemy_id: EnemyId) -> Option<&mut Enemy> {
        self.enemies
            .get_mut(enemy_id.get() as usize)
            .filter(|enemy| enemy.alive)
    }

    fn spawn_bullet(&mut self, body: Body, origin: BulletOrigin, out_events: &mut Vec<Event>) {
        match self.bullets.claim(Bullet { body, origin }) {
            Some(bullet) => out_events.push(Event::BulletFired { bullet, origin }),
            None => out_events.push(Event::ShotDropped { origin }),
        }
    }

    fn resolve_bullet_hits(&mut self, out_events: &mut Vec<Event>) {
        for enemy in self.enemies.iter_mut().filter(|enemy| enemy.alive) {
            let hit = self.bullets.first_hit(
                enemy.body.position,
                ENTITY_RADIUS,
                BulletOrigin::Player,
            );
            if let Some(bullet) = hit {
                enemy.alive = false;
                let _ = self.bullets.release(bullet);
                out_events.push(Event::EnemyKilled {
                    enemy: enemy.id,
                    bullet,
                });
            }
        }

        let bounds = self.level.bounds();
        let mut expired = [None; topdown_shooter_core::BULLET_POOL_CAPACITY];
        for (slot, (bullet_id, bullet)) in expired.iter_mut().zip(self.bullets.iter_active()) {
            let position = bullet.body.position;
            let collision_box = Rect::from_center(position, BULLET_BOX_SIZE, BULLET_BOX_SIZE);
            *slot = if self.level.blocks(&collision_box) {
                Some((bullet_id, ExpiryCause::Wall))
            } else if !bounds.contains_point(position) {
                Some((bullet_id, ExpiryCause::OutOfBounds))
            } else {
                None
            };
        }

        for (bullet, cause) in expired.into_iter().flatten() {
            if self.bullets.release(bullet) {
                out_events.push(Event::BulletExpired { bullet, cause });
            }
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

/// Moves `position` by `delta` unless the entity's collision box would overlap a wall there.
fn try_translate(position: Vec2, delta: Vec2, level: &Level) -> Option<Vec2> {
    let candidate = position + delta;
    let collision_box = Rect::from_center(candidate, ENTITY_BOX_SIZE, ENTITY_BOX_SIZE);
    (!level.blocks(&collision_box)).then_some(candidate)
}

/// Applies the provided command to the world, mutating state deterministically.
///
/// Commands addressed to dead or unknown enemies are ignored.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::Tick => {
            world.frame = world.frame.saturating_add(1);
            out_events.push(Event::FrameAdvanced { frame: world.frame });
        }
        Command::AimPlayer { target } => {
            let body = &mut world.player.body;
            body.heading = Heading::toward(body.position, target);
        }
        Command::FirePlayerBullet => {
            let body = Body {
                speed: PLAYER_BULLET_SPEED,
                ..world.player.body
            };
            world.spawn_bullet(body, BulletOrigin::Player, out_events);
        }
        Command::MovePlayer { direction } => {
            let body = &mut world.player.body;
            let from = body.position;
            let delta = direction.unit_vector() * body.speed;
            match try_translate(from, delta, &world.level) {
                Some(to) => {
                    body.position = to;
                    out_events.push(Event::PlayerMoved {
                        direction,
                        from,
                        to,
                    });
                }
                None => out_events.push(Event::PlayerBlocked { direction }),
            }
        }
        Command::AdvanceBullets => world.bullets.advance_all(),
        Command::SteerEnemy { enemy, heading } => {
            if let Some(enemy) = world.living_enemy_mut(enemy) {
                enemy.body.heading = heading;
            }
        }
        Command::MoveEnemy { enemy: enemy_id } => {
            let World { level, enemies, .. } = world;
            let Some(enemy) = enemies
                .get_mut(enemy_id.get() as usize)
                .filter(|enemy| enemy.alive)
            else {
                return;
            };

            let from = enemy.body.position;
            let delta = enemy.body.heading.unit_vector() * enemy.body.speed;
            match try_translate(from, delta, level) {
                Some(to) => {
                    enemy.body.position = to;
                    enemy.blocked = false;
                    out_events.push(Event::EnemyAdvanced {
                        enemy: enemy_id,
                        from,
                        to,
                    });
                }
                None => {
                    enemy.body.heading = enemy.body.heading.reversed();
                    enemy.blocked = true;
                    out_events.push(Event::EnemyReversed {
                        enemy: enemy_id,
                        heading: enemy.body.heading,
                    });
                }
            }
        }
        Command::AdvanceShootTimer { enemy } => {
            if let Some(enemy) = world.living_enemy_mut(enemy) {
                enemy.shoot_timer = enemy.shoot_timer.saturating_add(1);
            }
        }
        Command::FireEnemyBullet { enemy, heading } => {
            let Some(enemy) = world.living_enemy_mut(enemy) else {
                return;
            };
            enemy.shoot_timer = 0;
            let body = Body {
                position: heading.advance(enemy.body.position, MUZZLE_OFFSET),
                heading,
                speed: ENEMY_BULLET_SPEED,
            };
            world.spawn_bullet(body, BulletOrigin::Enemy, out_events);
        }
        Command::ResolveBulletHits => world.resolve_bullet_hits(out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use topdown_shooter_core::{BulletId, BulletView, EnemyView, PlayerSnapshot};

    use super::{Level, World};

    /// Provides read-only access to the level walls and bounds.
    #[must_use]
    pub fn level(world: &World) -> &Level {
        &world.level
    }

    /// Number of frames simulated so far.
    #[must_use]
    pub fn frame(world: &World) -> u64 {
        world.frame
    }

    /// Captures the player's current state.
    #[must_use]
    pub fn player(world: &World) -> PlayerSnapshot {
        let body = world.player.body;
        PlayerSnapshot {
            position: body.position,
            heading: body.heading,
            speed: body.speed,
        }
    }

    /// Captures a read-only view of every enemy, dead ones included.
    #[must_use]
    pub fn enemy_view(world: &World) -> EnemyView {
        EnemyView::from_snapshots(world.enemies.iter().map(|enemy| enemy.snapshot()).collect())
    }

    /// Captures a read-only view of the active bullets.
    #[must_use]
    pub fn bullet_view(world: &World) -> BulletView {
        BulletView::from_snapshots(world.bullets.snapshots())
    }

    /// Reports whether the bullet slot currently holds an active bullet.
    #[must_use]
    pub fn bullet_active(world: &World, bullet: BulletId) -> bool {
        world.bullets.is_active(bullet)
    }

    /// Number of bullet slots available for new shots.
    #[must_use]
    pub fn free_bullet_slots(world: &World) -> usize {
        world.bullets.free_slots()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use topdown_shooter_core::{BulletId, Direction, ENEMY_COUNT, LEVEL_WIDTH};

    fn open_world(player: Vec2, enemies: &[Vec2]) -> World {
        World::with_layout(Level::new(Vec::new()), player, enemies)
    }

    fn run(world: &mut World, commands: &[Command]) -> Vec<Event> {
        let mut events = Vec::new();
        for command in commands {
            apply(world, *command, &mut events);
        }
        events
    }

    #[test]
    fn new_world_uses_standard_layout() {
        let world = World::new();

        assert_eq!(query::player(&world).position, PLAYER_SPAWN);
        assert_eq!(query::player(&world).speed, PLAYER_SPEED);
        assert_eq!(query::enemy_view(&world).living().count(), ENEMY_COUNT);
        assert!(query::bullet_view(&world).is_empty());
        assert_eq!(query::level(&world).walls().len(), 17);
        assert_eq!(query::frame(&world), 0);
    }

    #[test]
    fn tick_counts_frames() {
        let mut world = World::new();

        let events = run(&mut world, &[Command::Tick, Command::Tick]);

        assert_eq!(
            events,
            vec![
                Event::FrameAdvanced { frame: 1 },
                Event::FrameAdvanced { frame: 2 }
            ]
        );
        assert_eq!(query::frame(&world), 2);
    }

    #[test]
    fn aim_points_player_at_target() {
        let mut world = open_world(Vec2::new(100.0, 100.0), &[]);

        let _ = run(
            &mut world,
            &[Command::AimPlayer {
                target: Vec2::new(100.0, 200.0),
            }],
        );

        assert!((query::player(&world).heading.degrees() - 90.0).abs() < 1e-4);
    }

    #[test]
    fn player_bullet_spawns_at_player_with_player_heading() {
        let mut world = open_world(Vec2::new(100.0, 100.0), &[]);

        let events = run(
            &mut world,
            &[
                Command::AimPlayer {
                    target: Vec2::new(300.0, 100.0),
                },
                Command::FirePlayerBullet,
            ],
        );

        assert_eq!(
            events,
            vec![Event::BulletFired {
                bullet: BulletId::new(0),
                origin: BulletOrigin::Player
            }]
        );
        let bullets = query::bullet_view(&world).into_vec();
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].position, Vec2::new(100.0, 100.0));
        assert_eq!(bullets[0].speed, PLAYER_BULLET_SPEED);
        assert_eq!(bullets[0].heading.degrees(), 0.0);
    }

    #[test]
    fn player_move_blocked_by_wall_keeps_position() {
        let wall = Wall::new(
            Rect::new(0.0, 0.0, 200.0, 88.0),
            topdown_shooter_core::WallColor::GRAY,
        );
        let mut world = World::with_layout(Level::new(vec![wall]), Vec2::new(100.0, 100.0), &[]);

        let events = run(
            &mut world,
            &[
                Command::MovePlayer {
                    direction: Direction::North,
                },
                Command::MovePlayer {
                    direction: Direction::East,
                },
            ],
        );

        assert_eq!(
            events,
            vec![
                Event::PlayerBlocked {
                    direction: Direction::North
                },
                Event::PlayerMoved {
                    direction: Direction::East,
                    from: Vec2::new(100.0, 100.0),
                    to: Vec2::new(104.0, 100.0),
                },
            ]
        );
        assert_eq!(query::player(&world).position, Vec2::new(104.0, 100.0));
    }

    #[test]
    fn enemy_reverses_instead_of_entering_wall() {
        let wall = Wall::new(
            Rect::new(111.0, 0.0, 50.0, 500.0),
            topdown_shooter_core::WallColor::GRAY,
        );
        let mut world = World::with_layout(
            Level::new(vec![wall]),
            Vec2::new(1000.0, 1000.0),
            &[Vec2::new(100.0, 100.0)],
        );
        let enemy = EnemyId::new(0);

        let events = run(&mut world, &[Command::MoveEnemy { enemy }]);

        assert_eq!(
            events,
            vec![Event::EnemyReversed {
                enemy,
                heading: Heading::from_degrees(180.0)
            }]
        );
        let snapshot = query::enemy_view(&world).into_vec()[0];
        assert_eq!(snapshot.position, Vec2::new(100.0, 100.0));
        assert!(snapshot.blocked);

        let events = run(&mut world, &[Command::MoveEnemy { enemy }]);

        assert!(matches!(events[..], [Event::EnemyAdvanced { .. }]));
        let snapshot = query::enemy_view(&world).into_vec()[0];
        assert!((snapshot.position - Vec2::new(98.0, 100.0)).length() < 1e-4);
        assert!(!snapshot.blocked);
    }

    #[test]
    fn enemy_fires_from_muzzle_and_resets_timer() {
        let mut world = open_world(Vec2::new(1000.0, 1000.0), &[Vec2::new(100.0, 100.0)]);
        let enemy = EnemyId::new(0);

        let _ = run(
            &mut world,
            &[
                Command::AdvanceShootTimer { enemy },
                Command::AdvanceShootTimer { enemy },
            ],
        );
        assert_eq!(query::enemy_view(&world).into_vec()[0].shoot_timer, 2);

        let events = run(
            &mut world,
            &[Command::FireEnemyBullet {
                enemy,
                heading: Heading::from_degrees(90.0),
            }],
        );

        assert_eq!(
            events,
            vec![Event::BulletFired {
                bullet: BulletId::new(0),
                origin: BulletOrigin::Enemy
            }]
        );
        let shooter = query::enemy_view(&world).into_vec()[0];
        assert_eq!(shooter.shoot_timer, 0);
        assert_eq!(shooter.heading, Heading::default());
        let bullet = query::bullet_view(&world).into_vec()[0];
        assert!((bullet.position - Vec2::new(100.0, 120.0)).length() < 1e-4);
        assert_eq!(bullet.heading, Heading::from_degrees(90.0));
        assert_eq!(bullet.speed, ENEMY_BULLET_SPEED);
    }

    #[test]
    fn enemy_bullets_do_not_kill_enemies() {
        let mut world = open_world(Vec2::new(1000.0, 1000.0), &[Vec2::new(100.0, 100.0)]);
        let enemy = EnemyId::new(0);

        let events = run(
            &mut world,
            &[
                Command::FireEnemyBullet {
                    enemy,
                    heading: Heading::default(),
                },
                Command::ResolveBulletHits,
            ],
        );

        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::EnemyKilled { .. })));
        assert!(query::enemy_view(&world).into_vec()[0].alive);
        assert_eq!(query::bullet_view(&world).len(), 1);
    }

    #[test]
    fn player_bullet_kills_enemy_and_is_released() {
        let mut world = open_world(Vec2::new(100.0, 100.0), &[Vec2::new(120.0, 100.0)]);

        let events = run(
            &mut world,
            &[
                Command::AimPlayer {
                    target: Vec2::new(120.0, 100.0),
                },
                Command::FirePlayerBullet,
                Command::ResolveBulletHits,
            ],
        );

        assert!(events.contains(&Event::EnemyKilled {
            enemy: EnemyId::new(0),
            bullet: BulletId::new(0),
        }));
        assert!(!query::enemy_view(&world).into_vec()[0].alive);
        assert!(!query::bullet_active(&world, BulletId::new(0)));
    }

    #[test]
    fn dead_enemies_ignore_commands() {
        let mut world = open_world(Vec2::new(100.0, 100.0), &[Vec2::new(120.0, 100.0)]);
        let enemy = EnemyId::new(0);
        let _ = run(
            &mut world,
            &[
                Command::AimPlayer {
                    target: Vec2::new(120.0, 100.0),
                },
                Command::FirePlayerBullet,
                Command::ResolveBulletHits,
            ],
        );
        let before = query::enemy_view(&world).into_vec()[0];

        let events = run(
            &mut world,
            &[
                Command::SteerEnemy {
                    enemy,
                    heading: Heading::from_degrees(45.0),
                },
                Command::MoveEnemy { enemy },
                Command::AdvanceShootTimer { enemy },
                Command::FireEnemyBullet {
                    enemy,
                    heading: Heading::default(),
                },
            ],
        );

        assert!(events.is_empty());
        assert_eq!(query::enemy_view(&world).into_vec()[0], before);
        assert!(query::bullet_view(&world).is_empty());
    }

    #[test]
    fn bullets_leave_play_through_walls_and_bounds() {
        let wall = Wall::new(
            Rect::new(0.0, 0.0, 50.0, 50.0),
            topdown_shooter_core::WallColor::GRAY,
        );
        let mut world = World::with_layout(
            Level::new(vec![wall]),
            Vec2::new(LEVEL_WIDTH - 5.0, 500.0),
            &[],
        );

        let _ = run(
            &mut world,
            &[
                Command::AimPlayer {
                    target: Vec2::new(LEVEL_WIDTH + 100.0, 500.0),
                },
                Command::FirePlayerBullet,
                Command::AdvanceBullets,
            ],
        );
        let events = run(&mut world, &[Command::ResolveBulletHits]);

        assert_eq!(
            events,
            vec![Event::BulletExpired {
                bullet: BulletId::new(0),
                cause: ExpiryCause::OutOfBounds
            }]
        );

        let mut walled = World::with_layout(
            Level::new(vec![wall]),
            Vec2::new(40.0, 60.0),
            &[],
        );
        let events = run(
            &mut walled,
            &[
                Command::AimPlayer {
                    target: Vec2::new(40.0, 0.0),
                },
                Command::FirePlayerBullet,
                Command::AdvanceBullets,
                Command::ResolveBulletHits,
            ],
        );
        assert!(events.contains(&Event::BulletExpired {
            bullet: BulletId::new(0),
            cause: ExpiryCause::Wall
        }));
        assert!(query::bullet_view(&walled).is_empty());
    }

    #[test]
    fn full_pool_drops_shot() {
        let mut world = open_world(Vec2::new(500.0, 500.0), &[]);
        let volley = [Command::FirePlayerBullet; topdown_shooter_core::BULLET_POOL_CAPACITY];
        let _ = run(&mut world, &volley);
        assert_eq!(query::free_bullet_slots(&world), 0);

        let events = run(&mut world, &[Command::FirePlayerBullet]);

        assert_eq!(
            events,
            vec![Event::ShotDropped {
                origin: BulletOrigin::Player
            }]
        );
    }
}
