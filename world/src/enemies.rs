//! Enemy roster storage.

use glam::Vec2;
use topdown_shooter_core::{EnemyId, EnemySnapshot, Heading, ENEMY_COUNT, ENEMY_SPEED};

use crate::Body;

/// Spawn points of the standard roster, in identifier order.
pub(crate) const STANDARD_SPAWNS: [Vec2; ENEMY_COUNT] = [
    Vec2::new(500.0, 500.0),
    Vec2::new(3300.0, 500.0),
    Vec2::new(500.0, 2300.0),
    Vec2::new(600.0, 300.0),
    Vec2::new(300.0, 2500.0),
    Vec2::new(1300.0, 1300.0),
    Vec2::new(2300.0, 30.0),
    Vec2::new(900.0, 230.0),
];

#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) body: Body,
    pub(crate) alive: bool,
    pub(crate) blocked: bool,
    pub(crate) shoot_timer: u32,
}

impl Enemy {
    fn spawn(id: EnemyId, position: Vec2) -> Self {
        Self {
            id,
            body: Body {
                position,
                heading: Heading::from_degrees(0.0),
                speed: ENEMY_SPEED,
            },
            alive: true,
            blocked: false,
            shoot_timer: 0,
        }
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            position: self.body.position,
            heading: self.body.heading,
            speed: self.body.speed,
            alive: self.alive,
            blocked: self.blocked,
            shoot_timer: self.shoot_timer,
        }
    }
}

/// Builds one living enemy per spawn point; identifiers follow slice order.
pub(crate) fn spawn_roster(spawns: &[Vec2]) -> Vec<Enemy> {
    spawns
        .iter()
        .enumerate()
        .map(|(index, position)| Enemy::spawn(EnemyId::new(index as u32), *position))
        .collect()
}
