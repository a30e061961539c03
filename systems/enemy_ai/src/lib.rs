#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic enemy behaviour: patrol until the player comes close, then
//! turn toward the player, close in, and fire on a fixed cadence.

use topdown_shooter_core::{
    Command, EnemySnapshot, EnemyView, Heading, PlayerSnapshot, ENEMY_AGGRO_RADIUS,
    ENEMY_SHOOT_DELAY_FRAMES,
};

/// Sub-behaviour a living enemy follows during a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stance {
    /// Walks along its heading and turns around at walls.
    Patrol,
    /// Faces and chases the player while counting toward its next shot.
    Engaged,
}

impl Stance {
    /// Chooses the stance an enemy adopts given the player's position.
    #[must_use]
    pub fn of(enemy: &EnemySnapshot, player: &PlayerSnapshot) -> Self {
        if enemy.position.distance(player.position) < ENEMY_AGGRO_RADIUS {
            Self::Engaged
        } else {
            Self::Patrol
        }
    }
}

/// Pure system that reads enemy and player snapshots and emits enemy commands.
#[derive(Debug, Default)]
pub struct EnemyAi;

impl EnemyAi {
    /// Creates a new enemy AI system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the commands for every living enemy in roster order.
    ///
    /// Shots always leave toward the player, even on a frame where the enemy
    /// is walking away from a wall. Dead enemies produce nothing. The world applies the wall policy, so the
    /// system only expresses intent.
    pub fn handle(&mut self, enemies: &EnemyView, player: &PlayerSnapshot, out: &mut Vec<Command>) {
        for enemy in enemies.living() {
            let id = enemy.id;
            match Stance::of(enemy, player) {
                Stance::Patrol => out.push(Command::MoveEnemy { enemy: id }),
                Stance::Engaged => {
                    let aim = Heading::toward(enemy.position, player.position);
                    // A blocked enemy backs off one step along its reversed heading
                    // before turning back toward the player.
                    if !enemy.blocked {
                        out.push(Command::SteerEnemy {
                            enemy: id,
                            heading: aim,
                        });
                    }
                    out.push(Command::MoveEnemy { enemy: id });
                    out.push(Command::AdvanceShootTimer { enemy: id });
                    if enemy.shoot_timer.saturating_add(1) >= ENEMY_SHOOT_DELAY_FRAMES {
                        out.push(Command::FireEnemyBullet {
                            enemy: id,
                            heading: aim,
                        });
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use topdown_shooter_core::{EnemyId, ENEMY_SPEED, PLAYER_SPEED};

    fn player_at(position: Vec2) -> PlayerSnapshot {
        PlayerSnapshot {
            position,
            heading: Heading::default(),
            speed: PLAYER_SPEED,
        }
    }

    fn enemy(id: u32, position: Vec2, shoot_timer: u32, alive: bool) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            position,
            heading: Heading::default(),
            speed: ENEMY_SPEED,
            alive,
            blocked: false,
            shoot_timer,
        }
    }

    #[test]
    fn distant_enemy_patrols() {
        let mut ai = EnemyAi::new();
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(0.0, 0.0), 0, true)]);
        let mut commands = Vec::new();

        ai.handle(&view, &player_at(Vec2::new(250.0, 0.0)), &mut commands);

        assert_eq!(
            commands,
            vec![Command::MoveEnemy {
                enemy: EnemyId::new(0)
            }]
        );
    }

    #[test]
    fn nearby_enemy_steers_moves_and_counts() {
        let mut ai = EnemyAi::new();
        let id = EnemyId::new(0);
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(0.0, 0.0), 10, true)]);
        let mut commands = Vec::new();

        ai.handle(&view, &player_at(Vec2::new(0.0, 100.0)), &mut commands);

        assert_eq!(commands.len(), 3);
        match commands[0] {
            Command::SteerEnemy { enemy, heading } => {
                assert_eq!(enemy, id);
                assert!((heading.degrees() - 90.0).abs() < 1e-4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
        assert_eq!(commands[1], Command::MoveEnemy { enemy: id });
        assert_eq!(commands[2], Command::AdvanceShootTimer { enemy: id });
    }

    #[test]
    fn enemy_fires_when_timer_completes() {
        let mut ai = EnemyAi::new();
        let id = EnemyId::new(0);
        let ready = ENEMY_SHOOT_DELAY_FRAMES - 1;
        let view = EnemyView::from_snapshots(vec![enemy(0, Vec2::new(0.0, 0.0), ready, true)]);
        let mut commands = Vec::new();

        ai.handle(&view, &player_at(Vec2::new(100.0, 0.0)), &mut commands);

        assert_eq!(
            commands.last(),
            Some(&Command::FireEnemyBullet {
                enemy: id,
                heading: Heading::from_degrees(0.0),
            })
        );
    }

    #[test]
    fn blocked_enemy_backs_off_but_still_aims_at_player() {
        let mut ai = EnemyAi::new();
        let id = EnemyId::new(0);
        let ready = ENEMY_SHOOT_DELAY_FRAMES - 1;
        let mut stuck = enemy(0, Vec2::new(0.0, 0.0), ready, true);
        stuck.heading = Heading::from_degrees(90.0);
        stuck.blocked = true;
        let view = EnemyView::from_snapshots(vec![stuck]);
        let mut commands = Vec::new();

        ai.handle(&view, &player_at(Vec2::new(0.0, -100.0)), &mut commands);

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0], Command::MoveEnemy { enemy: id });
        assert_eq!(commands[1], Command::AdvanceShootTimer { enemy: id });
        match commands[2] {
            Command::FireEnemyBullet { enemy, heading } => {
                assert_eq!(enemy, id);
                assert!((heading.degrees() + 90.0).abs() < 1e-4);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn dead_enemies_are_skipped() {
        let mut ai = EnemyAi::new();
        let view = EnemyView::from_snapshots(vec![
            enemy(0, Vec2::new(0.0, 0.0), 59, false),
            enemy(1, Vec2::new(900.0, 0.0), 0, true),
        ]);
        let mut commands = Vec::new();

        ai.handle(&view, &player_at(Vec2::new(10.0, 0.0)), &mut commands);

        assert_eq!(
            commands,
            vec![Command::MoveEnemy {
                enemy: EnemyId::new(1)
            }]
        );
    }

    #[test]
    fn stance_boundary_is_exclusive() {
        let player = player_at(Vec2::ZERO);

        assert_eq!(
            Stance::of(&enemy(0, Vec2::new(ENEMY_AGGRO_RADIUS, 0.0), 0, true), &player),
            Stance::Patrol
        );
        assert_eq!(
            Stance::of(&enemy(0, Vec2::new(ENEMY_AGGRO_RADIUS - 0.5, 0.0), 0, true), &player),
            Stance::Engaged
        );
    }
}
