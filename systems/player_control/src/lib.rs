#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that turns captured player input into world commands.
//!
//! Aiming and firing are resolved before bullets and enemies advance, while
//! movement is resolved after bullet hits. The two halves are therefore exposed
//! separately so the frame driver can interleave them with the other systems.

use topdown_shooter_core::{Command, PlayerInput};

/// Translates a frame of player intent into commands.
#[derive(Debug, Default)]
pub struct PlayerControl;

impl PlayerControl {
    /// Creates a new player control system.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Emits the aim command and, when the trigger was pressed, a fire request.
    ///
    /// Aiming precedes firing so the bullet leaves along the fresh heading.
    pub fn handle_aim(&mut self, input: &PlayerInput, out: &mut Vec<Command>) {
        out.push(Command::AimPlayer {
            target: input.cursor_world,
        });
        if input.fire_pressed {
            out.push(Command::FirePlayerBullet);
        }
    }

    /// Emits one movement command per held direction, north, south, west, then east.
    pub fn handle_movement(&mut self, input: &PlayerInput, out: &mut Vec<Command>) {
        out.extend(
            input
                .held
                .iter()
                .map(|direction| Command::MovePlayer { direction }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use topdown_shooter_core::{Direction, HeldDirections};

    #[test]
    fn aim_without_trigger_only_turns_player() {
        let mut control = PlayerControl::new();
        let mut commands = Vec::new();

        control.handle_aim(&PlayerInput::aiming_at(Vec2::new(5.0, 6.0)), &mut commands);

        assert_eq!(
            commands,
            vec![Command::AimPlayer {
                target: Vec2::new(5.0, 6.0)
            }]
        );
    }

    #[test]
    fn trigger_fires_after_aiming() {
        let mut control = PlayerControl::new();
        let mut commands = Vec::new();
        let input = PlayerInput {
            fire_pressed: true,
            ..PlayerInput::aiming_at(Vec2::new(1.0, 2.0))
        };

        control.handle_aim(&input, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::AimPlayer {
                    target: Vec2::new(1.0, 2.0)
                },
                Command::FirePlayerBullet,
            ]
        );
    }

    #[test]
    fn movement_follows_fixed_direction_order() {
        let mut control = PlayerControl::new();
        let mut commands = Vec::new();
        let input = PlayerInput {
            held: HeldDirections {
                north: false,
                south: true,
                west: true,
                east: true,
            },
            ..PlayerInput::aiming_at(Vec2::ZERO)
        };

        control.handle_movement(&input, &mut commands);

        assert_eq!(
            commands,
            vec![
                Command::MovePlayer {
                    direction: Direction::South
                },
                Command::MovePlayer {
                    direction: Direction::West
                },
                Command::MovePlayer {
                    direction: Direction::East
                },
            ]
        );
    }

    #[test]
    fn idle_input_emits_no_movement() {
        let mut control = PlayerControl::new();
        let mut commands = Vec::new();

        control.handle_movement(&PlayerInput::aiming_at(Vec2::ZERO), &mut commands);

        assert!(commands.is_empty());
    }
}
