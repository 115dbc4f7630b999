//! # Input Module
//!
//! Command interpretation: raw input line in, display text and next snapshot out.

pub mod commands;

pub use commands::*;

use crate::config;
use crate::game::WorldState;
use crate::generation::GameConfig;
use crate::rendering::describe_surroundings;
use log::debug;

/// Reply to any input once the session has ended.
pub const ALREADY_ENDED_MESSAGE: &str = "The game has already ended.";
/// Reply to `quit`.
pub const FAREWELL_MESSAGE: &str = "Farewell, adventurer. The dungeon will remember you.";
/// Reply to anything outside the command set.
pub const UNRECOGNIZED_MESSAGE: &str = "I don't understand that.";

/// Applies player commands to world snapshots.
///
/// The interpreter never performs I/O and never edits the snapshot it is given:
/// it returns the text to show and the snapshot to publish next. A refused or
/// meaningless command returns a snapshot equal to the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInterpreter {
    /// How far `look` reports monsters
    pub sight_radius: u32,
}

impl Default for CommandInterpreter {
    fn default() -> Self {
        Self::new(config::DEFAULT_SIGHT_RADIUS)
    }
}

impl CommandInterpreter {
    /// Creates a new interpreter.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::CommandInterpreter;
    ///
    /// let interpreter = CommandInterpreter::new(6);
    /// assert_eq!(interpreter.sight_radius, 6);
    /// ```
    pub fn new(sight_radius: u32) -> Self {
        Self { sight_radius }
    }

    /// Creates an interpreter using the session configuration.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.sight_radius)
    }

    /// Parses and applies one raw input line.
    ///
    /// Once `running` is false every line, quit included, gets
    /// [`ALREADY_ENDED_MESSAGE`] and the unchanged snapshot.
    pub fn interpret(&self, raw_line: &str, state: &WorldState) -> (String, WorldState) {
        if state.is_game_ended() {
            return (ALREADY_ENDED_MESSAGE.to_string(), state.clone());
        }

        let command = Command::parse(raw_line);
        debug!("Interpreting {:?} as {:?}", raw_line, command);
        self.apply(command, state)
    }

    /// Applies an already-parsed command to a running session.
    pub fn apply(&self, command: Command, state: &WorldState) -> (String, WorldState) {
        match command {
            Command::MoveForward => move_forward(state),
            Command::Turn(target) => turn(state, target),
            Command::Look => (
                describe_surroundings(state, self.sight_radius),
                state.clone(),
            ),
            Command::Pause => {
                if state.paused {
                    ("The world is already paused.".to_string(), state.clone())
                } else {
                    (
                        "Paused. The world holds its breath until you resume.".to_string(),
                        WorldState {
                            paused: true,
                            ..state.clone()
                        },
                    )
                }
            }
            Command::Resume => {
                if state.paused {
                    (
                        "Resumed. The world stirs again.".to_string(),
                        WorldState {
                            paused: false,
                            ..state.clone()
                        },
                    )
                } else {
                    ("The world is not paused.".to_string(), state.clone())
                }
            }
            Command::Quit => (
                FAREWELL_MESSAGE.to_string(),
                WorldState {
                    running: false,
                    ..state.clone()
                },
            ),
            Command::Unrecognized(_) => (UNRECOGNIZED_MESSAGE.to_string(), state.clone()),
        }
    }
}

/// Interprets one raw input line with the default interpreter.
///
/// # Examples
///
/// ```
/// use ticktale::{parse_command, Direction, GameMap, NamePools, Position, WorldState};
///
/// let map = GameMap::from_text("..#\n...\n#..").unwrap();
/// let state = WorldState::new(map, Position::new(0, 0), Direction::South, NamePools::default(), 1).unwrap();
///
/// let (text, state) = parse_command("move forward", &state);
/// assert_eq!(text, "You move south to (0, 1).");
/// assert_eq!(state.player.position, Position::new(0, 1));
///
/// let (text, blocked) = parse_command("move forward", &state);
/// assert_eq!(text, "You are blocked by a wall.");
/// assert_eq!(blocked, state);
/// ```
pub fn parse_command(raw_line: &str, state: &WorldState) -> (String, WorldState) {
    CommandInterpreter::default().interpret(raw_line, state)
}

fn move_forward(state: &WorldState) -> (String, WorldState) {
    match state
        .player
        .step_forward(&state.map, state.player_obstacles())
    {
        Ok(player) => {
            let mut next = WorldState {
                player,
                ..state.clone()
            };
            next.statistics.steps_taken += 1;
            (
                format!("You move {} to {}.", player.facing, player.position),
                next,
            )
        }
        Err(reason) => (reason.to_string(), state.clone()),
    }
}

fn turn(state: &WorldState, target: TurnTarget) -> (String, WorldState) {
    let facing = target.resolve(state.player.facing);
    let text = if facing == state.player.facing {
        format!("You are already facing {}.", facing)
    } else {
        format!("You turn to face {}.", facing)
    };

    let mut next = WorldState {
        player: state.player.turn(facing),
        ..state.clone()
    };
    next.statistics.turns_made += 1;
    (text, next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Behavior, Direction, Entity, GameMap, Monster, Position};
    use crate::generation::NamePools;
    use uuid::Uuid;

    fn scenario_state() -> WorldState {
        WorldState::new(
            GameMap::from_text("..#\n...\n#..").unwrap(),
            Position::new(0, 0),
            Direction::South,
            NamePools::from_text("Grim", "Rat"),
            1,
        )
        .unwrap()
    }

    #[test]
    fn test_move_then_blocked() {
        let state = scenario_state();
        let (text, moved) = parse_command("move forward", &state);
        assert_eq!(text, "You move south to (0, 1).");
        assert_eq!(moved.player.position, Position::new(0, 1));
        assert_eq!(moved.statistics.steps_taken, 1);

        let (text, blocked) = parse_command("move forward", &moved);
        assert_eq!(text, "You are blocked by a wall.");
        assert_eq!(blocked, moved);
    }

    #[test]
    fn test_move_off_map_rejected() {
        let state = WorldState {
            player: Entity::new(Position::new(0, 0), Direction::North),
            ..scenario_state()
        };
        let (text, next) = parse_command("forward", &state);
        assert_eq!(text, "You cannot go any further that way.");
        assert_eq!(next, state);
    }

    #[test]
    fn test_move_into_monster_rejected() {
        let mut state = scenario_state();
        state.monsters.push(Monster {
            id: Uuid::nil(),
            name: "Grim Rat".to_string(),
            behavior: Behavior::Idle,
            age: 0,
            entity: Entity::new(Position::new(0, 1), Direction::North),
        });
        let (text, next) = parse_command("move forward", &state);
        assert_eq!(text, "The way is blocked by Grim Rat.");
        assert_eq!(next, state);
    }

    #[test]
    fn test_turn_changes_only_facing() {
        let state = scenario_state();
        let (text, next) = parse_command("turn east", &state);
        assert_eq!(text, "You turn to face east.");
        assert_eq!(next.player.facing, Direction::East);
        assert_eq!(next.player.position, state.player.position);
        assert_eq!(next.statistics.turns_made, 1);

        let (text, same) = parse_command("face east", &next);
        assert_eq!(text, "You are already facing east.");
        assert_eq!(same.player, next.player);
        assert_eq!(same.statistics.turns_made, 2);
    }

    #[test]
    fn test_relative_turns() {
        let state = scenario_state();
        let (_, next) = parse_command("turn left", &state);
        assert_eq!(next.player.facing, Direction::East);
        let (_, next) = parse_command("turn around", &next);
        assert_eq!(next.player.facing, Direction::West);
    }

    #[test]
    fn test_pause_and_resume_toggle() {
        let state = scenario_state();
        let (_, paused) = parse_command("PAUSE", &state);
        assert!(paused.paused);
        assert_eq!(paused.player, state.player);
        assert_eq!(paused.monsters, state.monsters);

        let (text, again) = parse_command("pause", &paused);
        assert_eq!(text, "The world is already paused.");
        assert_eq!(again, paused);

        let (_, resumed) = parse_command("resume", &paused);
        assert!(!resumed.paused);
        assert_eq!(resumed, state);

        let (text, _) = parse_command("resume", &resumed);
        assert_eq!(text, "The world is not paused.");
    }

    #[test]
    fn test_movement_allowed_while_paused() {
        let (_, paused) = parse_command("pause", &scenario_state());
        let (_, moved) = parse_command("move forward", &paused);
        assert_eq!(moved.player.position, Position::new(0, 1));
        assert!(moved.paused);
    }

    #[test]
    fn test_quit_then_already_ended() {
        let state = scenario_state();
        let (text, ended) = parse_command("quit", &state);
        assert_eq!(text, FAREWELL_MESSAGE);
        assert!(!ended.running);

        for line in ["move forward", "quit", "resume", ""] {
            let (text, after) = parse_command(line, &ended);
            assert_eq!(text, ALREADY_ENDED_MESSAGE);
            assert_eq!(after, ended);
        }
    }

    #[test]
    fn test_unrecognized_leaves_state() {
        let state = scenario_state();
        let (text, next) = parse_command("dance wildly", &state);
        assert_eq!(text, UNRECOGNIZED_MESSAGE);
        assert_eq!(next, state);
    }

    #[test]
    fn test_look_is_multiline_and_pure() {
        let state = scenario_state();
        let (text, next) = CommandInterpreter::new(3).interpret("look", &state);
        assert!(text.lines().count() > 5);
        assert!(text.contains("South: open floor."));
        assert_eq!(next, state);
    }
}
