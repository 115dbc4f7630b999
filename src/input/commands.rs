//! # Command Definitions
//!
//! Tokenizing free-text input lines into the closed set of player commands.
//!
//! Normalization is part of the contract: input is trimmed, lower-cased, split on
//! whitespace and stripped of filler words before matching, so keywords are case-
//! and spacing-insensitive.

use crate::game::Direction;

/// Words ignored anywhere in a command ("turn to the north").
pub const FILLER_WORDS: &[&str] = &["the", "to", "a", "an", "please"];

/// Target of a turn command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnTarget {
    /// Face a compass direction
    Absolute(Direction),
    /// Quarter turn counter-clockwise
    Left,
    /// Quarter turn clockwise
    Right,
    /// Half turn
    Around,
}

impl TurnTarget {
    /// Resolves the target against the current facing.
    pub fn resolve(self, facing: Direction) -> Direction {
        match self {
            TurnTarget::Absolute(direction) => direction,
            TurnTarget::Left => facing.left(),
            TurnTarget::Right => facing.right(),
            TurnTarget::Around => facing.opposite(),
        }
    }
}

/// Every action a player can request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Step one cell in the facing direction
    MoveForward,
    /// Change facing
    Turn(TurnTarget),
    /// Describe the surroundings
    Look,
    /// Freeze the background ticker
    Pause,
    /// Unfreeze the background ticker
    Resume,
    /// End the session
    Quit,
    /// Anything else, with the trimmed raw input
    Unrecognized(String),
}

/// Splits a raw line into normalized tokens.
///
/// # Examples
///
/// ```
/// use ticktale::tokenize;
///
/// assert_eq!(tokenize("  Turn TO the   North "), vec!["turn", "north"]);
/// assert!(tokenize("   ").is_empty());
/// ```
pub fn tokenize(raw: &str) -> Vec<String> {
    raw.trim()
        .to_lowercase()
        .split_whitespace()
        .filter(|word| !FILLER_WORDS.contains(word))
        .map(str::to_string)
        .collect()
}

impl Command {
    /// Resolves a raw input line to a command.
    ///
    /// # Examples
    ///
    /// ```
    /// use ticktale::{Command, Direction, TurnTarget};
    ///
    /// assert_eq!(Command::parse("MOVE forward"), Command::MoveForward);
    /// assert_eq!(Command::parse("face west"), Command::Turn(TurnTarget::Absolute(Direction::West)));
    /// assert_eq!(Command::parse("dance"), Command::Unrecognized("dance".to_string()));
    /// ```
    pub fn parse(raw: &str) -> Command {
        let tokens = tokenize(raw);
        let words: Vec<&str> = tokens.iter().map(String::as_str).collect();

        match words.as_slice() {
            ["move"] | ["move", "forward"] | ["move", "ahead"] | ["forward"] | ["f"] | ["go"]
            | ["go", "forward"] | ["go", "ahead"] | ["walk"] | ["walk", "forward"] | ["step"]
            | ["step", "forward"] | ["advance"] => Command::MoveForward,

            ["turn" | "face", target] => match parse_turn_target(target) {
                Some(target) => Command::Turn(target),
                None => Command::Unrecognized(raw.trim().to_string()),
            },
            ["about", "face"] => Command::Turn(TurnTarget::Around),

            ["look"] | ["l"] | ["look", "around"] | ["describe"] | ["examine"] | ["x"] => {
                Command::Look
            }
            ["pause"] | ["p"] | ["wait"] => Command::Pause,
            ["resume"] | ["unpause"] | ["continue"] | ["r"] => Command::Resume,
            ["quit"] | ["exit"] | ["q"] | ["bye"] | ["quit", "game"] => Command::Quit,

            [word] => match word.parse::<Direction>() {
                Ok(direction) => Command::Turn(TurnTarget::Absolute(direction)),
                Err(_) => Command::Unrecognized(raw.trim().to_string()),
            },
            _ => Command::Unrecognized(raw.trim().to_string()),
        }
    }
}

fn parse_turn_target(word: &str) -> Option<TurnTarget> {
    match word {
        "left" => Some(TurnTarget::Left),
        "right" => Some(TurnTarget::Right),
        "around" | "back" => Some(TurnTarget::Around),
        other => other.parse::<Direction>().ok().map(TurnTarget::Absolute),
    }
}
