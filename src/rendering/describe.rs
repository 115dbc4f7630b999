//! # Surroundings
//!
//! The text block produced by the `look` command.

use crate::game::{Direction, Position, WorldState};
use crate::rendering::join_lines;

/// Radius of the ASCII minimap shown by `look`.
pub const MINIMAP_RADIUS: i32 = 2;

/// Describes what the player can see.
///
/// The block lists, one per line: the player's position and facing, the terrain
/// in each cardinal direction, every living monster within `sight_radius`
/// (Manhattan distance), a pause notice when paused, a small minimap and the
/// session counters.
///
/// # Examples
///
/// ```
/// use ticktale::{describe_surroundings, Direction, GameMap, NamePools, Position, WorldState};
///
/// let map = GameMap::from_text("..#\n...\n#..").unwrap();
/// let state = WorldState::new(map, Position::new(0, 0), Direction::South, NamePools::default(), 1).unwrap();
/// let text = describe_surroundings(&state, 5);
/// assert!(text.starts_with("You are at (0, 0), facing south."));
/// assert!(text.contains("East: open floor."));
/// assert!(text.contains("North: the edge of the map."));
/// ```
pub fn describe_surroundings(state: &WorldState, sight_radius: u32) -> String {
    let player = state.player.position;
    let mut lines = vec![format!(
        "You are at {}, facing {}.",
        player, state.player.facing
    )];

    for direction in Direction::cardinal() {
        let terrain = state
            .map
            .cell_at(player.step(direction))
            .map(|cell| cell.describe())
            .unwrap_or("the edge of the map");
        lines.push(format!("{}: {}.", capitalize(direction.name()), terrain));
    }

    let mut visible: Vec<_> = state
        .living_monsters()
        .filter(|monster| monster.position().manhattan_distance(player) <= sight_radius)
        .collect();
    visible.sort_by_key(|monster| monster.position().manhattan_distance(player));

    if visible.is_empty() {
        lines.push("Nothing stirs nearby.".to_string());
    }
    for monster in visible {
        let distance = monster.position().manhattan_distance(player);
        lines.push(format!(
            "You see a {} {} {} {} to the {}.",
            monster.behavior.adjective(),
            monster.name,
            distance,
            if distance == 1 { "step" } else { "steps" },
            compass(monster.position() - player)
        ));
    }

    if state.paused {
        lines.push("The world is paused.".to_string());
    }

    lines.extend(minimap(state, MINIMAP_RADIUS));
    let steps = state.statistics.steps_taken;
    lines.push(format!(
        "Frame {}, {} {} taken.",
        state.frame_number,
        steps,
        if steps == 1 { "step" } else { "steps" }
    ));

    join_lines(lines)
}

/// Compass phrase for an offset: "north", "south-east" and so on.
///
/// ```
/// use ticktale::{compass, Position};
///
/// assert_eq!(compass(Position::new(2, -1)), "north-east");
/// assert_eq!(compass(Position::new(0, 3)), "south");
/// ```
pub fn compass(offset: Position) -> String {
    let vertical = match offset.y {
        y if y < 0 => Some("north"),
        y if y > 0 => Some("south"),
        _ => None,
    };
    let horizontal = match offset.x {
        x if x > 0 => Some("east"),
        x if x < 0 => Some("west"),
        _ => None,
    };

    match (vertical, horizontal) {
        (Some(v), Some(h)) => format!("{}-{}", v, h),
        (Some(v), None) => v.to_string(),
        (None, Some(h)) => h.to_string(),
        (None, None) => "here".to_string(),
    }
}

/// Square ASCII view centred on the player.
///
/// `@` is the player, `M` a living monster, blanks are off the map, anything else
/// is the terrain glyph.
pub fn minimap(state: &WorldState, radius: i32) -> Vec<String> {
    let centre = state.player.position;
    (-radius..=radius)
        .map(|dy| {
            (-radius..=radius)
                .map(|dx| {
                    let pos = Position::new(centre.x + dx, centre.y + dy);
                    if pos == centre {
                        '@'
                    } else if state.monster_at(pos).is_some() {
                        'M'
                    } else {
                        state.map.cell_at(pos).map(|cell| cell.glyph()).unwrap_or(' ')
                    }
                })
                .collect::<String>()
        })
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
