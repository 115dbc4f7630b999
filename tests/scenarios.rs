//! End-to-end play scenarios driven through the public command and frame API.

use ticktale::{
    advance_frame, parse_command, run_frame, Behavior, CombatPolicy, CommandInterpreter,
    Direction, Entity, FrameEvent, GameConfig, GameMap, Monster, NamePools, Position,
    TicktaleResult, WorldState, ALREADY_ENDED_MESSAGE, FAREWELL_MESSAGE,
};
use uuid::Uuid;

fn corridor_state() -> TicktaleResult<WorldState> {
    WorldState::new(
        GameMap::from_text("..#\n...\n#..")?,
        Position::new(0, 0),
        Direction::South,
        NamePools::from_text("Grim\nVile", "Rat\nBat"),
        7,
    )
}

#[test]
fn test_walk_into_wall() -> TicktaleResult<()> {
    let state = corridor_state()?;

    let (text, state) = parse_command("move forward", &state);
    assert_eq!(text, "You move south to (0, 1).");
    assert_eq!(state.player.position, Position::new(0, 1));

    let (text, blocked) = parse_command("move forward", &state);
    assert_eq!(text, "You are blocked by a wall.");
    assert_eq!(blocked, state);

    Ok(())
}

#[test]
fn test_pause_freezes_ticks_until_resume() -> TicktaleResult<()> {
    let config = GameConfig::for_testing();
    let (text, paused) = parse_command("pause", &corridor_state()?);
    assert!(text.starts_with("Paused."));

    let mut ticked = paused.clone();
    for _ in 0..5 {
        ticked = run_frame(&ticked, &config);
    }
    assert_eq!(ticked, paused);

    let (_, resumed) = parse_command("resume", &ticked);
    let after = run_frame(&resumed, &config);
    assert_eq!(after.frame_number, resumed.frame_number + 1);
    assert_eq!(after.monsters.len(), 1);
    assert_ne!(after.monsters[0].position(), after.player.position);

    Ok(())
}

#[test]
fn test_quit_is_final() -> TicktaleResult<()> {
    let (text, ended) = parse_command("quit", &corridor_state()?);
    assert_eq!(text, FAREWELL_MESSAGE);
    assert!(!ended.running);

    let (text, after) = parse_command("move forward", &ended);
    assert_eq!(text, ALREADY_ENDED_MESSAGE);
    assert_eq!(after, ended);

    assert_eq!(run_frame(&ended, &GameConfig::for_testing()), ended);
    Ok(())
}

#[test]
fn test_look_reports_spawned_monster() -> TicktaleResult<()> {
    let state = WorldState::new(
        GameMap::from_text("S...")?,
        Position::new(3, 0),
        Direction::West,
        NamePools::from_text("Grim", "Rat"),
        3,
    )?;
    let config = GameConfig {
        move_chance: 0.0,
        ..GameConfig::for_testing()
    };

    let state = run_frame(&state, &config);
    let (text, _) = CommandInterpreter::from_config(&config).interpret("look", &state);
    assert!(text.contains("Grim Rat 3 steps to the west."), "{}", text);
    assert!(text.contains("Frame 1, 0 steps taken."));

    Ok(())
}

#[test]
fn test_hostile_monster_hunts_player_down() -> TicktaleResult<()> {
    let mut state = WorldState::new(
        GameMap::from_text("S.....\n#####.\n......")?,
        Position::new(5, 2),
        Direction::North,
        NamePools::from_text("", "Wolf"),
        99,
    )?;
    state.monsters.push(Monster {
        id: Uuid::nil(),
        name: "Wolf".to_string(),
        behavior: Behavior::Aggressive,
        age: 0,
        entity: Entity::new(Position::new(0, 0), Direction::South),
    });
    let config = GameConfig {
        spawn_chance: 0.0,
        move_chance: 1.0,
        combat_policy: CombatPolicy::Lethal,
        ..GameConfig::new()
    };

    let mut slain_on = None;
    for frame in 1..=10 {
        let outcome = advance_frame(&state, &config)?;
        state = outcome.state;
        if outcome.events.contains(&FrameEvent::PlayerSlain {
            name: "Wolf".to_string(),
        }) {
            slain_on = Some(frame);
            break;
        }
    }

    // Six steps along the shortest path, then the attack.
    assert_eq!(slain_on, Some(7));
    assert!(!state.running);
    assert!(!state.player.alive);
    assert_eq!(state.monsters[0].position(), Position::new(5, 1));

    let (text, after) = parse_command("look", &state);
    assert_eq!(text, ALREADY_ENDED_MESSAGE);
    assert_eq!(after, state);

    Ok(())
}
