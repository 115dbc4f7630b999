//! # Frame Narration
//!
//! Player-facing messages for frame events.

use crate::game::FrameEvent;

/// Message for a frame event, or None for events the player doesn't notice.
///
/// # Examples
///
/// ```
/// use ticktale::{narrate, FrameEvent};
///
/// let event = FrameEvent::MonsterDespawned { name: "Vile Bat".to_string() };
/// assert_eq!(narrate(&event).as_deref(), Some("The Vile Bat wanders off."));
/// ```
pub fn narrate(event: &FrameEvent) -> Option<String> {
    match event {
        FrameEvent::MonsterSpawned { name, behavior, .. } => {
            Some(format!("A {} {} appears.", behavior.adjective(), name))
        }
        FrameEvent::MonsterMoved { .. } => None,
        FrameEvent::MonsterDespawned { name } => Some(format!("The {} wanders off.", name)),
        FrameEvent::PlayerThreatened { name } => {
            Some(format!("The {} snarls at you, but does not strike.", name))
        }
        FrameEvent::PlayerSlain { name } => Some(format!(
            "The {} attacks! You have been slain. Game over.",
            name
        )),
    }
}
