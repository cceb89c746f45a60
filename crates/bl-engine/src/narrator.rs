//! Narration building.
//!
//! Room descriptions are re-derived from the current flags on every
//! call, so a description is never stale: the rug variant, darkness,
//! and revealed items all come straight from the state store.

use bl_core::{GLOBAL_FLAG_PREFIX, ItemLocation, LightKind, WorldDataset, WorldState};

/// The classic warning shown instead of a dark room's description.
pub const PITCH_BLACK: &str = "It is pitch black. You are likely to be eaten by a grue.";

/// True if a flag reference holds, resolving the `global:` prefix
/// against the global map and anything else against `room`'s flags.
pub(crate) fn flag_ref_set(state: &WorldState, room: &str, flag_ref: &str) -> bool {
    match flag_ref.strip_prefix(GLOBAL_FLAG_PREFIX) {
        Some(name) => state.global_set(name),
        None => state.flag_set(room, flag_ref),
    }
}

/// Set or clear a flag reference (see [`flag_ref_set`]).
pub(crate) fn set_flag_ref(state: &mut WorldState, room: &str, flag_ref: &str, value: bool) {
    let value = i64::from(value);
    match flag_ref.strip_prefix(GLOBAL_FLAG_PREFIX) {
        Some(name) => state.set_global(name, value),
        None => state.set_flag(room, flag_ref, value),
    }
}

/// True if the player can see in `room`: the room is not dark, or a
/// burning light source lies in it or is carried.
pub fn is_lit(data: &WorldDataset, state: &WorldState, room: &str) -> bool {
    let Some(room_def) = data.room(room) else {
        return true;
    };
    if !room_def.dark {
        return true;
    }
    data.items().any(|(id, item)| {
        let burning = match item.light {
            Some(LightKind::Always) => true,
            Some(LightKind::Switchable) => state.global_set(&format!("{id}-lit")),
            None => false,
        };
        if !burning {
            return false;
        }
        match state.location(id) {
            ItemLocation::Inventory => true,
            ItemLocation::Room(r) => r == room,
            _ => false,
        }
    })
}

/// "A" or "An", by leading vowel.
fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "An",
        _ => "A",
    }
}

/// Describe the room the player is in: flag-selected description text,
/// loose takeable items, and the contents of open containers. Dark and
/// unlit rooms get the grue warning instead.
pub fn describe_room(data: &WorldDataset, state: &WorldState) -> String {
    let room_id = state.current_room();
    let Some(room) = data.room(room_id) else {
        return "You are nowhere in particular.".to_string();
    };

    if !is_lit(data, state, room_id) {
        return PITCH_BLACK.to_string();
    }

    let mut out = match &room.alt {
        Some(alt) if flag_ref_set(state, room_id, &alt.flag) => alt.text.clone(),
        _ => room.description.clone(),
    };

    for id in state.items_in_room(room_id) {
        let Some(item) = data.item(id) else { continue };
        if item.takeable {
            out.push_str(&format!("\nThere is a {} here.", item.name));
        }
        if data.is_container(id) && state.is_open(id) {
            let contents = state.contents(id);
            if !contents.is_empty() {
                out.push_str(&format!("\nThe {} contains:", item.name));
                for inner in contents {
                    let name = data.display_name(inner);
                    out.push_str(&format!("\n  {} {}", article(name), name));
                }
            }
        }
    }
    out
}
