//! Command normalization and verb tables.
//!
//! Parsing never fails: anything the tables don't recognize becomes
//! [`Verb::Unknown`] and the dispatcher narrates the fallback line.

/// Direction for movement commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// North.
    North,
    /// South.
    South,
    /// East.
    East,
    /// West.
    West,
    /// Up.
    Up,
    /// Down.
    Down,
    /// Northeast.
    Northeast,
    /// Northwest.
    Northwest,
    /// Southeast.
    Southeast,
    /// Southwest.
    Southwest,
}

impl Direction {
    /// Parse a direction from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "n" | "north" => Some(Self::North),
            "s" | "south" => Some(Self::South),
            "e" | "east" => Some(Self::East),
            "w" | "west" => Some(Self::West),
            "u" | "up" => Some(Self::Up),
            "d" | "down" => Some(Self::Down),
            "ne" | "northeast" => Some(Self::Northeast),
            "nw" | "northwest" => Some(Self::Northwest),
            "se" | "southeast" => Some(Self::Southeast),
            "sw" | "southwest" => Some(Self::Southwest),
            _ => None,
        }
    }

    /// Get the display name for this direction.
    pub fn name(&self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::Northeast => "northeast",
            Self::Northwest => "northwest",
            Self::Southeast => "southeast",
            Self::Southwest => "southwest",
        }
    }
}

/// Canonical verbs after synonym resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    /// Move in a direction.
    Go,
    /// Pick up an item, or everything ("take all").
    Take,
    /// Put a carried item on the floor.
    Drop,
    /// Put a carried item into a container.
    Put,
    /// Open a container or fixture.
    Open,
    /// Close a container or fixture.
    Close,
    /// Shift a fixture (the rug, the leaves).
    Move,
    /// Unlock a fixture with a key.
    Unlock,
    /// Describe the current room.
    Look,
    /// Describe an item.
    Examine,
    /// Read an item's text.
    Read,
    /// List carried items.
    Inventory,
    /// Report score and moves.
    Score,
    /// Report the player's condition.
    Diagnose,
    /// List known verbs.
    Help,
    /// Turn something: a light on/off, a bolt with a wrench.
    Turn,
    /// Apply a carried item to the room's machinery.
    Use,
    /// Switch a lamp on.
    Light,
    /// Wave a carried item.
    Wave,
    /// Tie a carried item to a fixture.
    Tie,
    /// Give a carried item to a creature.
    Give,
    /// Attack a creature.
    Attack,
    /// Throw a carried item.
    Throw,
    /// Dig, possibly revealing something after enough tries.
    Dig,
    /// Cross a spanning fixture (the rainbow).
    Cross,
    /// Touch a fixture.
    Touch,
    /// Rub a fixture.
    Rub,
    /// Squeeze a fixture.
    Squeeze,
    /// Wind a clockwork item.
    Wind,
    /// Pray.
    Pray,
    /// Let a turn pass.
    Wait,
    /// Eat a carried item.
    Eat,
    /// Drink a carried item.
    Drink,
    /// Climb something.
    Climb,
    /// Knock on something.
    Knock,
    /// Repeat the previous command.
    Again,
    /// Persist the game.
    Save,
    /// Restore the persisted game.
    Load,
    /// Start over from the initial state.
    Restart,
    /// End the session.
    Quit,
    /// Anything the tables don't recognize.
    Unknown,
}

/// A normalized player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Canonical verb.
    pub verb: Verb,
    /// Normalized remainder of the line (articles stripped).
    pub arg: String,
}

/// Verb synonyms for command parsing.
const GO_VERBS: &[&str] = &["go", "walk", "run", "head", "travel", "enter"];
const TAKE_VERBS: &[&str] = &["take", "get", "grab", "pick"];
const DROP_VERBS: &[&str] = &["drop", "discard"];
const PUT_VERBS: &[&str] = &["put", "place", "insert"];
const OPEN_VERBS: &[&str] = &["open"];
const CLOSE_VERBS: &[&str] = &["close", "shut"];
const MOVE_VERBS: &[&str] = &["move", "push", "pull", "slide"];
const UNLOCK_VERBS: &[&str] = &["unlock"];
const LOOK_VERBS: &[&str] = &["look", "l"];
const EXAMINE_VERBS: &[&str] = &["examine", "x", "inspect", "describe"];
const READ_VERBS: &[&str] = &["read"];
const INVENTORY_VERBS: &[&str] = &["inventory", "inv", "i"];
const SCORE_VERBS: &[&str] = &["score"];
const DIAGNOSE_VERBS: &[&str] = &["diagnose"];
const HELP_VERBS: &[&str] = &["help", "?", "commands"];
const TURN_VERBS: &[&str] = &["turn", "flip"];
const USE_VERBS: &[&str] = &["use"];
const LIGHT_VERBS: &[&str] = &["light"];
const WAVE_VERBS: &[&str] = &["wave", "brandish"];
const TIE_VERBS: &[&str] = &["tie", "attach", "fasten"];
const GIVE_VERBS: &[&str] = &["give", "feed", "offer"];
const ATTACK_VERBS: &[&str] = &["attack", "kill", "fight", "hit", "slay", "stab"];
const THROW_VERBS: &[&str] = &["throw", "hurl", "toss"];
const DIG_VERBS: &[&str] = &["dig"];
const CROSS_VERBS: &[&str] = &["cross"];
const TOUCH_VERBS: &[&str] = &["touch", "feel"];
const RUB_VERBS: &[&str] = &["rub"];
const SQUEEZE_VERBS: &[&str] = &["squeeze"];
const WIND_VERBS: &[&str] = &["wind"];
const PRAY_VERBS: &[&str] = &["pray"];
const WAIT_VERBS: &[&str] = &["wait", "z"];
const EAT_VERBS: &[&str] = &["eat"];
const DRINK_VERBS: &[&str] = &["drink", "sip", "quaff"];
const CLIMB_VERBS: &[&str] = &["climb"];
const KNOCK_VERBS: &[&str] = &["knock"];
const AGAIN_VERBS: &[&str] = &["again", "g"];
const SAVE_VERBS: &[&str] = &["save"];
const LOAD_VERBS: &[&str] = &["load", "restore"];
const RESTART_VERBS: &[&str] = &["restart"];
const QUIT_VERBS: &[&str] = &["quit", "q", "exit"];

const VERB_TABLE: &[(&[&str], Verb)] = &[
    (GO_VERBS, Verb::Go),
    (TAKE_VERBS, Verb::Take),
    (DROP_VERBS, Verb::Drop),
    (PUT_VERBS, Verb::Put),
    (OPEN_VERBS, Verb::Open),
    (CLOSE_VERBS, Verb::Close),
    (MOVE_VERBS, Verb::Move),
    (UNLOCK_VERBS, Verb::Unlock),
    (LOOK_VERBS, Verb::Look),
    (EXAMINE_VERBS, Verb::Examine),
    (READ_VERBS, Verb::Read),
    (INVENTORY_VERBS, Verb::Inventory),
    (SCORE_VERBS, Verb::Score),
    (DIAGNOSE_VERBS, Verb::Diagnose),
    (HELP_VERBS, Verb::Help),
    (TURN_VERBS, Verb::Turn),
    (USE_VERBS, Verb::Use),
    (LIGHT_VERBS, Verb::Light),
    (WAVE_VERBS, Verb::Wave),
    (TIE_VERBS, Verb::Tie),
    (GIVE_VERBS, Verb::Give),
    (ATTACK_VERBS, Verb::Attack),
    (THROW_VERBS, Verb::Throw),
    (DIG_VERBS, Verb::Dig),
    (CROSS_VERBS, Verb::Cross),
    (TOUCH_VERBS, Verb::Touch),
    (RUB_VERBS, Verb::Rub),
    (SQUEEZE_VERBS, Verb::Squeeze),
    (WIND_VERBS, Verb::Wind),
    (PRAY_VERBS, Verb::Pray),
    (WAIT_VERBS, Verb::Wait),
    (EAT_VERBS, Verb::Eat),
    (DRINK_VERBS, Verb::Drink),
    (CLIMB_VERBS, Verb::Climb),
    (KNOCK_VERBS, Verb::Knock),
    (AGAIN_VERBS, Verb::Again),
    (SAVE_VERBS, Verb::Save),
    (LOAD_VERBS, Verb::Load),
    (RESTART_VERBS, Verb::Restart),
    (QUIT_VERBS, Verb::Quit),
];

/// Articles dropped from arguments during normalization.
const ARTICLES: &[&str] = &["the", "a", "an"];

/// Lower-case a raw line and collapse its whitespace.
pub fn normalize(input: &str) -> String {
    input
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a normalized input line into a command.
pub fn parse_command(input: &str) -> Command {
    let normalized = normalize(input);
    let mut words = normalized.split(' ').filter(|w| !w.is_empty());

    let Some(head) = words.next() else {
        return Command {
            verb: Verb::Unknown,
            arg: String::new(),
        };
    };

    // A bare direction is shorthand for "go <direction>".
    if let Some(dir) = Direction::parse(head) {
        return Command {
            verb: Verb::Go,
            arg: dir.name().to_string(),
        };
    }

    let rest: Vec<&str> = words.filter(|w| !ARTICLES.contains(w)).collect();

    for (synonyms, verb) in VERB_TABLE {
        if synonyms.contains(&head) {
            let mut rest = rest.as_slice();
            // "pick up X" and "look at X" carry a filler word.
            match verb {
                Verb::Take if rest.first() == Some(&"up") => rest = &rest[1..],
                Verb::Look | Verb::Examine if rest.first() == Some(&"at") => rest = &rest[1..],
                Verb::Knock if rest.first() == Some(&"on") => rest = &rest[1..],
                _ => {}
            }
            return Command {
                verb: verb.clone(),
                arg: rest.join(" "),
            };
        }
    }

    Command {
        verb: Verb::Unknown,
        arg: normalized,
    }
}

/// Split an argument on a prepositional clause: `"coal in machine"`
/// split on `"in"` yields `("coal", "machine")`.
pub fn split_on<'a>(arg: &'a str, prep: &str) -> Option<(&'a str, &'a str)> {
    let needle = format!(" {prep} ");
    arg.find(&needle).map(|idx| {
        let head = arg[..idx].trim();
        let tail = arg[idx + needle.len()..].trim();
        (head, tail)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_direction_is_go() {
        assert_eq!(
            parse_command("n"),
            Command {
                verb: Verb::Go,
                arg: "north".to_string()
            }
        );
        assert_eq!(
            parse_command("SOUTHWEST"),
            Command {
                verb: Verb::Go,
                arg: "southwest".to_string()
            }
        );
    }

    #[test]
    fn synonyms_collapse_to_canonical_verbs() {
        assert_eq!(parse_command("grab lamp").verb, Verb::Take);
        assert_eq!(parse_command("get lamp").verb, Verb::Take);
        assert_eq!(parse_command("kill troll").verb, Verb::Attack);
        assert_eq!(parse_command("restore").verb, Verb::Load);
        assert_eq!(parse_command("use wrench").verb, Verb::Use);
        assert_eq!(parse_command("z").verb, Verb::Wait);
    }

    #[test]
    fn articles_are_stripped() {
        assert_eq!(parse_command("take the brass lantern").arg, "brass lantern");
        assert_eq!(parse_command("open a mailbox").arg, "mailbox");
    }

    #[test]
    fn filler_words_are_skipped() {
        assert_eq!(parse_command("pick up the sword").arg, "sword");
        assert_eq!(parse_command("look at painting").arg, "painting");
        assert_eq!(parse_command("knock on the door").arg, "door");
    }

    #[test]
    fn case_and_whitespace_normalize() {
        assert_eq!(
            parse_command("  TAKE   Lamp  "),
            Command {
                verb: Verb::Take,
                arg: "lamp".to_string()
            }
        );
    }

    #[test]
    fn unknown_keeps_the_input() {
        let cmd = parse_command("plugh xyzzy");
        assert_eq!(cmd.verb, Verb::Unknown);
        assert_eq!(cmd.arg, "plugh xyzzy");
    }

    #[test]
    fn clause_splitting() {
        assert_eq!(split_on("coal in machine", "in"), Some(("coal", "machine")));
        assert_eq!(
            split_on("bolt with wrench", "with"),
            Some(("bolt", "wrench"))
        );
        assert_eq!(split_on("lamp", "with"), None);
        // The prepositional word must stand alone.
        assert_eq!(split_on("winch", "in"), None);
    }

    #[test]
    fn empty_input_is_unknown() {
        assert_eq!(parse_command("").verb, Verb::Unknown);
        assert_eq!(parse_command("   ").verb, Verb::Unknown);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn normalization_is_idempotent(input in "\\PC{0,60}") {
                let once = normalize(&input);
                prop_assert_eq!(normalize(&once), once);
            }

            // Parsing is total: arbitrary input always yields a command.
            #[test]
            fn parsing_never_panics(input in "\\PC{0,60}") {
                let cmd = parse_command(&input);
                prop_assert!(cmd.arg == normalize(&cmd.arg));
            }
        }
    }
}
