use bracket_geometry::prelude::Point;

use crate::map::TileKind;

/// One-shot audio cues. The shell fires them and forgets them; overlapping
/// triggers just overlap.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Cue {
    Move,
    OrcDestroyed,
    PlayerCollision,
    PlayerDrown,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeathCause {
    Terrain(TileKind),
    Orc,
}

impl DeathCause {
    pub fn reason(&self) -> String {
        match self {
            DeathCause::Terrain(kind) => format!("You collided with {}!", kind.as_str()),
            DeathCause::Orc => "The orcs caught you!".to_string(),
        }
    }

    pub fn cue(&self) -> Cue {
        match self {
            DeathCause::Terrain(TileKind::River) => Cue::PlayerDrown,
            _ => Cue::PlayerCollision,
        }
    }
}

/// Everything a turn can produce, drained by the shell after each step.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    Moved,
    Bumped,
    OrcsDestroyed {
        cells: Vec<Point>,
    },
    /// `caught` is true when the orc phase ran the player down, which gets
    /// an immediate collision cue on top of the one the settle plays.
    PlayerDied {
        at: Point,
        cause: DeathCause,
        caught: bool,
    },
    Won,
}
