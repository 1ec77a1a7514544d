pub mod overlay;

use bracket_geometry::prelude::Point;
use bracket_terminal::prelude::*;

use crate::{
    effects::Glitch,
    game::GameState,
    map::HEADER_ROW,
};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Orc,
    Dead,
}

impl ActorKind {
    pub fn glyph(self) -> char {
        match self {
            ActorKind::Player => 'X',
            ActorKind::Orc => 'O',
            ActorKind::Dead => 'D',
        }
    }

    pub fn color(self) -> RGB {
        match self {
            ActorKind::Player => RGB::named(WHITE),
            ActorKind::Orc => RGB::named(ORANGE),
            ActorKind::Dead => RGB::named(RED),
        }
    }
}

/// Row 0: orcs remaining on the left, score on the right.
pub fn draw_header(ctx: &mut BTerm, state: &GameState) {
    let orcs = format!("Orcs left: {}", state.orcs.len());
    ctx.print_color(1, HEADER_ROW, RGB::named(WHITE), RGB::named(BLACK), &orcs);

    let score = format!("Score: {}", state.score);
    let x = state.map.width - score.len() as i32 - 1;
    ctx.print_color(x.max(0), HEADER_ROW, RGB::named(WHITE), RGB::named(BLACK), &score);
}

pub fn draw_board(ctx: &mut BTerm, state: &GameState) {
    for y in 1..state.map.height {
        for x in 0..state.map.width {
            let point = Point::new(x, y);
            if let Some(tile) = state.map.tile_at(point) {
                let info = tile.info();
                ctx.set(
                    x,
                    y,
                    info.color,
                    RGB::named(BLACK),
                    to_cp437(info.glyph),
                );
            }
        }
    }
}

/// Glitches draw over the terrain: cycling ones as their current random
/// symbol, settled ones as the permanent dead marker. Effects from a stale
/// epoch belong to a board that no longer exists and are skipped.
pub fn draw_effects(ctx: &mut BTerm, effects: &[Glitch], epoch: u64) {
    for glitch in effects {
        if glitch.epoch != epoch {
            continue;
        }
        let glyph = if glitch.settled() {
            ActorKind::Dead.glyph()
        } else {
            glitch.glyph
        };
        ctx.set(
            glitch.at.x,
            glitch.at.y,
            RGB::named(RED),
            RGB::named(BLACK),
            to_cp437(glyph),
        );
    }
}

pub fn draw_actors(ctx: &mut BTerm, state: &GameState) {
    for orc in &state.orcs {
        ctx.set(
            orc.x,
            orc.y,
            ActorKind::Orc.color(),
            RGB::named(BLACK),
            to_cp437(ActorKind::Orc.glyph()),
        );
    }
    // A dead player's cell is owned by the glitch effect.
    if !state.player_dead {
        ctx.set(
            state.player.x,
            state.player.y,
            ActorKind::Player.color(),
            RGB::named(BLACK),
            to_cp437(ActorKind::Player.glyph()),
        );
    }
}

/// Cue and message trace in the rows below the board.
pub fn draw_log(ctx: &mut BTerm, log: &[String], start_y: i32, max_rows: usize) {
    for (row, entry) in log.iter().take(max_rows).enumerate() {
        let color = if row == 0 {
            RGB::named(WHITE)
        } else {
            RGB::named(DARK_GRAY)
        };
        ctx.print_color(1, start_y + row as i32, color, RGB::named(BLACK), entry);
    }
}
