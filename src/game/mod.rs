pub mod events;

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;

use crate::{
    config::GameSettings,
    map::{GameMap, TileKind},
};

use self::events::{DeathCause, Event};

/// A parsed player input, shared by the live shell and scripted replays.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Step { dx: i32, dy: i32 },
    ToggleCredits,
    Restart,
}

/// The whole mutable game: map, actors, counters, and the event queue the
/// shell drains after each turn. Everything mutates through `&mut self`, so
/// tests drive it without a terminal.
pub struct GameState {
    pub settings: GameSettings,
    pub map: GameMap,
    pub player: Point,
    pub orcs: Vec<Point>,
    pub score: u32,
    pub turns: u32,
    pub game_over: bool,
    pub player_dead: bool,
    pub won: bool,
    pub paused: bool,
    /// Bumped on every restart; scheduled effects carry the epoch they were
    /// spawned under and are dropped once it goes stale.
    pub epoch: u64,
    rng: RandomNumberGenerator,
    events: Vec<Event>,
}

impl GameState {
    pub fn new(settings: GameSettings, rng: RandomNumberGenerator) -> Self {
        let mut state = Self {
            map: GameMap::filled(settings.grid_width, settings.grid_height, TileKind::Grass),
            player: settings.center(),
            settings,
            orcs: Vec::new(),
            score: 0,
            turns: 0,
            game_over: false,
            player_dead: false,
            won: false,
            paused: false,
            epoch: 0,
            rng,
            events: Vec::new(),
        };
        state.regenerate();
        state
    }

    /// Test/replay constructor with a hand-built board.
    pub fn from_parts(
        settings: GameSettings,
        map: GameMap,
        player: Point,
        orcs: Vec<Point>,
        rng: RandomNumberGenerator,
    ) -> Self {
        Self {
            settings,
            map,
            player,
            orcs,
            score: 0,
            turns: 0,
            game_over: false,
            player_dead: false,
            won: false,
            paused: false,
            epoch: 0,
            rng,
            events: Vec::new(),
        }
    }

    pub fn restart(&mut self) {
        self.epoch += 1;
        self.regenerate();
    }

    fn regenerate(&mut self) {
        self.score = 0;
        self.turns = 0;
        self.game_over = false;
        self.player_dead = false;
        self.won = false;
        self.paused = false;
        self.events.clear();

        self.map = GameMap::generate(&self.settings, &mut self.rng);
        self.orcs.clear();
        for _ in 0..self.settings.number_of_orcs {
            match self.map.random_grass_cell(&mut self.rng) {
                Some(cell) => self.orcs.push(cell),
                None => break,
            }
        }

        // The center may have been overwritten by a feature; force it back.
        self.player = self.settings.center();
        self.map.set_tile(self.player, TileKind::Grass);
    }

    /// One full turn: player step, orc phase, win check. `(0, 0)` is the
    /// stay-put move and still lets the orcs advance.
    pub fn apply_step(&mut self, dx: i32, dy: i32) {
        if self.game_over || self.paused {
            return;
        }

        let candidate =
            self.clamp_to_playable(Point::new(self.player.x + dx, self.player.y + dy));
        let Some(tile) = self.map.tile_at(candidate) else {
            return;
        };
        let info = tile.info();
        if info.kills {
            self.kill_player(candidate, DeathCause::Terrain(tile), false);
            return;
        }
        if !info.passable {
            self.events.push(Event::Bumped);
            return;
        }
        if self.orc_at(candidate) {
            self.kill_player(candidate, DeathCause::Orc, false);
            return;
        }

        self.player = candidate;
        self.orc_phase();
        if self.game_over {
            return;
        }
        if self.orcs.is_empty() {
            self.won = true;
            self.game_over = true;
            self.events.push(Event::Won);
            return;
        }
        self.events.push(Event::Moved);
        self.turns += 1;
    }

    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Step { dx, dy } => self.apply_step(dx, dy),
            Command::Restart => self.restart(),
            // Credits are a shell concern; the simulation ignores them.
            Command::ToggleCredits => {}
        }
    }

    /// Every orc steps one cell toward the player, one axis at a time.
    /// Collisions resolve after the whole pass: tree hits remove orcs via
    /// filter semantics (a removal never skips the next orc), a caught
    /// player dies once all orcs have moved.
    fn orc_phase(&mut self) {
        let player = self.player;
        let mut survivors = Vec::with_capacity(self.orcs.len());
        let mut destroyed = Vec::new();
        let mut caught = false;

        for orc in std::mem::take(&mut self.orcs) {
            let next = Point::new(
                orc.x + (player.x - orc.x).signum(),
                orc.y + (player.y - orc.y).signum(),
            );
            if self.map.tile_at(next) == Some(TileKind::Tree) {
                destroyed.push(next);
                continue;
            }
            if next == player {
                caught = true;
            }
            survivors.push(next);
        }
        self.orcs = survivors;

        if !destroyed.is_empty() {
            self.score += self.settings.orc_score * destroyed.len() as u32;
            self.events.push(Event::OrcsDestroyed { cells: destroyed });
        }
        if caught {
            self.kill_player(player, DeathCause::Orc, true);
        }
    }

    fn kill_player(&mut self, at: Point, cause: DeathCause, caught: bool) {
        self.player_dead = true;
        self.game_over = true;
        self.events.push(Event::PlayerDied { at, cause, caught });
    }

    fn clamp_to_playable(&self, point: Point) -> Point {
        Point::new(
            point.x.clamp(1, self.map.width - 2),
            point.y.clamp(2, self.map.height - 2),
        )
    }

    pub fn orc_at(&self, point: Point) -> bool {
        self.orcs.iter().any(|orc| *orc == point)
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}
