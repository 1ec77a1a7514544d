use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;
use bracket_terminal::prelude::*;

use forest::{
    config::GameSettings,
    effects::{EffectSet, Glitch},
    game,
    game::events::{Cue, Event},
    render,
    render::overlay::{ButtonAction, ButtonRegion, Overlay, OverlayKind, draw_overlay},
};

const LOG_PANEL_ROWS: i32 = 5;
const LOG_MAX_ENTRIES: usize = 4;
const REPO_URL: &str = "https://github.com/oxygensmith/forest";

struct ForestShell {
    state: game::GameState,
    overlay: Overlay,
    button: Option<ButtonRegion>,
    effects: EffectSet,
    fx_rng: RandomNumberGenerator,
    message_log: Vec<String>,
}

impl ForestShell {
    fn new(settings: GameSettings) -> Self {
        let state = game::GameState::new(settings, RandomNumberGenerator::new());
        let mut overlay = Overlay::None;
        overlay.open(Overlay::About);
        Self {
            state,
            overlay,
            button: None,
            effects: EffectSet::new(),
            fx_rng: RandomNumberGenerator::new(),
            message_log: Vec::new(),
        }
    }

    fn handle_key(&mut self, key: VirtualKeyCode) {
        if !self.overlay.is_none() {
            // Credits toggle shut with the same key; other screens hold
            // their ground until their button is clicked.
            if key == VirtualKeyCode::Slash {
                self.overlay.close(OverlayKind::Credits);
            }
            return;
        }

        let step = match key {
            VirtualKeyCode::Q => Some((-1, -1)),
            VirtualKeyCode::W | VirtualKeyCode::Up => Some((0, -1)),
            VirtualKeyCode::E => Some((1, -1)),
            VirtualKeyCode::A | VirtualKeyCode::Left => Some((-1, 0)),
            VirtualKeyCode::S => Some((0, 0)),
            VirtualKeyCode::D | VirtualKeyCode::Right => Some((1, 0)),
            VirtualKeyCode::Z => Some((-1, 1)),
            VirtualKeyCode::X | VirtualKeyCode::Down => Some((0, 1)),
            VirtualKeyCode::C => Some((1, 1)),
            VirtualKeyCode::Slash => {
                // The death glitch is about to raise the game-over screen;
                // opening credits here would shadow it with no way back.
                if !self.state.game_over {
                    self.overlay.open(Overlay::Credits);
                }
                None
            }
            _ => None,
        };
        if let Some((dx, dy)) = step {
            self.state.apply_step(dx, dy);
        }
    }

    fn handle_click(&mut self, ctx: &mut BTerm) {
        if !ctx.left_click {
            return;
        }
        let Some(button) = self.button else {
            return;
        };
        let (mx, my) = ctx.mouse_pos();
        if !button.contains(Point::new(mx, my)) {
            return;
        }
        match button.action {
            ButtonAction::Start => {
                self.overlay.close(OverlayKind::About);
                self.button = None;
                self.state.restart();
            }
            ButtonAction::Restart => {
                self.overlay.close(OverlayKind::GameOver);
                self.button = None;
                self.state.restart();
            }
            ButtonAction::OpenRepo => {
                self.push_log(format!("Game code lives at {REPO_URL}"));
            }
        }
    }

    fn drain_game_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                Event::Moved => self.play_cue(Cue::Move),
                // The original reused the move sound as the bump cue.
                Event::Bumped => self.play_cue(Cue::Move),
                Event::OrcsDestroyed { cells } => {
                    for cell in cells {
                        let glitch = Glitch::orc_kill(cell, self.state.epoch, &mut self.fx_rng);
                        self.effects.push(glitch);
                    }
                    self.play_cue(Cue::OrcDestroyed);
                }
                Event::PlayerDied { at, cause, caught } => {
                    // A mid-phase catch cues right away; walking into a
                    // hazard waits for the settle.
                    if caught {
                        self.play_cue(Cue::PlayerCollision);
                    }
                    let glitch =
                        Glitch::player_death(at, self.state.epoch, cause, &mut self.fx_rng);
                    self.effects.push(glitch);
                }
                Event::Won => {
                    self.overlay.open(Overlay::GameOver {
                        reason: "You win! All orcs eliminated!".to_string(),
                        win: true,
                    });
                }
            }
        }
    }

    fn advance_effects(&mut self, frame_ms: f32) {
        let settles = self
            .effects
            .advance(self.state.epoch, frame_ms, &mut self.fx_rng);
        for settle in settles {
            self.play_cue(settle.cue);
            self.overlay.open(Overlay::GameOver {
                reason: settle.reason,
                win: false,
            });
        }
    }

    // Audio is a set of fire-and-forget one-shots; in the terminal build
    // each cue surfaces as a log line instead.
    fn play_cue(&mut self, cue: Cue) {
        let line = match cue {
            Cue::Move => "~ step",
            Cue::OrcDestroyed => "An orc blunders into a tree!",
            Cue::PlayerCollision => "A crunch echoes over the field.",
            Cue::PlayerDrown => "The river swallows you.",
        };
        self.push_log(line);
    }

    fn push_log<S: Into<String>>(&mut self, entry: S) {
        self.message_log.insert(0, entry.into());
        self.message_log.truncate(LOG_MAX_ENTRIES);
    }

    fn draw(&mut self, ctx: &mut BTerm) {
        render::draw_header(ctx, &self.state);
        render::draw_board(ctx, &self.state);
        render::draw_effects(ctx, self.effects.glitches(), self.state.epoch);
        render::draw_actors(ctx, &self.state);
        render::draw_log(
            ctx,
            &self.message_log,
            self.state.map.height + 1,
            LOG_MAX_ENTRIES,
        );
        self.button = draw_overlay(
            ctx,
            &self.overlay,
            self.state.map.width,
            self.state.map.height,
        );
    }
}

impl GameState for ForestShell {
    fn tick(&mut self, ctx: &mut BTerm) {
        if let Some(key) = ctx.key {
            self.handle_key(key);
        }
        self.handle_click(ctx);
        self.drain_game_events();
        self.advance_effects(ctx.frame_time_ms);
        ctx.cls();
        self.draw(ctx);
    }
}

fn main() -> BError {
    let settings = match std::env::args().nth(1) {
        Some(path) => GameSettings::load(&path).unwrap_or_else(|err| {
            eprintln!("settings {path}: {err}; falling back to defaults");
            GameSettings::default()
        }),
        None => GameSettings::default(),
    };

    let context = BTermBuilder::simple(settings.grid_width, settings.grid_height + LOG_PANEL_ROWS)?
        .with_title("Forest")
        .build()?;
    main_loop(context, ForestShell::new(settings))
}
