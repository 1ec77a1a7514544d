//! The glitch-then-settle effect shown where something dies: a few random
//! symbols cycle at the impact cell, then a permanent `D` remains. Modelled
//! as a small state machine advanced by the shell's frame clock rather than
//! a captured callback, so a restart can invalidate pending effects by
//! epoch instead of racing them.

use bracket_geometry::prelude::Point;
use bracket_random::prelude::RandomNumberGenerator;

use crate::game::events::{Cue, DeathCause};

pub const GLITCH_GLYPHS: [char; 11] = ['@', '#', '%', '&', '*', '+', '=', '?', '$', '!', '~'];
pub const GLITCH_CYCLES: u32 = 2;
pub const GLITCH_STEP_MS: f32 = 100.0;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GlitchPhase {
    Cycling { remaining: u32 },
    Settled,
}

/// What the shell does once a death glitch settles: play the cause cue and
/// raise the game-over overlay. Orc kills settle without one.
#[derive(Clone, Debug, PartialEq)]
pub struct DeathSettle {
    pub reason: String,
    pub cue: Cue,
}

#[derive(Clone, Debug)]
pub struct Glitch {
    pub at: Point,
    pub glyph: char,
    pub epoch: u64,
    phase: GlitchPhase,
    outcome: Option<DeathSettle>,
}

impl Glitch {
    pub fn orc_kill(at: Point, epoch: u64, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            at,
            glyph: random_glyph(rng),
            epoch,
            phase: GlitchPhase::Cycling {
                remaining: GLITCH_CYCLES,
            },
            outcome: None,
        }
    }

    pub fn player_death(
        at: Point,
        epoch: u64,
        cause: DeathCause,
        rng: &mut RandomNumberGenerator,
    ) -> Self {
        Self {
            at,
            glyph: random_glyph(rng),
            epoch,
            phase: GlitchPhase::Cycling {
                remaining: GLITCH_CYCLES,
            },
            outcome: Some(DeathSettle {
                reason: cause.reason(),
                cue: cause.cue(),
            }),
        }
    }

    pub fn settled(&self) -> bool {
        self.phase == GlitchPhase::Settled
    }

    /// One 100 ms step. Cycling picks the next random symbol; the transition
    /// into `Settled` yields the completion outcome exactly once.
    pub fn advance(&mut self, rng: &mut RandomNumberGenerator) -> Option<DeathSettle> {
        match self.phase {
            GlitchPhase::Settled => None,
            GlitchPhase::Cycling { remaining } => {
                if remaining <= 1 {
                    self.phase = GlitchPhase::Settled;
                    self.outcome.take()
                } else {
                    self.phase = GlitchPhase::Cycling {
                        remaining: remaining - 1,
                    };
                    self.glyph = random_glyph(rng);
                    None
                }
            }
        }
    }
}

/// The live glitches plus the fixed-step clock that drives them. Effects
/// spawned before the last restart carry a stale epoch and are dropped
/// before they can advance, so their settle outcomes never fire.
#[derive(Default)]
pub struct EffectSet {
    glitches: Vec<Glitch>,
    clock_ms: f32,
}

impl EffectSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, glitch: Glitch) {
        self.glitches.push(glitch);
    }

    pub fn glitches(&self) -> &[Glitch] {
        &self.glitches
    }

    pub fn is_empty(&self) -> bool {
        self.glitches.is_empty()
    }

    /// Drop stale-epoch glitches, run the clock forward by `frame_ms`, and
    /// collect every settle that completed.
    pub fn advance(
        &mut self,
        epoch: u64,
        frame_ms: f32,
        rng: &mut RandomNumberGenerator,
    ) -> Vec<DeathSettle> {
        self.glitches.retain(|glitch| glitch.epoch == epoch);

        self.clock_ms += frame_ms;
        let mut settles = Vec::new();
        while self.clock_ms >= GLITCH_STEP_MS {
            self.clock_ms -= GLITCH_STEP_MS;
            for glitch in &mut self.glitches {
                if let Some(settle) = glitch.advance(rng) {
                    settles.push(settle);
                }
            }
        }
        settles
    }
}

fn random_glyph(rng: &mut RandomNumberGenerator) -> char {
    GLITCH_GLYPHS[rng.range(0, GLITCH_GLYPHS.len() as i32) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::TileKind;

    #[test]
    fn settles_after_the_fixed_cycle_count() {
        let mut rng = RandomNumberGenerator::seeded(1);
        let mut glitch = Glitch::orc_kill(Point::new(3, 3), 0, &mut rng);
        for _ in 0..GLITCH_CYCLES - 1 {
            assert!(!glitch.settled());
            assert_eq!(glitch.advance(&mut rng), None);
        }
        assert_eq!(glitch.advance(&mut rng), None);
        assert!(glitch.settled());
    }

    #[test]
    fn death_outcome_is_yielded_exactly_once() {
        let mut rng = RandomNumberGenerator::seeded(2);
        let mut glitch = Glitch::player_death(
            Point::new(4, 4),
            0,
            DeathCause::Terrain(TileKind::River),
            &mut rng,
        );
        let mut outcomes = Vec::new();
        for _ in 0..GLITCH_CYCLES + 3 {
            if let Some(settle) = glitch.advance(&mut rng) {
                outcomes.push(settle);
            }
        }
        assert_eq!(
            outcomes,
            vec![DeathSettle {
                reason: "You collided with river!".to_string(),
                cue: Cue::PlayerDrown,
            }]
        );
    }

    #[test]
    fn stale_epoch_settle_is_discarded() {
        let mut rng = RandomNumberGenerator::seeded(4);
        let mut effects = EffectSet::new();
        effects.push(Glitch::player_death(
            Point::new(5, 5),
            0,
            DeathCause::Orc,
            &mut rng,
        ));

        // A restart bumped the epoch before the glitch could settle.
        let settles = effects.advance(1, GLITCH_STEP_MS * (GLITCH_CYCLES + 2) as f32, &mut rng);

        assert!(settles.is_empty());
        assert!(effects.is_empty());
    }

    #[test]
    fn current_epoch_settle_is_delivered() {
        let mut rng = RandomNumberGenerator::seeded(5);
        let mut effects = EffectSet::new();
        effects.push(Glitch::player_death(
            Point::new(5, 5),
            3,
            DeathCause::Orc,
            &mut rng,
        ));

        let settles = effects.advance(3, GLITCH_STEP_MS * (GLITCH_CYCLES + 1) as f32, &mut rng);

        assert_eq!(settles.len(), 1);
        assert_eq!(settles[0].cue, Cue::PlayerCollision);
        assert!(effects.glitches()[0].settled());
    }

    #[test]
    fn sub_step_frames_accumulate_on_the_clock() {
        let mut rng = RandomNumberGenerator::seeded(6);
        let mut effects = EffectSet::new();
        effects.push(Glitch::orc_kill(Point::new(2, 2), 0, &mut rng));

        // Four 30 ms frames only cross the 100 ms threshold once.
        for _ in 0..4 {
            effects.advance(0, 30.0, &mut rng);
        }

        assert!(!effects.glitches()[0].settled());
    }

    #[test]
    fn cycling_glyphs_come_from_the_glitch_set() {
        let mut rng = RandomNumberGenerator::seeded(3);
        let mut glitch = Glitch::orc_kill(Point::new(1, 1), 0, &mut rng);
        assert!(GLITCH_GLYPHS.contains(&glitch.glyph));
        glitch.advance(&mut rng);
        assert!(GLITCH_GLYPHS.contains(&glitch.glyph));
    }
}
