use crate::metrics::{HealthSnapshot, NeedMetrics};
use crate::mood::{Action, Mood};
use crate::random::{RandomSource, SplitMix64};
use crate::strategy::MoodStrategy;
use tracing::{debug, info, trace};

/// Both hunger and sleep above this kills the pet.
pub const DEATH_THRESHOLD: i32 = 95;

/// Hunger and sleep above this raise the anxiety-onset ceiling.
pub const ONSET_STRESS_THRESHOLD: i32 = 60;
pub const ONSET_CEILING_STRESSED: u32 = 50;
pub const ONSET_CEILING_CALM: u32 = 20;
pub const ONSET_DRAW_BOUND: u32 = 100;

/// The pet state machine.
///
/// Owns the needs, the current mood with its strategy, the dead flag and
/// the random source. All mutation goes through [`Pet::apply_action`] and
/// [`Pet::tick`]; once dead, every mutating call is a no-op.
#[derive(Clone, Debug)]
pub struct Pet<R = SplitMix64> {
    metrics: NeedMetrics,
    mood: Mood,
    strategy: MoodStrategy,
    dead: bool,
    rng: R,
}

impl Pet<SplitMix64> {
    pub fn new() -> Self {
        Self::with_random(SplitMix64::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_random(SplitMix64::new(seed))
    }
}

impl Default for Pet<SplitMix64> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RandomSource> Pet<R> {
    pub fn with_random(rng: R) -> Self {
        let mood = Mood::default();
        Self {
            metrics: NeedMetrics::default(),
            mood,
            strategy: MoodStrategy::for_mood(mood),
            dead: false,
            rng,
        }
    }

    pub fn apply_action(&mut self, action: Action) {
        if self.dead {
            return;
        }
        self.strategy
            .apply_action(&mut self.metrics, action, &mut self.rng);
        self.settle();
    }

    /// Advances one time unit.
    pub fn tick(&mut self) {
        if self.dead {
            return;
        }
        self.strategy.passive_tick(&mut self.metrics, &mut self.rng);
        self.settle();
    }

    /// Forces the mood and installs a fresh strategy for it, skipping the
    /// recommendation and onset sampling. Ignored once dead.
    pub fn set_mood(&mut self, mood: Mood) {
        if self.dead {
            return;
        }
        if mood != self.mood {
            debug!(from = %self.mood, to = %mood, "mood forced");
        }
        self.mood = mood;
        self.strategy = MoodStrategy::for_mood(mood);
    }

    pub fn health(&self) -> HealthSnapshot {
        HealthSnapshot::capture(&self.metrics, self.mood, self.dead)
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn metrics(&self) -> &NeedMetrics {
        &self.metrics
    }

    pub fn strategy(&self) -> &MoodStrategy {
        &self.strategy
    }

    pub fn random_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    // Direct metric overrides for scripted scenarios. Frozen once dead.

    pub fn set_hunger(&mut self, value: i32) {
        if !self.dead {
            self.metrics.set_hunger(value);
        }
    }

    pub fn set_hygiene(&mut self, value: i32) {
        if !self.dead {
            self.metrics.set_hygiene(value);
        }
    }

    pub fn set_social(&mut self, value: i32) {
        if !self.dead {
            self.metrics.set_social(value);
        }
    }

    pub fn set_sleep(&mut self, value: i32) {
        if !self.dead {
            self.metrics.set_sleep(value);
        }
    }

    fn settle(&mut self) {
        let recommended = self.strategy.recommended_mood(&self.metrics);
        self.commit_mood(recommended);
        self.sample_anxiety_onset();
        self.check_death();
    }

    /// Swaps the strategy only when the mood actually changes, so an
    /// anxious pet keeps its hug state across a same-mood commit.
    fn commit_mood(&mut self, mood: Mood) {
        if mood == self.mood {
            return;
        }
        debug!(from = %self.mood, to = %mood, "mood changed");
        self.mood = mood;
        self.strategy = MoodStrategy::for_mood(mood);
    }

    fn sample_anxiety_onset(&mut self) {
        if self.mood == Mood::Anxious {
            return;
        }
        let stressed = self.metrics.hunger() > ONSET_STRESS_THRESHOLD
            && self.metrics.sleep() > ONSET_STRESS_THRESHOLD;
        let ceiling = if stressed {
            ONSET_CEILING_STRESSED
        } else {
            ONSET_CEILING_CALM
        };
        let draw = self.rng.next_bounded(ONSET_DRAW_BOUND);
        trace!(draw, ceiling, "anxiety onset draw");
        if draw < ceiling {
            self.commit_mood(Mood::Anxious);
        }
    }

    fn check_death(&mut self) {
        if self.metrics.hunger() > DEATH_THRESHOLD && self.metrics.sleep() > DEATH_THRESHOLD {
            self.dead = true;
            info!(
                hunger = self.metrics.hunger(),
                sleep = self.metrics.sleep(),
                mood = %self.mood,
                "pet died"
            );
        }
    }
}
