use crate::mood::Mood;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const METRIC_MIN: i32 = 0;
pub const METRIC_MAX: i32 = 100;

pub fn clamp_metric(value: i32) -> i32 {
    value.clamp(METRIC_MIN, METRIC_MAX)
}

/// Signed change to each need, one row of a strategy table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Drift {
    pub hunger: i32,
    pub social: i32,
    pub hygiene: i32,
    pub sleep: i32,
}

impl Drift {
    pub const ZERO: Drift = Drift::new(0, 0, 0, 0);

    /// Column order matches the strategy tables: hunger, social, hygiene, sleep.
    pub const fn new(hunger: i32, social: i32, hygiene: i32, sleep: i32) -> Self {
        Self {
            hunger,
            social,
            hygiene,
            sleep,
        }
    }

    pub fn map(self, f: impl Fn(i32) -> i32) -> Self {
        Self {
            hunger: f(self.hunger),
            social: f(self.social),
            hygiene: f(self.hygiene),
            sleep: f(self.sleep),
        }
    }
}

/// The four needs. Every value stays in `[0, 100]`; lower is better.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeedMetrics {
    hunger: i32,
    hygiene: i32,
    social: i32,
    sleep: i32,
}

impl Default for NeedMetrics {
    fn default() -> Self {
        Self {
            hunger: 20,
            hygiene: 60,
            social: 60,
            sleep: 15,
        }
    }
}

impl NeedMetrics {
    pub fn new(hunger: i32, hygiene: i32, social: i32, sleep: i32) -> Self {
        Self {
            hunger: clamp_metric(hunger),
            hygiene: clamp_metric(hygiene),
            social: clamp_metric(social),
            sleep: clamp_metric(sleep),
        }
    }

    pub fn hunger(&self) -> i32 {
        self.hunger
    }

    pub fn hygiene(&self) -> i32 {
        self.hygiene
    }

    pub fn social(&self) -> i32 {
        self.social
    }

    pub fn sleep(&self) -> i32 {
        self.sleep
    }

    pub fn set_hunger(&mut self, value: i32) {
        self.hunger = clamp_metric(value);
    }

    pub fn set_hygiene(&mut self, value: i32) {
        self.hygiene = clamp_metric(value);
    }

    pub fn set_social(&mut self, value: i32) {
        self.social = clamp_metric(value);
    }

    pub fn set_sleep(&mut self, value: i32) {
        self.sleep = clamp_metric(value);
    }

    pub fn apply(&mut self, drift: Drift) {
        self.set_hunger(self.hunger.saturating_add(drift.hunger));
        self.set_social(self.social.saturating_add(drift.social));
        self.set_hygiene(self.hygiene.saturating_add(drift.hygiene));
        self.set_sleep(self.sleep.saturating_add(drift.sleep));
    }

    /// How many of the four needs satisfy `pred`.
    pub fn count_where(&self, pred: impl Fn(i32) -> bool) -> usize {
        [self.hunger, self.social, self.hygiene, self.sleep]
            .into_iter()
            .filter(|v| pred(*v))
            .count()
    }
}

/// Point-in-time copy of the pet's state. Never changes once built.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub mood: Mood,
    pub dead: bool,
    pub hunger: i32,
    pub hygiene: i32,
    pub social: i32,
    pub sleep: i32,
}

impl HealthSnapshot {
    pub fn capture(metrics: &NeedMetrics, mood: Mood, dead: bool) -> Self {
        Self {
            mood,
            dead,
            hunger: metrics.hunger(),
            hygiene: metrics.hygiene(),
            social: metrics.social(),
            sleep: metrics.sleep(),
        }
    }

    pub fn alive(&self) -> bool {
        !self.dead
    }
}

impl fmt::Display for HealthSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mood={} alive={} hunger={} hygiene={} social={} sleep={}",
            self.mood,
            self.alive(),
            self.hunger,
            self.hygiene,
            self.social,
            self.sleep
        )
    }
}
