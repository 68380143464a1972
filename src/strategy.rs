//! Mood-dependent behavior.
//!
//! Each mood owns a policy for three things: how a care action moves the
//! needs, how the needs drift on their own each tick, and which mood the
//! current needs justify. The pet holds exactly one [`MoodStrategy`] and
//! replaces it whenever its mood changes.

use crate::metrics::{Drift, NeedMetrics};
use crate::mood::{Action, Mood};
use crate::random::RandomSource;

/// Needs above this count as a problem for content and distressed pets.
const PROBLEM_THRESHOLD: i32 = 60;
const PROBLEMS_FOR_DISTRESS: usize = 2;

/// Needs below this count as settled for an anxious pet.
const CALM_THRESHOLD: i32 = 50;
const CALM_NEEDS_TO_RECOVER: usize = 3;

const ANXIOUS_SCALE: f32 = 0.75;
const HUG_SOCIAL_RELIEF: i32 = 30;

const CONTENT_TICK: Drift = Drift::new(2, 2, 1, 1);
const DISTRESSED_TICK: Drift = Drift::new(5, 5, 3, 5);
const ANXIOUS_HUNGER_TICK: i32 = 7;
const ANXIOUS_HYGIENE_TICK: i32 = 3;
const ANXIOUS_SOCIAL_SPREAD: u32 = 7;
const ANXIOUS_SLEEP_SPREAD: u32 = 10;

fn content_effect(action: Action) -> Drift {
    match action {
        Action::Feed => Drift::new(-15, 5, 3, 5),
        Action::Play => Drift::new(5, -10, 3, 10),
        Action::Clean => Drift::new(0, 3, -15, 10),
        Action::Sleep => Drift::new(0, -10, 0, -30),
        Action::Comfort => Drift::ZERO,
    }
}

fn distressed_effect(action: Action) -> Drift {
    match action {
        Action::Feed => Drift::new(-20, 1, 1, 1),
        Action::Play => Drift::new(1, -15, 1, 1),
        Action::Clean => Drift::new(0, 1, -20, 1),
        Action::Sleep => Drift::new(0, 0, 0, -35),
        Action::Comfort => Drift::ZERO,
    }
}

/// Round half up, i.e. `floor(x + 0.5)`: 2.5 → 3, -2.5 → -2.
pub fn round_half_up(x: f32) -> i32 {
    (x + 0.5).floor() as i32
}

/// Scales one content delta by `0.75 * ratio`, keeping the delta's sign.
fn scale_delta(delta: i32, ratio: f32) -> i32 {
    let magnitude = round_half_up(delta.unsigned_abs() as f32 * ANXIOUS_SCALE * ratio);
    delta.signum() * magnitude
}

fn problem_mood(metrics: &NeedMetrics) -> Mood {
    if metrics.count_where(|v| v > PROBLEM_THRESHOLD) >= PROBLEMS_FOR_DISTRESS {
        Mood::Distressed
    } else {
        Mood::Content
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoodStrategy {
    Content,
    Distressed,
    /// `hug_applied` pins the action ratio to 1.0 until the next tick.
    Anxious { hug_applied: bool },
}

impl MoodStrategy {
    pub fn for_mood(mood: Mood) -> Self {
        match mood {
            Mood::Content => MoodStrategy::Content,
            Mood::Distressed => MoodStrategy::Distressed,
            Mood::Anxious => MoodStrategy::Anxious { hug_applied: false },
        }
    }

    pub fn mood(&self) -> Mood {
        match self {
            MoodStrategy::Content => Mood::Content,
            MoodStrategy::Distressed => Mood::Distressed,
            MoodStrategy::Anxious { .. } => Mood::Anxious,
        }
    }

    pub fn hug_applied(&self) -> bool {
        matches!(self, MoodStrategy::Anxious { hug_applied: true })
    }

    pub fn apply_action<R: RandomSource + ?Sized>(
        &mut self,
        metrics: &mut NeedMetrics,
        action: Action,
        rng: &mut R,
    ) {
        match self {
            MoodStrategy::Content => metrics.apply(content_effect(action)),
            MoodStrategy::Distressed => metrics.apply(distressed_effect(action)),
            MoodStrategy::Anxious { hug_applied } => {
                if action == Action::Comfort {
                    metrics.set_social(metrics.social() - HUG_SOCIAL_RELIEF);
                    *hug_applied = true;
                    return;
                }
                let ratio = if *hug_applied {
                    1.0
                } else {
                    rng.next_unit_f32() * 2.0 - 1.0
                };
                let drift = content_effect(action).map(|d| scale_delta(d, ratio));
                metrics.apply(drift);
            }
        }
    }

    pub fn passive_tick<R: RandomSource + ?Sized>(
        &mut self,
        metrics: &mut NeedMetrics,
        rng: &mut R,
    ) {
        match self {
            MoodStrategy::Content => metrics.apply(CONTENT_TICK),
            MoodStrategy::Distressed => metrics.apply(DISTRESSED_TICK),
            MoodStrategy::Anxious { hug_applied } => {
                // social is drawn before sleep
                let social = rng.next_bounded(ANXIOUS_SOCIAL_SPREAD * 2 + 1) as i32
                    - ANXIOUS_SOCIAL_SPREAD as i32;
                let sleep = rng.next_bounded(ANXIOUS_SLEEP_SPREAD * 2 + 1) as i32
                    - ANXIOUS_SLEEP_SPREAD as i32;
                metrics.apply(Drift::new(
                    ANXIOUS_HUNGER_TICK,
                    social,
                    ANXIOUS_HYGIENE_TICK,
                    sleep,
                ));
                *hug_applied = false;
            }
        }
    }

    pub fn recommended_mood(&self, metrics: &NeedMetrics) -> Mood {
        match self {
            MoodStrategy::Content | MoodStrategy::Distressed => problem_mood(metrics),
            MoodStrategy::Anxious { .. } => {
                if metrics.count_where(|v| v < CALM_THRESHOLD) >= CALM_NEEDS_TO_RECOVER {
                    Mood::Content
                } else {
                    Mood::Anxious
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::ScriptedRandom;

    fn all_fifty() -> NeedMetrics {
        NeedMetrics::new(50, 50, 50, 50)
    }

    #[test]
    fn content_feed_from_defaults() {
        let mut m = NeedMetrics::default();
        let mut rng = ScriptedRandom::new();
        let mut s = MoodStrategy::Content;
        s.apply_action(&mut m, Action::Feed, &mut rng);
        assert_eq!(m, NeedMetrics::new(5, 63, 65, 20));
        // hygiene 63 and social 65 are two problems
        assert_eq!(s.recommended_mood(&m), Mood::Distressed);
    }

    #[test]
    fn content_table_rows() {
        let mut rng = ScriptedRandom::new();
        let cases = [
            (Action::Play, NeedMetrics::new(55, 53, 40, 60)),
            (Action::Clean, NeedMetrics::new(50, 35, 53, 60)),
            (Action::Sleep, NeedMetrics::new(50, 50, 40, 20)),
            (Action::Comfort, all_fifty()),
        ];
        for (action, expected) in cases {
            let mut m = all_fifty();
            MoodStrategy::Content.apply_action(&mut m, action, &mut rng);
            assert_eq!(m, expected, "{action}");
        }
    }

    #[test]
    fn distressed_table_rows() {
        let mut rng = ScriptedRandom::new();
        let cases = [
            (Action::Feed, NeedMetrics::new(30, 51, 51, 51)),
            (Action::Play, NeedMetrics::new(51, 51, 35, 51)),
            (Action::Clean, NeedMetrics::new(50, 30, 51, 51)),
            (Action::Sleep, NeedMetrics::new(50, 50, 50, 15)),
            (Action::Comfort, all_fifty()),
        ];
        for (action, expected) in cases {
            let mut m = all_fifty();
            MoodStrategy::Distressed.apply_action(&mut m, action, &mut rng);
            assert_eq!(m, expected, "{action}");
        }
    }

    #[test]
    fn passive_ticks_for_fixed_strategies() {
        let mut rng = ScriptedRandom::new();
        let mut m = all_fifty();
        MoodStrategy::Content.passive_tick(&mut m, &mut rng);
        assert_eq!(m, NeedMetrics::new(52, 51, 52, 51));

        let mut m = all_fifty();
        MoodStrategy::Distressed.passive_tick(&mut m, &mut rng);
        assert_eq!(m, NeedMetrics::new(55, 53, 55, 55));
    }

    #[test]
    fn problem_count_rule_needs_two() {
        let s = MoodStrategy::Content;
        assert_eq!(s.recommended_mood(&NeedMetrics::new(61, 60, 60, 60)), Mood::Content);
        assert_eq!(s.recommended_mood(&NeedMetrics::new(61, 61, 0, 0)), Mood::Distressed);
        assert_eq!(
            MoodStrategy::Distressed.recommended_mood(&NeedMetrics::new(10, 10, 10, 10)),
            Mood::Content
        );
    }

    #[test]
    fn anxious_hug_relieves_social_only() {
        let mut m = all_fifty();
        let mut rng = ScriptedRandom::new().with_ints(&[99]);
        let mut s = MoodStrategy::Anxious { hug_applied: false };
        s.apply_action(&mut m, Action::Comfort, &mut rng);
        assert_eq!(m, NeedMetrics::new(50, 50, 20, 50));
        assert!(s.hug_applied());
        // no draw was taken
        assert_eq!(rng.next_bounded(100), 99);
    }

    #[test]
    fn anxious_feed_with_positive_ratio() {
        let mut m = all_fifty();
        let mut rng = ScriptedRandom::new().with_float(0.75);
        MoodStrategy::Anxious { hug_applied: false }.apply_action(&mut m, Action::Feed, &mut rng);
        assert_eq!(m.hunger(), 44);
        assert_eq!(m.social(), 52);
        assert_eq!(m.hygiene(), 51);
        assert_eq!(m.sleep(), 52);
    }

    #[test]
    fn anxious_feed_with_negative_ratio() {
        let mut m = all_fifty();
        let mut rng = ScriptedRandom::new().with_float(0.25);
        MoodStrategy::Anxious { hug_applied: false }.apply_action(&mut m, Action::Feed, &mut rng);
        assert_eq!(m.hunger(), 56);
        assert_eq!(m.social(), 48);
        assert_eq!(m.hygiene(), 49);
        assert_eq!(m.sleep(), 48);
    }

    #[test]
    fn anxious_rows_scale_with_positive_ratio() {
        // float 0.75 gives r = 0.5, so every content delta is scaled by 0.375
        let cases = [
            (Action::Play, NeedMetrics::new(62, 61, 56, 64)),
            (Action::Clean, NeedMetrics::new(60, 54, 61, 64)),
            (Action::Sleep, NeedMetrics::new(60, 60, 56, 49)),
        ];
        for (action, expected) in cases {
            let mut m = NeedMetrics::new(60, 60, 60, 60);
            let mut rng = ScriptedRandom::new().with_float(0.75);
            MoodStrategy::Anxious { hug_applied: false }.apply_action(&mut m, action, &mut rng);
            assert_eq!(m, expected, "{action}");
        }
    }

    #[test]
    fn anxious_rows_invert_with_negative_ratio() {
        // float 0.0 gives r = -1, so the content sign pattern flips
        let cases = [
            (Action::Feed, NeedMetrics::new(71, 58, 56, 56)),
            (Action::Play, NeedMetrics::new(56, 58, 67, 53)),
            (Action::Clean, NeedMetrics::new(60, 71, 58, 53)),
            (Action::Sleep, NeedMetrics::new(60, 60, 67, 82)),
        ];
        for (action, expected) in cases {
            let mut m = NeedMetrics::new(60, 60, 60, 60);
            let mut rng = ScriptedRandom::new().with_float(0.0);
            MoodStrategy::Anxious { hug_applied: false }.apply_action(&mut m, action, &mut rng);
            assert_eq!(m, expected, "{action}");
        }
    }

    #[test]
    fn anxious_hug_clamps_social_at_zero() {
        let mut m = NeedMetrics::new(50, 50, 10, 50);
        let mut rng = ScriptedRandom::new();
        let mut s = MoodStrategy::Anxious { hug_applied: false };
        s.apply_action(&mut m, Action::Comfort, &mut rng);
        assert_eq!(m, NeedMetrics::new(50, 50, 0, 50));
        assert!(s.hug_applied());
    }

    #[test]
    fn anxious_passive_tick_with_scripted_ints() {
        let mut m = all_fifty();
        let mut rng = ScriptedRandom::new().with_ints(&[10, 5]);
        MoodStrategy::Anxious { hug_applied: false }.passive_tick(&mut m, &mut rng);
        assert_eq!(m.hunger(), 57);
        assert_eq!(m.hygiene(), 53);
        assert_eq!(m.social(), 53);
        assert_eq!(m.sleep(), 45);
    }

    #[test]
    fn hug_pins_ratio_until_next_tick() {
        let mut m = all_fifty();
        let mut rng = ScriptedRandom::new().with_float(0.25);
        let mut s = MoodStrategy::Anxious { hug_applied: false };

        s.apply_action(&mut m, Action::Comfort, &mut rng);
        s.apply_action(&mut m, Action::Feed, &mut rng);
        assert_eq!(m.hunger(), 39);

        rng.set_ints(&[7, 10]);
        s.passive_tick(&mut m, &mut rng);
        assert!(!s.hug_applied());
        assert_eq!(m.hunger(), 46);

        s.apply_action(&mut m, Action::Feed, &mut rng);
        assert_eq!(m.hunger(), 52);
    }

    #[test]
    fn anxious_recovers_with_three_calm_needs() {
        let s = MoodStrategy::Anxious { hug_applied: false };
        assert_eq!(s.recommended_mood(&NeedMetrics::new(40, 50, 40, 40)), Mood::Content);
        assert_eq!(s.recommended_mood(&NeedMetrics::new(40, 60, 40, 60)), Mood::Anxious);
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-5.625), -6);
        assert_eq!(round_half_up(1.125), 1);
    }

    #[test]
    fn for_mood_round_trips() {
        for mood in Mood::ALL {
            assert_eq!(MoodStrategy::for_mood(mood).mood(), mood);
        }
    }
}
