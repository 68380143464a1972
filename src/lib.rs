//! A virtual pet whose four needs drift over time and respond to care.
//!
//! The [`Pet`] state machine is the whole of the logic: needs are clamped
//! to `[0, 100]`, the current [`Mood`] picks a [`MoodStrategy`] that decides
//! how actions and time move the needs, anxiety can set in at random, and
//! a pet whose hunger and sleep both pass 95 dies for good.
//!
//! ```
//! use moodpet::{Action, Mood, Pet, ScriptedRandom};
//!
//! let mut pet = Pet::with_random(ScriptedRandom::new().with_ints(&[99]));
//! pet.apply_action(Action::Feed);
//! let health = pet.health();
//! assert_eq!(health.hunger, 5);
//! // hygiene 63 and social 65 both sit above 60
//! assert_eq!(health.mood, Mood::Distressed);
//! ```

pub mod command;
pub mod error;
pub mod metrics;
pub mod mood;
pub mod pet;
pub mod random;
pub mod strategy;

pub use command::{Command, CommandKind};
pub use error::ParseError;
pub use metrics::{HealthSnapshot, NeedMetrics};
pub use mood::{Action, Mood};
pub use pet::Pet;
pub use random::{RandomSource, ScriptedRandom, SplitMix64};
pub use strategy::MoodStrategy;
