use crate::config::Settings;
use crate::input::{collect_input_nonblocking, map_event_to_control, Control};
use crate::render::{status_panel, Screen};
use chrono::Local;
use moodpet::{Mood, Pet, RandomSource};
use std::collections::VecDeque;
use std::time::{Duration, Instant};
use tracing::{info, trace};

/// Everything the interactive driver knows apart from the terminal: the
/// pet, the event log and the help/quit flags.
pub(crate) struct Session<R: RandomSource> {
    pet: Pet<R>,
    log: VecDeque<String>,
    log_len: usize,
    show_help: bool,
    should_quit: bool,
}

impl<R: RandomSource> Session<R> {
    pub(crate) fn new(pet: Pet<R>, log_len: usize) -> Self {
        Self {
            pet,
            log: VecDeque::with_capacity(log_len),
            log_len,
            show_help: false,
            should_quit: false,
        }
    }

    pub(crate) fn handle(&mut self, control: Control) {
        match control {
            Control::Quit => self.should_quit = true,
            Control::HelpToggle => self.show_help = !self.show_help,
            Control::Act(action) => self.step(&action.to_string(), |pet| pet.apply_action(action)),
            Control::Advance => self.step("time passes", |pet| pet.tick()),
            Control::ForceMood(mood) => {
                self.pet.set_mood(mood);
                self.record(&format!("mood set to {mood}"));
            }
        }
    }

    /// Timer-driven ticks. Only the outcome is logged, not each tick.
    pub(crate) fn auto_tick(&mut self, ticks: u32) {
        if ticks == 0 {
            return;
        }
        let (mood, dead) = (self.pet.mood(), self.pet.is_dead());
        for _ in 0..ticks {
            self.pet.tick();
        }
        self.note_outcome(mood, dead);
    }

    fn step(&mut self, what: &str, apply: impl FnOnce(&mut Pet<R>)) {
        let (mood, dead) = (self.pet.mood(), self.pet.is_dead());
        apply(&mut self.pet);
        self.record(what);
        self.note_outcome(mood, dead);
    }

    fn note_outcome(&mut self, mood_before: Mood, dead_before: bool) {
        let mood = self.pet.mood();
        if mood != mood_before {
            self.record(&format!("{mood_before} -> {mood}"));
        }
        if self.pet.is_dead() && !dead_before {
            self.record("your pet passed away");
        }
    }

    fn record(&mut self, what: &str) {
        // trace only: stderr shares the terminal with the frame
        trace!(event = what, "interaction");
        self.log.push_back(format!("{} {what}", Local::now().format("%H:%M:%S")));
        while self.log.len() > self.log_len {
            self.log.pop_front();
        }
    }

    pub(crate) fn log(&self) -> &VecDeque<String> {
        &self.log
    }
}

/// Interactive driver. Key presses and the auto-tick timer are handled in
/// the same loop, so the pet only ever sees one caller at a time.
struct App<R: RandomSource> {
    settings: Settings,
    session: Session<R>,
    screen: Screen,
}

impl<R: RandomSource> App<R> {
    fn init(settings: Settings, pet: Pet<R>) -> anyhow::Result<Self> {
        let screen = Screen::begin()?;
        Ok(Self {
            session: Session::new(pet, settings.event_log_len),
            settings,
            screen,
        })
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let fps = self.settings.fps_cap.clamp(10, 240);
        let frame_dt = Duration::from_secs_f32(1.0 / fps as f32);
        let tick_step = Duration::from_millis(self.settings.tick_interval_ms.max(50));

        let mut last_frame = Instant::now();
        let mut tick_accum = Duration::ZERO;

        while !self.session.should_quit {
            for ev in collect_input_nonblocking(frame_dt)? {
                if let Some(control) = map_event_to_control(&ev) {
                    self.session.handle(control);
                }
                if self.session.should_quit {
                    break;
                }
            }

            // auto-tick on a fixed step
            let now = Instant::now();
            tick_accum = tick_accum.saturating_add(now.saturating_duration_since(last_frame));
            last_frame = now;
            let mut due = 0;
            while tick_accum >= tick_step {
                tick_accum -= tick_step;
                due += 1;
            }
            self.session.auto_tick(due);

            self.render_frame()?;
            spin_sleep(frame_dt, Instant::now());
        }

        self.screen.end()?;
        Ok(())
    }

    fn render_frame(&mut self) -> anyhow::Result<()> {
        let health = self.session.pet.health();
        let canvas = self.screen.frame()?;
        status_panel(canvas, &health, self.session.log(), self.session.show_help);
        self.screen.present()
    }
}

pub(crate) fn run<R: RandomSource>(settings: Settings, pet: Pet<R>) -> anyhow::Result<()> {
    info!(tick_interval_ms = settings.tick_interval_ms, "starting interactive session");
    let mut app = App::init(settings, pet)?;
    let result = app.run();
    if result.is_err() {
        // leave the alternate screen even when the loop failed
        let _ = app.screen.end();
    }
    result
}

/* -----------------------------
   Frame pacing helper
------------------------------ */

fn spin_sleep(target: Duration, now: Instant) {
    let end = now + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use moodpet::{Action, ScriptedRandom};
    use std::io;
    use std::sync::{Arc, Mutex};

    /// Draw of 99 never triggers anxiety onset.
    fn calm_session() -> Session<ScriptedRandom> {
        Session::new(Pet::with_random(ScriptedRandom::new().with_ints(&[99])), 6)
    }

    fn entries(session: &Session<ScriptedRandom>) -> Vec<String> {
        // drop the HH:MM:SS prefix
        session.log().iter().map(|l| l[9..].to_string()).collect()
    }

    #[test]
    fn timer_tick_logs_mood_change() {
        let mut session = calm_session();
        // defaults tick to hygiene 61 and social 62
        session.auto_tick(1);
        assert_eq!(session.pet.mood(), Mood::Distressed);
        assert_eq!(entries(&session), ["content -> distressed"]);
    }

    #[test]
    fn quiet_timer_ticks_log_nothing() {
        let mut session = calm_session();
        session.auto_tick(0);
        session.pet.set_mood(Mood::Distressed);
        session.auto_tick(3);
        assert_eq!(session.pet.metrics().hunger(), 35);
        assert!(session.log().is_empty());
    }

    #[test]
    fn timer_tick_logs_death() {
        let mut session = calm_session();
        session.pet.set_hunger(96);
        session.pet.set_sleep(96);
        session.auto_tick(2);
        assert!(session.pet.is_dead());
        assert_eq!(
            entries(&session).last().map(String::as_str),
            Some("your pet passed away")
        );
    }

    #[test]
    fn key_actions_are_logged_with_their_outcome() {
        let mut session = calm_session();
        session.handle(Control::Act(Action::Feed));
        session.handle(Control::ForceMood(Mood::Anxious));
        session.handle(Control::HelpToggle);
        assert_eq!(
            entries(&session),
            ["feed", "content -> distressed", "mood set to anxious"]
        );
        assert!(session.show_help);
        assert!(!session.should_quit);
        session.handle(Control::Quit);
        assert!(session.should_quit);
    }

    #[test]
    fn log_keeps_the_newest_entries() {
        let mut session = Session::new(Pet::with_random(ScriptedRandom::new().with_ints(&[99])), 2);
        session.handle(Control::ForceMood(Mood::Anxious));
        session.handle(Control::ForceMood(Mood::Distressed));
        session.handle(Control::ForceMood(Mood::Content));
        assert_eq!(
            entries(&session),
            ["mood set to distressed", "mood set to content"]
        );
    }

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuf {
        fn write(&mut self, data: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(data);
            Ok(data.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn interactions_stay_below_debug() {
        let buf = SharedBuf::default();
        let writer = buf.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut session = calm_session();
            session.handle(Control::Act(Action::Play));
            session.auto_tick(1);
        });
        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert!(!out.contains("interaction"), "{out}");
    }
}
