use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use moodpet::{Action, Mood};
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Control {
    Act(Action),
    Advance,
    ForceMood(Mood),
    HelpToggle,
    Quit,
}

#[derive(Clone, Debug)]
pub(crate) struct InputEvent {
    pub(crate) key: KeyCode,
    pub(crate) mods: KeyModifiers,
}

pub(crate) fn collect_input_nonblocking(max_frame_time: Duration) -> anyhow::Result<Vec<InputEvent>> {
    let mut out = Vec::new();

    // poll with a tiny timeout so we stay responsive
    let timeout = std::cmp::min(Duration::from_millis(1), max_frame_time);
    while event::poll(timeout)? {
        if let Event::Key(k) = event::read()? {
            if k.kind == KeyEventKind::Press || k.kind == KeyEventKind::Repeat {
                out.push(InputEvent {
                    key: k.code,
                    mods: k.modifiers,
                });
                if out.len() >= 32 {
                    break;
                }
            }
        }
    }
    Ok(out)
}

pub(crate) fn map_event_to_control(ev: &InputEvent) -> Option<Control> {
    if matches!(ev.key, KeyCode::Char('c')) && ev.mods.contains(KeyModifiers::CONTROL) {
        return Some(Control::Quit);
    }
    match ev.key {
        KeyCode::Esc => Some(Control::Quit),
        KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
            'q' => Some(Control::Quit),
            '?' => Some(Control::HelpToggle),
            'a' => Some(Control::Advance),
            '1' => Some(Control::ForceMood(Mood::Content)),
            '2' => Some(Control::ForceMood(Mood::Distressed)),
            '3' => Some(Control::ForceMood(Mood::Anxious)),
            other => other.to_string().parse::<Action>().ok().map(Control::Act),
        },
        _ => None,
    }
}
