use crossterm::{
    cursor, execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use moodpet::{HealthSnapshot, Mood};
use std::io::{self, Write};

/// One screen position. The background is always black.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    fg: Color,
    bold: bool,
}

const BLANK: Glyph = Glyph {
    ch: ' ',
    fg: Color::White,
    bold: false,
};

/// Off-screen frame the status panel is drawn into.
pub(crate) struct Canvas {
    w: u16,
    h: u16,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            glyphs: vec![BLANK; w as usize * h as usize],
        }
    }

    fn put(&mut self, x: u16, y: u16, g: Glyph) {
        if x < self.w && y < self.h {
            self.glyphs[y as usize * self.w as usize + x as usize] = g;
        }
    }

    fn blank(&mut self) {
        self.glyphs.fill(BLANK);
    }
}

/// Raw-mode alternate screen that repaints only the glyphs that changed
/// since the last frame.
pub(crate) struct Screen {
    out: io::Stdout,
    shown: Canvas,
    next: Canvas,
}

impl Screen {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            SetBackgroundColor(Color::Black),
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            shown: Canvas::new(cols, rows),
            next: Canvas::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Starts a frame: follows a terminal resize, then hands out a blank
    /// canvas to draw into.
    pub(crate) fn frame(&mut self) -> anyhow::Result<&mut Canvas> {
        let (cols, rows) = terminal::size()?;
        if (cols, rows) != (self.next.w, self.next.h) {
            self.shown = Canvas::new(cols, rows);
            self.next = Canvas::new(cols, rows);
            queue!(self.out, SetBackgroundColor(Color::Black), Clear(ClearType::All))?;
        }
        self.next.blank();
        Ok(&mut self.next)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate, SetBackgroundColor(Color::Black))?;

        let w = self.next.w as usize;
        let mut pen: Option<(Color, bool)> = None;
        let mut cursor_at = None;
        for (i, (g, old)) in self.next.glyphs.iter().zip(&self.shown.glyphs).enumerate() {
            if g == old {
                continue;
            }
            let (x, y) = ((i % w) as u16, (i / w) as u16);
            if cursor_at != Some((x, y)) {
                queue!(self.out, cursor::MoveTo(x, y))?;
            }
            if pen != Some((g.fg, g.bold)) {
                let weight = if g.bold {
                    Attribute::Bold
                } else {
                    Attribute::NormalIntensity
                };
                queue!(self.out, SetForegroundColor(g.fg), SetAttribute(weight))?;
                pen = Some((g.fg, g.bold));
            }
            queue!(self.out, Print(g.ch))?;
            cursor_at = Some((x + 1, y));
        }

        queue!(
            self.out,
            SetAttribute(Attribute::Reset),
            ResetColor,
            EndSynchronizedUpdate
        )?;
        self.out.flush()?;
        self.shown.glyphs.copy_from_slice(&self.next.glyphs);
        Ok(())
    }
}

fn draw_text(canvas: &mut Canvas, x: u16, y: u16, s: &str, fg: Color, bold: bool) {
    for (i, ch) in s.chars().enumerate() {
        let Some(col) = x.checked_add(i as u16).filter(|c| *c < canvas.w) else {
            break;
        };
        canvas.put(col, y, Glyph { ch, fg, bold });
    }
}

/// `value` is a need in `[0, 100]`; the bar fills as the need grows.
pub(crate) fn bar(value: i32, width: usize) -> String {
    let filled = ((value.clamp(0, 100) as usize) * width + 50) / 100;
    let mut s = String::with_capacity(width + 2);
    s.push('[');
    for i in 0..width {
        s.push(if i < filled { '#' } else { '.' });
    }
    s.push(']');
    s
}

fn need_color(value: i32) -> Color {
    match value {
        v if v > 95 => Color::Red,
        v if v > 60 => Color::Yellow,
        _ => Color::Green,
    }
}

pub(crate) fn mood_color(mood: Mood) -> Color {
    match mood {
        Mood::Content => Color::Green,
        Mood::Distressed => Color::Blue,
        Mood::Anxious => Color::Magenta,
    }
}

/// One-line summary used by the script driver.
pub(crate) fn status_line(h: &HealthSnapshot) -> String {
    let state = if h.dead { "dead" } else { "alive" };
    format!(
        "{:<10} {:<5}  hunger {:>3}  hygiene {:>3}  social {:>3}  sleep {:>3}",
        h.mood, state, h.hunger, h.hygiene, h.social, h.sleep
    )
}

pub(crate) fn status_panel<'a>(
    buf: &mut Canvas,
    h: &HealthSnapshot,
    log: impl IntoIterator<Item = &'a String>,
    show_help: bool,
) {
    let fg = Color::White;

    draw_text(buf, 1, 0, "moodpet", fg, true);
    let state = if h.dead { "passed away" } else { "alive" };
    draw_text(buf, 12, 0, &format!("Mood: {}", h.mood), mood_color(h.mood), true);
    draw_text(buf, 32, 0, state, if h.dead { Color::Red } else { fg }, false);

    let needs = [
        ("Hunger ", h.hunger),
        ("Hygiene", h.hygiene),
        ("Social ", h.social),
        ("Sleep  ", h.sleep),
    ];
    for (i, (name, val)) in needs.iter().enumerate() {
        let y = 2 + i as u16;
        draw_text(buf, 1, y, name, fg, false);
        draw_text(buf, 9, y, &bar(*val, 20), need_color(*val), false);
        draw_text(buf, 32, y, &format!("{val:>3}"), fg, false);
    }

    if h.mood == Mood::Anxious && !h.dead {
        draw_text(buf, 1, 7, "Your pet is anxious. A hug (h) would help.", Color::Magenta, false);
    }

    draw_text(buf, 1, 9, "Recent:", fg, true);
    for (i, line) in log.into_iter().enumerate() {
        draw_text(buf, 3, 10 + i as u16, line, Color::Grey, false);
    }

    if show_help {
        let help = [
            "f feed    p play    c clean    s sleep    h hug",
            "a advance one tick",
            "1 / 2 / 3 force content / distressed / anxious",
            "? toggle help    q quit",
        ];
        let top = buf.h.saturating_sub(help.len() as u16 + 2);
        for (i, line) in help.iter().enumerate() {
            draw_text(buf, 1, top + i as u16, line, fg, false);
        }
    }

    let footer = if h.dead {
        "Your pet has passed away. q to quit"
    } else {
        "f p c s h act | a tick | ? help | q quit"
    };
    draw_text(buf, 1, buf.h.saturating_sub(1), footer, fg, false);
}
