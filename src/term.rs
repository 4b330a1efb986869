use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use anyhow::Context;
use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::style::{self, Color as TermColor};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, terminal};
use tracing::{debug, warn};

use crate::geometry::{Direction, World};
use crate::input::{InputEvent, InputSource, Key};
use crate::render::{Color, RenderSink, WORLD_COLOR};

const POLL_TIMEOUT: Duration = Duration::from_millis(1);

/// Crossterm backed terminal: the game's render sink and input source.
pub struct TermManager {
    width: u16,
    height: u16,
    scale: u16,
    world: World,
    stdout: Stdout,
    blank: String,
    frame: Vec<Color>,
    shown: Vec<Option<Color>>,
    release_events: bool,
}

impl TermManager {
    pub fn new(scale: u16) -> anyhow::Result<Self> {
        let (width, height) = terminal::size().context("failed to read terminal size")?;
        let scale = scale.max(1);
        let world = World::new((width / scale) as i32, height as i32);

        Ok(TermManager {
            width,
            height,
            scale,
            world,
            stdout: stdout(),
            blank: " ".repeat(scale as usize),
            frame: vec![WORLD_COLOR; world.area()],
            shown: vec![None; world.area()],
            release_events: false,
        })
    }

    pub fn world(&self) -> World {
        self.world
    }

    pub fn setup(&mut self) -> anyhow::Result<()> {
        execute!(self.stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
        terminal::enable_raw_mode().context("failed to enable raw mode")?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;

        self.release_events = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if self.release_events {
            execute!(
                self.stdout,
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        } else {
            warn!("terminal does not report key releases, every press counts as a tap");
        }

        debug!(width = self.width, height = self.height, release_events = self.release_events, "terminal ready");
        Ok(())
    }

    pub fn restore(&mut self) -> anyhow::Result<()> {
        if self.release_events {
            execute!(self.stdout, PopKeyboardEnhancementFlags)?;
            self.release_events = false;
        }
        execute!(self.stdout, style::ResetColor, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode().context("failed to disable raw mode")?;
        execute!(self.stdout, LeaveAlternateScreen).context("failed to leave alternate screen")?;
        Ok(())
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.world.contains((x, y)) {
            Some(y as usize * self.world.width as usize + x as usize)
        } else {
            None
        }
    }
}

impl RenderSink for TermManager {
    fn clear(&mut self, color: Color) -> anyhow::Result<()> {
        self.frame.iter_mut().for_each(|c| *c = color);
        Ok(())
    }

    fn set_cell(&mut self, x: i32, y: i32, color: Color) -> anyhow::Result<()> {
        if let Some(i) = self.index(x, y) {
            self.frame[i] = color;
        }
        Ok(())
    }

    fn present(&mut self) -> anyhow::Result<()> {
        let width = self.world.width as usize;

        // Only redraw cells that changed since the last frame
        for (i, color) in self.frame.iter().enumerate() {
            if self.shown[i] == Some(*color) {
                continue;
            }

            let (x, y) = ((i % width) as u16, (i / width) as u16);
            queue!(
                self.stdout,
                cursor::MoveTo(x * self.scale, y),
                style::SetBackgroundColor(to_term_color(*color)),
                style::Print(&self.blank)
            )?;
            self.shown[i] = Some(*color);
        }

        queue!(self.stdout, style::ResetColor)?;
        self.stdout.flush().context("failed to flush frame")?;
        Ok(())
    }

    fn show_summary(&mut self, lines: &[&str]) -> anyhow::Result<()> {
        queue!(self.stdout, style::ResetColor, terminal::Clear(ClearType::All))?;

        let msg_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let msg_height = lines.len() as u16;
        let left = (self.width / 2).saturating_sub(msg_width / 2);
        let top = (self.height / 2).saturating_sub(msg_height / 2);

        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{line: ^width$}", line = line, width = msg_width as usize);
            queue!(self.stdout, cursor::MoveTo(left, top + i as u16), style::Print(padded))?;
        }

        // The grid was wiped, so the next frame has to be drawn in full
        self.shown.iter_mut().for_each(|c| *c = None);
        self.stdout.flush().context("failed to flush summary")?;
        Ok(())
    }
}

impl InputSource for TermManager {
    fn poll_events(&mut self) -> anyhow::Result<Vec<InputEvent>> {
        let mut events = vec![];

        while event::poll(POLL_TIMEOUT)? {
            if let Event::Key(ev) = event::read()? {
                events.extend(translate(ev, self.release_events));
            }
        }

        Ok(events)
    }

    fn wait_event(&mut self) -> anyhow::Result<InputEvent> {
        loop {
            if let Event::Key(ev) = event::read()? {
                if let Some(ev) = translate(ev, self.release_events).into_iter().next() {
                    return Ok(ev);
                }
            }
        }
    }
}

/// Maps a crossterm key event onto the game's input vocabulary. Without
/// release reporting a direction press is reported as a tap.
fn translate(ev: KeyEvent, release_events: bool) -> Vec<InputEvent> {
    use InputEvent::*;

    if is_ctrl_c(&ev) {
        return if ev.kind == KeyEventKind::Press { vec![Quit] } else { vec![] };
    }

    match (ev.kind, ev.code) {
        (KeyEventKind::Repeat, _) => vec![],
        (KeyEventKind::Release, code) => key_direction(code).map(KeyUp).into_iter().collect(),
        (KeyEventKind::Press, KeyCode::Char(' ')) => vec![KeyDown(Key::Pause)],
        (KeyEventKind::Press, KeyCode::Esc) => vec![KeyDown(Key::Escape)],
        (KeyEventKind::Press, code) => match key_direction(code) {
            Some(dir) if release_events => vec![KeyDown(Key::Move(dir))],
            Some(dir) => vec![KeyDown(Key::Move(dir)), KeyUp(dir)],
            None => vec![],
        },
    }
}

fn key_direction(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => Some(Direction::Up),
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => Some(Direction::Left),
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => Some(Direction::Down),
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => Some(Direction::Right),
        _ => None,
    }
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    ev.code == KeyCode::Char('c') && ev.modifiers.contains(KeyModifiers::CONTROL)
}

fn to_term_color(c: Color) -> TermColor {
    TermColor::Rgb { r: c.r, g: c.g, b: c.b }
}
