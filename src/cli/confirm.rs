//! Yes/no confirmation for destructive commands.
//!
//! On a terminal we read one raw keypress; otherwise one line of input.

use crate::error::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::BufRead;

/// Something that can answer "are you sure?"
pub trait Confirm {
    /// Block until an answer arrives; `true` only for an explicit `y`
    fn confirm(&mut self) -> Result<bool>;
}

/// Reads a single keypress from the controlling terminal
#[derive(Debug, Default)]
pub struct TerminalConfirm;

struct RawModeGuard;

impl RawModeGuard {
    fn enter() -> std::io::Result<Self> {
        terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = terminal::disable_raw_mode();
    }
}

/// A plain `y` press; ctrl-y or alt-y shouldn't count as a yes
fn is_yes(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('y') && key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
}

impl Confirm for TerminalConfirm {
    fn confirm(&mut self) -> Result<bool> {
        let answer = {
            let _raw = RawModeGuard::enter()?;
            loop {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        break is_yes(&key);
                    }
                }
            }
        };

        // raw mode swallowed the echo
        println!();
        Ok(answer)
    }
}

/// Line-based answer for piped stdin
pub struct LineConfirm<R> {
    input: R,
}

impl<R: BufRead> LineConfirm<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl<R: BufRead> Confirm for LineConfirm<R> {
    fn confirm(&mut self) -> Result<bool> {
        let mut answer = String::new();
        self.input.read_line(&mut answer)?;
        Ok(answer.trim_end_matches(['\r', '\n']) == "y")
    }
}
