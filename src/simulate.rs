//! Replaying scripted input against a [`Viewer`].
//!
//! One event per line. Blank lines and `#` comments are skipped. Drag
//! events carry a position and a timestamp in milliseconds; other events
//! reuse the last timestamp seen.
//!
//! ```text
//! # drag up 70 units over 16ms, then release
//! down 100 0
//! move 30 16
//! up
//! next
//! key End
//! type 4
//! enter
//! ```

use crate::navigation::Outcome;
use crate::viewer::{FlipSound, InputEvent, Key, Viewer};
use std::io::BufRead;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    UnknownCommand(String),
    #[error("unknown key '{0}'")]
    UnknownKey(String),
    #[error("'{0}' expects a position and a timestamp")]
    MissingArgs(String),
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}

/// One parsed script line: the event and its timestamp, if given.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptEvent {
    pub event: InputEvent,
    pub at_ms: Option<u64>,
}

/// Result of applying one script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    Applied {
        line: usize,
        command: String,
        outcome: Outcome,
        /// 1-based page shown after the event, `None` for an empty book.
        page: Option<usize>,
        page_input: String,
        dragging: bool,
    },
    Skipped {
        line: usize,
        error: ParseError,
    },
}

/// Parse one script line. `Ok(None)` for blank lines and comments.
pub fn parse_line(line: &str) -> Result<Option<ScriptEvent>, ParseError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (command, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let untimed = |event: InputEvent| -> Result<Option<ScriptEvent>, ParseError> {
        Ok(Some(ScriptEvent { event, at_ms: None }))
    };

    match command {
        "down" | "touchstart" | "move" | "touchmove" => {
            let (y, at_ms) = parse_position(command, rest)?;
            let event = match command {
                "down" => InputEvent::PointerDown { y },
                "touchstart" => InputEvent::TouchStart { y },
                "move" => InputEvent::PointerMove { y },
                _ => InputEvent::TouchMove { y },
            };
            Ok(Some(ScriptEvent {
                event,
                at_ms: Some(at_ms),
            }))
        }
        "up" => untimed(InputEvent::PointerUp),
        "leave" => untimed(InputEvent::PointerLeave),
        "touchend" => untimed(InputEvent::TouchEnd),
        "next" => untimed(InputEvent::NextButton),
        "prev" => untimed(InputEvent::PrevButton),
        "enter" => untimed(InputEvent::Key(Key::Enter)),
        "type" => untimed(InputEvent::InputChanged(rest.to_string())),
        "key" => match Key::from_name(rest) {
            Some(key) => untimed(InputEvent::Key(key)),
            None => Err(ParseError::UnknownKey(rest.to_string())),
        },
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_position(command: &str, args: &str) -> Result<(f64, u64), ParseError> {
    let mut parts = args.split_whitespace();
    let (Some(y), Some(at)) = (parts.next(), parts.next()) else {
        return Err(ParseError::MissingArgs(command.to_string()));
    };
    let y: f64 = y
        .parse()
        .map_err(|_| ParseError::InvalidNumber(y.to_string()))?;
    let at: u64 = at
        .parse()
        .map_err(|_| ParseError::InvalidNumber(at.to_string()))?;
    Ok((y, at))
}

/// Apply every line of `script` to `viewer`, in order.
pub fn run<S: FlipSound, R: BufRead>(viewer: &mut Viewer<S>, script: R) -> std::io::Result<Vec<Step>> {
    let mut steps = Vec::new();
    let mut clock_ms = 0u64;

    for (idx, line) in script.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        match parse_line(&line) {
            Ok(None) => {}
            Ok(Some(ScriptEvent { event, at_ms })) => {
                if let Some(at) = at_ms {
                    clock_ms = at;
                }
                let outcome = viewer.handle(event, clock_ms);
                steps.push(Step::Applied {
                    line: line_no,
                    command: line.trim().to_string(),
                    outcome,
                    page: viewer.current_page().map(|_| viewer.state().current_page_index + 1),
                    page_input: viewer.page_input_display().to_string(),
                    dragging: viewer.state().is_dragging,
                });
            }
            Err(error) => {
                log::warn!("line {line_no}: {error}");
                steps.push(Step::Skipped {
                    line: line_no,
                    error,
                });
            }
        }
    }
    Ok(steps)
}
