//! Keyboard input: raw-mode session, manual stepping, quit watching and the
//! starting-input prompt.

use std::io::{self, BufRead, Write};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossterm::cursor::{Hide, MoveToNextLine, Show};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::style::ResetColor;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::compute::{CancellationToken, Command, StepInput};

/// How long input readers wait for a key before rechecking cancellation.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Map a key press to a simulation command. Unbound keys map to `None`.
pub fn classify_key(key: &KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Command::Quit)
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Command::Quit),
        KeyCode::Char(' ') | KeyCode::Char('n') | KeyCode::Enter => Some(Command::Advance),
        _ => None,
    }
}

/// Raw terminal mode with a hidden cursor, restored on drop.
pub struct TerminalSession {
    _private: (),
}

impl TerminalSession {
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let session = Self { _private: () };
        execute!(io::stdout(), Hide)?;
        Ok(session)
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        if let Err(e) = execute!(io::stdout(), ResetColor, Show, MoveToNextLine(1)) {
            log::warn!("Failed to restore cursor: {}", e);
        }
        if let Err(e) = disable_raw_mode() {
            log::warn!("Failed to disable raw mode: {}", e);
        }
    }
}

/// Manual-mode command source reading key events from the terminal.
///
/// Blocks until a bound key is pressed. A cancelled token (e.g. from a
/// signal handler) is reported as [`Command::Quit`].
pub struct KeyInput {
    token: CancellationToken,
}

impl KeyInput {
    pub fn new(token: CancellationToken) -> Self {
        Self { token }
    }
}

impl StepInput for KeyInput {
    fn next_command(&mut self) -> io::Result<Command> {
        loop {
            if !self.token.is_running() {
                return Ok(Command::Quit);
            }
            if !event::poll(POLL_INTERVAL)? {
                continue;
            }
            if let Event::Key(key) = event::read()?
                && let Some(command) = classify_key(&key)
            {
                return Ok(command);
            }
        }
    }
}

/// Spawn the automatic-mode quit watcher.
///
/// The thread only reads key events and cancels `token` on a quit key; it
/// exits once the token is cancelled from anywhere.
pub fn spawn_quit_watcher(token: CancellationToken) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name("quit-watcher".to_string())
        .spawn(move || {
            while token.is_running() {
                match event::poll(POLL_INTERVAL).and_then(|ready| {
                    if ready {
                        event::read().map(Some)
                    } else {
                        Ok(None)
                    }
                }) {
                    Ok(Some(Event::Key(key))) => {
                        if classify_key(&key) == Some(Command::Quit) {
                            log::debug!("Quit key pressed");
                            token.cancel();
                        }
                    }
                    Ok(_) => {}
                    Err(e) => {
                        log::warn!("Reading terminal input failed: {}", e);
                        token.cancel();
                    }
                }
            }
        })
}

/// Ask for a starting input line such as `2,2 2,3 3,2 3,3`.
///
/// End of input counts as a read failure.
pub fn prompt_starting_input<R: BufRead, W: Write>(input: &mut R, out: &mut W) -> io::Result<String> {
    write!(
        out,
        "Give some starting input.\n\
         The top left is 0,0 and the format is row,col.\n\
         Example: 2,2 2,3 3,2 3,3\n\
         \n\
         > "
    )?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "no starting input given",
        ));
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use std::io::Cursor;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(classify_key(&press(KeyCode::Char(' '))), Some(Command::Advance));
        assert_eq!(classify_key(&press(KeyCode::Enter)), Some(Command::Advance));
        assert_eq!(classify_key(&press(KeyCode::Char('q'))), Some(Command::Quit));
        assert_eq!(classify_key(&press(KeyCode::Char('Q'))), Some(Command::Quit));
        assert_eq!(classify_key(&press(KeyCode::Esc)), Some(Command::Quit));
        assert_eq!(classify_key(&press(KeyCode::Char('x'))), None);
        assert_eq!(classify_key(&press(KeyCode::Char('c'))), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let key = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(classify_key(&key), Some(Command::Quit));
    }

    #[test]
    fn test_release_ignored() {
        let key = KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        };
        assert_eq!(classify_key(&key), None);
    }

    #[test]
    fn test_cancelled_key_input_quits() {
        let token = CancellationToken::new();
        token.cancel();
        let mut input = KeyInput::new(token);
        assert_eq!(input.next_command().unwrap(), Command::Quit);
    }

    #[test]
    fn test_prompt_reads_line() {
        let mut input = Cursor::new(b"1,2 3,4\r\n".to_vec());
        let mut out = Vec::new();
        let line = prompt_starting_input(&mut input, &mut out).unwrap();
        assert_eq!(line, "1,2 3,4");
        let prompt = String::from_utf8(out).unwrap();
        assert!(prompt.contains("Example: 2,2 2,3 3,2 3,3"));
        assert!(prompt.ends_with("> "));
    }

    #[test]
    fn test_prompt_eof_is_error() {
        let mut input = Cursor::new(Vec::new());
        let err = prompt_starting_input(&mut input, &mut Vec::new()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
