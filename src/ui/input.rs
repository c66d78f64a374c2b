/// Input hand-off between a blocking event reader and the fixed-tick loop.
///
/// A background thread blocks on the backend's event wait, turns every key
/// press into its canonical name and pushes it into an unbounded channel.
/// The loop drains that channel one event per tick without ever blocking,
/// in arrival order and without dropping anything.
///
/// Key names follow the `Rune[x]` / `Ctrl+C` / `Up` scheme so bindings in
/// `config.toml` read the same on every backend.

use std::io;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread::{self, JoinHandle};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::{debug, warn};

/// Anything that can block until the next terminal event arrives.
pub trait EventSource: Send {
    fn poll_event(&mut self) -> io::Result<Event>;
}

/// Canonical name of a key press, or `None` for releases, repeats and keys
/// the loop has no name for.
pub fn key_name(key: &KeyEvent) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    let mut name = String::new();
    match key.code {
        KeyCode::Char(c) => {
            // Shift is already folded into the character itself.
            if alt { name.push_str("Alt+"); }
            match c {
                c if ctrl && c.is_ascii_alphabetic() => {
                    name.push_str("Ctrl+");
                    name.push(c.to_ascii_uppercase());
                }
                ' ' if ctrl => name.push_str("Ctrl+Space"),
                // Other control chords keep the rune, with the modifier in front.
                c if ctrl => name.push_str(&format!("Ctrl+Rune[{c}]")),
                c => name.push_str(&format!("Rune[{c}]")),
            }
            return Some(name);
        }
        code => {
            let base = match code {
                KeyCode::Up => "Up".to_string(),
                KeyCode::Down => "Down".to_string(),
                KeyCode::Left => "Left".to_string(),
                KeyCode::Right => "Right".to_string(),
                KeyCode::Enter => "Enter".to_string(),
                KeyCode::Esc => "Esc".to_string(),
                KeyCode::Tab => "Tab".to_string(),
                KeyCode::BackTab => "Backtab".to_string(),
                KeyCode::Backspace => "Backspace".to_string(),
                KeyCode::Delete => "Delete".to_string(),
                KeyCode::Insert => "Insert".to_string(),
                KeyCode::Home => "Home".to_string(),
                KeyCode::End => "End".to_string(),
                KeyCode::PageUp => "PgUp".to_string(),
                KeyCode::PageDown => "PgDn".to_string(),
                KeyCode::F(n) => format!("F{n}"),
                _ => return None,
            };
            if shift && code != KeyCode::BackTab { name.push_str("Shift+"); }
            if alt { name.push_str("Alt+"); }
            if ctrl { name.push_str("Ctrl+"); }
            name.push_str(&base);
        }
    }
    Some(name)
}

/// Receiving end of the listener thread.
pub struct InputChannel {
    rx: Receiver<String>,
    handle: Option<JoinHandle<()>>,
}

impl InputChannel {
    /// Start the listener thread on `source`.
    ///
    /// The thread runs until the source errors or the channel is dropped;
    /// otherwise it ends with the process.
    pub fn spawn<E: EventSource + 'static>(mut source: E) -> io::Result<Self> {
        let (tx, rx) = mpsc::channel();

        let handle = thread::Builder::new()
            .name("snakeloop-input".to_string())
            .spawn(move || listen(&mut source, tx))?;

        Ok(InputChannel { rx, handle: Some(handle) })
    }

    /// Next queued key name, if any. Never blocks.
    pub fn try_next(&self) -> Option<String> {
        match self.rx.try_recv() {
            Ok(key) => Some(key),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Is the listener thread still running?
    pub fn listener_alive(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// A channel with no listener; the caller feeds it directly.
    #[cfg(test)]
    pub fn detached() -> (Sender<String>, Self) {
        let (tx, rx) = mpsc::channel();
        (tx, InputChannel { rx, handle: None })
    }
}

fn listen<E: EventSource>(source: &mut E, tx: Sender<String>) {
    loop {
        match source.poll_event() {
            Ok(Event::Key(key)) => {
                let Some(name) = key_name(&key) else { continue };
                debug!("key {name}");
                if tx.send(name).is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("input listener stopped: {e}");
                break;
            }
        }
    }
}
