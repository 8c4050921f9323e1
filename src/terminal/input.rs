//! Keyboard input.
//!
//! A background thread reads the terminal one byte at a time and forwards
//! each byte as a [`KeyEvent`] over an unbounded channel, so keys typed while
//! the timer is busy queue up instead of being dropped.

use std::io::{ErrorKind, Read};
use std::sync::mpsc::{self, Receiver, SendError, Sender, TryRecvError};
use std::sync::{Arc, Mutex};
use std::thread;

use tracing::{debug, error};

use crate::error::PomodoroError;

/// Byte value of the space bar.
const SPACE: u8 = b' ';

/// A single key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    /// The space bar: toggles pause/resume.
    Toggle,
    /// Any other key. Never changes timer state, but wakes a blocking wait.
    Other,
}

impl KeyEvent {
    /// Classify a raw byte read from the terminal.
    #[must_use]
    pub const fn from_byte(byte: u8) -> Self {
        if byte == SPACE {
            Self::Toggle
        } else {
            Self::Other
        }
    }

    /// Check if this is the pause/resume toggle.
    #[must_use]
    pub const fn is_toggle(self) -> bool {
        matches!(self, Self::Toggle)
    }
}

/// Something that yields key events.
pub trait KeySource {
    /// Take the next queued event without blocking.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Input` if input has ended.
    fn try_next(&mut self) -> Result<Option<KeyEvent>, PomodoroError>;

    /// Block until the next event arrives.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Input` if input has ended.
    fn wait_next(&mut self) -> Result<KeyEvent, PomodoroError>;
}

/// Why the key reader stopped, if it stopped on an error.
type Failure = Arc<Mutex<Option<String>>>;

/// Sending end of the key event channel.
#[derive(Debug)]
pub struct KeyFeed {
    tx: Sender<KeyEvent>,
    failure: Failure,
}

impl KeyFeed {
    /// Queue `event`.
    ///
    /// # Errors
    ///
    /// Returns the event back if the receiver has been dropped.
    pub fn send(&self, event: KeyEvent) -> Result<(), SendError<KeyEvent>> {
        self.tx.send(event)
    }

    /// Close the channel, leaving `reason` for the receiver to report.
    pub fn fail(self, reason: String) {
        if let Ok(mut slot) = self.failure.lock() {
            *slot = Some(reason);
        }
    }
}

/// Receiving end of the key event channel.
#[derive(Debug)]
pub struct KeyEvents {
    rx: Receiver<KeyEvent>,
    failure: Failure,
}

impl KeyEvents {
    /// Create a connected sender/receiver pair.
    #[must_use]
    pub fn channel() -> (KeyFeed, Self) {
        let (tx, rx) = mpsc::channel();
        let failure = Failure::default();
        (
            KeyFeed {
                tx,
                failure: Arc::clone(&failure),
            },
            Self { rx, failure },
        )
    }

    fn closed(&self) -> PomodoroError {
        let reason = self.failure.lock().ok().and_then(|slot| slot.clone());
        match reason {
            Some(reason) => PomodoroError::Input(format!("keyboard input failed: {reason}")),
            None => PomodoroError::Input("keyboard input closed".to_string()),
        }
    }
}

impl KeySource for KeyEvents {
    fn try_next(&mut self) -> Result<Option<KeyEvent>, PomodoroError> {
        match self.rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(self.closed()),
        }
    }

    fn wait_next(&mut self) -> Result<KeyEvent, PomodoroError> {
        self.rx.recv().map_err(|_| self.closed())
    }
}

/// Reads raw key presses on a background thread.
pub struct InputReader;

impl InputReader {
    /// Start reading `source` and return the event stream.
    ///
    /// The thread runs until the source hits EOF or fails, or the receiver is
    /// dropped. The terminal must already be in byte-at-a-time mode.
    ///
    /// # Errors
    ///
    /// Returns `PomodoroError::Input` if the thread cannot be spawned.
    pub fn spawn<R>(source: R) -> Result<KeyEvents, PomodoroError>
    where
        R: Read + Send + 'static,
    {
        let (tx, events) = KeyEvents::channel();

        thread::Builder::new()
            .name("key-reader".to_string())
            .spawn(move || read_keys(source, tx))
            .map_err(|e| PomodoroError::Input(format!("Failed to start key reader: {e}")))?;

        Ok(events)
    }
}

fn read_keys<R: Read>(mut source: R, feed: KeyFeed) {
    let mut byte = [0u8; 1];

    loop {
        match source.read(&mut byte) {
            Ok(0) => {
                debug!("keyboard input reached EOF");
                return;
            }
            Ok(_) => {
                if feed.send(KeyEvent::from_byte(byte[0])).is_err() {
                    return;
                }
            }
            Err(e) if e.kind() == ErrorKind::Interrupted => {}
            Err(e) => {
                error!("failed to read keyboard input: {e}");
                feed.fail(e.to_string());
                return;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_key_event_from_byte() {
        assert_eq!(KeyEvent::from_byte(32), KeyEvent::Toggle);
        assert_eq!(KeyEvent::from_byte(b'q'), KeyEvent::Other);
        assert_eq!(KeyEvent::from_byte(b'\n'), KeyEvent::Other);
        assert_eq!(KeyEvent::from_byte(0), KeyEvent::Other);
    }

    #[test]
    fn test_is_toggle() {
        assert!(KeyEvent::Toggle.is_toggle());
        assert!(!KeyEvent::Other.is_toggle());
    }

    #[test]
    fn test_try_next_does_not_block_when_empty() {
        let (_tx, mut events) = KeyEvents::channel();
        assert!(events.try_next().unwrap().is_none());
    }

    #[test]
    fn test_events_arrive_in_order() {
        let (tx, mut events) = KeyEvents::channel();
        tx.send(KeyEvent::Other).unwrap();
        tx.send(KeyEvent::Toggle).unwrap();
        tx.send(KeyEvent::Other).unwrap();

        assert_eq!(events.try_next().unwrap(), Some(KeyEvent::Other));
        assert_eq!(events.wait_next().unwrap(), KeyEvent::Toggle);
        assert_eq!(events.try_next().unwrap(), Some(KeyEvent::Other));
        assert!(events.try_next().unwrap().is_none());
    }

    #[test]
    fn test_closed_channel_is_an_error() {
        let (tx, mut events) = KeyEvents::channel();
        drop(tx);

        assert!(matches!(events.try_next(), Err(PomodoroError::Input(_))));
        assert!(matches!(events.wait_next(), Err(PomodoroError::Input(_))));
    }

    #[test]
    fn test_closed_channel_without_failure_says_closed() {
        let (tx, mut events) = KeyEvents::channel();
        drop(tx);

        let err = events.wait_next().unwrap_err();
        assert_eq!(err.to_string(), "input error: keyboard input closed");
    }

    struct BrokenTerminal;

    impl Read for BrokenTerminal {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(ErrorKind::BrokenPipe, "terminal went away"))
        }
    }

    #[test]
    fn test_read_error_reaches_the_consumer() {
        let mut events = InputReader::spawn(BrokenTerminal).unwrap();

        let err = events.wait_next().unwrap_err();

        assert!(matches!(err, PomodoroError::Input(_)));
        assert!(err.to_string().contains("terminal went away"));
        assert!(events.try_next().unwrap_err().to_string().contains("terminal went away"));
    }

    #[test]
    fn test_reader_emits_one_event_per_byte() {
        let mut events = InputReader::spawn(Cursor::new(b" x  \n".to_vec())).unwrap();

        let mut received = Vec::new();
        while let Ok(event) = events.wait_next() {
            received.push(event);
        }

        assert_eq!(
            received,
            vec![
                KeyEvent::Toggle,
                KeyEvent::Other,
                KeyEvent::Toggle,
                KeyEvent::Toggle,
                KeyEvent::Other,
            ]
        );
    }
}
