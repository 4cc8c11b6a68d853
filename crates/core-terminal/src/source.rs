//! Raw keyboard byte source with bounded waits.
//!
//! `read_byte` never blocks longer than the supplied timeout: `Ok(None)` means
//! "nothing arrived, try again", which lets the main loop redraw on a steady
//! cadence with no input. Stdin itself has no portable timed read, so
//! [`StdinSource`] parks a reader thread on it and forwards each byte over a
//! bounded channel; the editor loop only ever sees the receiving end.

use crate::TerminalError;
use crossbeam_channel::{Receiver, RecvTimeoutError, bounded};
use std::io::{self, Read};
use std::thread;
use std::time::Duration;

pub trait ByteSource {
    /// Next byte, or `None` when `timeout` elapsed first.
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>>;
}

const CHANNEL_CAP: usize = 4096;

pub struct StdinSource {
    rx: Receiver<io::Result<u8>>,
}

impl StdinSource {
    pub fn spawn() -> io::Result<Self> {
        let (tx, rx) = bounded(CHANNEL_CAP);
        thread::Builder::new()
            .name("stdin-bytes".into())
            .spawn(move || {
                let stdin = io::stdin();
                let mut lock = stdin.lock();
                let mut byte = [0u8; 1];
                loop {
                    let msg = match lock.read(&mut byte) {
                        Ok(0) => Err(io::Error::from(io::ErrorKind::UnexpectedEof)),
                        Ok(_) => Ok(byte[0]),
                        Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                        Err(e) => Err(e),
                    };
                    let stop = msg.is_err();
                    if tx.send(msg).is_err() || stop {
                        break;
                    }
                }
                tracing::debug!(target: "terminal.input", "stdin_reader_exit");
            })?;
        Ok(Self { rx })
    }
}

impl ByteSource for StdinSource {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        match self.rx.recv_timeout(timeout) {
            Ok(Ok(b)) => Ok(Some(b)),
            Ok(Err(e)) => Err(e),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(io::Error::new(
                io::ErrorKind::BrokenPipe,
                TerminalError::InputClosed,
            )),
        }
    }
}

impl<S: ByteSource + ?Sized> ByteSource for &mut S {
    fn read_byte(&mut self, timeout: Duration) -> io::Result<Option<u8>> {
        (**self).read_byte(timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn channel_source_maps_timeout_and_disconnect() {
        let (tx, rx) = unbounded();
        let mut src = StdinSource { rx };
        tx.send(Ok(b'a')).unwrap();
        assert_eq!(src.read_byte(Duration::from_millis(5)).unwrap(), Some(b'a'));
        assert_eq!(src.read_byte(Duration::from_millis(5)).unwrap(), None);
        drop(tx);
        let err = src.read_byte(Duration::from_millis(5)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
    }
}
