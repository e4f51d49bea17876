use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

/// Line reader over one open handle: an initial tail, then whatever is
/// appended afterwards. Bytes after the last newline are held until the line
/// is completed. Truncation and rotation are not detected.
pub struct LogTail<R> {
    reader: R,
    pending: Vec<u8>,
}

impl<R: BufRead> LogTail<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            pending: Vec::new(),
        }
    }

    /// Reads to the current end and returns the last `limit` lines.
    ///
    /// With `hold_partial` an unterminated final line stays pending for
    /// [`LogTail::read_available`]; otherwise it counts as a line.
    pub fn read_initial(&mut self, limit: usize, hold_partial: bool) -> io::Result<Vec<String>> {
        let mut recent = VecDeque::with_capacity(limit.min(1024));
        for line in self.read_available()? {
            if limit == 0 {
                continue;
            }
            if recent.len() == limit {
                recent.pop_front();
            }
            recent.push_back(line);
        }
        if !hold_partial {
            if let Some(partial) = self.take_pending() {
                if limit > 0 {
                    if recent.len() == limit {
                        recent.pop_front();
                    }
                    recent.push_back(partial);
                }
            }
        }
        Ok(recent.into())
    }

    /// Complete lines appended since the last call, in file order.
    pub fn read_available(&mut self) -> io::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let read = self.reader.read_until(b'\n', &mut self.pending)?;
            if read == 0 || self.pending.last() != Some(&b'\n') {
                break;
            }
            if let Some(line) = self.take_pending() {
                lines.push(line);
            }
        }
        Ok(lines)
    }

    /// Polls for new lines until `stop` is set, passing each one to `emit`.
    pub fn follow<F>(&mut self, stop: &AtomicBool, poll: Duration, mut emit: F) -> io::Result<()>
    where
        F: FnMut(&str) -> io::Result<()>,
    {
        tracing::debug!(poll_ms = poll.as_millis() as u64, "following log");
        while !stop.load(Ordering::SeqCst) {
            let lines = self.read_available()?;
            if lines.is_empty() {
                thread::sleep(poll);
                continue;
            }
            for line in &lines {
                emit(line)?;
            }
        }
        tracing::debug!("follow stopped");
        Ok(())
    }

    fn take_pending(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let line = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(line)
    }
}
