use std::io::{Error, ErrorKind, Result, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use super::{AsyncReader, Shared};
use crate::sample::Sample;

/// Consumer handle over the device stream.
///
/// Each handle pops records for itself: with several readers open, every
/// sample is delivered to exactly one of them, and each reader sees its
/// share in production order. Handles start in blocking mode, like a
/// freshly opened character device.
///
/// Reads deliver exactly one whole record per call, never a partial one
/// and never more than one.
pub struct Reader {
    shared: Arc<Shared>,
    nonblocking: AtomicBool,
    interrupted: Arc<AtomicBool>,
}

impl Reader {
    pub(crate) fn new(shared: Arc<Shared>) -> Self {
        Self {
            shared,
            nonblocking: AtomicBool::new(false),
            interrupted: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Switches the handle between blocking and non-blocking reads,
    /// like `O_NONBLOCK` on a file descriptor.
    pub fn set_nonblocking(&self, nonblocking: bool) {
        self.nonblocking.store(nonblocking, Ordering::Relaxed);
    }

    /// Returns a handle that cancels this reader's blocked calls from
    /// another thread.
    pub fn interrupter(&self) -> Interrupter {
        Interrupter {
            shared: Arc::clone(&self.shared),
            interrupted: Arc::clone(&self.interrupted),
        }
    }

    /// Pops the oldest buffered sample.
    ///
    /// On an empty ring, a blocking handle suspends until the producer
    /// pushes; a non-blocking handle fails with
    /// [`ErrorKind::WouldBlock`]. A call that finds a cancellation
    /// latched by [`Interrupter::interrupt`], or is suspended when one
    /// arrives, fails with [`ErrorKind::Interrupted`] without consuming
    /// anything, buffered samples notwithstanding. Once the device has
    /// shut down and the ring is drained, every call fails with
    /// `Interrupted`.
    pub fn read_sample(&self) -> Result<Sample> {
        let mut rb = self.shared.rb();
        loop {
            // Consumed ahead of the pop: a latched cancellation fails
            // this call even when a sample is already buffered.
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Err(ErrorKind::Interrupted.into());
            }
            if let Some(sample) = rb.pop() {
                return Ok(sample);
            }
            if !self.shared.is_running() {
                return Err(ErrorKind::Interrupted.into());
            }
            if self.nonblocking.load(Ordering::Relaxed) {
                return Err(ErrorKind::WouldBlock.into());
            }
            // Releases the ring lock while asleep; spurious wakeups fall
            // out of the retry.
            rb = self.shared.wait_readable(rb);
        }
    }

    /// Reads one encoded record into `buf`, returning its byte count.
    ///
    /// A buffer shorter than [`Sample::WIRE_SIZE`] fails with
    /// [`ErrorKind::InvalidInput`] before anything is consumed. Blocking
    /// behavior matches [`Self::read_sample`].
    pub fn read(&self, buf: &mut [u8]) -> Result<usize> {
        if buf.len() < Sample::WIRE_SIZE {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "buffer holds less than one record",
            ));
        }
        let sample = self.read_sample()?;
        buf[..Sample::WIRE_SIZE].copy_from_slice(&sample.to_bytes());
        Ok(Sample::WIRE_SIZE)
    }

    /// Reads one encoded record into an arbitrary writer.
    ///
    /// A failing writer surfaces its own error; the record it was given
    /// is lost, the way a sample popped for a faulting user buffer is.
    pub fn read_into<W: Write>(&self, out: &mut W) -> Result<usize> {
        let sample = self.read_sample()?;
        out.write_all(&sample.to_bytes())?;
        Ok(Sample::WIRE_SIZE)
    }

    /// Waits until the ring holds at least one sample or the timeout
    /// elapses. Returns whether the stream is readable; consumes
    /// nothing either way.
    ///
    /// Timeout resolution is whatever the OS condvar provides, roughly a
    /// millisecond. A cancellation latched by [`Interrupter::interrupt`]
    /// fails the call with [`ErrorKind::Interrupted`] even when data is
    /// already buffered; shutdown does so only once the ring is empty.
    pub fn poll(&self, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        let mut rb = self.shared.rb();
        loop {
            if self.interrupted.swap(false, Ordering::SeqCst) {
                return Err(ErrorKind::Interrupted.into());
            }
            if !rb.is_empty() {
                return Ok(true);
            }
            if !self.shared.is_running() {
                return Err(ErrorKind::Interrupted.into());
            }
            let now = Instant::now();
            if now >= deadline {
                return Ok(false);
            }
            rb = self.shared.wait_readable_timeout(rb, deadline - now);
        }
    }

    /// Converts this handle into an asynchronous one.
    pub fn into_async(self) -> AsyncReader {
        AsyncReader::new(self.shared)
    }
}

/// Cancels a [`Reader`]'s blocked calls from another thread.
///
/// One pending cancellation is latched at a time: the next blocking
/// `read` or `poll` on the paired reader fails with
/// [`ErrorKind::Interrupted`], whether it is already suspended or called
/// afterwards.
pub struct Interrupter {
    shared: Arc<Shared>,
    interrupted: Arc<AtomicBool>,
}

impl Interrupter {
    pub fn interrupt(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
        self.shared.wake_interrupted();
    }
}
