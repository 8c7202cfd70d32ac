
mod async_reader;
mod producer;
mod reader;

pub use async_reader::AsyncReader;
pub use reader::{Interrupter, Reader};

use std::io::{Error, ErrorKind, Result};
use std::mem;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::task::Waker;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use tracing::info;

use crate::config::{self, Config, SharedConfig};
use crate::ctrl::{self, Attr};
use crate::sample::rb::{Rb, RING_SIZE};
use crate::stats::{Counters, Stats};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Producer pacing state, guarded by its own mutex and condvar.
pub(crate) struct Pacer {
    /// Set by the control plane after a period change so the producer
    /// drops its pending deadline and re-arms with the new period.
    pub rearm: bool,
}

/// State shared by the producer, the readers and the control plane.
///
/// The ring mutex is a leaf lock with strictly bounded critical sections
/// (index arithmetic and one record copy). Nothing is held across a
/// notification or a copy-out.
pub(crate) struct Shared {
    rb: Mutex<Rb>,
    /// Readers sleep here while the ring is empty.
    readable: Condvar,

    pacer: Mutex<Pacer>,
    /// The producer sleeps here between ticks.
    tick: Condvar,

    pub config: SharedConfig,
    pub counters: Counters,

    running: AtomicBool,
    /// Wakers of async readers parked on an empty ring.
    wakers: Mutex<Vec<Waker>>,
}

impl Shared {
    fn new(config: Config) -> Self {
        Self {
            rb: Mutex::new(Rb::new()),
            readable: Condvar::new(),
            pacer: Mutex::new(Pacer { rearm: false }),
            tick: Condvar::new(),
            config: SharedConfig::new(config),
            counters: Counters::new(),
            running: AtomicBool::new(true),
            wakers: Mutex::new(Vec::new()),
        }
    }

    pub fn rb(&self) -> MutexGuard<'_, Rb> {
        lock(&self.rb)
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Blocks the caller until the producer signals a push. The guard is
    /// released while sleeping and re-acquired before returning; the
    /// caller re-checks its predicate to cover spurious wakeups.
    pub fn wait_readable<'a>(&self, guard: MutexGuard<'a, Rb>) -> MutexGuard<'a, Rb> {
        self.readable
            .wait(guard)
            .unwrap_or_else(PoisonError::into_inner)
    }

    pub fn wait_readable_timeout<'a>(
        &self,
        guard: MutexGuard<'a, Rb>,
        timeout: Duration,
    ) -> MutexGuard<'a, Rb> {
        self.readable
            .wait_timeout(guard, timeout)
            .map(|(guard, _)| guard)
            .unwrap_or_else(|e| e.into_inner().0)
    }

    /// Producer-side wake after a push. Called with no locks held.
    pub fn wake_readers(&self) {
        self.readable.notify_all();
        self.wake_async();
    }

    pub fn register_waker(&self, waker: &Waker) {
        let mut wakers = lock(&self.wakers);
        if !wakers.iter().any(|known| known.will_wake(waker)) {
            wakers.push(waker.clone());
        }
    }

    fn wake_async(&self) {
        let wakers = mem::take(&mut *lock(&self.wakers));
        for waker in wakers {
            waker.wake();
        }
    }

    /// Asks the producer to drop its pending deadline and re-arm with
    /// the current period.
    pub fn rearm(&self) {
        lock(&self.pacer).rearm = true;
        self.tick.notify_one();
    }

    pub fn pacer(&self) -> MutexGuard<'_, Pacer> {
        lock(&self.pacer)
    }

    pub fn wait_tick<'a>(
        &self,
        guard: MutexGuard<'a, Pacer>,
        timeout: Duration,
    ) -> MutexGuard<'a, Pacer> {
        self.tick
            .wait_timeout(guard, timeout)
            .map(|(guard, _)| guard)
            .unwrap_or_else(|e| e.into_inner().0)
    }

    /// Stops the producer and wakes every waiter.
    ///
    /// Each mutex is taken and released once before its notification so
    /// no waiter can be sleeping between its predicate check and the
    /// notify, which would miss the wake.
    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        drop(lock(&self.pacer));
        self.tick.notify_all();
        drop(lock(&self.rb));
        self.readable.notify_all();
        self.wake_async();
    }

    /// Reader-side cancellation wake, same dance as [`Self::stop`].
    pub fn wake_interrupted(&self) {
        drop(lock(&self.rb));
        self.readable.notify_all();
    }
}

/// The simulated temperature device.
///
/// Owns the shared state and the producer thread. Every collaborator
/// reaches the device through a handle: readers via [`Device::open`], the
/// control plane via [`Device::attr_show`] and [`Device::attr_store`].
/// Dropping the device stops the producer, lets the in-flight tick
/// finish, and fails every suspended read with
/// [`ErrorKind::Interrupted`][std::io::ErrorKind::Interrupted].
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use simtemp::device::Device;
/// use simtemp::sample::NEW_SAMPLE;
///
/// let device = Device::new().unwrap();
/// let reader = device.open();
///
/// if reader.poll(Duration::from_millis(500)).unwrap() {
///     let sample = reader.read_sample().unwrap();
///     assert!(sample.flags & NEW_SAMPLE != 0);
/// }
/// ```
pub struct Device {
    shared: Arc<Shared>,
    producer: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Device").finish_non_exhaustive()
    }
}

impl Device {
    /// Creates a device with the default configuration: 100 ms period,
    /// 45.000 °C threshold, ramp mode.
    pub fn new() -> Result<Self> {
        Self::with_config(Config::default())
    }

    /// Creates a device with an explicit initial configuration.
    ///
    /// Fails with [`ErrorKind::InvalidInput`] when a value is out of
    /// range, or propagates the OS error when the producer thread cannot
    /// be spawned.
    pub fn with_config(config: Config) -> Result<Self> {
        let period_ok =
            (config::PERIOD_MS_MIN..=config::PERIOD_MS_MAX).contains(&config.period_ms);
        let threshold_ok =
            (config::THRESHOLD_MC_MIN..=config::THRESHOLD_MC_MAX).contains(&config.threshold_mc);
        if !period_ok || !threshold_ok {
            return Err(Error::new(
                ErrorKind::InvalidInput,
                "initial configuration out of range",
            ));
        }

        let shared = Arc::new(Shared::new(config));
        let producer = thread::Builder::new().name("simtemp-producer".into()).spawn({
            let shared = Arc::clone(&shared);
            move || producer::run(&shared)
        })?;

        info!(
            period_ms = config.period_ms,
            ring = RING_SIZE,
            "simtemp up"
        );

        Ok(Self {
            shared,
            producer: Some(producer),
        })
    }

    /// Opens a consumer handle. Handles start in blocking mode.
    pub fn open(&self) -> Reader {
        Reader::new(Arc::clone(&self.shared))
    }

    /// Current configuration snapshot.
    pub fn config(&self) -> Config {
        self.shared.config.snapshot()
    }

    /// Counter snapshot. Never blocks; may trail the producer by a tick.
    pub fn stats(&self) -> Stats {
        self.shared.counters.snapshot()
    }

    /// Reads a control-plane attribute as its textual form.
    pub fn attr_show(&self, attr: Attr) -> String {
        ctrl::show(&self.shared, attr)
    }

    /// Writes a control-plane attribute from its textual form.
    ///
    /// Rejected writes fail with
    /// [`ErrorKind::InvalidInput`][std::io::ErrorKind::InvalidInput] and
    /// leave the attribute unchanged.
    pub fn attr_store(&self, attr: Attr, value: &str) -> Result<()> {
        ctrl::store(&self.shared, attr, value)
    }

    /// Stops the producer and wakes every suspended reader.
    ///
    /// Buffered samples can still be drained afterwards; once the ring is
    /// empty, reads fail with `Interrupted`. Called automatically on
    /// drop.
    pub fn shutdown(&mut self) {
        let Some(producer) = self.producer.take() else {
            return;
        };
        self.shared.stop();
        // The in-flight tick completes before the thread exits.
        let _ = producer.join();
        info!("simtemp down");
    }
}

impl Drop for Device {
    fn drop(&mut self) {
        self.shutdown();
    }
}
