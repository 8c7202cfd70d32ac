//! Simulated periodic temperature source.
//!
//! A [`Device`][device::Device] runs a producer thread that synthesizes
//! one temperature sample per tick, stamps threshold crossings, and
//! pushes the sample into a bounded ring that overwrites its oldest
//! record when no one keeps up. Consumers read whole 16-byte records
//! through blocking, non-blocking, poll or async handles, and a small
//! set of text attributes reconfigures the running producer.
//!
//! ## Example
//!
//! Ramp the temperature every 5 ms and watch it cross 30 °C:
//!
//! ```rust
//! use simtemp::ctrl::Attr;
//! use simtemp::device::Device;
//! use simtemp::sample::{Sample, NEW_SAMPLE};
//!
//! let device = Device::new().unwrap();
//!
//! device.attr_store(Attr::SamplingMs, "5").unwrap();
//! device.attr_store(Attr::ThresholdMc, "30000").unwrap();
//! device.attr_store(Attr::Mode, "ramp").unwrap();
//!
//! let reader = device.open();
//! let mut buf = [0; Sample::WIRE_SIZE];
//! let n = reader.read(&mut buf).unwrap(); // blocks until the next tick
//! assert_eq!(n, Sample::WIRE_SIZE);
//!
//! let sample = Sample::from_bytes(buf);
//! assert!(sample.flags & NEW_SAMPLE != 0);
//!
//! println!("{}", device.attr_show(Attr::Stats));
//! ```
//!
//! There is exactly one producer per device; nothing here talks to real
//! sensor hardware. Samples do not survive the device, and delivery is
//! deliberately lossy under sustained consumer starvation: the ring
//! drops its oldest record rather than stall the producer.

pub mod config;
pub mod ctrl;
pub mod device;
mod ffi;
mod gen;
pub mod sample;
pub mod stats;
