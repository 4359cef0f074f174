//! Grouped hardware performance counters for Hygon family processors.
//!
//! Counters are opened with the `perf_event_open` system call as one group,
//! so the kernel schedules them together and a single read returns a consistent
//! snapshot of all of them.
//!
//! ## Example
//!
//! Count L1 data cache misses and accesses around a workload on any CPU.
//!
//! ```rust,no_run
//! use hygon_perf::config::{Cpu, Proc};
//! use hygon_perf::count::CounterGroup;
//! use hygon_perf::event::Event;
//!
//! let mut group = CounterGroup::new(); // Kernel space is excluded by default.
//! group.add(Event::L1dMiss).unwrap();
//! group.add(Event::L1dAccess).unwrap();
//! group.attach((Proc::CURRENT, Cpu::ALL)).unwrap();
//!
//! let before = group.read().unwrap();
//! let v: Vec<u64> = (0..1 << 20).collect();
//! std::hint::black_box(v.iter().sum::<u64>());
//! let after = group.read().unwrap();
//!
//! let delta = after.since(&before);
//! println!("{} misses in {} accesses", delta.values()[0], delta.values()[1]);
//! ```
//!
//! For the predefined cache, branch/IPC and instruction origin measurements,
//! see [`session`].
//!
//! ## Processor compatibility
//!
//! The [event encodings][event::Event] are those of the Hygon family PMU.
//! Other processors accept the same raw codes but count different things.

pub mod config;
pub mod count;
pub mod error;
pub mod event;
mod ffi;
pub mod session;

pub use error::{Error, Result, Severity};
