use std::fs::File;
use std::io;
use std::os::fd::AsRawFd;

use crate::config::attr::from;
use crate::config::{Opts, Target};
use crate::event::RawEvent;
use crate::ffi::bindings as b;
use crate::ffi::syscall::perf_event_open;

mod group;
mod snapshot;

pub use group::*;
pub use snapshot::*;

#[cfg(test)]
pub(crate) mod test;

/// Maximum number of events in a [`CounterGroup`].
///
/// This is bounded by the number of general purpose counters on the PMU,
/// a group that does not fit on the PMU at once is never scheduled.
pub const MAX_EVENTS: usize = 6;

/// One opened member of a counter group.
///
/// The underlying file descriptor is closed when the counter is dropped.
#[derive(Debug)]
pub struct Counter {
    event: RawEvent,
    perf: File,
}

impl Counter {
    pub(crate) fn open(
        event: RawEvent,
        target: &Target,
        opts: &Opts,
        leader: Option<&Counter>,
    ) -> io::Result<Self> {
        let attr = from(event, opts, leader.is_none());
        let group_fd = leader.map_or(-1, |it| it.perf.as_raw_fd());
        // All events in a group should monitor the same task and CPU:
        // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12932
        let flags = b::PERF_FLAG_FD_CLOEXEC;
        let perf = perf_event_open(&attr, target.pid, target.cpu, group_fd, flags)?;

        Ok(Self { event, perf })
    }

    pub fn event(&self) -> RawEvent {
        self.event
    }

    pub fn file(&self) -> &File {
        &self.perf
    }
}
