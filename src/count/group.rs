use arrayvec::ArrayVec;

use super::{Counter, Snapshot, MAX_EVENTS};
use crate::config::{Opts, Target};
use crate::error::{soft, Error, Result};
use crate::event::RawEvent;
use crate::ffi::bindings as b;
use crate::ffi::syscall::{ioctl_arg, read};

/// Counter group.
///
/// An event group is scheduled onto the CPU as a unit: it will be put onto
/// the CPU only if all of the events in the group can be put onto the CPU.
///
/// This means that the values of the member events can be meaningfully compared,
/// added, divided (to get ratios), and so on with each other, since they have
/// counted events for the same set of executed instructions.
///
/// A group goes through three states:
///
/// - configured: events are [added][Self::add] and kernel counting is decided.
/// - attached: the counters are open and [`read`][Self::read] returns snapshots.
/// - detached: the counters are closed, the group cannot be used again.
///
/// Dropping the group closes every counter it opened.
///
/// # Examples
///
/// ```rust,no_run
/// use hygon_perf::config::{Cpu, Proc};
/// use hygon_perf::count::CounterGroup;
/// use hygon_perf::event::Event;
///
/// let mut group = CounterGroup::new();
/// group.add(Event::Instr).unwrap();
/// group.add(Event::Cycle).unwrap();
/// group.attach((Proc::CURRENT, Cpu::ALL)).unwrap();
///
/// let before = group.read().unwrap();
/// std::hint::black_box((0..1000).sum::<u64>());
/// let after = group.read().unwrap();
///
/// let delta = after.since(&before);
/// println!("IPC: {}", delta.values()[0] as f64 / delta.values()[1] as f64);
/// ```
#[derive(Debug)]
pub struct CounterGroup {
    opts: Opts,
    events: ArrayVec<RawEvent, MAX_EVENTS>,
    state: State,
    read_buf: Vec<u8>,
}

#[derive(Debug)]
enum State {
    Configured,
    Attached(Members),
    Detached,
}

#[derive(Debug)]
struct Members {
    target: Target,
    // Declared first so siblings are closed before their leader.
    siblings: ArrayVec<Counter, { MAX_EVENTS - 1 }>,
    leader: Counter,
}

impl CounterGroup {
    /// Creates an empty group that does not count kernel space.
    pub fn new() -> Self {
        Self::with_opts(Opts::default())
    }

    /// Creates an empty group that also counts kernel space.
    pub fn with_kernel() -> Self {
        let mut group = Self::new();
        group.include_kernel();
        group
    }

    pub fn with_opts(opts: Opts) -> Self {
        Self {
            opts,
            events: ArrayVec::new(),
            state: State::Configured,
            read_buf: vec![],
        }
    }

    pub fn opts(&self) -> &Opts {
        &self.opts
    }

    /// Returns the registered events in the order they were added,
    /// which is also the order of values in a [`Snapshot`].
    pub fn events(&self) -> &[RawEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn is_attached(&self) -> bool {
        matches!(self.state, State::Attached(_))
    }

    /// Returns the target the group is attached to.
    pub fn target(&self) -> Option<&Target> {
        match &self.state {
            State::Attached(members) => Some(&members.target),
            _ => None,
        }
    }

    /// Returns the opened counters, leader first.
    pub fn counters(&self) -> impl Iterator<Item = &Counter> {
        let members = match &self.state {
            State::Attached(members) => Some(members),
            _ => None,
        };
        members
            .into_iter()
            .flat_map(|it| std::iter::once(&it.leader).chain(it.siblings.iter()))
    }

    /// Counts kernel space too.
    ///
    /// Only affects counters opened by a later [`attach`][Self::attach],
    /// so this does nothing once the group is attached.
    pub fn include_kernel(&mut self) {
        if !matches!(self.state, State::Configured) {
            log::warn!("{}:{}: kernel inclusion after attach is ignored", file!(), line!());
            return;
        }
        self.opts.exclude_kernel = false;
    }

    /// Registers an event.
    ///
    /// Fails without changing the group if it is full or already attached.
    pub fn add(&mut self, event: impl Into<RawEvent>) -> Result<()> {
        soft!(
            matches!(self.state, State::Configured),
            Error::AlreadyAttached
        );
        soft!(
            !self.events.is_full(),
            Error::CapacityExceeded {
                capacity: MAX_EVENTS
            }
        );
        self.events.push(event.into());
        Ok(())
    }

    /// Opens all registered events as one group on `target`.
    ///
    /// The first event becomes the group leader. If any event fails to open,
    /// the counters opened so far are closed and the group stays configured.
    pub fn attach(&mut self, target: impl Into<Target>) -> Result<()> {
        let target = target.into();
        // Typed targets may still wrap to `(-1, -1)`, e.g. `Cpu(u32::MAX)`.
        let target = Target::new(target.pid, target.cpu)?;

        soft!(
            matches!(self.state, State::Configured),
            Error::AlreadyAttached
        );
        soft!(!self.events.is_empty(), Error::Empty);

        let open = |index: usize, leader: Option<&Counter>| {
            let event = self.events[index];
            Counter::open(event, &target, &self.opts, leader).map_err(|source| Error::Open {
                index,
                config: event.config(),
                source,
            })
        };

        let leader = open(0, None)?;
        let mut siblings = ArrayVec::new();
        for index in 1..self.events.len() {
            siblings.push(open(index, Some(&leader))?);
        }

        log::debug!(
            "attached {} counters to pid {} cpu {}",
            self.events.len(),
            target.pid,
            target.cpu
        );

        self.read_buf = vec![0; Snapshot::read_buf_size(self.events.len())];
        self.state = State::Attached(Members {
            target,
            siblings,
            leader,
        });

        Ok(())
    }

    fn members(&self) -> Result<&Members> {
        match &self.state {
            State::Attached(members) => Ok(members),
            _ => Err(Error::NotAttached),
        }
    }

    /// Reads all counters of the group at once.
    pub fn read(&mut self) -> Result<Snapshot> {
        let leader = match &self.state {
            State::Attached(members) => &members.leader,
            _ => return Err(Error::NotAttached),
        };

        let buf = self.read_buf.as_mut_slice();
        let bytes = read(leader.file(), buf).map_err(Error::Read)?;
        if bytes != buf.len() {
            return Err(Error::ShortRead {
                expected: buf.len(),
                actual: bytes,
            });
        }

        Snapshot::parse(buf, self.events.len())
    }

    fn control(&self, op: u64) -> Result<()> {
        let members = self.members()?;
        ioctl_arg(members.leader.file(), op, b::PERF_IOC_FLAG_GROUP).map_err(Error::Control)?;
        Ok(())
    }

    /// Stops counting.
    ///
    /// The counts freeze and can still be read. A group that was never
    /// attached has nothing to stop.
    pub fn stop(&mut self) -> Result<()> {
        if !self.is_attached() {
            log::debug!("stop on a group that is not attached");
            return Ok(());
        }
        self.control(b::PERF_IOC_OP_DISABLE)?;
        log::debug!("stopped {} counters", self.events.len());
        Ok(())
    }

    /// Resumes counting after [`stop`][Self::stop].
    pub fn enable(&self) -> Result<()> {
        self.control(b::PERF_IOC_OP_ENABLE)
    }

    /// Clears the counts of all counters in the group.
    pub fn clear_count(&self) -> Result<()> {
        self.control(b::PERF_IOC_OP_RESET)
    }

    /// Closes all counters. The group cannot be attached again.
    pub fn detach(&mut self) {
        if let State::Attached(members) = std::mem::replace(&mut self.state, State::Detached) {
            log::debug!(
                "detached {} counters from pid {} cpu {}",
                self.events.len(),
                members.target.pid,
                members.target.cpu
            );
        }
    }
}

impl Default for CounterGroup {
    fn default() -> Self {
        Self::new()
    }
}
