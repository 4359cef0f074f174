//! Predefined measurement sessions.
//!
//! A session owns one [`CounterGroup`] loaded with a fixed set of events, takes a
//! snapshot before and after the measured code, and reports the difference.
//!
//! ```rust,no_run
//! use hygon_perf::session::{Session, SessionKind};
//!
//! let mut session = Session::create(SessionKind::BranchIpc);
//! session.add_events().unwrap();
//! session.start_on_core(0).unwrap();
//!
//! session.read_start().unwrap();
//! std::hint::black_box((0..1_000_000u64).sum::<u64>());
//! session.read_end().unwrap();
//!
//! println!("{}", session.title());
//! println!("{}", session.report());
//! ```

use std::fmt;
use std::io::{self, Write};

use arrayvec::ArrayVec;

use crate::config::{Cpu, Opts, Proc};
use crate::count::{CounterGroup, Snapshot, MAX_EVENTS};
use crate::error::{soft, Error, Result};
use crate::event::Event;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SessionKind {
    /// L1/L2 data and instruction cache behavior. Fills a group to capacity.
    Cache,
    /// Branch prediction and instructions per cycle.
    BranchIpc,
    /// Where decoded instructions come from: instruction cache or op cache.
    InstructionOrigin,
}

impl SessionKind {
    /// The events of the session, in column order.
    pub const fn events(self) -> &'static [Event] {
        match self {
            SessionKind::Cache => &[
                Event::L1dMiss,
                Event::L1dAccess,
                Event::L1iMiss,
                Event::L2dMiss,
                Event::L2dAccess,
                Event::L2iMiss,
            ],
            SessionKind::BranchIpc => &[
                Event::BranchMiss,
                Event::Branch,
                Event::Instr,
                Event::Cycle,
            ],
            SessionKind::InstructionOrigin => &[Event::IcInstr, Event::OcInstr],
        }
    }
}

/// Formats each item as `\t<item>` and joins them with commas.
struct Columns<I>(I);

impl<I> fmt::Display for Columns<I>
where
    I: Iterator + Clone,
    I::Item: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, it) in self.0.clone().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "\t{}", it)?;
        }
        Ok(())
    }
}

/// Events counted between [`Session::read_start`] and [`Session::read_end`].
///
/// Displays as the data line of the session: one tab-prefixed column
/// per event, separated by commas.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Report {
    columns: ArrayVec<(Event, u64), MAX_EVENTS>,
}

impl Report {
    /// Builds the report of `events` from two snapshots of their group.
    ///
    /// Column `i` is `after[i] - before[i]`. A slot missing from a snapshot
    /// counts as zero.
    pub fn new(events: &[Event], before: &Snapshot, after: &Snapshot) -> Self {
        let delta = after.since(before);
        let columns = events
            .iter()
            .take(MAX_EVENTS)
            .enumerate()
            .map(|(i, event)| (*event, delta.get(i).unwrap_or(0)))
            .collect();
        Self { columns }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Event, u64)> + Clone + '_ {
        self.columns.iter().copied()
    }

    pub fn deltas(&self) -> impl Iterator<Item = u64> + Clone + '_ {
        self.iter().map(|(_, delta)| delta)
    }

    /// Returns the delta of `event`, if the report has a column for it.
    pub fn get(&self, event: Event) -> Option<u64> {
        self.iter().find(|(it, _)| *it == event).map(|(_, delta)| delta)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", Columns(self.deltas()))
    }
}

/// A counter group with a fixed event set and a before/after pair of snapshots.
///
/// The report is meaningful when exactly one [`read_start`][Self::read_start]
/// precedes exactly one [`read_end`][Self::read_end] on the same attachment.
/// The session does not check this ordering.
#[derive(Debug)]
pub struct Session {
    kind: SessionKind,
    group: CounterGroup,
    before: Snapshot,
    after: Snapshot,
}

impl Session {
    /// Creates a session that counts both user and kernel space.
    pub fn create(kind: SessionKind) -> Self {
        Self::with_group(kind, CounterGroup::with_kernel())
    }

    pub fn with_opts(kind: SessionKind, opts: Opts) -> Self {
        Self::with_group(kind, CounterGroup::with_opts(opts))
    }

    fn with_group(kind: SessionKind, group: CounterGroup) -> Self {
        Self {
            kind,
            group,
            before: Snapshot::default(),
            after: Snapshot::default(),
        }
    }

    pub fn kind(&self) -> SessionKind {
        self.kind
    }

    pub fn events(&self) -> &'static [Event] {
        self.kind.events()
    }

    pub fn group(&self) -> &CounterGroup {
        &self.group
    }

    /// Registers the events of the session into its group.
    ///
    /// Either every event is registered or, on error, none is.
    pub fn add_events(&mut self) -> Result<()> {
        soft!(!self.group.is_attached(), Error::AlreadyAttached);
        soft!(
            self.group.len() + self.events().len() <= MAX_EVENTS,
            Error::CapacityExceeded {
                capacity: MAX_EVENTS
            }
        );
        for event in self.events() {
            self.group.add(event)?;
        }
        Ok(())
    }

    /// Counts the calling process while it runs on `core`.
    pub fn start_on_core(&mut self, core: u32) -> Result<()> {
        self.group.attach((Proc::CURRENT, Cpu(core)))
    }

    /// Counts the calling process on any CPU.
    pub fn start_on_current_process(&mut self) -> Result<()> {
        self.group.attach((Proc::CURRENT, Cpu::ALL))
    }

    pub fn stop(&mut self) -> Result<()> {
        self.group.stop()
    }

    /// Header line: the event titles in column order.
    pub fn title(&self) -> String {
        Columns(self.events().iter().map(|it| it.title())).to_string()
    }

    pub fn read_start(&mut self) -> Result<&Snapshot> {
        self.before = self.group.read()?;
        Ok(&self.before)
    }

    pub fn read_end(&mut self) -> Result<&Snapshot> {
        self.after = self.group.read()?;
        Ok(&self.after)
    }

    pub fn report(&self) -> Report {
        Report::new(self.events(), &self.before, &self.after)
    }

    /// Data line: the deltas of [`report`][Self::report] in column order.
    pub fn report_line(&self) -> String {
        self.report().to_string()
    }

    pub fn write_title<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{}", self.title())
    }

    pub fn write_report<W: Write>(&self, mut w: W) -> io::Result<()> {
        writeln!(w, "{}", self.report())
    }
}
