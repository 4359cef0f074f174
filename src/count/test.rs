use std::hint::black_box;

use super::{CounterGroup, Snapshot, MAX_EVENTS};
use crate::config::{Cpu, Opts, Proc, Target};
use crate::error::{Error, Severity};
use crate::event::{Event, RawEvent};

// Containers and VMs often have no usable PMU, those tests have nothing to check there.
// `EINVAL` is not among them: it means the attr we built is wrong.
pub(crate) fn unavailable(err: &Error) -> bool {
    match err {
        Error::Open { source, .. } => {
            source.kind() == std::io::ErrorKind::Unsupported
                || matches!(
                    source.raw_os_error(),
                    Some(
                        libc::EACCES
                            | libc::EPERM
                            | libc::ENOENT
                            | libc::ENODEV
                            | libc::ENOSYS
                            | libc::EOPNOTSUPP
                    )
                )
        }
        _ => false,
    }
}

fn words(words: &[u64]) -> Vec<u8> {
    words.iter().flat_map(|it| it.to_le_bytes()).collect()
}

#[test]
fn test_unavailable() {
    let open = |errno| Error::Open {
        index: 0,
        config: 0,
        source: std::io::Error::from_raw_os_error(errno),
    };
    assert!(unavailable(&open(libc::EACCES)));
    assert!(unavailable(&open(libc::ENOENT)));
    // A rejected attr is a bug to report, not a missing PMU.
    assert!(!unavailable(&open(libc::EINVAL)));
    assert!(!unavailable(&Error::NotAttached));
}

#[test]
fn test_add_capacity() {
    let mut group = CounterGroup::new();
    let events = [
        Event::L1dMiss,
        Event::L1dAccess,
        Event::L1iMiss,
        Event::L2dMiss,
        Event::L2dAccess,
        Event::L2iMiss,
    ];
    for event in events {
        group.add(event).unwrap();
    }
    assert_eq!(group.len(), MAX_EVENTS);

    let err = group.add(Event::Instr).unwrap_err();
    assert!(matches!(err, Error::CapacityExceeded { capacity: 6 }));
    assert_eq!(err.severity(), Severity::Soft);
    assert_eq!(group.len(), MAX_EVENTS);

    let expected: Vec<_> = events.iter().map(RawEvent::from).collect();
    assert_eq!(group.events(), expected.as_slice());
}

#[test]
fn test_include_kernel() {
    assert!(CounterGroup::new().opts().exclude_kernel);
    assert!(!CounterGroup::with_kernel().opts().exclude_kernel);

    let mut group = CounterGroup::with_opts(Opts::default());
    group.include_kernel();
    assert!(!group.opts().exclude_kernel);
}

#[test]
fn test_attach_invalid_target() {
    let mut group = CounterGroup::new();
    group.add(Event::Instr).unwrap();

    let err = Target::new(-1, -1).unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { pid: -1, cpu: -1 }));

    // Wraps to `(-1, -1)` and must be rejected before anything is opened.
    let err = group.attach((Proc::ALL, Cpu(u32::MAX))).unwrap_err();
    assert!(matches!(err, Error::InvalidTarget { pid: -1, cpu: -1 }));
    assert!(!group.is_attached());
    assert_eq!(group.counters().count(), 0);

    // Still configurable.
    group.add(Event::Cycle).unwrap();
    assert_eq!(group.len(), 2);
}

#[test]
fn test_attach_empty() {
    let mut group = CounterGroup::new();
    let err = group.attach((Proc::CURRENT, Cpu::ALL)).unwrap_err();
    assert!(matches!(err, Error::Empty));
    assert!(!group.is_attached());
}

#[test]
fn test_unattached() {
    let mut group = CounterGroup::new();
    group.add(Event::Instr).unwrap();
    assert!(matches!(group.read(), Err(Error::NotAttached)));
    assert!(matches!(group.clear_count(), Err(Error::NotAttached)));
    assert!(group.target().is_none());
    group.stop().unwrap();
}

#[test]
fn test_parse() {
    let buf = words(&[3, 10, 20, 30]);
    let snapshot = Snapshot::parse(&buf, 3).unwrap();
    assert_eq!(snapshot.values(), &[10, 20, 30]);
}

#[test]
fn test_parse_count_mismatch() {
    let buf = words(&[2, 10, 20, 30]);
    let err = Snapshot::parse(&buf, 3).unwrap_err();
    assert!(matches!(
        err,
        Error::CountMismatch {
            expected: 3,
            actual: 2
        }
    ));
    assert!(err.is_fatal());
}

#[test]
fn test_parse_short() {
    let buf = words(&[3, 10, 20]);
    let err = Snapshot::parse(&buf, 3).unwrap_err();
    assert!(matches!(
        err,
        Error::ShortRead {
            expected: 32,
            actual: 24
        }
    ));
}

#[test]
fn test_since() {
    let before = Snapshot::try_from([5u64, 100, 7].as_slice()).unwrap();
    let after = Snapshot::try_from([9u64, 250, 7].as_slice()).unwrap();
    let delta = after.since(&before);
    for i in 0..3 {
        assert_eq!(delta.values()[i], after.values()[i] - before.values()[i]);
    }
    assert_eq!(delta.values(), &[4, 150, 0]);

    let err = Snapshot::try_from([0u64; 7].as_slice()).unwrap_err();
    assert!(matches!(
        err,
        Error::TooManyValues {
            len: 7,
            capacity: 6
        }
    ));
    assert_eq!(err.severity(), Severity::Soft);
}

#[test]
fn test_read() {
    let mut group = CounterGroup::new();
    group.add(Event::Instr).unwrap();
    group.add(Event::Cycle).unwrap();

    match group.attach((Proc::CURRENT, Cpu::ALL)) {
        Ok(()) => (),
        Err(e) if unavailable(&e) => return,
        Err(e) => panic!("{}", e),
    }
    assert!(group.is_attached());
    assert_eq!(group.counters().count(), 2);
    let order: Vec<_> = group.counters().map(|it| it.event()).collect();
    assert_eq!(order, group.events());

    let err = group.add(Event::Branch).unwrap_err();
    assert!(matches!(err, Error::AlreadyAttached));
    assert_eq!(group.len(), 2);

    let before = group.read().unwrap();
    black_box((0..10_000u64).sum::<u64>());
    let after = group.read().unwrap();
    assert_eq!(before.len(), 2);
    assert_eq!(after.len(), 2);
    for (a, b) in after.values().iter().zip(before.values()) {
        assert!(a >= b);
    }

    group.stop().unwrap();
    let first = group.read().unwrap();
    black_box((0..10_000u64).sum::<u64>());
    let second = group.read().unwrap();
    assert_eq!(first, second);

    group.enable().unwrap();
    group.clear_count().unwrap();

    group.detach();
    assert!(!group.is_attached());
    assert!(matches!(group.read(), Err(Error::NotAttached)));
    assert!(matches!(
        group.attach((Proc::CURRENT, Cpu::ALL)),
        Err(Error::AlreadyAttached)
    ));
}
