use super::{attr, All, Cpu, Opts, Proc, Target};
use crate::error::{Error, Severity};
use crate::event::{Event, RawEvent};
use crate::ffi::bindings as b;

#[test]
fn test_default_opts() {
    let opts = Opts::default();
    assert!(opts.exclude_kernel);
    assert!(!opts.exclude_hv);
    assert!(!opts.pin_on_pmu);
}

#[test]
fn test_attr() {
    let opts = Opts {
        pin_on_pmu: true,
        ..Default::default()
    };
    let leader = attr::from(RawEvent::from(Event::L1dMiss), &opts, true);
    assert_eq!(leader.type_, b::PERF_TYPE_RAW);
    assert_eq!(leader.config, 0x1f41);
    assert_eq!(leader.read_format, b::PERF_FORMAT_GROUP);
    assert_eq!(leader.exclude_kernel(), 1);
    assert_eq!(leader.exclude_user(), 0);
    assert_eq!(leader.pinned(), 1);
    assert_eq!(leader.disabled(), 0);

    let sibling = attr::from(RawEvent::from(Event::L1dAccess), &opts, false);
    assert_eq!(sibling.pinned(), 0);

    let opts = Opts {
        exclude_kernel: false,
        ..Default::default()
    };
    let attr = attr::from(RawEvent(0xc0), &opts, true);
    assert_eq!(attr.exclude_kernel(), 0);
}

#[test]
fn test_target() {
    for (pid, cpu) in [(0, -1), (0, 3), (42, -1), (42, 3), (-1, 3)] {
        let target = Target::new(pid, cpu).unwrap();
        assert_eq!((target.pid(), target.cpu()), (pid, cpu));
    }

    for (pid, cpu) in [(-1, -1), (-2, 0), (0, -2)] {
        let err = Target::new(pid, cpu).unwrap_err();
        assert!(matches!(err, Error::InvalidTarget { .. }));
        assert_eq!(err.severity(), Severity::Soft);
    }
}

#[test]
fn test_typed_target() {
    assert_eq!(Target::from((Proc::CURRENT, Cpu(2))), Target { pid: 0, cpu: 2 });
    assert_eq!(Target::from((Proc(7), Cpu::ALL)), Target { pid: 7, cpu: -1 });
    assert_eq!(Target::from((All, Cpu(1))), Target { pid: -1, cpu: 1 });
}
