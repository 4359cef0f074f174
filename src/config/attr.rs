use super::Opts;
use crate::event::RawEvent;
use crate::ffi::{bindings as b, Attr};

pub(crate) fn from(event: RawEvent, opts: &Opts, leader: bool) -> Attr {
    let mut attr = Attr {
        type_: b::PERF_TYPE_RAW,
        size: size_of::<Attr>() as _,
        config: event.config(),
        // Siblings use the same format, so any member could be read as a group.
        read_format: b::PERF_FORMAT_GROUP,
        ..Default::default()
    };

    attr.set_exclude_user(0);
    attr.set_exclude_kernel(opts.exclude_kernel as _);
    attr.set_exclude_hv(opts.exclude_hv as _);

    // Only a group leader can be pinned:
    // https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12982
    if leader {
        attr.set_pinned(opts.pin_on_pmu as _);
    }

    attr
}
