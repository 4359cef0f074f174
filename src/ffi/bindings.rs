#![allow(dead_code, non_camel_case_types, non_upper_case_globals)]

// Subset of `include/uapi/linux/perf_event.h` used by this crate:
// https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h

pub const PERF_TYPE_RAW: u32 = 4;

pub const PERF_FORMAT_GROUP: u64 = 1 << 3;

pub const PERF_FLAG_FD_CLOEXEC: u64 = 1 << 3;

pub const PERF_IOC_FLAG_GROUP: u64 = 1;

// _IO('$', 0), _IO('$', 1), _IO('$', 3)
pub const PERF_IOC_OP_ENABLE: u64 = 0x2400;
pub const PERF_IOC_OP_DISABLE: u64 = 0x2401;
pub const PERF_IOC_OP_RESET: u64 = 0x2403;

pub const PERF_ATTR_SIZE_VER8: u32 = 136;

/// `struct perf_event_attr`, laid out as of `PERF_ATTR_SIZE_VER8`.
///
/// The kernel accepts a larger struct than it knows about as long as the
/// unknown tail is zeroed, so this layout works on older kernels too.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default)]
pub struct perf_event_attr {
    pub type_: u32,
    pub size: u32,
    pub config: u64,
    pub sample_period: u64,
    pub sample_type: u64,
    pub read_format: u64,
    pub _bitfield_1: u64,
    pub wakeup_events: u32,
    pub bp_type: u32,
    pub config1: u64,
    pub config2: u64,
    pub branch_sample_type: u64,
    pub sample_regs_user: u64,
    pub sample_stack_user: u32,
    pub clockid: i32,
    pub sample_regs_intr: u64,
    pub aux_watermark: u32,
    pub sample_max_stack: u16,
    pub __reserved_2: u16,
    pub aux_sample_size: u32,
    pub __reserved_3: u32,
    pub sig_data: u64,
    pub config3: u64,
}

macro_rules! bitfield {
    ($($get:ident, $set:ident, $bit:literal;)+) => {
        impl perf_event_attr {
            $(
            #[inline]
            pub fn $get(&self) -> u64 {
                (self._bitfield_1 >> $bit) & 1
            }

            #[inline]
            pub fn $set(&mut self, val: u64) {
                self._bitfield_1 &= !(1 << $bit);
                self._bitfield_1 |= (val & 1) << $bit;
            }
            )+
        }
    };
}

bitfield! {
    disabled, set_disabled, 0;
    pinned, set_pinned, 2;
    exclude_user, set_exclude_user, 4;
    exclude_kernel, set_exclude_kernel, 5;
    exclude_hv, set_exclude_hv, 6;
}
