use crate::error::{soft, Error, Result};

#[derive(Clone, Copy, Debug)]
pub struct All;

#[derive(Clone, Copy, Debug)]
pub struct Cpu(pub u32);

impl Cpu {
    pub const ALL: All = All;
}

#[derive(Clone, Copy, Debug)]
pub struct Proc(pub u32);

impl Proc {
    pub const ALL: All = All;
    pub const CURRENT: Proc = Proc(0);
}

/// What a counter group observes.
///
/// | pid  | cpu  | observes                                         |
/// |------|------|--------------------------------------------------|
/// | 0    | -1   | calling process, any CPU                         |
/// | 0    | n    | calling process, only while on CPU `n`           |
/// | p>0  | -1   | process `p`, any CPU                             |
/// | p>0  | n    | process `p`, only while on CPU `n`               |
/// | -1   | n    | every process on CPU `n` (needs privileges)      |
/// | -1   | -1   | invalid                                          |
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Target {
    pub(crate) pid: i32,
    pub(crate) cpu: i32,
}

impl Target {
    /// Validates a raw `(pid, cpu)` pair.
    pub fn new(pid: i32, cpu: i32) -> Result<Self> {
        soft!(
            pid >= -1 && cpu >= -1 && (pid, cpu) != (-1, -1),
            Error::InvalidTarget { pid, cpu }
        );
        Ok(Self { pid, cpu })
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    pub fn cpu(&self) -> i32 {
        self.cpu
    }
}

macro_rules! into_target {
    ($ty: ty, $destruct: tt, $pid: expr, $cpu: expr) => {
        impl From<$ty> for Target {
            fn from($destruct: $ty) -> Self {
                Target {
                    pid: $pid as _,
                    cpu: $cpu as _,
                }
            }
        }
    };
}

into_target!((Proc, Cpu), (Proc(pid), Cpu(cpu)), pid, cpu);
into_target!((Cpu, Proc), (Cpu(cpu), Proc(pid)), pid, cpu);

into_target!((Proc, All), (Proc(pid), _), pid, -1);
into_target!((All, Proc), (_, Proc(pid)), pid, -1);

into_target!((Cpu, All), (Cpu(cpu), _), -1, cpu);
into_target!((All, Cpu), (_, Cpu(cpu)), -1, cpu);

// `(All, All)` has no conversion, the kernel rejects it:
// https://github.com/torvalds/linux/blob/v6.13/kernel/events/core.c#L12835
