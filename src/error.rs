use std::io;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// How bad an [`Error`] is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
    /// A violated precondition. The call was a no-op and the group is
    /// left exactly as it was.
    Soft,

    /// An external resource failed or the kernel disagrees with our
    /// bookkeeping. The counts from this group can no longer be trusted.
    Fatal,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("counter group is full ({capacity} events)")]
    CapacityExceeded { capacity: usize },

    #[error("{len} values do not fit in a snapshot of {capacity}")]
    TooManyValues { len: usize, capacity: usize },

    #[error("counter group has no events")]
    Empty,

    #[error("counter group is already attached")]
    AlreadyAttached,

    #[error("counter group is not attached")]
    NotAttached,

    #[error("invalid target: pid {pid}, cpu {cpu}")]
    InvalidTarget { pid: i32, cpu: i32 },

    #[error("failed to open counter #{index} (config {config:#x})")]
    Open {
        index: usize,
        config: u64,
        #[source]
        source: io::Error,
    },

    #[error("failed to read counter group")]
    Read(#[source] io::Error),

    #[error("short read from counter group: expected {expected} bytes, got {actual}")]
    ShortRead { expected: usize, actual: usize },

    #[error("counter group returned {actual} values, expected {expected}")]
    CountMismatch { expected: u64, actual: u64 },

    #[error("failed to control counter group")]
    Control(#[source] io::Error),
}

impl Error {
    pub fn severity(&self) -> Severity {
        match self {
            Self::CapacityExceeded { .. }
            | Self::TooManyValues { .. }
            | Self::Empty
            | Self::AlreadyAttached
            | Self::NotAttached
            | Self::InvalidTarget { .. } => Severity::Soft,
            Self::Open { .. }
            | Self::Read(_)
            | Self::ShortRead { .. }
            | Self::CountMismatch { .. }
            | Self::Control(_) => Severity::Fatal,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

// Soft precondition check: the location and the condition text go to the log,
// the caller gets the error.
macro_rules! soft {
    ($cond:expr, $err:expr) => {
        if !($cond) {
            let err = $err;
            log::warn!("{}:{}: {} ({})", file!(), line!(), stringify!($cond), err);
            return Err(err);
        }
    };
}
pub(crate) use soft;
