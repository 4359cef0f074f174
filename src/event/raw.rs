use super::{Encoding, Event};

/// A "raw" implementation-specific event, as passed to the kernel in `config`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RawEvent(pub u64);

impl RawEvent {
    pub const fn config(&self) -> u64 {
        self.0
    }
}

macro_rules! into_raw {
    ($ty:ty, $value:ident, $config:expr) => {
        impl From<$ty> for RawEvent {
            fn from($value: $ty) -> Self {
                RawEvent($config)
            }
        }

        impl From<&$ty> for RawEvent {
            fn from($value: &$ty) -> Self {
                let $value = *$value;
                RawEvent($config)
            }
        }
    };
}

into_raw!(Event, value, value.encoding().packed());
into_raw!(Encoding, value, value.packed());
into_raw!(u64, value, value);
