pub(crate) mod attr;
mod target;

pub use target::*;

#[cfg(test)]
mod test;

/// Counter group options.
///
/// User space activity is always counted.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Opts {
    /// Do not count events that happen in kernel space.
    ///
    /// Defaults to `true`.
    pub exclude_kernel: bool,

    /// Do not count events that happen in the hypervisor.
    pub exclude_hv: bool,

    /// Keep the group on the PMU at all times.
    ///
    /// If the group cannot stay scheduled, it goes into an error state
    /// and reads return end-of-file.
    pub pin_on_pmu: bool,
}

impl Default for Opts {
    fn default() -> Self {
        Self {
            exclude_kernel: true,
            exclude_hv: false,
            pin_on_pmu: false,
        }
    }
}
