//! Hardware events of the Hygon family PMU.
//!
//! The table is fixed configuration data: every [`Event`] resolves to the same
//! [`Encoding`] on every call, and only the packed encoding ever reaches the kernel.
//! Names and titles are for presentation.

mod raw;

pub use raw::*;


/// Raw event selector and unit mask of a hardware event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Encoding {
    /// Event selector.
    pub event: u16,
    /// Unit mask.
    pub mask: u8,
}

impl Encoding {
    pub const fn new(event: u16, mask: u8) -> Self {
        Self { event, mask }
    }

    /// Packs the pair as `event | mask << 8`, the `config` of a raw perf event.
    pub const fn packed(&self) -> u64 {
        self.event as u64 | (self.mask as u64) << 8
    }
}

struct Info {
    encoding: Encoding,
    name: &'static str,
    title: &'static str,
}

macro_rules! catalog {
    ($(
        $(#[$doc:meta])*
        $id:ident = ($event:literal, $mask:literal, $name:literal, $title:literal),
    )+) => {
        /// Known hardware event.
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Event {
            $($(#[$doc])* $id,)+
        }

        impl Event {
            /// Every event in the catalog, aliases excluded.
            pub const ALL: &'static [Event] = &[$(Event::$id,)+];

            const fn info(self) -> Info {
                match self {
                    $(Event::$id => Info {
                        encoding: Encoding::new($event, $mask),
                        name: $name,
                        title: $title,
                    },)+
                }
            }
        }
    };
}

catalog! {
    FpuPipe0 = (0x000, 0x01, "PIPE_TOTAL_0", "Fpu Pipe 0 Assignment"),
    FpuPipe1 = (0x000, 0x02, "PIPE_TOTAL_1", "Fpu Pipe 1 Assignment"),
    FpuPipe2 = (0x000, 0x04, "PIPE_TOTAL_2", "Fpu Pipe 2 Assignment"),
    FpuPipe3 = (0x000, 0x08, "PIPE_TOTAL_3", "Fpu Pipe 3 Assignment"),

    DataPipe = (0x041, 0x01, "DataPipe", "LsMabAllocPipe DataPipe"),
    StPipe = (0x041, 0x02, "StPipe", "LsMabAllocPipe StPipe"),
    TlbPipeLate = (0x041, 0x04, "TlbPipeLate", "LsMabAllocPipe TlbPipeLate"),
    Hwpf = (0x041, 0x08, "HWPF", "LsMabAllocPipe HWPF"),
    TlbPipeEarly = (0x041, 0x10, "TlbPipeEarly", "LsMabAllocPipe TlbPipeEarly"),

    TlbReload4kL2Hit = (0x045, 0x01, "TlbReload4KL2Hit", "4K L2 Hit"),
    TlbReload4kL2Miss = (0x045, 0x10, "TlbReload4KL2Miss", "4k L2 Miss"),

    /// Instruction fills that missed L2.
    ///
    /// Also known as [`Event::L2_CACHE_REQ_MISS`].
    L2iMiss = (0x064, 0x01, "IcFillMiss", "L2 Instruction cache misses"),
    L2CacheReqHitS = (0x064, 0x02, "IcFillHitS", "L2CacheReqStat IcFillHitS"),
    L2CacheReqHitX = (0x064, 0x04, "IcFillHitX", "L2CacheReqStat IcFillHitX"),

    /// 32-byte instruction cache fetches.
    IcacheFw32 = (0x080, 0x00, "IcFw32", "Instruction cache fetch"),
    /// 32-byte instruction cache fetches that missed L1.
    ///
    /// Also known as [`Event::ICACHE_FW32_MISS`].
    L1iMiss = (0x081, 0x00, "IcFw32Miss", "L1 Instruction cache misses"),

    ItlbL1MissL2Hit = (0x084, 0x00, "BpL1TlbMissL2Hit", "L1 ITLB miss and L2 ITLB hit"),
    ItlbL1MissL2Miss = (0x085, 0x00, "BpL1TlbMissL2Miss", "L1 ITLB miss and L2 ITLB miss"),
    ItlbL1Hit = (0x094, 0x00, "L1ITLBHit", "L1 ITLB hit"),

    /// MAB allocations over all pipes, i.e. L1 data cache misses.
    L1dMiss = (0x041, 0x1f, "MAB allocation by pipe", "L1 dcache misses"),
    L1dAccess = (0x040, 0x00, "data cache accesses", "L1 dcache accesses"),

    /// Retired instructions.
    Instr = (0x0c0, 0x00, "Instructions", "Instructions"),
    /// Core cycles.
    Cycle = (0x076, 0x00, "Cycle", "Cycle"),

    L2dMiss = (0x064, 0x08, "LsRdBlkC", "L2 dcache misses"),
    /// Sum of `LsRdBlkCS`, `LsRdBlkLHitX`, `LsRdBlkLHitS`, `LsRdBlkX` and `LsRdBlkC`.
    L2dAccess = (
        0x064,
        0xf8,
        "LsRdBlkCS+LsRdBlkLHitX+LsRdBlkLHitS+LsRdBlkX+LsRdBlkC",
        "L2 dcache accesses"
    ),

    /// Retired branch instructions that were mispredicted.
    BranchMiss = (0x0c3, 0x00, "retired branch insts mispredicted", "branch predict miss"),
    /// Retired branch instructions.
    Branch = (0x0c2, 0x00, "retired branch insts", "branch predict"),

    /// Instructions delivered from the instruction cache.
    IcInstr = (0x0aa, 0x00, "instructions from IC", "instructions from IC"),
    /// Instructions delivered from the op cache.
    OcInstr = (0x0aa, 0x01, "instructions from OC", "instructions from OC"),
}

impl Event {
    pub const L2_CACHE_REQ_MISS: Event = Event::L2iMiss;
    pub const ICACHE_FW32_MISS: Event = Event::L1iMiss;

    pub const fn encoding(self) -> Encoding {
        self.info().encoding
    }

    /// Mnemonic of the event in the PMU documentation.
    pub const fn name(self) -> &'static str {
        self.info().name
    }

    /// Label of the event in report headers.
    pub const fn title(self) -> &'static str {
        self.info().title
    }
}
