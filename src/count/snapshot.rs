use arrayvec::ArrayVec;

use super::MAX_EVENTS;
use crate::error::{Error, Result};

/// Counter values of a group at one point in time, in registration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    values: ArrayVec<u64, MAX_EVENTS>,
}

impl Snapshot {
    pub fn values(&self) -> &[u64] {
        &self.values
    }

    pub fn get(&self, index: usize) -> Option<u64> {
        self.values.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Per-slot difference between `self` and an `earlier` snapshot of the same group.
    ///
    /// Hardware counters only grow, so without wraparound every slot is the
    /// number of events counted between the two reads. Slots missing from
    /// either side count as zero.
    pub fn since(&self, earlier: &Snapshot) -> Snapshot {
        let len = self.len().max(earlier.len());
        let values = (0..len)
            .map(|i| {
                let after = self.get(i).unwrap_or(0);
                let before = earlier.get(i).unwrap_or(0);
                after.wrapping_sub(before)
            })
            .collect();
        Snapshot { values }
    }

    pub(crate) fn read_buf_size(group_size: usize) -> usize {
        // `nr` followed by one value per member.
        (group_size + 1) * size_of::<u64>()
    }

    // https://github.com/torvalds/linux/blob/v6.13/include/uapi/linux/perf_event.h#L344
    // struct read_format {
    //     u64 nr;
    //     { u64 value; } cntr[nr];
    // } && PERF_FORMAT_GROUP
    pub(crate) fn parse(buf: &[u8], group_size: usize) -> Result<Self> {
        let expected = Self::read_buf_size(group_size);
        if buf.len() < expected {
            return Err(Error::ShortRead {
                expected,
                actual: buf.len(),
            });
        }

        let mut words = buf[..expected].chunks_exact(size_of::<u64>()).map(|it| {
            let mut word = [0; size_of::<u64>()];
            word.copy_from_slice(it);
            u64::from_le_bytes(word)
        });

        let nr = words.next().unwrap_or(0);
        if nr != group_size as u64 {
            return Err(Error::CountMismatch {
                expected: group_size as u64,
                actual: nr,
            });
        }

        Ok(Self {
            values: words.collect(),
        })
    }
}

impl TryFrom<&[u64]> for Snapshot {
    type Error = Error;

    fn try_from(value: &[u64]) -> Result<Self> {
        let values = ArrayVec::try_from(value).map_err(|_| Error::TooManyValues {
            len: value.len(),
            capacity: MAX_EVENTS,
        })?;
        Ok(Self { values })
    }
}
