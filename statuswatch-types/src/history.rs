//! Downsampling a heartbeat series into a fixed-width history strip.
//!
//! A status page can return anything from zero to a few hundred heartbeats
//! per monitor, but the strip drawn next to each monitor always has the same
//! number of cells. [`HistoryBucketizer`] bridges the two by cutting the most
//! recent part of the series into equal-sized chunks and keeping the last
//! sample of each chunk, so every cell shows the latest known status for its
//! slice of time.
//!
//! ```text
//!  sorted samples   t1 t2 | t3 t4 | t5 |  -
//!                   ------+-------+----+----
//!  buckets (N = 4)     t2 |    t4 | t5 | t5   <- padded with the newest
//! ```

use alloc::vec::Vec;
use core::num::NonZeroUsize;

use crate::Sample;

/// Default number of cells in a history strip.
pub const DEFAULT_BUCKET_COUNT: usize = 24;

/// One cell of a history strip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bucket<'a> {
    /// The representative sample for this slice of time.
    Sample(&'a Sample),
    /// No data at all for the series.
    Empty,
}

impl<'a> Bucket<'a> {
    /// The representative sample, if any.
    pub fn sample(&self) -> Option<&'a Sample> {
        match self {
            Bucket::Sample(s) => Some(s),
            Bucket::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Bucket::Empty)
    }
}

/// Compresses a sample series into exactly `bucket_count` ordered buckets.
///
/// The transform is pure: it only reads the slice it is given, so one
/// bucketizer can be shared freely across threads and monitors.
///
/// # Example
///
/// ```rust
/// use std::num::NonZeroUsize;
/// use statuswatch_types::{Bucket, HistoryBucketizer, Sample, Status};
///
/// let samples = vec![
///     Sample::new(1, Status::Up),
///     Sample::new(2, Status::Down),
///     Sample::new(3, Status::Up),
/// ];
///
/// let bucketizer = HistoryBucketizer::new(NonZeroUsize::new(2).unwrap());
/// let strip = bucketizer.bucketize(&samples);
///
/// assert_eq!(strip, vec![Bucket::Sample(&samples[1]), Bucket::Sample(&samples[2])]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryBucketizer {
    bucket_count: NonZeroUsize,
}

impl HistoryBucketizer {
    pub const fn new(bucket_count: NonZeroUsize) -> Self {
        Self { bucket_count }
    }

    /// Number of buckets every call to [`bucketize`](Self::bucketize) returns.
    pub fn bucket_count(&self) -> usize {
        self.bucket_count.get()
    }

    /// Downsample `samples` into `bucket_count` buckets, oldest first.
    ///
    /// - An empty input yields `bucket_count` [`Bucket::Empty`] cells.
    /// - Samples are ordered by timestamp with a stable sort, so the input
    ///   order only matters for equal timestamps.
    /// - Only the newest `chunk * bucket_count` samples are considered, where
    ///   `chunk = ceil(len / bucket_count)`. Older samples are dropped.
    /// - Each bucket holds the last sample of its chunk. Chunks past the end
    ///   of the data hold the newest sample overall.
    pub fn bucketize<'a>(&self, samples: &'a [Sample]) -> Vec<Bucket<'a>> {
        let count = self.bucket_count.get();

        if samples.is_empty() {
            return alloc::vec![Bucket::Empty; count];
        }

        let mut sorted: Vec<&'a Sample> = samples.iter().collect();
        sorted.sort_by_key(|s| s.timestamp_ms);

        let chunk_size = sorted.len().div_ceil(count);
        let window = chunk_size.saturating_mul(count);
        let recent = &sorted[sorted.len().saturating_sub(window)..];

        // `recent` is non-empty because `samples` is
        let newest = recent[recent.len() - 1];

        (0..count)
            .map(|i| {
                let start = i * chunk_size;
                let end = (start + chunk_size).min(recent.len());
                let representative = recent.get(start..end).and_then(|chunk| chunk.last());
                Bucket::Sample(representative.copied().unwrap_or(newest))
            })
            .collect()
    }
}

impl Default for HistoryBucketizer {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_BUCKET_COUNT).unwrap_or(NonZeroUsize::MIN))
    }
}
