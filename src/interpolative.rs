//! Binary interpolative coding.
//!
//! A strictly increasing run `pos[j..=k]` with known endpoints is coded by
//! sending `pos[mid]` for `mid = (j + k) / 2`, then recursing into the left
//! half and the right half. Each value only needs to identify itself among
//! the positions still feasible for it: at least `mid - j` above `pos[j]` and
//! at least `k - mid` below `pos[k]`.
//!
//! [`BitWriter::encode_interpolative`](crate::BitWriter::encode_interpolative)
//! and [`BitReader::decode_interpolative`](crate::BitReader::decode_interpolative)
//! walk that tree recursively. [`InterpolativeDecoder`] walks the same tree
//! with an explicit stack so values come out one at a time, in index order.

use tracing::{debug, trace};

use crate::bits::bits_needed;
use crate::error::CompressionError;
use crate::reader::BitReader;

/// Panics unless `pos_j` at index `j` and `pos_k` at index `k` can bound a
/// strictly increasing run.
#[inline]
pub(crate) fn check_endpoints(j: usize, k: usize, pos_j: u32, pos_k: u32) {
    assert!(j <= k, "interpolative range [{j}, {k}] is reversed");
    assert!(
        j == k || u64::from(pos_k.saturating_sub(pos_j)) >= (k - j) as u64,
        "positions must be strictly increasing: pos[{j}] = {pos_j} and pos[{k}] = {pos_k} cannot bound a run"
    );
}

/// One split step of the interpolative tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Split {
    pub(crate) mid: usize,
    /// Smallest value `pos[mid]` can take.
    pub(crate) lowest: u32,
    /// Number of values `pos[mid]` can take.
    pub(crate) outof: u32,
}

impl Split {
    /// Returns `None` when `[j, k]` has no interior.
    ///
    /// # Panics
    ///
    /// Panics if `k - j` strictly increasing positions cannot fit between
    /// `pos_j` and `pos_k`.
    #[inline]
    pub(crate) fn new(j: usize, k: usize, pos_j: u32, pos_k: u32) -> Option<Self> {
        if k <= j + 1 {
            return None;
        }
        let gaps = (k - j) as u64;
        let span = u64::from(pos_k).checked_sub(u64::from(pos_j));
        let span = match span {
            Some(span) if span >= gaps => span,
            _ => panic!(
                "positions must be strictly increasing: {} values cannot fit between {pos_j} and {pos_k}",
                k - j - 1
            ),
        };
        let mid = (j + k) / 2;
        Some(Self {
            mid,
            lowest: pos_j + (mid - j) as u32,
            outof: (span + 1 - gaps) as u32,
        })
    }
}

/// A deferred decode obligation: the interior of `[low_index, high_index]`
/// given the values at both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Frame {
    /// Index of the known left endpoint.
    low_index: usize,
    /// Index of the known right endpoint.
    high_index: usize,
    /// Value at `low_index`.
    low_value: u32,
    /// Value at `high_index`.
    high_value: u32,
}

impl Frame {
    fn has_interior(&self) -> bool {
        self.high_index - self.low_index > 1
    }

    fn split(&self) -> Option<Split> {
        Split::new(self.low_index, self.high_index, self.low_value, self.high_value)
    }
}

/// Element-at-a-time interpolative decoder.
///
/// Created by [`BitReader::decode_interpolative_iter`], which hands the reader
/// over for the lifetime of the cursor: plain `decode`/`read_bits` calls are
/// impossible while a run is being decoded. Once every interior value has
/// been produced, [`into_reader`](Self::into_reader) gives the reader back,
/// positioned just after the run.
///
/// Values come out in increasing index order, matching the recursive
/// decoder exactly, and only `O(log n)` frames are held at a time.
///
/// # Example
///
/// ```rust
/// use interpol::{BitReader, BitWriter};
///
/// let pos = [10u32, 12, 15, 16, 20];
/// let mut writer = BitWriter::new();
/// writer.encode_interpolative(&pos, 0, 4);
/// let buf = writer.finish();
///
/// let mut cursor = BitReader::new(&buf).decode_interpolative_iter(0, 4, 10, 20);
/// assert_eq!(cursor.decode_next().unwrap(), 12);
/// let rest: Vec<u32> = cursor.by_ref().collect::<Result<_, _>>().unwrap();
/// assert_eq!(rest, vec![15, 16]);
/// assert!(cursor.is_exhausted());
/// ```
#[derive(Debug)]
pub struct InterpolativeDecoder<'a> {
    reader: BitReader<'a>,
    current: Option<Frame>,
    stack: Vec<Frame>,
    remaining: usize,
    failed: bool,
}

impl<'a> InterpolativeDecoder<'a> {
    pub(crate) fn new(
        reader: BitReader<'a>,
        j: usize,
        k: usize,
        pos_j: u32,
        pos_k: u32,
    ) -> Self {
        check_endpoints(j, k, pos_j, pos_k);
        let frame = Frame {
            low_index: j,
            high_index: k,
            low_value: pos_j,
            high_value: pos_k,
        };
        let depth = bits_needed(pos_k.saturating_sub(pos_j)) as usize + 1;
        trace!(j, k, pos_j, pos_k, depth, "starting incremental interpolative decode");
        Self {
            reader,
            current: frame.has_interior().then_some(frame),
            stack: Vec::with_capacity(depth),
            remaining: (k - j).saturating_sub(1),
            failed: false,
        }
    }

    /// Number of interior values not yet produced.
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Whether every interior value has been produced (or decoding failed).
    pub fn is_exhausted(&self) -> bool {
        self.current.is_none()
    }

    /// Decode the next interior value.
    ///
    /// On error the cursor becomes exhausted.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is already exhausted.
    pub fn decode_next(&mut self) -> Result<u32, CompressionError> {
        let mut current = self
            .current
            .take()
            .expect("decode_next called on an exhausted interpolative decoder");

        // Descend left, deferring each frame whose right half is still owed.
        while let Some(split) = current.split() {
            let value = match self.reader.decode(split.outof) {
                Ok(offset) => offset + split.lowest,
                Err(err) => {
                    debug!(%err, "interpolative decode failed");
                    self.stack.clear();
                    self.remaining = 0;
                    self.failed = true;
                    return Err(err);
                }
            };
            self.stack.push(current);
            current.high_index = split.mid;
            current.high_value = value;
        }

        let emitted = current.high_value;
        self.remaining -= 1;

        // The deepest deferred frame split exactly at the emitted index, so
        // its right half starts from the value just produced.
        if let Some(parent) = self.stack.pop() {
            let next = Frame {
                low_index: (parent.low_index + parent.high_index) / 2,
                high_index: parent.high_index,
                low_value: emitted,
                high_value: parent.high_value,
            };
            if !self.stack.is_empty() || next.has_interior() {
                self.current = Some(next);
            }
        }
        if self.current.is_none() {
            trace!("interpolative decoder exhausted");
        }
        Ok(emitted)
    }

    /// Hand back the reader, positioned after the decoded run.
    ///
    /// # Panics
    ///
    /// Panics if interior values remain undecoded, or if decoding failed and
    /// the reader is left somewhere inside the run.
    pub fn into_reader(self) -> BitReader<'a> {
        assert!(
            !self.failed,
            "interpolative decoder failed mid-run; reader position is undefined"
        );
        assert!(
            self.is_exhausted(),
            "interpolative decoder dropped with {} values undecoded",
            self.remaining
        );
        self.reader
    }
}

impl Iterator for InterpolativeDecoder<'_> {
    type Item = Result<u32, CompressionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.is_exhausted() {
            None
        } else {
            Some(self.decode_next())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}
