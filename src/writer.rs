//! Bit-packing writer.

use crate::bits::Bands;
use crate::interpolative::{check_endpoints, Split};

/// Accumulates variable-width codes into a byte buffer, LSB first.
///
/// Whole bytes are flushed as soon as they fill up, so at most seven bits
/// are ever held back in the accumulator between calls.
///
/// # Example
///
/// ```rust
/// use interpol::{BitReader, BitWriter};
///
/// let mut writer = BitWriter::new();
/// writer.encode(3, 7);
/// let buf = writer.finish();
///
/// let mut reader = BitReader::new(&buf);
/// assert_eq!(reader.decode(7).unwrap(), 3);
/// ```
#[derive(Clone, Debug, Default)]
pub struct BitWriter {
    buf: Vec<u8>,
    acc: u64,
    n_bits: u32,
}

impl BitWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty writer with room for `bytes` bytes of output.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            buf: Vec::with_capacity(bytes),
            ..Self::default()
        }
    }

    /// Continue writing after `seed`, which is kept as a byte-aligned prefix.
    pub fn from_bytes(seed: Vec<u8>) -> Self {
        Self {
            buf: seed,
            ..Self::default()
        }
    }

    /// Total bits in the stream so far, including the seed and any partial byte.
    pub fn bits_written(&self) -> u64 {
        self.buf.len() as u64 * 8 + u64::from(self.n_bits)
    }

    /// Append the low `count` bits of `value`.
    ///
    /// # Panics
    ///
    /// Panics if `count > 32` or if `value` does not fit in `count` bits.
    pub fn write_bits(&mut self, value: u32, count: u32) {
        assert!(count <= 32, "cannot write {count} bits at once");
        assert!(
            u64::from(value) >> count == 0,
            "value {value} does not fit in {count} bits"
        );
        self.acc |= u64::from(value) << self.n_bits;
        self.n_bits += count;
        while self.n_bits >= 8 {
            self.buf.push(self.acc as u8);
            self.acc >>= 8;
            self.n_bits -= 8;
        }
    }

    /// Encode `value` as one of `outof` equally likely values.
    ///
    /// Uses `⌊log2 outof⌋` or `⌈log2 outof⌉` bits; `outof == 1` writes nothing.
    ///
    /// # Panics
    ///
    /// Panics if `value >= outof`.
    pub fn encode(&mut self, value: u32, outof: u32) {
        let (code, width) = Bands::new(outof).code(value);
        self.write_bits(code, width);
    }

    /// Encode the interior of `pos[j..=k]` by binary interpolative splitting.
    ///
    /// The endpoints `pos[j]` and `pos[k]` are not written; the decoder must
    /// learn them some other way.
    ///
    /// # Panics
    ///
    /// Panics if `j > k`, `k` is out of bounds, or `pos[j..=k]` is not
    /// strictly increasing.
    pub fn encode_interpolative(&mut self, pos: &[u32], j: usize, k: usize) {
        assert!(j <= k, "interpolative range [{j}, {k}] is reversed");
        assert!(k < pos.len(), "index {k} out of bounds for {} positions", pos.len());
        check_endpoints(j, k, pos[j], pos[k]);
        self.encode_interior(pos, j, k);
    }

    fn encode_interior(&mut self, pos: &[u32], mut j: usize, k: usize) {
        while let Some(split) = Split::new(j, k, pos[j], pos[k]) {
            let value = pos[split.mid];
            assert!(
                value >= split.lowest && value - split.lowest < split.outof,
                "positions must be strictly increasing: pos[{}] = {value} does not fit between {} and {}",
                split.mid,
                pos[j],
                pos[k]
            );
            self.encode(value - split.lowest, split.outof);
            self.encode_interior(pos, j, split.mid);
            j = split.mid;
        }
    }

    /// Flush any partial byte, zero padded, and return the finished buffer.
    pub fn finish(mut self) -> Vec<u8> {
        if self.n_bits > 0 {
            self.buf.push(self.acc as u8);
        }
        self.buf
    }
}
