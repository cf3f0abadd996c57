//! Bit-unpacking reader.

use tracing::debug;

use crate::bits::Bands;
use crate::error::CompressionError;
use crate::interpolative::{check_endpoints, InterpolativeDecoder, Split};

/// Reads codes written by [`BitWriter`](crate::BitWriter) from a borrowed buffer.
///
/// Bytes are pulled into the accumulator only when a read needs them, so
/// [`position`](Self::position) can lag behind the bits actually consumed by
/// up to one partial byte.
#[derive(Clone, Debug)]
pub struct BitReader<'a> {
    buf: &'a [u8],
    idx: usize,
    acc: u64,
    n_bits: u32,
}

impl<'a> BitReader<'a> {
    /// Create a reader over `buf`, starting at its first byte.
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            idx: 0,
            acc: 0,
            n_bits: 0,
        }
    }

    /// Create a reader over `buf`, starting at byte `offset`.
    pub fn with_offset(buf: &'a [u8], offset: usize) -> Result<Self, CompressionError> {
        if offset > buf.len() {
            return Err(CompressionError::InvalidInput(format!(
                "start offset {} exceeds buffer length {}",
                offset,
                buf.len()
            )));
        }
        Ok(Self {
            idx: offset,
            ..Self::new(buf)
        })
    }

    /// Offset of the next byte not yet pulled from the buffer.
    pub fn position(&self) -> usize {
        self.idx
    }

    /// Bits consumed so far, counted from the start of the buffer.
    pub fn bits_consumed(&self) -> u64 {
        self.idx as u64 * 8 - u64::from(self.n_bits)
    }

    /// Read `count` raw bits.
    ///
    /// # Panics
    ///
    /// Panics if `count > 32`.
    pub fn read_bits(&mut self, count: u32) -> Result<u32, CompressionError> {
        assert!(count <= 32, "cannot read {count} bits at once");
        while self.n_bits < count {
            let Some(&byte) = self.buf.get(self.idx) else {
                debug!(offset = self.idx, count, "bitstream truncated");
                return Err(CompressionError::UnexpectedEof { offset: self.idx });
            };
            self.acc |= u64::from(byte) << self.n_bits;
            self.idx += 1;
            self.n_bits += 8;
        }
        let result = (self.acc & ((1u64 << count) - 1)) as u32;
        self.acc >>= count;
        self.n_bits -= count;
        Ok(result)
    }

    /// Decode a value written by [`BitWriter::encode`](crate::BitWriter::encode)
    /// with the same `outof`.
    ///
    /// # Panics
    ///
    /// Panics if `outof == 0`.
    pub fn decode(&mut self, outof: u32) -> Result<u32, CompressionError> {
        let bands = Bands::new(outof);
        let value = if bands.spare == 0 {
            self.read_bits(bands.bits)?
        } else {
            let short = self.read_bits(bands.bits - 1)?;
            if short < bands.mid_start && self.read_bits(1)? == 1 {
                short + bands.mid_start + bands.spare
            } else {
                short
            }
        };
        if value >= outof {
            debug!(value, outof, "decoded value out of range");
            return Err(CompressionError::ValueOutOfRange { value, outof });
        }
        Ok(value)
    }

    /// Decode the interior of `pos[j..=k]`, written by
    /// [`BitWriter::encode_interpolative`](crate::BitWriter::encode_interpolative).
    ///
    /// `pos[j]` and `pos[k]` must already hold the endpoint values.
    ///
    /// # Panics
    ///
    /// Panics if `j > k`, `k` is out of bounds, or the endpoints are too
    /// close together for `k - j - 1` strictly increasing values.
    pub fn decode_interpolative(
        &mut self,
        pos: &mut [u32],
        j: usize,
        k: usize,
    ) -> Result<(), CompressionError> {
        assert!(j <= k, "interpolative range [{j}, {k}] is reversed");
        assert!(k < pos.len(), "index {k} out of bounds for {} positions", pos.len());
        check_endpoints(j, k, pos[j], pos[k]);
        self.decode_interior(pos, j, k)
    }

    fn decode_interior(
        &mut self,
        pos: &mut [u32],
        mut j: usize,
        k: usize,
    ) -> Result<(), CompressionError> {
        while let Some(split) = Split::new(j, k, pos[j], pos[k]) {
            pos[split.mid] = self.decode(split.outof)? + split.lowest;
            self.decode_interior(pos, j, split.mid)?;
            j = split.mid;
        }
        Ok(())
    }

    /// Switch to element-at-a-time decoding of an interpolative run whose
    /// endpoints `pos_j` at index `j` and `pos_k` at index `k` are known.
    ///
    /// The reader is moved into the returned cursor; get it back with
    /// [`InterpolativeDecoder::into_reader`].
    ///
    /// # Panics
    ///
    /// Panics if `j > k` or the endpoints are too close together for
    /// `k - j - 1` strictly increasing values.
    pub fn decode_interpolative_iter(
        self,
        j: usize,
        k: usize,
        pos_j: u32,
        pos_k: u32,
    ) -> InterpolativeDecoder<'a> {
        InterpolativeDecoder::new(self, j, k, pos_j, pos_k)
    }

    /// Check that every byte has been consumed and the final padding is zero.
    pub fn ensure_consumed(&self) -> Result<(), CompressionError> {
        let bytes = self.buf.len() - self.idx;
        if bytes == 0 && self.acc == 0 {
            return Ok(());
        }
        Err(CompressionError::TrailingData {
            bytes,
            bits: self.n_bits,
        })
    }
}
