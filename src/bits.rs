//! Truncated binary code layout.
//!
//! A value uniformly distributed over `[0, outof)` needs `bits_needed(outof - 1)`
//! bits in plain binary. When `outof` is not a power of two, `spare` of those
//! codepoints are wasted, so `spare` values can be sent one bit shorter. The
//! short codes go to the values in the middle of the range, which is where
//! interpolative coding expects interior values to cluster:
//!
//! ```text
//! value:   0 .. mid_start | mid_start .. mid_start+spare | .. outof
//! width:   bits           | bits - 1                     | bits
//! ```
//!
//! High-band values are re-based to zero and carry the top bit (`bits - 1`) as
//! a marker. Low-band values never have that bit set, so after reading the
//! first `bits - 1` bits a decoder knows whether a discriminator bit follows.

/// Number of bits needed to represent `n` (0 for `n == 0`).
#[inline]
pub fn bits_needed(n: u32) -> u32 {
    u32::BITS - n.leading_zeros()
}

/// Length in bits of the code for `value` in a range of `outof` values.
///
/// # Panics
///
/// Panics if `value >= outof`.
pub fn code_len(value: u32, outof: u32) -> u32 {
    Bands::new(outof).code(value).1
}

/// Band boundaries of the truncated binary code for one `outof`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Bands {
    pub(crate) bits: u32,
    pub(crate) spare: u32,
    pub(crate) mid_start: u32,
}

impl Bands {
    /// # Panics
    ///
    /// Panics if `outof == 0`.
    #[inline]
    pub(crate) fn new(outof: u32) -> Self {
        assert!(outof >= 1, "outof must be at least 1");
        let bits = bits_needed(outof - 1);
        let spare = ((1u64 << bits) - u64::from(outof)) as u32;
        Self {
            bits,
            spare,
            mid_start: (outof - spare) / 2,
        }
    }

    /// Returns `(code, width)`, the raw bits to emit for `value`.
    #[inline]
    pub(crate) fn code(&self, value: u32) -> (u32, u32) {
        let outof = self.outof();
        assert!(value < outof, "value {value} out of range [0, {outof})");
        if self.spare == 0 {
            return (value, self.bits);
        }
        let high_start = self.mid_start + self.spare;
        if value >= high_start {
            ((value - high_start) | (1 << (self.bits - 1)), self.bits)
        } else if value >= self.mid_start {
            (value, self.bits - 1)
        } else {
            (value, self.bits)
        }
    }

    #[inline]
    fn outof(&self) -> u32 {
        ((1u64 << self.bits) - u64::from(self.spare)) as u32
    }
}
