//! An arbitrary-precision integer for operand values.
//!
//! Operand literals are not limited to 64 bits: the block operand of
//! `DW_OP_implicit_value` can be as wide as its length operand says.
//! So literals are parsed into a [`WideInt`], which can report how
//! many bits it needs, and be converted into a [`BitPattern`] of any
//! width (zero- or sign-extending as required) from which the
//! encoders pull bytes or 7-bit groups.

use std::fmt::{self, Debug, Display, Formatter, LowerHex};

use super::error::StringConversionFailed;


#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Radix {
    Decimal,
    Hexadecimal,
}

impl Radix {
    const fn base(self) -> u32 {
        match self {
            Radix::Decimal => 10,
            Radix::Hexadecimal => 16,
        }
    }
}

/// A signed integer of unlimited size, held as a sign and a
/// magnitude.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct WideInt {
    negative: bool,
    /// Least-significant byte first, with no high zero bytes (so zero
    /// is the empty vector).  Zero is never negative.
    magnitude: Vec<u8>,
}

/// Multiply `magnitude` by `mul` and add `add`, in place.
fn mul_add_small(magnitude: &mut Vec<u8>, mul: u32, add: u32) {
    let mut carry: u32 = add;
    for byte in magnitude.iter_mut() {
        let v = u32::from(*byte) * mul + carry;
        *byte = (v & 0xff) as u8;
        carry = v >> 8;
    }
    while carry != 0 {
        magnitude.push((carry & 0xff) as u8);
        carry >>= 8;
    }
}

/// Divide `magnitude` by `divisor` in place, returning the remainder.
fn div_rem_small(magnitude: &mut Vec<u8>, divisor: u32) -> u32 {
    let mut rem: u32 = 0;
    for byte in magnitude.iter_mut().rev() {
        let v = (rem << 8) | u32::from(*byte);
        *byte = (v / divisor) as u8;
        rem = v % divisor;
    }
    trim(magnitude);
    rem
}

fn trim(magnitude: &mut Vec<u8>) {
    while magnitude.last() == Some(&0) {
        magnitude.pop();
    }
}

fn bit_length(magnitude: &[u8]) -> usize {
    match magnitude.last() {
        None => 0,
        Some(top) => (magnitude.len() - 1) * 8 + (8 - top.leading_zeros() as usize),
    }
}

/// Replace `bytes` with its two's complement negation (modulo
/// 2^(8 × bytes.len())).
fn negate_in_place(bytes: &mut [u8]) {
    let mut carry = true;
    for byte in bytes.iter_mut() {
        let (sum, overflow) = (!*byte).overflowing_add(u8::from(carry));
        *byte = sum;
        carry = overflow;
    }
}

impl WideInt {
    #[must_use]
    pub fn zero() -> WideInt {
        WideInt::default()
    }

    fn from_parts(negative: bool, mut magnitude: Vec<u8>) -> WideInt {
        trim(&mut magnitude);
        WideInt {
            negative: negative && !magnitude.is_empty(),
            magnitude,
        }
    }

    /// Parse the text of a literal.  A decimal literal may have a
    /// leading minus sign.  A hexadecimal literal may have a leading
    /// `0x` (or `0X`) and may not be negative.
    ///
    /// # Errors
    ///
    /// Fails if there are no digits, if a character is not a digit in
    /// the given radix, or for a negative hexadecimal literal.
    pub fn parse(text: &str, radix: Radix) -> Result<WideInt, StringConversionFailed> {
        let (negative, unsigned_text) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };
        let digits = match radix {
            Radix::Hexadecimal if negative => {
                return Err(StringConversionFailed::NegativeHex);
            }
            Radix::Hexadecimal => unsigned_text
                .strip_prefix("0x")
                .or_else(|| unsigned_text.strip_prefix("0X"))
                .unwrap_or(unsigned_text),
            Radix::Decimal => unsigned_text,
        };
        if digits.is_empty() {
            return Err(StringConversionFailed::Empty);
        }
        let mut magnitude: Vec<u8> = Vec::with_capacity(digits.len() / 2 + 1);
        for ch in digits.chars() {
            match ch.to_digit(radix.base()) {
                Some(d) => mul_add_small(&mut magnitude, radix.base(), d),
                None => {
                    return Err(StringConversionFailed::NotADigit(ch));
                }
            }
        }
        Ok(WideInt::from_parts(negative, magnitude))
    }

    /// Build a value from its little-endian representation.  When
    /// `signed` is true the bytes are read as a two's complement
    /// number.
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8], signed: bool) -> WideInt {
        let mut magnitude = bytes.to_vec();
        let negative = signed && bytes.last().is_some_and(|top| top & 0x80 != 0);
        if negative {
            negate_in_place(&mut magnitude);
        }
        WideInt::from_parts(negative, magnitude)
    }

    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.magnitude.is_empty()
    }

    /// The number of bits in the magnitude (0 for zero).
    #[must_use]
    pub fn active_bits(&self) -> usize {
        bit_length(&self.magnitude)
    }

    /// The width of the narrowest two's complement representation,
    /// including the sign bit.
    #[must_use]
    pub fn signed_bits(&self) -> usize {
        if self.negative {
            // -2^k fits in k+1 bits, so we measure |v|-1.
            let mut less_one = self.magnitude.clone();
            for byte in &mut less_one {
                let (diff, borrow) = byte.overflowing_sub(1);
                *byte = diff;
                if !borrow {
                    break;
                }
            }
            bit_length(&less_one) + 1
        } else {
            self.active_bits() + 1
        }
    }

    /// The number of bits an operand literal needs.  Non-negative
    /// values are unsigned magnitudes, so they need no sign bit; a
    /// negative value needs its magnitude plus one sign bit.
    #[must_use]
    pub fn literal_bits(&self) -> usize {
        if self.negative {
            self.active_bits() + 1
        } else {
            self.active_bits()
        }
    }

    /// Zero- or sign-extend (or truncate) to exactly `width` bits.
    #[must_use]
    pub fn to_bits(&self, width: usize) -> BitPattern {
        let len = width.div_ceil(8);
        let mut bytes: Vec<u8> = vec![0; len];
        let n = len.min(self.magnitude.len());
        bytes[..n].copy_from_slice(&self.magnitude[..n]);
        if self.negative {
            negate_in_place(&mut bytes);
        }
        let spare = len * 8 - width;
        if let Some(top) = bytes.last_mut() {
            *top &= 0xff_u8 >> spare;
        }
        BitPattern { width, bytes }
    }

    /// Returns the value if it is non-negative and fits in a `u64`.
    #[must_use]
    pub fn to_u64(&self) -> Option<u64> {
        if self.negative || self.magnitude.len() > 8 {
            return None;
        }
        let mut buf = [0_u8; 8];
        buf[..self.magnitude.len()].copy_from_slice(&self.magnitude);
        Some(u64::from_le_bytes(buf))
    }

    fn decimal_digits(&self) -> String {
        if self.magnitude.is_empty() {
            return "0".to_string();
        }
        let mut work = self.magnitude.clone();
        let mut digits: Vec<u8> = Vec::new();
        while !work.is_empty() {
            let d = div_rem_small(&mut work, 10);
            digits.push(b'0' + d as u8);
        }
        digits.iter().rev().map(|&d| char::from(d)).collect()
    }

    fn hex_digits(&self) -> String {
        match self.magnitude.split_last() {
            None => "0".to_string(),
            Some((top, rest)) => {
                let mut s = format!("{top:x}");
                for byte in rest.iter().rev() {
                    s.push_str(&format!("{byte:02x}"));
                }
                s
            }
        }
    }
}

impl From<u64> for WideInt {
    fn from(n: u64) -> WideInt {
        WideInt::from_parts(false, n.to_le_bytes().to_vec())
    }
}

impl From<i64> for WideInt {
    fn from(n: i64) -> WideInt {
        WideInt::from_parts(n < 0, n.unsigned_abs().to_le_bytes().to_vec())
    }
}

impl From<u8> for WideInt {
    fn from(n: u8) -> WideInt {
        WideInt::from(u64::from(n))
    }
}

impl Display for WideInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "", &self.decimal_digits())
    }
}

impl LowerHex for WideInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.negative, "0x", &self.hex_digits())
    }
}

impl Debug for WideInt {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "WideInt({self})")
    }
}

/// A fixed number of bits, least-significant first.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitPattern {
    width: usize,
    /// Bits above `width` in the last byte are always zero.
    bytes: Vec<u8>,
}

impl BitPattern {
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Extract `count` bits (at most 8) starting at bit `offset`.
    /// Bits beyond the width of the pattern read as zero.
    #[must_use]
    pub fn extract(&self, offset: usize, count: u32) -> u8 {
        assert!(count <= 8, "cannot extract {count} bits into a byte");
        let index = offset / 8;
        let shift = offset % 8;
        let lo = u16::from(self.bytes.get(index).copied().unwrap_or(0));
        let hi = u16::from(self.bytes.get(index + 1).copied().unwrap_or(0));
        let mask: u16 = (1_u16 << count) - 1;
        (((hi << 8 | lo) >> shift) & mask) as u8
    }

    #[must_use]
    pub fn as_le_bytes(&self) -> &[u8] {
        &self.bytes
    }

    #[must_use]
    pub fn into_le_bytes(self) -> Vec<u8> {
        self.bytes
    }
}
