//! Fixed-width and LEB128 encodings of operand values.
//!
//! LEB128 ("little-endian base 128") stores a value in 7-bit groups,
//! least-significant group first.  Every byte except the last has
//! its top bit set.  The signed form sign-extends the value to a
//! multiple of 7 bits; the unsigned form zero-extends it.

use super::error::DecodeFailed;
use super::target::ByteOrder;
use super::wideint::WideInt;


const GROUP_BITS: usize = 7;
const CONTINUATION: u8 = 0x80;

/// The number of bytes in the LEB128 encoding of a value needing
/// `bits` bits.  Even zero takes one byte.
#[must_use]
pub fn leb128_len(bits: usize) -> usize {
    bits.max(1).div_ceil(GROUP_BITS)
}

fn emit_groups(value: &WideInt, groups: usize, out: &mut Vec<u8>) {
    let pattern = value.to_bits(groups * GROUP_BITS);
    out.reserve(groups);
    for g in 0..groups {
        let mut byte = pattern.extract(g * GROUP_BITS, GROUP_BITS as u32);
        if g + 1 < groups {
            byte |= CONTINUATION;
        }
        out.push(byte);
    }
}

/// Append the unsigned LEB128 encoding of `value`, which must not be
/// negative.
pub fn encode_uleb128(value: &WideInt, out: &mut Vec<u8>) {
    debug_assert!(!value.is_negative());
    emit_groups(value, leb128_len(value.active_bits()), out);
}

/// Append the signed LEB128 encoding of `value`.
pub fn encode_sleb128(value: &WideInt, out: &mut Vec<u8>) {
    emit_groups(value, leb128_len(value.signed_bits()), out);
}

/// Append exactly `width / 8` bytes holding `value` (zero- or
/// sign-extended, or truncated) in the given byte order.  `width`
/// must be a multiple of 8.
pub fn encode_fixed(value: &WideInt, width: usize, order: ByteOrder, out: &mut Vec<u8>) {
    debug_assert_eq!(width % 8, 0);
    let mut bytes = value.to_bits(width).into_le_bytes();
    if order == ByteOrder::Big {
        bytes.reverse();
    }
    out.extend_from_slice(&bytes);
}

/// Decode `len` bytes from the start of `input`.  Returns the value
/// and the number of bytes consumed.
///
/// # Errors
///
/// Fails with [`DecodeFailed::Truncated`] when fewer than `len` bytes
/// are available.
pub fn decode_fixed(
    input: &[u8],
    len: usize,
    signed: bool,
    order: ByteOrder,
) -> Result<(WideInt, usize), DecodeFailed> {
    let Some(raw) = input.get(..len) else {
        return Err(DecodeFailed::Truncated {
            needed: len,
            available: input.len(),
        });
    };
    let value = match order {
        ByteOrder::Little => WideInt::from_le_bytes(raw, signed),
        ByteOrder::Big => {
            let le: Vec<u8> = raw.iter().rev().copied().collect();
            WideInt::from_le_bytes(&le, signed)
        }
    };
    Ok((value, len))
}

/// Gather the 7-bit groups of a LEB128 value into little-endian
/// bytes.  Returns the bytes, the number of value bits, and the
/// number of input bytes consumed.
fn gather_groups(input: &[u8]) -> Result<(Vec<u8>, usize, usize), DecodeFailed> {
    let mut bytes: Vec<u8> = Vec::new();
    for (i, &byte) in input.iter().enumerate() {
        let group = u16::from(byte & !CONTINUATION);
        let offset = i * GROUP_BITS;
        let (index, shift) = (offset / 8, offset % 8);
        bytes.resize((offset + GROUP_BITS).div_ceil(8), 0);
        let spread = group << shift;
        bytes[index] |= (spread & 0xff) as u8;
        if spread > 0xff {
            bytes[index + 1] |= (spread >> 8) as u8;
        }
        if byte & CONTINUATION == 0 {
            return Ok((bytes, offset + GROUP_BITS, i + 1));
        }
    }
    Err(DecodeFailed::UnterminatedLeb128 {
        available: input.len(),
    })
}

/// Decode an unsigned LEB128 value from the start of `input`.
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// Fails if `input` ends before the last byte of the value.
pub fn decode_uleb128(input: &[u8]) -> Result<(WideInt, usize), DecodeFailed> {
    let (bytes, _, consumed) = gather_groups(input)?;
    Ok((WideInt::from_le_bytes(&bytes, false), consumed))
}

/// Decode a signed LEB128 value from the start of `input`.
/// Returns the value and the number of bytes consumed.
///
/// # Errors
///
/// Fails if `input` ends before the last byte of the value.
pub fn decode_sleb128(input: &[u8]) -> Result<(WideInt, usize), DecodeFailed> {
    let (mut bytes, bits, consumed) = gather_groups(input)?;
    let sign_bit = bits - 1;
    let used = bits % 8;
    if used != 0 && bytes[sign_bit / 8] & (1 << (sign_bit % 8)) != 0 {
        // Sign-extend into the unused top bits of the last byte.
        if let Some(top) = bytes.last_mut() {
            *top |= 0xff_u8 << used;
        }
    }
    let value = WideInt::from_le_bytes(&bytes, true);
    Ok((value, consumed))
}
