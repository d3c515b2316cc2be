//! The packed 32-bit "compact bits" difficulty encoding.
//!
//! The format is: [exponent (1 byte)][mantissa (3 bytes)], representing
//! `mantissa * 256^(exponent - 3)`. It behaves like a low-precision floating
//! point number and is the one binary format this crate owns: the maximum
//! targets in the parameter tables and every per-block difficulty field go
//! through it.

use num_bigint::BigUint;

use crate::error::CompactTargetError;

/// Bit 23 of the packed form; a set high mantissa bit would flag the value
/// as negative, which difficulty targets never are.
const SIGN_BIT: u32 = 0x0080_0000;

/// Expand a compact-bits value to the full target.
///
/// Fails if the mantissa sign bit is set: negative targets do not occur in
/// any valid block or parameter table.
pub fn decode_compact_bits(bits: u32) -> Result<BigUint, CompactTargetError> {
    if bits & SIGN_BIT != 0 {
        return Err(CompactTargetError(bits));
    }
    let exponent = (bits >> 24) as usize;
    let mantissa = BigUint::from(bits & 0x007f_ffff);
    let value = if exponent >= 3 {
        mantissa << (8 * (exponent - 3))
    } else {
        mantissa >> (8 * (3 - exponent))
    };
    Ok(value)
}

/// Pack a target back into compact bits.
///
/// Chooses the minimal exponent that represents `value`, shifting the
/// mantissa down one byte when its high bit would collide with the sign
/// flag. The near-inverse of [`decode_compact_bits`]: precision beyond the
/// three mantissa bytes is truncated, but `encode(decode(b)) == b` holds for
/// every canonical encoding.
pub fn encode_compact_bits(value: &BigUint) -> u32 {
    let mut size = (value.bits() as usize + 7) / 8;
    let mut mantissa: u32 = if size <= 3 {
        low_u32(value) << (8 * (3 - size))
    } else {
        low_u32(&(value >> (8 * (size - 3))))
    };
    if mantissa & SIGN_BIT != 0 {
        mantissa >>= 8;
        size += 1;
    }
    ((size as u32) << 24) | mantissa
}

fn low_u32(value: &BigUint) -> u32 {
    value.iter_u32_digits().next().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_historical_max_target() {
        // 0x1d00ffff is the maximum (difficulty 1) target of the production
        // and test networks: 0xffff * 256^26.
        let target = decode_compact_bits(0x1d00ffff).unwrap();
        let expected = BigUint::from(0xffffu32) << 208;
        assert_eq!(target, expected);
    }

    #[test]
    fn test_decode_small_exponents() {
        // exponent 3: mantissa stands alone
        assert_eq!(decode_compact_bits(0x03123456).unwrap(), BigUint::from(0x123456u32));
        // exponent < 3 shifts the mantissa down
        assert_eq!(decode_compact_bits(0x02123456).unwrap(), BigUint::from(0x1234u32));
        assert_eq!(decode_compact_bits(0x01123456).unwrap(), BigUint::from(0x12u32));
        assert_eq!(decode_compact_bits(0x00123456).unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn test_decode_rejects_sign_bit() {
        assert_eq!(decode_compact_bits(0x1d80ffff), Err(CompactTargetError(0x1d80ffff)));
    }

    #[test]
    fn test_roundtrip_canonical_encodings() {
        let cases = [
            0x1d00ffffu32, // production/testnet maximum
            0x1d0fffff,    // legacy testnet2 maximum
            0x207fffff,    // easiest representable, regtest genesis
            0x1b0404cb,    // mid-difficulty historical value
            0x17034219,    // high-difficulty value
            0x03123456,
            0x02123400,    // low exponents round-trip once truncated bytes are zero
            0x01120000,
        ];
        for bits in cases {
            let value = decode_compact_bits(bits).unwrap();
            assert_eq!(encode_compact_bits(&value), bits, "roundtrip failed for {bits:#010x}");
        }
    }

    #[test]
    fn test_encode_avoids_sign_bit() {
        // 0x80 needs a sign-escape byte: mantissa 0x008000, exponent bumped.
        let bits = encode_compact_bits(&BigUint::from(0x80u32));
        assert_eq!(bits, 0x02008000);
        assert_eq!(decode_compact_bits(bits).unwrap(), BigUint::from(0x80u32));
    }

    #[test]
    fn test_encode_zero() {
        assert_eq!(encode_compact_bits(&BigUint::from(0u32)), 0);
        assert_eq!(decode_compact_bits(0).unwrap(), BigUint::from(0u32));
    }

    #[test]
    fn test_encode_oversized_target() {
        // The regtest maximum target is 33 bytes wide; the codec keeps the
        // top three bytes.
        let value = BigUint::parse_bytes(
            b"7fffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffffff",
            16,
        )
        .unwrap();
        assert_eq!(encode_compact_bits(&value), 0x217fffff);
    }
}
