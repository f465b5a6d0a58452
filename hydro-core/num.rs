//! Numeric-to-text conversion through a [`ByteCursor`].
//!
//! One function per signedness, width, and base, mirroring the container's
//! byte discipline: digits are produced least-significant-first into a
//! fixed scratch array sized for the width's worst case, then pushed into
//! the cursor as one contiguous run. The cursor ends up positioned just
//! past the last byte written.
//!
//! Floats are fixed-point: integer part, `.`, then exactly 4 (`f32`) or 8
//! (`f64`) fractional digits obtained by repeated multiply-by-ten
//! truncation. No rounding, no exponent forms, no width-dependent digit
//! count.
//!
//! ```
//! use hydro_core::{ByteCursor, num};
//!
//! let mut dst = [0u8; 16];
//! let mut cursor = ByteCursor::new(&mut dst);
//! num::write_i32(&mut cursor, -42).unwrap();
//! num::write_hex_u8(&mut cursor, 0xAB).unwrap();
//! assert_eq!(cursor.written(), b"-42AB");
//! ```

use crate::{
  Error,
  Result,
  cursor::ByteCursor,
};

const DIGITS: &[u8; 16] = b"0123456789ABCDEF";

macro_rules! write_unsigned_decimal {
  ($($name:ident: $ty:ty, $scratch:literal;)*) => {$(
    /// Decimal digits of `value`, cursor advanced past them.
    pub fn $name(cursor: &mut ByteCursor<'_>, value: $ty) -> Result<()> {
      let mut value = value;
      let mut scratch = [0u8; $scratch];
      let mut at = scratch.len();
      loop {
        at -= 1;
        scratch[at] = (value % 10) as u8 + b'0';
        value /= 10;
        if value == 0 {
          break;
        }
      }
      cursor.push_slice(&scratch[at..])
    }
  )*};
}

write_unsigned_decimal! {
  write_u8:  u8,  3;
  write_u16: u16, 5;
  write_u32: u32, 10;
  write_u64: u64, 20;
}

macro_rules! write_signed_decimal {
  ($($name:ident: $ty:ty => $unsigned:ident;)*) => {$(
    /// Decimal digits of `value`, `-` first when negative.
    pub fn $name(cursor: &mut ByteCursor<'_>, value: $ty) -> Result<()> {
      if value < 0 {
        cursor.push(b'-')?;
      }
      $unsigned(cursor, value.unsigned_abs())
    }
  )*};
}

write_signed_decimal! {
  write_i8:  i8  => write_u8;
  write_i16: i16 => write_u16;
  write_i32: i32 => write_u32;
  write_i64: i64 => write_u64;
}

macro_rules! write_unsigned_radix {
  ($($name:ident: $ty:ty, $scratch:literal, $shift:literal, $mask:literal;)*) => {$(
    pub fn $name(cursor: &mut ByteCursor<'_>, value: $ty) -> Result<()> {
      let mut value = value;
      let mut scratch = [0u8; $scratch];
      let mut at = scratch.len();
      loop {
        at -= 1;
        scratch[at] = DIGITS[(value & $mask) as usize];
        value >>= $shift;
        if value == 0 {
          break;
        }
      }
      cursor.push_slice(&scratch[at..])
    }
  )*};
}

write_unsigned_radix! {
  write_octal_u8:  u8,  3,  3, 7;
  write_octal_u16: u16, 6,  3, 7;
  write_octal_u32: u32, 11, 3, 7;
  write_octal_u64: u64, 22, 3, 7;

  write_hex_u8:  u8,  2,  4, 0xF;
  write_hex_u16: u16, 4,  4, 0xF;
  write_hex_u32: u32, 8,  4, 0xF;
  write_hex_u64: u64, 16, 4, 0xF;
}

macro_rules! write_float {
  ($($name:ident: $ty:ty, $int:ty => $unsigned:ident, $frac_digits:literal;)*) => {$(
    /// Fixed-point form of `value` with a constant fractional digit count,
    /// truncated rather than rounded. Non-finite values and values whose
    /// integer part does not fit the matching integer width are rejected
    /// before anything is written.
    pub fn $name(cursor: &mut ByteCursor<'_>, value: $ty) -> Result<()> {
      if !value.is_finite() || value.abs() >= <$int>::MAX as $ty {
        return Err(Error::UnrepresentableFloat);
      }
      let mut value = value;
      if value < 0.0 {
        cursor.push(b'-')?;
        value = -value;
      }
      let int_part = value as $int;
      $unsigned(cursor, int_part)?;
      cursor.push(b'.')?;
      let mut frac = value - int_part as $ty;
      for _ in 0..$frac_digits {
        frac *= 10.0;
        let digit = frac as u8;
        cursor.push(b'0' + digit)?;
        frac -= digit as $ty;
      }
      Ok(())
    }
  )*};
}

write_float! {
  write_f32: f32, u32 => write_u32, 4;
  write_f64: f64, u64 => write_u64, 8;
}

#[cfg(test)]
mod test {
  use super::*;

  fn format(f: impl FnOnce(&mut ByteCursor<'_>) -> Result<()>) -> Vec<u8> {
    let mut dst = [0u8; 64];
    let mut cursor = ByteCursor::new(&mut dst);
    f(&mut cursor).unwrap();
    cursor.written().to_vec()
  }

  #[test]
  fn unsigned_decimal() {
    assert_eq!(format(|c| write_u32(c, 0)), b"0");
    assert_eq!(format(|c| write_u8(c, 255)), b"255");
    assert_eq!(format(|c| write_u16(c, 65535)), b"65535");
    assert_eq!(format(|c| write_u64(c, u64::MAX)), b"18446744073709551615");
  }

  #[test]
  fn signed_decimal() {
    assert_eq!(format(|c| write_i32(c, -1234)), b"-1234");
    assert_eq!(format(|c| write_i32(c, 1234)), b"1234");
    assert_eq!(format(|c| write_i8(c, i8::MIN)), b"-128");
    assert_eq!(format(|c| write_i64(c, i64::MIN)), b"-9223372036854775808");
    assert_eq!(format(|c| write_i16(c, 0)), b"0");
  }

  #[test]
  fn hexadecimal_is_uppercase() {
    assert_eq!(format(|c| write_hex_u8(c, 255)), b"FF");
    assert_eq!(format(|c| write_hex_u8(c, 0)), b"0");
    assert_eq!(format(|c| write_hex_u32(c, 0xDEADBEEF)), b"DEADBEEF");
    assert_eq!(format(|c| write_hex_u64(c, u64::MAX)), b"FFFFFFFFFFFFFFFF");
  }

  #[test]
  fn octal() {
    assert_eq!(format(|c| write_octal_u16(c, 8)), b"10");
    assert_eq!(format(|c| write_octal_u8(c, 0)), b"0");
    assert_eq!(format(|c| write_octal_u64(c, u64::MAX)), b"1777777777777777777777");
  }

  #[test]
  fn float_fixed_digits() {
    assert_eq!(format(|c| write_f32(c, 3.25)), b"3.2500");
    assert_eq!(format(|c| write_f32(c, -0.1)), b"-0.1000");
    assert_eq!(format(|c| write_f32(c, 0.0)), b"0.0000");
    assert_eq!(format(|c| write_f64(c, 2.5)), b"2.50000000");
    assert_eq!(format(|c| write_f64(c, -1.0)), b"-1.00000000");
  }

  #[test]
  fn truncates_instead_of_rounding() {
    // 0.9999 in an f32 is 0.99989998...; four truncated digits keep 9998.
    assert_eq!(format(|c| write_f32(c, 0.9999)), b"0.9998");
  }

  #[test]
  fn huge_and_non_finite_floats_are_rejected() {
    let mut dst = [0u8; 64];
    let mut cursor = ByteCursor::new(&mut dst);
    for value in [1.0e20, -1.0e20, f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
      assert_eq!(write_f32(&mut cursor, value), Err(Error::UnrepresentableFloat));
    }
    assert_eq!(write_f64(&mut cursor, 1.0e300), Err(Error::UnrepresentableFloat));
    assert_eq!(write_f64(&mut cursor, f64::NAN), Err(Error::UnrepresentableFloat));
    // Rejection happens before anything lands in the destination.
    assert_eq!(cursor.position(), 0);

    // The largest in-range magnitudes still format.
    assert_eq!(format(|c| write_f32(c, 4.0e9)), b"4000000000.0000");
    assert_eq!(format(|c| write_f32(c, -4.0e9)), b"-4000000000.0000");
  }

  #[test]
  fn cursor_lands_past_last_byte() {
    let mut dst = [0u8; 8];
    let mut cursor = ByteCursor::new(&mut dst);
    write_u16(&mut cursor, 42).unwrap();
    assert_eq!(cursor.position(), 2);
    write_u16(&mut cursor, 7).unwrap();
    assert_eq!(cursor.position(), 3);
    assert_eq!(cursor.written(), b"427");
  }

  #[test]
  fn overflow_propagates() {
    let mut dst = [0u8; 3];
    let mut cursor = ByteCursor::new(&mut dst);
    assert!(write_u32(&mut cursor, 123456).is_err());
  }
}
