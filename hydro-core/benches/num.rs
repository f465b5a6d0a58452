//! Benchmarks for numeric-to-text conversion.
//!
//! Run with: `cargo bench -p hydro-core --bench num`

use divan::{
  Bencher,
  black_box,
};
use hydro_core::{
  ByteCursor,
  num,
};

fn main() {
  divan::main();
}

#[divan::bench]
fn decimal_u64(bencher: Bencher) {
  bencher.bench(|| {
    let mut dst = [0u8; 20];
    let mut cursor = ByteCursor::new(&mut dst);
    num::write_u64(&mut cursor, black_box(18446744073709551615)).unwrap();
    cursor.position()
  });
}

#[divan::bench]
fn decimal_i32(bencher: Bencher) {
  bencher.bench(|| {
    let mut dst = [0u8; 11];
    let mut cursor = ByteCursor::new(&mut dst);
    num::write_i32(&mut cursor, black_box(-123456789)).unwrap();
    cursor.position()
  });
}

#[divan::bench]
fn hex_u64(bencher: Bencher) {
  bencher.bench(|| {
    let mut dst = [0u8; 16];
    let mut cursor = ByteCursor::new(&mut dst);
    num::write_hex_u64(&mut cursor, black_box(0xDEAD_BEEF_CAFE_F00D)).unwrap();
    cursor.position()
  });
}

#[divan::bench]
fn fixed_point_f64(bencher: Bencher) {
  bencher.bench(|| {
    let mut dst = [0u8; 32];
    let mut cursor = ByteCursor::new(&mut dst);
    num::write_f64(&mut cursor, black_box(-31415.9265358979)).unwrap();
    cursor.position()
  });
}
