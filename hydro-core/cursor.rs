//! Position-tracking byte sink.
//!
//! [`ByteCursor`] wraps a destination slice and a write position that
//! advances with every byte pushed through it. The formatting routines in
//! [`num`](crate::num) write through one of these, and
//! [`Text::append_with`](crate::Text::append_with) hands one out over its
//! slack region. Running past the end of the destination is a reported
//! error, never a wild write.

use crate::{
  Error,
  Result,
};

#[derive(Debug)]
pub struct ByteCursor<'a> {
  dst:      &'a mut [u8],
  position: usize,
}

impl<'a> ByteCursor<'a> {
  pub fn new(dst: &'a mut [u8]) -> Self {
    ByteCursor { dst, position: 0 }
  }

  /// Bytes written so far.
  pub fn position(&self) -> usize {
    self.position
  }

  pub fn remaining(&self) -> usize {
    self.dst.len() - self.position
  }

  /// Everything written so far, in order.
  pub fn written(&self) -> &[u8] {
    &self.dst[..self.position]
  }

  pub fn push(&mut self, byte: u8) -> Result<()> {
    if self.position == self.dst.len() {
      return Err(Error::CursorOverflow {
        needed:    1,
        remaining: 0,
      });
    }
    self.dst[self.position] = byte;
    self.position += 1;
    Ok(())
  }

  pub fn push_slice(&mut self, bytes: &[u8]) -> Result<()> {
    let remaining = self.remaining();
    if bytes.len() > remaining {
      return Err(Error::CursorOverflow {
        needed: bytes.len(),
        remaining,
      });
    }
    self.dst[self.position..self.position + bytes.len()].copy_from_slice(bytes);
    self.position += bytes.len();
    Ok(())
  }
}
