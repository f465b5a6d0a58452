//! Byte-oriented text buffer.
//!
//! [`Text`] is a [`List`] with one-byte elements plus the terminator
//! convention: the logical string must be ended with a 0 byte at index
//! `len()` before it is read as a C-style string, and mutations do not do
//! that for you. The `capacity > count` invariant of the container is what
//! guarantees the terminator slot always exists.
//!
//! ```
//! use hydro_core::Text;
//!
//! let mut text = Text::from_bytes(b"hello").unwrap();
//! text.push_bytes(b" world").unwrap();
//! assert_eq!(text.as_terminated(), b"hello world\0");
//! ```
//!
//! No encoding is assumed anywhere; everything is bytes.

use crate::{
  ByteCursor,
  Error,
  Result,
  list::List,
};

pub const TERMINATOR: u8 = 0;
pub const NEWLINE: u8 = b'\n';

#[derive(Debug)]
pub struct Text {
  list: List,
}

impl Text {
  pub fn new() -> Result<Self> {
    Self::with_capacity(1)
  }

  pub fn with_capacity(capacity: usize) -> Result<Self> {
    Ok(Text {
      list: List::with_capacity(1, capacity)?,
    })
  }

  /// Text pre-populated with a copy of `bytes` (terminator slot reserved on
  /// top of them).
  pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
    Ok(Text {
      list: List::from_bytes(1, bytes)?,
    })
  }

  /// Content length up to the first 0 byte, or the whole run when none is
  /// present. The default length for splices from terminated buffers.
  pub fn measure(bytes: &[u8]) -> usize {
    bytes.iter().position(|&b| b == TERMINATOR).unwrap_or(bytes.len())
  }

  pub fn len(&self) -> usize {
    self.list.len()
  }

  pub fn is_empty(&self) -> bool {
    self.list.is_empty()
  }

  pub fn capacity(&self) -> usize {
    self.list.capacity()
  }

  /// The live content. Does not include any terminator.
  pub fn as_bytes(&self) -> &[u8] {
    self.list.as_bytes()
  }

  pub fn positions(&self) -> std::ops::Range<usize> {
    self.list.positions()
  }

  pub fn positions_rev(&self) -> std::iter::Rev<std::ops::Range<usize>> {
    self.list.positions_rev()
  }

  pub fn get(&self, position: usize) -> Result<u8> {
    self.list.get(position)
  }

  pub fn set(&mut self, position: usize, byte: u8) -> Result<()> {
    self.list.set(position, byte)
  }

  pub fn push(&mut self, byte: u8) -> Result<()> {
    self.list.push(byte)
  }

  pub fn push_newline(&mut self) -> Result<()> {
    self.push(NEWLINE)
  }

  pub fn insert(&mut self, position: usize, byte: u8) -> Result<()> {
    self.list.insert(position, byte)
  }

  pub fn push_bytes(&mut self, bytes: &[u8]) -> Result<()> {
    self.list.push_slice(bytes)
  }

  pub fn insert_bytes(&mut self, position: usize, bytes: &[u8]) -> Result<()> {
    self.list.insert_slice(position, bytes)
  }

  /// Splice: removes `replace_count` bytes at `position` and puts `bytes`
  /// there instead.
  pub fn replace_bytes(&mut self, position: usize, replace_count: usize, bytes: &[u8]) -> Result<()> {
    self.list.splice(position, replace_count, bytes)
  }

  pub fn push_text(&mut self, other: &Text) -> Result<()> {
    self.list.push_list(&other.list)
  }

  pub fn push_text_part(&mut self, other: &Text, position: usize, count: usize) -> Result<()> {
    self.list.push_list_part(&other.list, position, count)
  }

  pub fn insert_text(&mut self, position: usize, other: &Text) -> Result<()> {
    self.list.insert_list(position, &other.list)
  }

  pub fn insert_text_part(
    &mut self,
    position: usize,
    other: &Text,
    other_position: usize,
    count: usize,
  ) -> Result<()> {
    self.list.insert_list_part(position, &other.list, other_position, count)
  }

  pub fn replace_text(&mut self, position: usize, replace_count: usize, other: &Text) -> Result<()> {
    self.list.splice_list(position, replace_count, &other.list)
  }

  pub fn replace_text_part(
    &mut self,
    position: usize,
    replace_count: usize,
    other: &Text,
    other_position: usize,
    count: usize,
  ) -> Result<()> {
    self
      .list
      .splice_list_part(position, replace_count, &other.list, other_position, count)
  }

  pub fn delete(&mut self, position: usize, delete_count: usize) -> Result<()> {
    self.list.delete(position, delete_count)
  }

  pub fn clear(&mut self) {
    self.list.clear()
  }

  pub fn shrink(&mut self) -> Result<()> {
    self.list.shrink()
  }

  /// Reads the byte at `position`, then deletes it.
  pub fn remove(&mut self, position: usize) -> Result<u8> {
    self.list.remove(position)
  }

  pub fn remove_first(&mut self) -> Result<u8> {
    self.list.remove_first()
  }

  pub fn remove_last(&mut self) -> Result<u8> {
    self.list.remove_last()
  }

  /// Writes the 0 sentinel at index `len()`. Must be called after the last
  /// mutation before the buffer is read as a C-style string; mutations do
  /// not re-terminate.
  pub fn end(&mut self) {
    let at = self.list.len();
    self.list.full_mut()[at] = TERMINATOR;
  }

  /// Terminates and returns content plus the sentinel.
  pub fn as_terminated(&mut self) -> &[u8] {
    self.end();
    let end = self.list.len() + 1;
    &self.list.full()[..end]
  }

  /// Reserves `max_len` bytes of slack past the current content, hands them
  /// to `f` as a [`ByteCursor`], and advances the length by what was
  /// written. Returns the number of bytes appended. On error the buffer's
  /// content and length are unchanged.
  pub fn append_with<F>(&mut self, max_len: usize, f: F) -> Result<usize>
  where
    F: FnOnce(&mut ByteCursor<'_>) -> Result<()>,
  {
    let old_count = self.list.len();
    let needed = old_count.checked_add(max_len).ok_or(Error::CapacityOverflow)?;
    self.list.reserve(needed)?;

    let slack = &mut self.list.full_mut()[old_count..needed];
    let mut cursor = ByteCursor::new(slack);
    match f(&mut cursor) {
      Ok(()) => {
        let written = cursor.position();
        self.list.set_count(old_count + written)?;
        Ok(written)
      },
      Err(err) => {
        // Re-zero whatever the failed writer left in the slack region.
        let dirty = cursor.position();
        self.list.full_mut()[old_count..old_count + dirty].fill(0);
        Err(err)
      },
    }
  }
}

#[cfg(test)]
mod test {
  use super::*;
  use crate::num;

  #[test]
  fn terminator_is_explicit() {
    let mut text = Text::from_bytes(b"abc").unwrap();
    text.end();
    assert_eq!(text.as_bytes(), b"abc");

    text.push(b'd').unwrap();
    text.end();
    assert_eq!(text.as_terminated(), b"abcd\0");
  }

  #[test]
  fn measure_stops_at_nul() {
    assert_eq!(Text::measure(b"abc\0def"), 3);
    assert_eq!(Text::measure(b"abc"), 3);
    assert_eq!(Text::measure(b"\0"), 0);
    assert_eq!(Text::measure(b""), 0);
  }

  #[test]
  fn splice_wrappers() {
    let mut text = Text::from_bytes(b"one three").unwrap();
    text.insert_bytes(4, b"two ").unwrap();
    assert_eq!(text.as_bytes(), b"one two three");

    text.replace_bytes(4, 3, b"2").unwrap();
    assert_eq!(text.as_bytes(), b"one 2 three");

    text.delete(4, 2).unwrap();
    assert_eq!(text.as_bytes(), b"one three");
  }

  #[test]
  fn text_to_text() {
    let mut text = Text::from_bytes(b"()").unwrap();
    let inner = Text::from_bytes(b"body").unwrap();

    text.insert_text(1, &inner).unwrap();
    assert_eq!(text.as_bytes(), b"(body)");

    text.replace_text_part(1, 4, &inner, 0, 2).unwrap();
    assert_eq!(text.as_bytes(), b"(bo)");

    text.push_text_part(&inner, 2, 2).unwrap();
    assert_eq!(text.as_bytes(), b"(bo)dy");
  }

  #[test]
  fn remove_ends() {
    let mut text = Text::from_bytes(b"xabcy").unwrap();
    assert_eq!(text.remove_first().unwrap(), b'x');
    assert_eq!(text.remove_last().unwrap(), b'y');
    assert_eq!(text.as_bytes(), b"abc");
  }

  #[test]
  fn append_with_formats_in_place() {
    let mut text = Text::from_bytes(b"value=").unwrap();
    let written = text
      .append_with(24, |cursor| num::write_i32(cursor, -1234))
      .unwrap();
    assert_eq!(written, 5);
    assert_eq!(text.as_bytes(), b"value=-1234");
    assert_eq!(text.as_terminated(), b"value=-1234\0");
  }

  #[test]
  fn append_with_failure_leaves_no_trace() {
    let mut text = Text::from_bytes(b"ok").unwrap();
    let err = text
      .append_with(2, |cursor| cursor.push_slice(b"too long"))
      .unwrap_err();
    assert!(matches!(err, Error::CursorOverflow { .. }));
    assert_eq!(text.as_bytes(), b"ok");
    assert_eq!(text.as_terminated(), b"ok\0");
  }

  #[test]
  fn newline() {
    let mut text = Text::new().unwrap();
    text.push_bytes(b"line").unwrap();
    text.push_newline().unwrap();
    assert_eq!(text.as_bytes(), b"line\n");
  }
}
