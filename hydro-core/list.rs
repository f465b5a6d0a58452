//! Growable, element-width-tagged container.
//!
//! A [`List`] owns a byte buffer and treats it as `count` live elements of
//! `element_size` bytes each, with `capacity` allocated slots. The element
//! type is not part of the container: callers read and write elements
//! through the typed accessors ([`List::get`], [`List::push`], ...) which
//! check that the supplied type matches the recorded width, or splice raw
//! byte runs with the `_slice` family.
//!
//! # Invariants
//!
//! - `capacity > count` at all times; the slack slot is what lets
//!   [`Text`](crate::Text) place its terminator without reallocating.
//! - Bytes in `[count * element_size, capacity * element_size)` are zero
//!   immediately after any reallocation, deletion, or shrinking splice.
//! - Element order is preserved exactly, except for the shifts that
//!   insert/delete/splice perform by contract.
//!
//! # Errors
//!
//! Every position and length argument is validated; violations come back as
//! [`Error::OutOfBounds`] rather than touching memory. An allocation failure
//! surfaces as [`Error::AllocFailed`] and leaves the container as it was.
//!
//! ```
//! use hydro_core::List;
//!
//! let mut list = List::new(4).unwrap();
//! list.push(7i32).unwrap();
//! list.push(9i32).unwrap();
//! list.insert(1, 8i32).unwrap();
//! assert_eq!(list.get::<i32>(1).unwrap(), 8);
//! assert_eq!(list.len(), 3);
//! ```

use std::{
  iter::Rev,
  ops::Range,
  ptr,
};

use bytemuck::{
  AnyBitPattern,
  NoUninit,
};

use crate::{
  Error,
  Result,
  raw::RawBuf,
};

#[derive(Debug)]
pub struct List {
  element_size: usize,
  count:        usize,
  capacity:     usize,
  buf:          RawBuf,
}

impl List {
  /// Empty list with one slot of slack.
  pub fn new(element_size: usize) -> Result<Self> {
    Self::with_capacity(element_size, 1)
  }

  /// Empty list with at least `capacity` slots allocated up front.
  pub fn with_capacity(element_size: usize, capacity: usize) -> Result<Self> {
    if element_size == 0 {
      return Err(Error::ZeroElementSize);
    }
    let capacity = capacity.max(1);
    let bytes = element_size
      .checked_mul(capacity)
      .ok_or(Error::CapacityOverflow)?;
    Ok(List {
      element_size,
      count: 0,
      capacity,
      buf: RawBuf::new(bytes)?,
    })
  }

  /// List pre-populated from a byte run. `bytes.len()` must be a whole
  /// number of elements; one extra slot of slack is allocated.
  pub fn from_bytes(element_size: usize, bytes: &[u8]) -> Result<Self> {
    if element_size == 0 {
      return Err(Error::ZeroElementSize);
    }
    if !bytes.len().is_multiple_of(element_size) {
      return Err(Error::NotAMultiple {
        len: bytes.len(),
        element_size,
      });
    }
    let count = bytes.len() / element_size;
    let capacity = count + 1;
    let total = element_size
      .checked_mul(capacity)
      .ok_or(Error::CapacityOverflow)?;
    let mut buf = RawBuf::new(total)?;
    buf.as_mut_slice(bytes.len()).copy_from_slice(bytes);
    Ok(List {
      element_size,
      count,
      capacity,
      buf,
    })
  }

  pub fn element_size(&self) -> usize {
    self.element_size
  }

  /// Number of live elements.
  pub fn len(&self) -> usize {
    self.count
  }

  pub fn is_empty(&self) -> bool {
    self.count == 0
  }

  /// Allocated slots. Always strictly greater than [`len`](Self::len).
  pub fn capacity(&self) -> usize {
    self.capacity
  }

  /// The live region as raw bytes.
  pub fn as_bytes(&self) -> &[u8] {
    self.buf.as_slice(self.count * self.element_size)
  }

  /// Forward position sequence `0..len()`, snapshotted at the call. Mutating
  /// the list while walking the range does not re-check the bound.
  pub fn positions(&self) -> Range<usize> {
    0..self.count
  }

  /// Reverse position sequence `len()-1..=0`, snapshotted at the call.
  pub fn positions_rev(&self) -> Rev<Range<usize>> {
    (0..self.count).rev()
  }

  /// Ensures a slack slot exists. No-op while `capacity > count`, otherwise
  /// reallocates to `((capacity + 2 * count + 1) / 2) + 1` slots, which
  /// keeps repeated single-element pushes amortized O(1).
  pub fn grow(&mut self) -> Result<()> {
    if self.capacity > self.count {
      return Ok(());
    }
    let old_capacity = self.capacity;
    let new_capacity = self
      .count
      .checked_mul(2)
      .and_then(|n| n.checked_add(old_capacity))
      .and_then(|n| n.checked_add(1))
      .ok_or(Error::CapacityOverflow)?
      / 2
      + 1;
    self.buf.resize(self.element_size, old_capacity, new_capacity)?;
    self.capacity = new_capacity;
    tracing::trace!(old_capacity, new_capacity, "list grew");
    Ok(())
  }

  /// Releases unused slack, reallocating down to `count + 1` slots.
  pub fn shrink(&mut self) -> Result<()> {
    let old_capacity = self.capacity;
    let new_capacity = self.count + 1;
    if new_capacity == old_capacity {
      return Ok(());
    }
    self.buf.resize(self.element_size, old_capacity, new_capacity)?;
    self.capacity = new_capacity;
    tracing::trace!(old_capacity, new_capacity, "list shrank");
    Ok(())
  }

  /// Sets the live count directly, growing if the capacity invariant would
  /// break. Elements revealed by a raised count read as zero bytes.
  pub fn set_count(&mut self, count: usize) -> Result<()> {
    let old_count = self.count;
    self.count = count;
    if let Err(err) = self.grow() {
      self.count = old_count;
      return Err(err);
    }
    Ok(())
  }

  /// Guarantees `capacity > count_hint` without changing the live count.
  pub fn reserve(&mut self, count_hint: usize) -> Result<()> {
    if self.capacity > count_hint {
      return Ok(());
    }
    let old_count = self.count;
    self.count = count_hint;
    let res = self.grow();
    self.count = old_count;
    res
  }

  /// Reads the element at `position` as `T`.
  pub fn get<T: AnyBitPattern>(&self, position: usize) -> Result<T> {
    self.check_type::<T>()?;
    self.check_pos(position)?;
    let at = position * self.element_size;
    Ok(bytemuck::pod_read_unaligned(
      &self.as_bytes()[at..at + self.element_size],
    ))
  }

  /// Overwrites the element at `position` with `value`.
  pub fn set<T: NoUninit>(&mut self, position: usize, value: T) -> Result<()> {
    self.check_type::<T>()?;
    self.check_pos(position)?;
    self.write_element(position, bytemuck::bytes_of(&value));
    Ok(())
  }

  /// Appends `value`. Amortized O(1).
  pub fn push<T: NoUninit>(&mut self, value: T) -> Result<()> {
    self.check_type::<T>()?;
    let at = self.count;
    self.set_count(at + 1)?;
    self.write_element(at, bytemuck::bytes_of(&value));
    Ok(())
  }

  /// Inserts `value` at `position`, shifting `[position, len())` one slot
  /// right. O(len - position).
  pub fn insert<T: NoUninit>(&mut self, position: usize, value: T) -> Result<()> {
    self.check_type::<T>()?;
    self.check_insert(position)?;
    let old_count = self.count;
    self.set_count(old_count + 1)?;
    self.shift_raw(position, old_count - position, 1);
    self.write_element(position, bytemuck::bytes_of(&value));
    Ok(())
  }

  /// Reads the element at `position`, then deletes it.
  pub fn remove<T: AnyBitPattern>(&mut self, position: usize) -> Result<T> {
    let value = self.get::<T>(position)?;
    self.delete(position, 1)?;
    Ok(value)
  }

  pub fn remove_first<T: AnyBitPattern>(&mut self) -> Result<T> {
    self.remove(0)
  }

  pub fn remove_last<T: AnyBitPattern>(&mut self) -> Result<T> {
    if self.count == 0 {
      return Err(Error::OutOfBounds {
        position: 0,
        count:    1,
        len:      0,
      });
    }
    self.remove(self.count - 1)
  }

  /// Appends a raw run of whole elements.
  pub fn push_slice(&mut self, src: &[u8]) -> Result<()> {
    let n = self.elements_in(src)?;
    let old_count = self.count;
    let new_count = old_count.checked_add(n).ok_or(Error::CapacityOverflow)?;
    self.set_count(new_count)?;
    self.write_run(old_count, src);
    Ok(())
  }

  /// Splices a raw run in at `position`, shifting the tail right.
  pub fn insert_slice(&mut self, position: usize, src: &[u8]) -> Result<()> {
    self.check_insert(position)?;
    let n = self.elements_in(src)?;
    let old_count = self.count;
    let new_count = old_count.checked_add(n).ok_or(Error::CapacityOverflow)?;
    self.set_count(new_count)?;
    self.shift_raw(position, old_count - position, n as isize);
    self.write_run(position, src);
    Ok(())
  }

  /// General splice: deletes `replace_count` elements at `position`, then
  /// inserts `src` there. Net count change is `src` elements minus
  /// `replace_count`; a shrinking splice zero-fills the vacated tail.
  pub fn splice(&mut self, position: usize, replace_count: usize, src: &[u8]) -> Result<()> {
    self.check_range(position, replace_count)?;
    let n = self.elements_in(src)?;
    let old_count = self.count;
    let tail_at = position + replace_count;
    let new_count = (old_count - replace_count)
      .checked_add(n)
      .ok_or(Error::CapacityOverflow)?;
    self.set_count(new_count)?;
    self.shift_raw(tail_at, old_count - tail_at, n as isize - replace_count as isize);
    self.write_run(position, src);
    if new_count < old_count {
      self.zero_elements(new_count, old_count - new_count);
    }
    Ok(())
  }

  /// Deletes `delete_count` elements at `position`, shifting the remainder
  /// left and zero-filling the vacated tail.
  pub fn delete(&mut self, position: usize, delete_count: usize) -> Result<()> {
    self.check_range(position, delete_count)?;
    let old_count = self.count;
    let tail_at = position + delete_count;
    self.shift_raw(tail_at, old_count - tail_at, -(delete_count as isize));
    self.count = old_count - delete_count;
    self.zero_elements(self.count, delete_count);
    Ok(())
  }

  /// Resets the count to zero and zero-fills the formerly live region. The
  /// allocation is kept, so following pushes reuse it.
  pub fn clear(&mut self) {
    let live = self.count * self.element_size;
    self.buf.as_mut_slice(live).fill(0);
    self.count = 0;
  }

  /// Moves `len` elements at `position` by `amount` slots (positive is
  /// toward higher indices). Source and destination may overlap. The
  /// destination must stay inside the allocated capacity.
  pub fn shift(&mut self, position: usize, len: usize, amount: isize) -> Result<()> {
    self.check_range(position, len)?;
    let dst = if amount < 0 {
      position
        .checked_sub(amount.unsigned_abs())
        .ok_or(Error::OutOfBounds {
          position,
          count: len,
          len: self.count,
        })?
    } else {
      position
        .checked_add(amount as usize)
        .ok_or(Error::CapacityOverflow)?
    };
    let dst_end = dst.checked_add(len).ok_or(Error::CapacityOverflow)?;
    if dst_end > self.capacity {
      return Err(Error::OutOfBounds {
        position: dst,
        count:    len,
        len:      self.capacity,
      });
    }
    self.shift_raw(position, len, amount);
    Ok(())
  }

  /// Appends all of `other`. Element sizes must match.
  pub fn push_list(&mut self, other: &List) -> Result<()> {
    self.push_list_part(other, 0, other.count)
  }

  /// Appends `count` elements of `other` starting at `position`.
  pub fn push_list_part(&mut self, other: &List, position: usize, count: usize) -> Result<()> {
    self.push_slice(other.part(position, count)?)
  }

  pub fn insert_list(&mut self, position: usize, other: &List) -> Result<()> {
    self.insert_list_part(position, other, 0, other.count)
  }

  pub fn insert_list_part(
    &mut self,
    position: usize,
    other: &List,
    other_position: usize,
    count: usize,
  ) -> Result<()> {
    self.insert_slice(position, other.part(other_position, count)?)
  }

  pub fn splice_list(
    &mut self,
    position: usize,
    replace_count: usize,
    other: &List,
  ) -> Result<()> {
    self.splice_list_part(position, replace_count, other, 0, other.count)
  }

  pub fn splice_list_part(
    &mut self,
    position: usize,
    replace_count: usize,
    other: &List,
    other_position: usize,
    count: usize,
  ) -> Result<()> {
    self.splice(position, replace_count, other.part(other_position, count)?)
  }

  /// Whole buffer including slack, for the text layer's terminator write.
  pub(crate) fn full_mut(&mut self) -> &mut [u8] {
    let bytes = self.capacity * self.element_size;
    self.buf.as_mut_slice(bytes)
  }

  pub(crate) fn full(&self) -> &[u8] {
    self.buf.as_slice(self.capacity * self.element_size)
  }

  /// Byte view of `count` elements starting at `position`.
  fn part(&self, position: usize, count: usize) -> Result<&[u8]> {
    self.check_range(position, count)?;
    let start = position * self.element_size;
    Ok(&self.as_bytes()[start..start + count * self.element_size])
  }

  fn check_type<T>(&self) -> Result<()> {
    let got = size_of::<T>();
    if got != self.element_size {
      return Err(Error::ElementSizeMismatch {
        expected: self.element_size,
        got,
      });
    }
    Ok(())
  }

  fn check_pos(&self, position: usize) -> Result<()> {
    if position >= self.count {
      return Err(Error::OutOfBounds {
        position,
        count: 1,
        len: self.count,
      });
    }
    Ok(())
  }

  fn check_insert(&self, position: usize) -> Result<()> {
    if position > self.count {
      return Err(Error::OutOfBounds {
        position,
        count: 0,
        len: self.count,
      });
    }
    Ok(())
  }

  fn check_range(&self, position: usize, count: usize) -> Result<()> {
    let end = position.checked_add(count).ok_or(Error::CapacityOverflow)?;
    if end > self.count {
      return Err(Error::OutOfBounds {
        position,
        count,
        len: self.count,
      });
    }
    Ok(())
  }

  fn elements_in(&self, src: &[u8]) -> Result<usize> {
    if !src.len().is_multiple_of(self.element_size) {
      return Err(Error::NotAMultiple {
        len:          src.len(),
        element_size: self.element_size,
      });
    }
    Ok(src.len() / self.element_size)
  }

  fn write_element(&mut self, position: usize, bytes: &[u8]) {
    let at = position * self.element_size;
    let end = at + self.element_size;
    self.full_mut()[at..end].copy_from_slice(bytes);
  }

  fn write_run(&mut self, position: usize, src: &[u8]) {
    let at = position * self.element_size;
    self.full_mut()[at..at + src.len()].copy_from_slice(src);
  }

  fn zero_elements(&mut self, position: usize, count: usize) {
    let at = position * self.element_size;
    let end = at + count * self.element_size;
    self.full_mut()[at..end].fill(0);
  }

  /// Overlap-safe element move. Ranges were validated by the caller.
  fn shift_raw(&mut self, position: usize, len: usize, amount: isize) {
    if len == 0 || amount == 0 {
      return;
    }
    let es = self.element_size;
    let src = position * es;
    let dst = if amount < 0 {
      src - amount.unsigned_abs() * es
    } else {
      src + amount as usize * es
    };
    let bytes = len * es;
    debug_assert!(dst + bytes <= self.capacity * es);
    unsafe {
      let base = self.buf.as_mut_ptr();
      ptr::copy(base.add(src), base.add(dst), bytes);
    }
  }
}
