//! Raw storage behind [`List`](crate::List).
//!
//! A [`RawBuf`] is an exclusively owned heap allocation addressed in bytes.
//! It knows nothing about elements; the container layer scales every request
//! by its element size before calling in. The one real contract here is
//! [`RawBuf::resize`]: reallocate, and zero-fill exactly the bytes that were
//! added. Reallocation failure is reported and leaves the old buffer valid.

use std::{
  alloc::{
    self,
    Layout,
  },
  fmt,
  ptr::{
    self,
    NonNull,
  },
  slice,
};

use crate::{
  Error,
  Result,
};

pub(crate) struct RawBuf {
  ptr:   NonNull<u8>,
  bytes: usize,
}

impl RawBuf {
  /// Allocates `bytes` zeroed bytes. A zero-byte buffer holds no allocation.
  pub(crate) fn new(bytes: usize) -> Result<Self> {
    if bytes == 0 {
      return Ok(RawBuf {
        ptr: NonNull::dangling(),
        bytes: 0,
      });
    }
    let layout = byte_layout(bytes)?;
    let ptr = unsafe { alloc::alloc_zeroed(layout) };
    let ptr = NonNull::new(ptr).ok_or(Error::AllocFailed { bytes })?;
    Ok(RawBuf { ptr, bytes })
  }

  /// Reallocates to hold `new_count` elements of `element_size` bytes and
  /// zero-fills `[old_count * element_size, new_count * element_size)` when
  /// growing. On failure the existing allocation is untouched.
  ///
  /// Any pointer or slice previously taken from this buffer is invalid after
  /// a successful call.
  pub(crate) fn resize(
    &mut self,
    element_size: usize,
    old_count: usize,
    new_count: usize,
  ) -> Result<()> {
    let new_bytes = element_size
      .checked_mul(new_count)
      .ok_or(Error::CapacityOverflow)?;
    if new_bytes == 0 {
      self.release();
      self.ptr = NonNull::dangling();
      self.bytes = 0;
      return Ok(());
    }

    if new_bytes != self.bytes {
      let new_layout = byte_layout(new_bytes)?;
      let raw = if self.bytes == 0 {
        unsafe { alloc::alloc_zeroed(new_layout) }
      } else {
        let old_layout = byte_layout(self.bytes)?;
        unsafe { alloc::realloc(self.ptr.as_ptr(), old_layout, new_bytes) }
      };
      self.ptr = NonNull::new(raw).ok_or(Error::AllocFailed { bytes: new_bytes })?;
      self.bytes = new_bytes;
    }

    // Growth must leave the added tail zeroed. Realloc gives it back dirty,
    // and even without a reallocation the element count can rise when the
    // caller reinterprets the same bytes at a different width.
    let live = element_size.saturating_mul(old_count);
    if new_bytes > live {
      unsafe {
        ptr::write_bytes(self.ptr.as_ptr().add(live), 0, new_bytes - live);
      }
    }
    Ok(())
  }

  pub(crate) fn len_bytes(&self) -> usize {
    self.bytes
  }

  /// First `len` bytes. Caller keeps `len <= len_bytes()`.
  pub(crate) fn as_slice(&self, len: usize) -> &[u8] {
    debug_assert!(len <= self.bytes);
    unsafe { slice::from_raw_parts(self.ptr.as_ptr(), len) }
  }

  pub(crate) fn as_mut_slice(&mut self, len: usize) -> &mut [u8] {
    debug_assert!(len <= self.bytes);
    unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), len) }
  }

  pub(crate) fn as_mut_ptr(&mut self) -> *mut u8 {
    self.ptr.as_ptr()
  }

  fn release(&mut self) {
    if self.bytes != 0 {
      unsafe {
        alloc::dealloc(
          self.ptr.as_ptr(),
          Layout::from_size_align_unchecked(self.bytes, 1),
        );
      }
    }
  }
}

impl Drop for RawBuf {
  fn drop(&mut self) {
    self.release();
  }
}

impl fmt::Debug for RawBuf {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("RawBuf").field("bytes", &self.bytes).finish()
  }
}

fn byte_layout(bytes: usize) -> Result<Layout> {
  Layout::from_size_align(bytes, 1).map_err(|_| Error::CapacityOverflow)
}
