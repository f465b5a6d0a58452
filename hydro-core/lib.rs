//! Core byte containers for hydro.
//!
//! The centerpiece is [`List`], a growable buffer that owns raw memory and is
//! tagged with the byte width of one element rather than a compile-time
//! element type. [`Text`] specializes it to one-byte elements with explicit
//! terminator discipline, and [`num`] formats integers and floats through a
//! position-tracking [`ByteCursor`].
//!
//! The containers are single-owner and not synchronized; callers that share
//! one across threads must serialize access themselves.

use thiserror::Error;

pub mod cursor;
pub mod list;
pub mod num;
mod raw;
pub mod text;

pub use cursor::ByteCursor;
pub use list::List;
pub use text::Text;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong inside the containers. Allocation failure is
/// recoverable: the operation that hit it leaves the container untouched.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("allocation of {bytes} bytes failed")]
  AllocFailed { bytes: usize },

  #[error("requested size overflows the address space")]
  CapacityOverflow,

  #[error("element size must be at least one byte")]
  ZeroElementSize,

  #[error("range at {position} of length {count} is out of bounds for {len} elements")]
  OutOfBounds {
    position: usize,
    count:    usize,
    len:      usize,
  },

  #[error("element size mismatch: container holds {expected}-byte elements, got {got}")]
  ElementSizeMismatch { expected: usize, got: usize },

  #[error("byte run of {len} bytes is not a whole number of {element_size}-byte elements")]
  NotAMultiple { len: usize, element_size: usize },

  #[error("cursor overflow: needed {needed} more bytes, {remaining} remaining")]
  CursorOverflow { needed: usize, remaining: usize },

  #[error("float is non-finite or its integer part exceeds the target width")]
  UnrepresentableFloat,
}
