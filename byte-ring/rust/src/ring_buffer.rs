use std::fmt::{self, Debug, Formatter};
use thiserror::Error;
use tracing::{debug, trace};

mod raw;

pub use raw::Raw;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingBufferError {
    #[error("The capacity must be a positive power of two")]
    InvalidCapacity,
    #[error("The position is outside of the ring buffer (capacity {capacity})")]
    OutOfRange { capacity: usize },
    #[error("The ring buffer is empty")]
    Empty,
    #[error("The ring buffer is full")]
    Full,
    #[error("Could not allocate memory for ring buffer")]
    Allocation,
}

type Error = RingBufferError;
type Result<T> = std::result::Result<T, Error>;

/// Fixed capacity byte queue.
///
/// Fullness is derived from the distance between the cursors, so one slot
/// is always left unused: a buffer of capacity `N` holds at most `N - 1` bytes.
pub struct RingBuffer {
    storage: Box<[u8]>,
    read_index: usize,
    write_index: usize,
}

impl RingBuffer {
    /// Allocates a new zero filled `RingBuffer` on the heap
    ///
    /// Fails with `RingBufferError::InvalidCapacity` unless `capacity` is a positive power of two
    ///
    /// ```
    /// use bytering::ring_buffer::{RingBuffer, RingBufferError};
    ///
    /// let rb = RingBuffer::new(8).unwrap();
    /// assert_eq!(8, rb.capacity());
    ///
    /// assert_eq!(Some(RingBufferError::InvalidCapacity), RingBuffer::new(3).err());
    /// assert_eq!(Some(RingBufferError::InvalidCapacity), RingBuffer::new(-1).err());
    /// ```
    pub fn new<C: TryInto<usize>>(capacity: C) -> Result<Self> {
        let storage = Self::allocate(capacity)?;
        debug!(capacity = storage.len(), "initialized ring buffer");

        Ok(Self {
            storage,
            read_index: 0,
            write_index: 0,
        })
    }

    /// Replaces the storage with a new zero filled allocation of `capacity` bytes.
    /// The previous storage is released, and all queued data is discarded.
    /// On error the buffer is left untouched.
    pub fn reinit<C: TryInto<usize>>(&mut self, capacity: C) -> Result<()> {
        let storage = Self::allocate(capacity)?;
        let previous = self.capacity();

        self.storage = storage;
        self.read_index = 0;
        self.write_index = 0;

        debug!(previous, capacity = self.capacity(), "reinitialized ring buffer");
        Ok(())
    }

    /// Releases the storage. Equivalent to dropping the buffer.
    pub fn destroy(self) {
        debug!(capacity = self.capacity(), "destroyed ring buffer");
    }

    /// Enqueues a single byte
    /// Can return either of
    /// * `Result::Err(RingBufferError::Full)`
    /// * `Result::Ok(())`
    ///
    /// ```
    /// use bytering::ring_buffer::RingBuffer;
    /// use std::result::Result;
    /// use std::error::Error;
    ///
    /// fn main() -> Result<(), Box<dyn Error>> {
    ///     let mut rb = RingBuffer::new(4)?;
    ///
    ///     rb.push(b'A')?;
    ///     rb.push(b'B')?;
    ///     rb.push(b'C')?;
    ///     assert!(rb.push(b'D').is_err());
    ///     Ok(())
    /// }
    /// ```
    pub fn push(&mut self, value: u8) -> Result<()> {
        if self.is_full() {
            trace!(capacity = self.capacity(), "push rejected, ring buffer is full");
            return Err(Error::Full);
        }

        self.storage[self.write_index] = value;
        self.write_index = self.mask(self.write_index + 1);

        Ok(())
    }

    /// Dequeues the oldest byte
    /// Can return either of
    /// * `Result::Err(RingBufferError::Empty)`
    /// * `Result::Ok(u8)`
    ///
    /// ```
    /// use bytering::ring_buffer::RingBuffer;
    /// use std::result::Result;
    /// use std::error::Error;
    ///
    /// fn main() -> Result<(), Box<dyn Error>> {
    ///     let mut rb = RingBuffer::new(8)?;
    ///
    ///     rb.push(42)?;
    ///     assert_eq!(42, rb.pop()?);
    ///     assert!(rb.pop().is_err());
    ///     Ok(())
    /// }
    /// ```
    pub fn pop(&mut self) -> Result<u8> {
        if self.is_empty() {
            trace!(capacity = self.capacity(), "pop rejected, ring buffer is empty");
            return Err(Error::Empty);
        }

        let value = self.storage[self.read_index];
        self.read_index = self.mask(self.read_index + 1);

        Ok(value)
    }

    /// Enqueues bytes from `values` in order until the buffer is full.
    /// Returns the number of bytes accepted.
    pub fn push_slice(&mut self, values: &[u8]) -> usize {
        let count = values.len().min(self.remaining());
        if count < values.len() {
            trace!(
                requested = values.len(),
                accepted = count,
                "push_slice truncated, ring buffer is full"
            );
        }

        for &value in &values[..count] {
            self.storage[self.write_index] = value;
            self.write_index = self.mask(self.write_index + 1);
        }

        count
    }

    /// Returns an iterator popping bytes until the buffer is empty.
    /// Bytes not yet yielded when the iterator is dropped are discarded.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { buffer: self }
    }

    /// Resets both cursors and zero fills the storage, without reallocating
    pub fn clear(&mut self) {
        self.read_index = 0;
        self.write_index = 0;
        self.storage.fill(0);
        debug!(capacity = self.capacity(), "cleared ring buffer");
    }

    /// Positional access to the underlying storage, bypassing the cursors.
    /// Meant for inspection and seeding, not for producing or consuming data.
    pub fn raw(&mut self) -> Raw<'_> {
        Raw::new(&mut self.storage)
    }

    /// Returns the number of queued bytes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.mask(self.write_index.wrapping_sub(self.read_index))
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline(always)]
    pub fn is_full(&self) -> bool {
        self.len() == self.capacity() - 1
    }

    /// Number of further bytes that can be pushed before the buffer is full
    #[inline(always)]
    pub fn remaining(&self) -> usize {
        self.capacity() - 1 - self.len()
    }

    #[inline(always)]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    #[inline(always)]
    fn mask(&self, index: usize) -> usize {
        index & (self.capacity() - 1)
    }

    fn allocate<C: TryInto<usize>>(capacity: C) -> Result<Box<[u8]>> {
        let capacity: usize = capacity.try_into().map_err(|_| Error::InvalidCapacity)?;
        if !is_power_of_two(capacity) {
            trace!(capacity, "rejected ring buffer capacity");
            return Err(Error::InvalidCapacity);
        }

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(capacity)
            .map_err(|_| Error::Allocation)?;
        storage.resize(capacity, 0u8);

        Ok(storage.into_boxed_slice())
    }
}

impl Debug for RingBuffer {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("storage", &self.storage)
            .field("read_index", &self.read_index)
            .field("write_index", &self.write_index)
            .field("len", &self.len())
            .finish()
    }
}

/// Iterator returned by [`RingBuffer::drain`]
pub struct Drain<'a> {
    buffer: &'a mut RingBuffer,
}

impl Iterator for Drain<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.buffer.is_empty() {
            return None;
        }

        self.buffer.pop().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.buffer.len();
        (len, Some(len))
    }
}

impl ExactSizeIterator for Drain<'_> {}

impl Drop for Drain<'_> {
    fn drop(&mut self) {
        self.buffer.read_index = self.buffer.write_index;
    }
}

const fn is_power_of_two(n: usize) -> bool {
    n != 0 && n & (n - 1) == 0
}
