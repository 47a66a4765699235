use tracing::trace;

use super::{Error, Result};

/// Positional view over the storage of a [`RingBuffer`](super::RingBuffer).
///
/// Reads and writes address absolute slots and never touch the read/write cursors,
/// so writing through this view does not change the queued length.
///
/// ```
/// use bytering::ring_buffer::RingBuffer;
///
/// let mut rb = RingBuffer::new(8).unwrap();
/// let mut raw = rb.raw();
///
/// raw.write_at(7, b'A').unwrap();
/// assert_eq!(b'A', raw.read_at(7).unwrap());
/// assert!(raw.read_at(8).is_err());
/// assert!(raw.read_at(-1).is_err());
/// assert_eq!(0, rb.len());
/// ```
pub struct Raw<'a> {
    storage: &'a mut [u8],
}

impl<'a> Raw<'a> {
    pub(super) fn new(storage: &'a mut [u8]) -> Self {
        Self { storage }
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    pub fn read_at<P: TryInto<usize>>(&self, pos: P) -> Result<u8> {
        let index = self.index(pos)?;
        Ok(self.storage[index])
    }

    pub fn write_at<P: TryInto<usize>>(&mut self, pos: P, value: u8) -> Result<()> {
        let index = self.index(pos)?;
        self.storage[index] = value;
        Ok(())
    }

    pub fn as_slice(&self) -> &[u8] {
        &*self.storage
    }

    fn index<P: TryInto<usize>>(&self, pos: P) -> Result<usize> {
        let capacity = self.capacity();
        match pos.try_into() {
            Ok(index) if index < capacity => Ok(index),
            _ => {
                trace!(capacity, "raw access out of range");
                Err(Error::OutOfRange { capacity })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::ring_buffer::{RingBuffer, RingBufferError};

    #[test]
    fn write_and_read_single_position() {
        let mut rb = RingBuffer::new(8).unwrap();
        let mut raw = rb.raw();

        raw.write_at(0, b'A').unwrap();
        assert_eq!(b'A', raw.read_at(0).unwrap());

        raw.write_at(7, b'A').unwrap();
        assert_eq!(b'A', raw.read_at(7).unwrap());
    }

    #[test]
    fn read_position_bounds() {
        let mut rb = RingBuffer::new(8).unwrap();
        let raw = rb.raw();

        assert!(raw.read_at(0).is_ok());
        assert!(raw.read_at(3).is_ok());
        assert!(raw.read_at(7).is_ok());

        let err = RingBufferError::OutOfRange { capacity: 8 };
        assert_eq!(Err(err), raw.read_at(-1));
        assert_eq!(Err(err), raw.read_at(8));
        assert_eq!(Err(err), raw.read_at(10));
        assert_eq!(Err(err), raw.read_at(usize::MAX));
    }

    #[test]
    fn write_position_bounds() {
        let mut rb = RingBuffer::new(8).unwrap();
        let mut raw = rb.raw();

        assert!(raw.write_at(0, b'A').is_ok());
        assert!(raw.write_at(3, b'A').is_ok());
        assert!(raw.write_at(7, b'A').is_ok());

        let err = RingBufferError::OutOfRange { capacity: 8 };
        assert_eq!(Err(err), raw.write_at(-1, b'A'));
        assert_eq!(Err(err), raw.write_at(8, b'A'));
        assert_eq!(Err(err), raw.write_at(10, b'A'));

        assert_eq!(&[b'A', 0, 0, b'A', 0, 0, 0, b'A'], raw.as_slice());
    }

    #[test]
    fn round_trip_every_slot() {
        let mut rb = RingBuffer::new(64).unwrap();
        let mut raw = rb.raw();

        for pos in 0..64u8 {
            raw.write_at(pos, pos ^ 0xA5).unwrap();
        }
        for pos in 0..64u8 {
            assert_eq!(pos ^ 0xA5, raw.read_at(pos).unwrap());
        }
    }

    #[test]
    fn raw_writes_do_not_move_cursors() {
        let mut rb = RingBuffer::new(8).unwrap();
        rb.push(b'X').unwrap();

        let mut raw = rb.raw();
        for pos in 0..8 {
            raw.write_at(pos, b'Y').unwrap();
        }

        assert_eq!(1, rb.len());
        assert_eq!(b'Y', rb.pop().unwrap());
        assert!(rb.is_empty());
    }

    #[test]
    fn out_of_range_leaves_storage_untouched() {
        let mut rb = RingBuffer::new(4).unwrap();
        let mut raw = rb.raw();

        assert!(raw.write_at(4, 0xFF).is_err());
        assert!(raw.write_at(-4, 0xFF).is_err());
        assert_eq!(&[0u8; 4], raw.as_slice());
        assert_eq!(4, raw.capacity());
    }
}
