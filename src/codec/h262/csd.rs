use bytes::BytesMut;

use super::types::{START_EXTENSION, START_SEQUENCE_HEADER};

/// Accumulates codec-specific data: the sequence header and at most one
/// extension that follows it.
///
/// Filling starts at a sequence header start code and stops at the next start
/// code that is not the first extension. The stored bytes begin with the
/// sequence header's own `00 00 01 B3`.
#[derive(Debug)]
pub struct CsdBuffer {
    data: BytesMut,
    is_filling: bool,
    seen_extension: bool,
}

impl CsdBuffer {
    /// Creates an empty buffer with `initial_capacity` bytes preallocated.
    pub fn new(initial_capacity: usize) -> Self {
        Self {
            data: BytesMut::with_capacity(initial_capacity),
            is_filling: false,
            seen_extension: false,
        }
    }

    /// Clears any data the buffer holds.
    pub fn reset(&mut self) {
        self.is_filling = false;
        self.seen_extension = false;
        self.data.clear();
    }

    /// Invoked for every start code found in the stream.
    ///
    /// `bytes_already_passed` is the number of bytes of this start code that
    /// were already handed to [`on_data`](Self::on_data), or 0.
    ///
    /// Returns true once the data is complete. After that neither method
    /// should be called again until [`reset`](Self::reset).
    pub fn on_start_code(&mut self, start_code_value: u8, bytes_already_passed: usize) -> bool {
        if self.is_filling {
            if !self.seen_extension && start_code_value == START_EXTENSION {
                self.seen_extension = true;
            } else {
                let length = self.data.len().saturating_sub(bytes_already_passed);
                self.data.truncate(length);
                self.is_filling = false;
                return true;
            }
        } else if start_code_value == START_SEQUENCE_HEADER {
            self.is_filling = true;
        }
        false
    }

    /// Appends `data[offset..limit]` while filling.
    pub fn on_data(&mut self, data: &[u8], offset: usize, limit: usize) {
        if !self.is_filling {
            return;
        }
        let read_length = limit - offset;
        let required = self.data.len() + read_length;
        if self.data.capacity() < required {
            let target = (self.data.capacity() * 2).max(required);
            self.data.reserve(target - self.data.len());
        }
        self.data.extend_from_slice(&data[offset..limit]);
    }

    /// True between a sequence header start code and the end of the data.
    pub fn is_filling(&self) -> bool {
        self.is_filling
    }

    /// The bytes accumulated so far.
    pub fn payload(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes accumulated.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::h262::types::{START_GROUP, START_PICTURE};

    #[test]
    fn test_ignores_data_until_sequence_header() {
        let mut csd = CsdBuffer::new(16);
        csd.on_data(&[1, 2, 3], 0, 3);
        assert!(!csd.on_start_code(START_GROUP, 0));
        csd.on_data(&[1, 2, 3], 0, 3);
        assert!(csd.is_empty());
        assert!(!csd.is_filling());
    }

    #[test]
    fn test_folds_single_extension() {
        let mut csd = CsdBuffer::new(16);
        assert!(!csd.on_start_code(START_SEQUENCE_HEADER, 0));
        csd.on_data(&[0x00, 0x00, 0x01, 0xB3, 0x11], 0, 5);
        assert!(!csd.on_start_code(START_EXTENSION, 0));
        csd.on_data(&[0x00, 0x00, 0x01, 0xB5, 0x22], 0, 5);
        // A second extension closes the payload
        assert!(csd.on_start_code(START_EXTENSION, 0));
        assert_eq!(csd.len(), 10);
        assert!(!csd.is_filling());
    }

    #[test]
    fn test_bytes_already_passed_are_dropped() {
        let mut csd = CsdBuffer::new(4);
        csd.on_start_code(START_SEQUENCE_HEADER, 0);
        csd.on_data(&[0x00, 0x00, 0x01, 0xB3, 0x78, 0x04, 0x38, 0x00, 0x00], 0, 9);
        assert!(csd.on_start_code(START_PICTURE, 2));
        assert_eq!(csd.payload(), &[0x00, 0x00, 0x01, 0xB3, 0x78, 0x04, 0x38]);
    }

    #[test]
    fn test_growth_preserves_bytes() {
        let mut csd = CsdBuffer::new(2);
        csd.on_start_code(START_SEQUENCE_HEADER, 0);
        let data: Vec<u8> = (0..=255).collect();
        for window in data.chunks(7) {
            csd.on_data(window, 0, window.len());
        }
        assert_eq!(csd.payload(), &data[..]);
    }

    #[test]
    fn test_on_data_respects_range() {
        let mut csd = CsdBuffer::new(8);
        csd.on_start_code(START_SEQUENCE_HEADER, 0);
        csd.on_data(&[9, 8, 7, 6, 5], 1, 4);
        assert_eq!(csd.payload(), &[8, 7, 6]);
    }

    #[test]
    fn test_reset() {
        let mut csd = CsdBuffer::new(8);
        csd.on_start_code(START_SEQUENCE_HEADER, 0);
        csd.on_start_code(START_EXTENSION, 0);
        csd.on_data(&[1, 2, 3], 0, 3);
        csd.reset();
        assert!(csd.is_empty());
        assert!(!csd.is_filling());

        // The extension flag is cleared too
        csd.on_start_code(START_SEQUENCE_HEADER, 0);
        assert!(!csd.on_start_code(START_EXTENSION, 0));
    }
}
