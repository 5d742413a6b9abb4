//! Start code (`00 00 01 xx`) scanning over chunked input.
//!
//! The scanner never buffers data. Instead, [`PrefixFlags`] remembers how much
//! of a prefix the previous buffer ended with, and a start code that began in
//! an earlier buffer is reported at a negative offset relative to the current
//! one (`-1`, `-2` or `-3`).

/// Partial start code prefix seen at the end of the previous buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrefixFlags {
    /// Buffer ended with `00 00 01`; the next byte is the start code value.
    full_prefix: bool,
    /// Buffer ended with `00 00`.
    two_zeros: bool,
    /// Buffer ended with `00`.
    one_zero: bool,
}

impl PrefixFlags {
    /// Forgets any partial prefix, e.g. after a seek.
    pub fn clear(&mut self) {
        *self = PrefixFlags::default();
    }

    /// True if the previous buffer ended inside a potential prefix.
    pub fn is_partial(&self) -> bool {
        self.full_prefix || self.two_zeros || self.one_zero
    }
}

/// Finds the first start code in `data[start..limit]`.
///
/// Returns the offset of the first byte of the `00 00 01` prefix, or `limit`
/// if no start code whose value byte lies before `limit` was found. The
/// offset is negative when the prefix began in a previously scanned buffer.
/// `flags` is updated to describe the tail of this buffer for the next call
/// and cleared whenever a start code is returned.
pub fn find_start_code(data: &[u8], start: usize, limit: usize, flags: &mut PrefixFlags) -> isize {
    let length = limit - start;
    if length == 0 {
        return limit as isize;
    }

    let start_i = start as isize;
    if flags.full_prefix {
        flags.clear();
        return start_i - 3;
    } else if length > 1 && flags.two_zeros && data[start] == 0x01 {
        flags.clear();
        return start_i - 2;
    } else if length > 2 && flags.one_zero && data[start] == 0x00 && data[start + 1] == 0x01 {
        flags.clear();
        return start_i - 1;
    }

    // Only positions whose value byte is also inside the buffer qualify.
    // Stepping by three is safe: a byte > 1 cannot be part of any prefix
    // overlapping the two bytes before it.
    let end = limit - 1;
    let mut i = start + 2;
    while i < end {
        if data[i] & 0xFE != 0 {
            i += 3;
            continue;
        }
        if data[i - 2] == 0x00 && data[i - 1] == 0x00 && data[i] == 0x01 {
            flags.clear();
            return i as isize - 2;
        }
        // data[i] is 0 or 1, so a prefix may start at i - 1 or i
        i += 1;
    }

    flags.full_prefix = if length > 2 {
        data[limit - 3] == 0x00 && data[limit - 2] == 0x00 && data[limit - 1] == 0x01
    } else if length == 2 {
        flags.one_zero && data[limit - 2] == 0x00 && data[limit - 1] == 0x01
    } else {
        flags.two_zeros && data[limit - 1] == 0x01
    };
    flags.two_zeros = if length > 1 {
        data[limit - 2] == 0x00 && data[limit - 1] == 0x00
    } else {
        flags.one_zero && data[limit - 1] == 0x00
    };
    flags.one_zero = data[limit - 1] == 0x00;

    limit as isize
}
