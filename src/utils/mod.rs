//! # Utility Functions and Types
//!
//! Shared building blocks for the elementary stream readers:
//!
//! - Bit-level reading of fixed-layout header fields
//! - Start code scanning that survives chunk boundaries
//!
//! ## Start Code Scanning
//!
//! ```rust
//! use h262io::utils::{find_start_code, PrefixFlags};
//!
//! let mut flags = PrefixFlags::default();
//!
//! // The 00 00 prefix arrives at the end of the first chunk...
//! let first = [0xAA, 0x00, 0x00];
//! assert_eq!(find_start_code(&first, 0, first.len(), &mut flags), 3);
//!
//! // ...so the start code is reported two bytes before the second chunk.
//! let second = [0x01, 0xB8, 0x00];
//! assert_eq!(find_start_code(&second, 0, second.len(), &mut flags), -2);
//! ```

/// Bit manipulation and bitstream reading utilities
pub mod bits;

/// Start code prefix scanning across buffer boundaries
pub mod start_code;

// Re-export commonly used types
pub use bits::*;
pub use start_code::{find_start_code, PrefixFlags};
