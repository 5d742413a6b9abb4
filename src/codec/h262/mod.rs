//! # MPEG-2 Video (H.262) Elementary Stream Support
//!
//! This module splits an MPEG-2 video elementary stream into frames without
//! decoding it. It supports:
//!
//! - Start code detection across arbitrary chunk boundaries
//! - Sequence header collection and decoding (size, aspect ratio, frame rate)
//! - Frame boundary detection on picture and group of pictures start codes
//! - Keyframe flagging at group of pictures boundaries
//!
//! ## Example: Splitting a Stream into Frames
//!
//! ```rust
//! use h262io::av::{ElementaryStreamReader, SampleCollector};
//! use h262io::codec::h262::H262Reader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = H262Reader::new(SampleCollector::new());
//!
//! let stream: Vec<u8> = vec![
//!     0x00, 0x00, 0x01, 0xB3, 0x16, 0x01, 0x20, 0x13, // sequence header, 352x288
//!     0x00, 0x00, 0x01, 0xB8, 0x00, 0x08, 0x00, 0x00, // group of pictures
//!     0x00, 0x00, 0x01, 0x00, 0x00, 0x0F, 0xFF, 0xF8, // picture
//!     0x00, 0x00, 0x01, 0x01, 0x12, 0x34,             // slice
//!     0x00, 0x00, 0x01, 0x00, 0x00, 0x57, 0xFF, 0xF8, // next picture
//! ];
//!
//! // Chunk boundaries don't matter
//! for chunk in stream.chunks(5) {
//!     reader.consume(chunk, 0, false)?;
//! }
//!
//! let collector = reader.output_mut();
//! assert_eq!(collector.format().map(|f| f.width), Some(352));
//! let frame = collector.pop_packet().unwrap();
//! assert!(frame.is_key);
//! assert_eq!(frame.len(), 22);
//! # Ok(())
//! # }
//! ```

/// Sequence header collection
pub mod csd;

/// Sequence header decoding
pub mod parser;

/// Frame extraction from chunked elementary stream data
pub mod reader;

/// Start code values and header field tables
pub mod types;

#[doc(inline)]
pub use csd::CsdBuffer;
#[doc(inline)]
pub use parser::{parse_media_format, SequenceHeader};
#[doc(inline)]
pub use reader::{H262Reader, ReaderState};
#[doc(inline)]
pub use types::*;
