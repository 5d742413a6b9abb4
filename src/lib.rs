#![doc(html_root_url = "https://docs.rs/h262io/0.1.0")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

//! # h262io - MPEG-2 Video Elementary Stream Reader
//!
//! `h262io` splits an MPEG-2 (H.262) video elementary stream into timestamped
//! frames as it arrives in arbitrarily sized chunks, for example from the
//! payload of PES packets in a transport stream.
//!
//! ## Features
//!
//! - Start code detection that survives chunk boundaries at any byte
//! - One-time track format derivation from the first sequence header
//!   (size, pixel aspect ratio, frame rate, bit rate, initialization data)
//! - Frame boundaries on picture and group of pictures start codes, with
//!   keyframes flagged at group boundaries
//! - Pass-through output: every byte reaches the [`TrackOutput`](av::TrackOutput)
//!   unchanged, and frames are described by size and offset
//!
//! ## Quick Start
//!
//! ```rust
//! use h262io::av::{ElementaryStreamReader, SampleCollector};
//! use h262io::codec::h262::H262Reader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut reader = H262Reader::new(SampleCollector::new());
//!
//! // Feed PES payloads as they are demultiplexed
//! let payload = vec![0u8; 188];
//! reader.consume(&payload, 0, true)?;
//! reader.packet_finished();
//!
//! // Random access: drop partial state, keep the derived format
//! reader.seek();
//!
//! while let Some(frame) = reader.output_mut().pop_packet() {
//!     println!("frame pts={:?} key={} size={}", frame.pts, frame.is_key, frame.len());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Overview
//!
//! - `av`: Reader and output traits, track format and packet types
//! - `codec`: The MPEG-2 video reader, sequence header buffering and decoding
//! - `format`: Feeding raw elementary stream files into a reader
//! - `config`: Reader configuration from the environment and config files
//! - `error`: Error type and result alias
//! - `utils`: Bit reading and start code scanning

/// Reader/output traits and media types
pub mod av;

/// Codec implementations
pub mod codec;

/// Error types and utilities
pub mod error;

/// Elementary stream input helpers
pub mod format;

/// Common utilities and helper functions
pub mod utils;

/// Configuration module
pub mod config;

pub use error::{H262Error, Result};
