use bytes::Bytes;

use super::types::{frame_rate, AspectRatio, MIME_VIDEO_MPEG2, START_SEQUENCE_HEADER};
use crate::av::MediaFormat;
use crate::error::{H262Error, Result};
use crate::utils::BitReader;

/// Offset of the first field after `00 00 01 B3`.
const FIELDS_OFFSET: usize = 4;

/// Shortest payload carrying the size and aspect ratio fields.
pub const MIN_SEQUENCE_HEADER_SIZE: usize = 8;

const BIT_RATE_VARIABLE: u32 = 0x3FFFF;

/// Fixed-layout fields at the start of a sequence header.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceHeader {
    /// `horizontal_size_value`
    pub width: u32,
    /// `vertical_size_value`
    pub height: u32,
    /// `aspect_ratio_information`
    pub aspect_ratio: AspectRatio,
    /// `frame_rate_code`
    pub frame_rate_code: u8,
    /// `bit_rate_value` in units of 400 bit/s, if present and not variable.
    pub bit_rate_value: Option<u32>,
}

impl SequenceHeader {
    /// Parses the header from codec-specific data that starts with the
    /// sequence header start code, as collected by [`CsdBuffer`](super::CsdBuffer).
    ///
    /// Only the leading fixed fields are read; any folded extension is ignored.
    pub fn parse(csd: &[u8]) -> Result<Self> {
        if csd.len() < MIN_SEQUENCE_HEADER_SIZE {
            return Err(H262Error::InvalidData(format!(
                "sequence header too short: {} bytes",
                csd.len()
            )));
        }
        if csd[FIELDS_OFFSET - 1] != START_SEQUENCE_HEADER {
            return Err(H262Error::Parser(format!(
                "expected sequence header start code, found {:#04x}",
                csd[FIELDS_OFFSET - 1]
            )));
        }

        let mut reader = BitReader::new(&csd[FIELDS_OFFSET..]);
        let width = reader.read_bits(12)?;
        let height = reader.read_bits(12)?;
        let aspect_ratio = AspectRatio::from(reader.read_bits(4)? as u8);
        let frame_rate_code = reader.read_bits(4)? as u8;

        let bit_rate_value = match reader.read_bits(18) {
            Ok(BIT_RATE_VARIABLE) | Ok(0) | Err(_) => None,
            Ok(value) => Some(value),
        };

        Ok(SequenceHeader {
            width,
            height,
            aspect_ratio,
            frame_rate_code,
            bit_rate_value,
        })
    }

    /// Width of a pixel divided by its height.
    ///
    /// Derived from the display aspect ratio when the header carries one,
    /// otherwise 1.0.
    pub fn pixel_width_height_ratio(&self) -> f32 {
        match self.aspect_ratio.display_ratio() {
            Some(display_ratio) if self.width > 0 && self.height > 0 => {
                display_ratio * self.height as f32 / self.width as f32
            }
            _ => 1.0,
        }
    }

    /// Frames per second, when the code defines a rate.
    pub fn frame_rate(&self) -> Option<f32> {
        frame_rate(self.frame_rate_code)
    }

    /// Bits per second, when signalled.
    pub fn bit_rate(&self) -> Option<u32> {
        self.bit_rate_value.map(|value| value * 400)
    }

    /// Builds the track format, carrying `csd` as initialization data.
    pub fn to_media_format(&self, csd: &[u8]) -> MediaFormat {
        MediaFormat {
            mime_type: MIME_VIDEO_MPEG2.to_string(),
            width: self.width,
            height: self.height,
            pixel_width_height_ratio: self.pixel_width_height_ratio(),
            frame_rate: self.frame_rate(),
            bit_rate: self.bit_rate(),
            initialization_data: vec![Bytes::copy_from_slice(csd)],
        }
    }
}

/// Parses `csd` and builds the format in one step.
pub fn parse_media_format(csd: &[u8]) -> Result<MediaFormat> {
    let header = SequenceHeader::parse(csd)?;
    log::debug!(
        "sequence header: {}x{} aspect {:?} frame_rate_code {}",
        header.width,
        header.height,
        header.aspect_ratio,
        header.frame_rate_code
    );
    Ok(header.to_media_format(csd))
}
