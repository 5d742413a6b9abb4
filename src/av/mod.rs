use bytes::Bytes;

/// Codec carried by a track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CodecType {
    /// MPEG-2 video (H.262).
    MPEG2,
}

/// Codec-level view of a track format.
pub trait CodecData {
    /// The codec of the track.
    fn codec_type(&self) -> CodecType;
    /// Coded width in pixels, for video.
    fn width(&self) -> Option<u32>;
    /// Coded height in pixels, for video.
    fn height(&self) -> Option<u32>;
    /// Decoder configuration record, if any.
    fn extra_data(&self) -> Option<&[u8]>;
}

/// Format of an elementary stream track, derived from the stream itself.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaFormat {
    /// MIME type of the samples.
    pub mime_type: String,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Width of a pixel divided by its height.
    pub pixel_width_height_ratio: f32,
    /// Frames per second, when signalled.
    pub frame_rate: Option<f32>,
    /// Bits per second.
    pub bit_rate: Option<u32>,
    /// Opaque decoder initialization data, e.g. the raw sequence header.
    pub initialization_data: Vec<Bytes>,
}

impl CodecData for MediaFormat {
    fn codec_type(&self) -> CodecType {
        CodecType::MPEG2
    }
    fn width(&self) -> Option<u32> {
        Some(self.width)
    }
    fn height(&self) -> Option<u32> {
        Some(self.height)
    }
    fn extra_data(&self) -> Option<&[u8]> {
        self.initialization_data.first().map(|data| &data[..])
    }
}

/// Per-sample flags passed to [`TrackOutput::write_sample_metadata`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleFlags(u32);

impl SampleFlags {
    /// No flags set.
    pub const NONE: SampleFlags = SampleFlags(0);
    /// The sample can be decoded without reference to earlier samples.
    pub const SYNC: SampleFlags = SampleFlags(1);

    /// True if [`SYNC`](Self::SYNC) is set.
    pub fn is_sync(&self) -> bool {
        self.0 & Self::SYNC.0 != 0
    }
}

/// Receives the output of an elementary stream reader.
pub trait TrackOutput {
    /// Sets the format of the track. Called before the first sample metadata.
    fn set_format(&mut self, format: MediaFormat) -> crate::Result<()>;

    /// Appends raw stream bytes.
    fn write_sample_data(&mut self, data: &[u8]) -> crate::Result<()>;

    /// Completes a sample of `size` bytes whose last byte is `offset` bytes
    /// before the end of the data written so far.
    fn write_sample_metadata(
        &mut self,
        time_us: i64,
        flags: SampleFlags,
        size: usize,
        offset: usize,
        side_data: Option<&[u8]>,
    ) -> crate::Result<()>;
}

impl<T: TrackOutput + ?Sized> TrackOutput for &mut T {
    fn set_format(&mut self, format: MediaFormat) -> crate::Result<()> {
        (**self).set_format(format)
    }

    fn write_sample_data(&mut self, data: &[u8]) -> crate::Result<()> {
        (**self).write_sample_data(data)
    }

    fn write_sample_metadata(
        &mut self,
        time_us: i64,
        flags: SampleFlags,
        size: usize,
        offset: usize,
        side_data: Option<&[u8]>,
    ) -> crate::Result<()> {
        (**self).write_sample_metadata(time_us, flags, size, offset, side_data)
    }
}

/// Splits the payload of one elementary stream into samples.
pub trait ElementaryStreamReader {
    /// Consumes the next contiguous piece of the stream. `pes_time_us` is the
    /// timestamp of the first sample starting in or after `data`.
    fn consume(&mut self, data: &[u8], pes_time_us: i64, start_of_packet: bool) -> crate::Result<()>;

    /// Notifies the reader of a discontinuity.
    fn seek(&mut self);

    /// Notifies the reader that the current packet has been fully consumed.
    fn packet_finished(&mut self);
}

mod collector;
mod packet;
pub use collector::*;
pub use packet::*;
