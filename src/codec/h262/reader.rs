use super::csd::CsdBuffer;
use super::parser::parse_media_format;
use super::types::StartCode;
use crate::av::{ElementaryStreamReader, SampleFlags, TrackOutput};
use crate::config::{get_reader_config, ReaderConfig};
use crate::error::Result;
use crate::utils::{find_start_code, PrefixFlags};

const START_CODE_PREFIX: [u8; 3] = [0x00, 0x00, 0x01];

/// Whether the track format has been derived from the stream yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
    /// Waiting for a complete sequence header. No samples are output.
    CollectingConfig,
    /// Format has been output; start codes delimit samples.
    Streaming,
}

/// Sample currently being written.
#[derive(Debug, Clone, Copy)]
struct PendingFrame {
    /// Stream position of the sample's first byte.
    position: u64,
    time_us: i64,
    is_keyframe: bool,
    /// False while only a group of pictures header has been seen.
    has_picture: bool,
}

/// Parses a continuous MPEG-2 video elementary stream and extracts
/// individual frames.
///
/// All data is passed through to the [`TrackOutput`] as it arrives. Once the
/// first sequence header is complete the format is output, and from then on
/// each picture start code ends the previous frame. A group of pictures
/// header also ends the previous frame and marks the next one as a keyframe.
///
/// ```rust
/// use h262io::av::{ElementaryStreamReader, SampleCollector};
/// use h262io::codec::h262::H262Reader;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut reader = H262Reader::new(SampleCollector::new());
/// reader.consume(&[0x00, 0x00, 0x01, 0xB3, 0x2D, 0x01, 0xE0, 0x24], 0, true)?;
/// reader.consume(&[0x00, 0x00, 0x01, 0xB8, 0x00, 0x00, 0x01, 0x00, 0xAA], 0, true)?;
///
/// let format = reader.output().format().unwrap();
/// assert_eq!((format.width, format.height), (720, 480));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct H262Reader<O: TrackOutput> {
    output: O,

    // State that should not be reset on seek.
    state: ReaderState,

    // State that should be reset on seek.
    prefix_flags: PrefixFlags,
    csd: CsdBuffer,
    total_bytes_written: u64,
    pending: Option<PendingFrame>,
}

impl<O: TrackOutput> H262Reader<O> {
    /// Creates a reader using the global [`ReaderConfig`].
    pub fn new(output: O) -> Self {
        Self::with_config(output, &get_reader_config())
    }

    /// Creates a reader with an explicit config.
    pub fn with_config(output: O, config: &ReaderConfig) -> Self {
        Self {
            output,
            state: ReaderState::CollectingConfig,
            prefix_flags: PrefixFlags::default(),
            csd: CsdBuffer::new(config.csd_initial_capacity),
            total_bytes_written: 0,
            pending: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ReaderState {
        self.state
    }

    /// True once the format has been passed to the output.
    pub fn has_output_format(&self) -> bool {
        self.state == ReaderState::Streaming
    }

    /// Bytes passed to the output since the last seek.
    pub fn total_bytes_written(&self) -> u64 {
        self.total_bytes_written
    }

    /// The output the reader writes to.
    pub fn output(&self) -> &O {
        &self.output
    }

    /// Mutable access to the output.
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Consumes the reader and returns its output.
    pub fn into_output(self) -> O {
        self.output
    }

    /// Routes a start code to the codec-specific data buffer.
    ///
    /// `csd_cursor` is the offset in `data` up to which bytes have already been
    /// handed to the buffer.
    fn on_csd_start_code(
        &mut self,
        data: &[u8],
        start_code: StartCode,
        start_code_position: isize,
        csd_cursor: usize,
    ) -> Result<()> {
        // Negative if the start code began in previously consumed data.
        let length_to_start_code = start_code_position - csd_cursor as isize;
        if length_to_start_code > 0 {
            self.csd.on_data(data, csd_cursor, start_code_position as usize);
        }
        let bytes_already_passed = if length_to_start_code < 0 {
            length_to_start_code.unsigned_abs()
        } else {
            0
        };

        if self.csd.is_filling() {
            if !self.csd.on_start_code(start_code.value(), bytes_already_passed) {
                return Ok(());
            }
            self.output_format()?;
            if self.state == ReaderState::Streaming {
                return Ok(());
            }
        }

        self.csd.on_start_code(start_code.value(), 0);
        if self.csd.is_filling() && start_code_position < 0 {
            // The prefix bytes from the previous chunk were never buffered
            let missing = start_code_position.unsigned_abs();
            self.csd.on_data(&START_CODE_PREFIX, 0, missing);
        }
        Ok(())
    }

    fn output_format(&mut self) -> Result<()> {
        let parsed = parse_media_format(self.csd.payload());
        self.csd.reset();
        match parsed {
            Ok(format) => {
                log::debug!(
                    "output format {} {}x{} par {:.4}",
                    format.mime_type,
                    format.width,
                    format.height,
                    format.pixel_width_height_ratio
                );
                self.output.set_format(format)?;
                self.state = ReaderState::Streaming;
            }
            Err(e) => log::warn!("discarding sequence header: {}", e),
        }
        Ok(())
    }

    fn on_frame_start_code(
        &mut self,
        start_code: StartCode,
        bytes_written_past_frame: usize,
        pes_time_us: i64,
    ) -> Result<()> {
        let position = self.total_bytes_written - bytes_written_past_frame as u64;
        match start_code {
            StartCode::GroupOfPictures => {
                if matches!(self.pending, Some(frame) if !frame.has_picture) {
                    return Ok(());
                }
                self.finish_frame(bytes_written_past_frame)?;
                self.pending = Some(PendingFrame {
                    position,
                    time_us: pes_time_us,
                    is_keyframe: true,
                    has_picture: false,
                });
            }
            StartCode::Picture => match self.pending.as_mut() {
                Some(frame) if !frame.has_picture => {
                    frame.has_picture = true;
                    frame.time_us = pes_time_us;
                }
                _ => {
                    self.finish_frame(bytes_written_past_frame)?;
                    self.pending = Some(PendingFrame {
                        position,
                        time_us: pes_time_us,
                        is_keyframe: false,
                        has_picture: true,
                    });
                }
            },
            _ => {}
        }
        Ok(())
    }

    fn finish_frame(&mut self, bytes_written_past_frame: usize) -> Result<()> {
        if let Some(frame) = self.pending.take() {
            let size = (self.total_bytes_written - frame.position) as usize - bytes_written_past_frame;
            let flags = if frame.is_keyframe {
                SampleFlags::SYNC
            } else {
                SampleFlags::NONE
            };
            log::trace!(
                "frame at {} size {} time {}us key {}",
                frame.position,
                size,
                frame.time_us,
                frame.is_keyframe
            );
            self.output
                .write_sample_metadata(frame.time_us, flags, size, bytes_written_past_frame, None)?;
        }
        Ok(())
    }
}

impl<O: TrackOutput> ElementaryStreamReader for H262Reader<O> {
    fn consume(&mut self, data: &[u8], pes_time_us: i64, _start_of_packet: bool) -> Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        let limit = data.len();

        // Append the data to the output.
        self.output.write_sample_data(data)?;
        self.total_bytes_written += limit as u64;

        let mut csd_cursor = 0usize;
        let mut search_position = 0usize;
        loop {
            let start_code_position =
                find_start_code(data, search_position, limit, &mut self.prefix_flags);

            if start_code_position == limit as isize {
                // Scanned to the end of the data without finding another start code.
                if self.state == ReaderState::CollectingConfig {
                    self.csd.on_data(data, csd_cursor, limit);
                }
                return Ok(());
            }

            let value_position = (start_code_position + 3) as usize;
            let start_code = StartCode::from(data[value_position]);
            search_position = value_position;

            // Slices are never boundaries and are kept in whatever precedes them.
            if start_code.is_slice() {
                continue;
            }

            if self.state == ReaderState::CollectingConfig {
                self.on_csd_start_code(data, start_code, start_code_position, csd_cursor)?;
                csd_cursor = start_code_position.max(0) as usize;
            }

            if self.state == ReaderState::Streaming {
                let bytes_written_past_frame = (limit as isize - start_code_position) as usize;
                self.on_frame_start_code(start_code, bytes_written_past_frame, pes_time_us)?;
            }
        }
    }

    fn seek(&mut self) {
        log::debug!("seek after {} bytes", self.total_bytes_written);
        self.prefix_flags.clear();
        self.csd.reset();
        self.total_bytes_written = 0;
        self.pending = None;
    }

    fn packet_finished(&mut self) {
        // Do nothing.
    }
}
