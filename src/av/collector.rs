use bytes::{Buf, BytesMut};
use std::collections::VecDeque;

use super::{MediaFormat, Packet, SampleFlags, TrackOutput};
use crate::error::{H262Error, Result};

/// A [`TrackOutput`] that turns written data into [`Packet`]s.
///
/// Bytes are buffered until a sample is completed. Bytes written before the
/// start of a completed sample belong to no sample and are dropped.
#[derive(Debug, Default)]
pub struct SampleCollector {
    buffer: BytesMut,
    packets: VecDeque<Packet>,
    format: Option<MediaFormat>,
    discarded: u64,
}

impl SampleCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// The format set by the reader, if any.
    pub fn format(&self) -> Option<&MediaFormat> {
        self.format.as_ref()
    }

    /// Returns the oldest completed packet.
    pub fn pop_packet(&mut self) -> Option<Packet> {
        self.packets.pop_front()
    }

    /// Takes all completed packets.
    pub fn take_packets(&mut self) -> Vec<Packet> {
        self.packets.drain(..).collect()
    }

    /// Completed packets, oldest first.
    pub fn packets(&self) -> impl Iterator<Item = &Packet> {
        self.packets.iter()
    }

    /// Bytes written but not yet part of a completed packet.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes dropped because they preceded a completed packet.
    pub fn discarded_bytes(&self) -> u64 {
        self.discarded
    }

    /// Drops buffered bytes, e.g. after the reader was told to seek.
    pub fn clear_buffer(&mut self) {
        self.discarded += self.buffer.len() as u64;
        self.buffer.clear();
    }
}

impl TrackOutput for SampleCollector {
    fn set_format(&mut self, format: MediaFormat) -> Result<()> {
        if self.format.is_some() {
            return Err(H262Error::Codec("track format already set".into()));
        }
        self.format = Some(format);
        Ok(())
    }

    fn write_sample_data(&mut self, data: &[u8]) -> Result<()> {
        self.buffer.extend_from_slice(data);
        Ok(())
    }

    fn write_sample_metadata(
        &mut self,
        time_us: i64,
        flags: SampleFlags,
        size: usize,
        offset: usize,
        _side_data: Option<&[u8]>,
    ) -> Result<()> {
        let end = self.buffer.len().checked_sub(offset).ok_or_else(|| {
            H262Error::InvalidData(format!(
                "sample offset {} exceeds {} buffered bytes",
                offset,
                self.buffer.len()
            ))
        })?;
        let start = end.checked_sub(size).ok_or_else(|| {
            H262Error::InvalidData(format!("sample size {} exceeds {} available bytes", size, end))
        })?;

        self.discarded += start as u64;
        self.buffer.advance(start);
        let data = self.buffer.split_to(size).freeze();
        self.packets.push_back(
            Packet::new(data)
                .with_pts(time_us)
                .with_key_flag(flags.is_sync()),
        );
        Ok(())
    }
}
