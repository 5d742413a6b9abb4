use h262io::av::{ElementaryStreamReader, MediaFormat, SampleCollector, SampleFlags, TrackOutput};
use h262io::codec::h262::H262Reader;
use h262io::config::ReaderConfig;
use h262io::Result;
use pretty_assertions::assert_eq;
use quickcheck_macros::quickcheck;

/// A sample as seen by the output, located by absolute stream offsets.
#[derive(Debug, Clone, PartialEq)]
struct Sample {
    time_us: i64,
    key: bool,
    start: u64,
    size: usize,
}

/// Records formats and samples independently of how the data was chunked.
#[derive(Debug, Default)]
struct RecordingOutput {
    written: u64,
    formats: Vec<MediaFormat>,
    samples: Vec<Sample>,
}

impl TrackOutput for RecordingOutput {
    fn set_format(&mut self, format: MediaFormat) -> Result<()> {
        self.formats.push(format);
        Ok(())
    }

    fn write_sample_data(&mut self, data: &[u8]) -> Result<()> {
        self.written += data.len() as u64;
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
        let end = self.written - offset as u64;
        self.samples.push(Sample {
            time_us,
            key: flags.is_sync(),
            start: end - size as u64,
            size,
        });
        Ok(())
    }
}

fn start_code(value: u8, payload: &[u8]) -> Vec<u8> {
    let mut data = vec![0x00, 0x00, 0x01, value];
    data.extend_from_slice(payload);
    data
}

/// 720x576, 16:9, 25 fps sequence header with a bit rate of 15 Mbit/s.
fn sequence_header() -> Vec<u8> {
    start_code(0xB3, &[0x2D, 0x02, 0x40, 0x33, 0x24, 0x9F, 0x23, 0x80])
}

fn picture(temporal_reference: u8, slices: usize) -> Vec<u8> {
    let mut data = start_code(0x00, &[temporal_reference, 0x0F, 0xFF, 0xF8]);
    data.extend(start_code(0xB5, &[0x8F, 0xFF, 0xF3, 0x41, 0x80]));
    for i in 0..slices {
        // Payload with embedded zero pairs that must not confuse the scanner
        data.extend(start_code(0x01 + i as u8, &[0x12, 0x00, 0x00, 0x02, 0x34, 0x00]));
    }
    data
}

fn group() -> Vec<u8> {
    start_code(0xB8, &[0x00, 0x08, 0x00, 0x40])
}

/// Sequence header, sequence extension, then two groups of three pictures.
fn test_stream() -> Vec<u8> {
    let mut data = sequence_header();
    data.extend(start_code(0xB5, &[0x14, 0x8A, 0x00, 0x01, 0x00, 0x00]));
    for gop in 0..2u8 {
        data.extend(group());
        for pic in 0..3u8 {
            data.extend(picture(gop * 3 + pic, 1 + pic as usize));
        }
    }
    // Trailing picture ends the last complete frame
    data.extend(start_code(0x00, &[0x00, 0x0F]));
    data
}

fn run(data: &[u8], cuts: &[usize]) -> RecordingOutput {
    let mut bounds = vec![0];
    bounds.extend(cuts.iter().copied().filter(|&c| c > 0 && c < data.len()));
    bounds.push(data.len());
    bounds.sort_unstable();
    bounds.dedup();

    let mut reader = H262Reader::with_config(RecordingOutput::default(), &ReaderConfig::default());
    for window in bounds.windows(2) {
        reader.consume(&data[window[0]..window[1]], 0, true).unwrap();
        reader.packet_finished();
    }
    reader.into_output()
}

#[test]
fn test_frames_of_unsplit_stream() {
    let data = test_stream();
    let output = run(&data, &[]);

    assert_eq!(output.written, data.len() as u64);
    assert_eq!(output.formats.len(), 1);
    let format = &output.formats[0];
    assert_eq!(format.mime_type, "video/mpeg2");
    assert_eq!((format.width, format.height), (720, 576));
    assert_eq!(format.frame_rate, Some(25.0));
    assert_eq!(format.bit_rate, Some(0x0927C * 400));
    let expected_par = (16.0f32 / 9.0) * 576.0 / 720.0;
    assert!((format.pixel_width_height_ratio - expected_par).abs() < 1e-6);
    // Sequence header plus the single folded extension
    assert_eq!(format.initialization_data[0].len(), 12 + 10);

    let keys: Vec<bool> = output.samples.iter().map(|s| s.key).collect();
    assert_eq!(keys, vec![true, false, false, true, false, false]);

    // Samples tile the stream from the first group header onwards
    let mut position = 22;
    for sample in &output.samples {
        assert_eq!(sample.start, position);
        position += sample.size as u64;
    }
    assert_eq!(position, data.len() as u64 - 6);
}

#[test]
fn test_every_two_cut_split_matches() {
    let data = test_stream();
    let expected = run(&data, &[]);

    for a in 0..=data.len() {
        for b in (a..=data.len()).step_by(3) {
            let output = run(&data, &[a, b]);
            assert_eq!(output.samples, expected.samples, "cuts at {} and {}", a, b);
            assert_eq!(output.formats, expected.formats, "cuts at {} and {}", a, b);
        }
    }
}

#[test]
fn test_byte_at_a_time() {
    let data = test_stream();
    let cuts: Vec<usize> = (1..data.len()).collect();
    let expected = run(&data, &[]);
    let output = run(&data, &cuts);
    assert_eq!(output.samples, expected.samples);
    assert_eq!(output.formats, expected.formats);
}

#[quickcheck]
fn prop_chunking_does_not_change_output(cuts: Vec<usize>) -> bool {
    let data = test_stream();
    let cuts: Vec<usize> = cuts.into_iter().map(|c| c % (data.len() + 1)).collect();
    let expected = run(&data, &[]);
    let output = run(&data, &cuts);
    output.samples == expected.samples && output.formats == expected.formats
}

#[test]
fn test_slices_never_split_frames() {
    let mut data = sequence_header();
    data.extend(group());
    data.extend(start_code(0x00, &[0x00, 0x0F]));
    for value in 0x01..=0xAFu8 {
        data.extend(start_code(value, &[0x55]));
    }
    data.extend(start_code(0x00, &[0x40, 0x0F]));

    let output = run(&data, &[]);
    assert_eq!(output.samples.len(), 1);
    assert_eq!(output.samples[0].start, 12);
    assert_eq!(output.samples[0].size, data.len() - 12 - 6);
}

#[test]
fn test_seek_discards_partial_state() {
    let data = test_stream();
    let mut reader = H262Reader::with_config(SampleCollector::new(), &ReaderConfig::default());

    // Stop halfway through a frame, in the middle of a start code prefix
    let cut = data.len() / 2;
    let cut = (cut..data.len() - 3)
        .find(|&i| data[i..i + 3] == [0x00, 0x00, 0x01])
        .unwrap()
        + 2;
    reader.consume(&data[..cut], 0, true).unwrap();
    let before = reader.output_mut().take_packets().len();
    assert!(before > 0);

    reader.seek();
    reader.output_mut().clear_buffer();
    assert_eq!(reader.total_bytes_written(), 0);

    // Resume at the second group header
    let mut resume = group();
    resume.extend(picture(3, 1));
    resume.extend(picture(4, 2));
    resume.extend(start_code(0x00, &[0x00]));
    reader.consume(&resume, 1_000_000, true).unwrap();

    let packets = reader.output_mut().take_packets();
    assert_eq!(packets.len(), 2);
    let expected_first = [group(), picture(3, 1)].concat();
    assert_eq!(&packets[0].data[..], &expected_first[..]);
    assert!(packets[0].is_key);
    assert_eq!(&packets[1].data[..], &picture(4, 2)[..]);
    assert_eq!(packets[1].pts, Some(1_000_000));
    assert_eq!(reader.output().format().map(|f| f.width), Some(720));
}

#[test]
fn test_seek_before_format_restarts_collection() {
    let data = test_stream();
    let mut reader = H262Reader::with_config(RecordingOutput::default(), &ReaderConfig::default());
    reader.consume(&data[..8], 0, true).unwrap();
    reader.seek();
    reader.consume(&data[8..], 0, true).unwrap();
    assert!(!reader.has_output_format());

    reader.seek();
    reader.consume(&data, 0, true).unwrap();
    assert!(reader.has_output_format());
    assert_eq!(reader.output().formats.len(), 1);
}

#[test]
fn test_duplicate_empty_chunks() {
    let data = test_stream();
    let expected = run(&data, &[]);

    let mut reader = H262Reader::with_config(RecordingOutput::default(), &ReaderConfig::default());
    for chunk in data.chunks(7) {
        reader.consume(chunk, 0, true).unwrap();
        reader.consume(&[], 0, false).unwrap();
        reader.consume(&chunk[chunk.len()..], 0, false).unwrap();
    }
    let output = reader.into_output();
    assert_eq!(output.written, data.len() as u64);
    assert_eq!(output.samples, expected.samples);
}

#[test]
fn test_timestamps_follow_chunks() {
    let mut data = sequence_header();
    data.extend(group());
    data.extend(picture(0, 1));
    let first_len = data.len();
    let second = picture(1, 1);
    let third = start_code(0x00, &[0x02]);

    let mut reader = H262Reader::with_config(RecordingOutput::default(), &ReaderConfig::default());
    reader.consume(&data, 10, true).unwrap();
    reader.consume(&second, 20, true).unwrap();
    reader.consume(&third, 30, true).unwrap();

    let samples = reader.into_output().samples;
    assert_eq!(
        samples,
        vec![
            Sample { time_us: 10, key: true, start: 12, size: first_len - 12 },
            Sample { time_us: 20, key: false, start: first_len as u64, size: second.len() },
        ]
    );
}
