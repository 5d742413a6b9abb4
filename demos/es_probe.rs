use std::env;
use std::error::Error;

use h262io::av::{CodecData, SampleCollector};
use h262io::codec::h262::H262Reader;
use h262io::config::get_reader_config;
use h262io::format::feed_file;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let path = env::args()
        .nth(1)
        .ok_or("usage: es_probe <file.m2v>")?;
    let config = get_reader_config();

    let mut reader = H262Reader::with_config(SampleCollector::new(), &config);

    // Raw elementary streams carry no timestamps
    let total = feed_file(&path, &mut reader, &config, |_| 0).await?;
    println!("Read {} bytes from {}", total, path);

    let collector = reader.output_mut();
    match collector.format() {
        Some(format) => {
            println!(
                "Format: {} {}x{} par={:.4} fps={:?} bitrate={:?}",
                format.mime_type,
                format.width,
                format.height,
                format.pixel_width_height_ratio,
                format.frame_rate,
                format.bit_rate
            );
            println!(
                "Codec: {:?}, {} bytes of decoder configuration",
                format.codec_type(),
                format.extra_data().map_or(0, |data| data.len())
            );
        }
        None => {
            println!("No sequence header found");
            return Ok(());
        }
    }

    let packets = collector.take_packets();
    let keyframes = packets.iter().filter(|p| p.is_key).count();
    println!("Frames: {} ({} keyframes)", packets.len(), keyframes);
    for (i, packet) in packets.iter().enumerate().take(20) {
        println!(
            "Frame {}: size={} key={}",
            i,
            packet.len(),
            packet.is_key
        );
    }

    Ok(())
}
