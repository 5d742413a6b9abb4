use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, AsyncReadExt, BufReader};

use crate::av::ElementaryStreamReader;
use crate::config::ReaderConfig;
use crate::error::{H262Error, Result};

/// Feeds a raw elementary stream from `reader` into `es_reader`.
///
/// Data is passed on in chunks of at most `chunk_size` bytes. `time_us` is
/// called with the stream offset of each chunk and returns the timestamp to
/// pass along with it. Returns the number of bytes consumed.
pub async fn feed_reader<R, E, F>(
    reader: &mut R,
    es_reader: &mut E,
    chunk_size: usize,
    mut time_us: F,
) -> Result<u64>
where
    R: AsyncRead + Unpin,
    E: ElementaryStreamReader + ?Sized,
    F: FnMut(u64) -> i64,
{
    if chunk_size == 0 {
        return Err(H262Error::Config("chunk_size must be greater than zero".into()));
    }

    let mut buf = vec![0u8; chunk_size];
    let mut total = 0u64;
    loop {
        let n = reader.read(&mut buf).await?;
        if n == 0 {
            break;
        }
        es_reader.consume(&buf[..n], time_us(total), true)?;
        es_reader.packet_finished();
        total += n as u64;
    }

    log::debug!("consumed {} bytes of elementary stream", total);
    Ok(total)
}

/// Feeds the elementary stream file at `path` into `es_reader`, using the
/// chunk size from `config`.
pub async fn feed_file<P, E, F>(
    path: P,
    es_reader: &mut E,
    config: &ReaderConfig,
    time_us: F,
) -> Result<u64>
where
    P: AsRef<Path>,
    E: ElementaryStreamReader + ?Sized,
    F: FnMut(u64) -> i64,
{
    let file = File::open(path).await?;
    let mut reader = BufReader::new(file);
    feed_reader(&mut reader, es_reader, config.chunk_size, time_us).await
}
