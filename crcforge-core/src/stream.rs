//! The seekable byte-stream abstraction the engine and solver consume,
//! and the chunked forward/reverse scan that feeds a window of bytes
//! into a [`CrcEngine`].

use crate::engine::CrcEngine;
use crate::error::{CrcForgeError, Result};
use std::io::{Read, Seek, SeekFrom};

/// Default chunk size for streaming scans: 1 MiB.
pub const DEFAULT_CHUNK_SIZE: usize = 1024 * 1024;

/// A random-access byte source. Blanket-implemented for any `Read + Seek`,
/// so files, `Cursor<Vec<u8>>`, and other in-memory buffers all work
/// identically; the core never opens or paths a file itself.
pub trait Stream: Read + Seek {
    /// The total length of the stream in bytes.
    fn stream_len(&mut self) -> Result<u64> {
        let old_pos = self.stream_position()?;
        let len = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(old_pos))?;
        Ok(len)
    }
}

impl<T: Read + Seek + ?Sized> Stream for T {}

/// Fill `buf` completely from `stream`, the way `Read::read_exact` does,
/// except that running out of bytes before `buf` is full is reported as
/// [`CrcForgeError::ShortRead`] (naming how many bytes the declared
/// window promised versus how many the stream actually had) instead of
/// the generic `io::ErrorKind::UnexpectedEof` `read_exact` raises.
pub(crate) fn read_exact_or_short(stream: &mut (impl Read + ?Sized), buf: &mut [u8]) -> Result<()> {
    let expected = buf.len();
    let mut filled = 0;
    while filled < expected {
        let n = stream.read(&mut buf[filled..])?;
        if n == 0 {
            return Err(CrcForgeError::short_read(expected, filled));
        }
        filled += n;
    }
    Ok(())
}

/// Normalize an optional `[start, end)` window against the stream's
/// length: `None` start becomes 0, `None` end becomes the stream length,
/// and an inverted pair is swapped.
fn normalize_window(
    start: Option<u64>,
    end: Option<u64>,
    stream: &mut (impl Stream + ?Sized),
) -> Result<(u64, u64)> {
    let len = Stream::stream_len(stream)?;
    let start = start.unwrap_or(0);
    let end = end.unwrap_or(len);
    Ok(if start > end { (end, start) } else { (start, end) })
}

/// Forward-scan `[start, end)` of `stream` into `engine`, in chunks of
/// at most `chunk_size` bytes.
pub fn consume(
    engine: &mut CrcEngine,
    stream: &mut (impl Stream + ?Sized),
    start: Option<u64>,
    end: Option<u64>,
    chunk_size: usize,
) -> Result<()> {
    let (start, end) = normalize_window(start, end, stream)?;
    if start == end {
        return Ok(());
    }

    stream.seek(SeekFrom::Start(start))?;
    let mut remaining = end - start;
    let mut buf = vec![0u8; chunk_size.min(remaining as usize).max(1)];
    while remaining > 0 {
        let this_chunk = chunk_size.min(remaining as usize);
        buf.resize(this_chunk, 0);
        read_exact_or_short(stream, &mut buf)?;
        engine.update(&buf);
        remaining -= this_chunk as u64;
    }
    Ok(())
}

/// Reverse-scan `[start, end)` of `stream` into `engine`: chunks are
/// visited back to front, but bytes within each chunk are read and fed
/// to the engine in their natural forward order — the reverse-update
/// table handles the algebraic direction.
pub fn consume_reverse(
    engine: &mut CrcEngine,
    stream: &mut (impl Stream + ?Sized),
    start: Option<u64>,
    end: Option<u64>,
    chunk_size: usize,
) -> Result<()> {
    let (start, end) = normalize_window(start, end, stream)?;
    if start == end {
        return Ok(());
    }

    let mut remaining = end - start;
    let mut buf = vec![0u8; chunk_size.min(remaining as usize).max(1)];
    while remaining > 0 {
        let this_chunk = chunk_size.min(remaining as usize);
        buf.resize(this_chunk, 0);
        stream.seek(SeekFrom::Start(start + remaining - this_chunk as u64))?;
        read_exact_or_short(stream, &mut buf)?;
        engine.update_reverse(&buf);
        remaining -= this_chunk as u64;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::CRC32;
    use std::io::{self, Cursor};

    fn digest_of(data: &[u8]) -> u64 {
        let mut e = CrcEngine::new(CRC32).unwrap();
        e.update(data);
        e.digest()
    }

    /// A stream that reports a length longer than the bytes it can
    /// actually deliver, so a declared `[start, end)` window runs past
    /// what `read` can supply — the contract violation `ShortRead`
    /// exists to surface.
    struct TruncatedStream {
        data: Vec<u8>,
        pos: u64,
        reported_len: u64,
    }

    impl Read for TruncatedStream {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.pos as usize >= self.data.len() {
                return Ok(0);
            }
            let n = (&self.data[self.pos as usize..]).read(buf)?;
            self.pos += n as u64;
            Ok(n)
        }
    }

    impl Seek for TruncatedStream {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.pos = match pos {
                SeekFrom::Start(p) => p,
                SeekFrom::End(offset) => (self.reported_len as i64 + offset) as u64,
                SeekFrom::Current(offset) => (self.pos as i64 + offset) as u64,
            };
            Ok(self.pos)
        }
    }

    #[test]
    fn test_consume_reports_short_read_when_stream_runs_dry() {
        let mut stream = TruncatedStream {
            data: b"only seven".to_vec(),
            pos: 0,
            reported_len: 20,
        };
        let mut engine = CrcEngine::new(CRC32).unwrap();
        let err = consume(&mut engine, &mut stream, None, None, DEFAULT_CHUNK_SIZE).unwrap_err();
        assert!(matches!(
            err,
            CrcForgeError::ShortRead { expected: 20, actual: 10 }
        ));
    }

    #[test]
    fn test_consume_reverse_reports_short_read_when_stream_runs_dry() {
        let mut stream = TruncatedStream {
            data: b"only seven".to_vec(),
            pos: 0,
            reported_len: 20,
        };
        let mut engine = CrcEngine::new(CRC32).unwrap();
        let err = consume_reverse(&mut engine, &mut stream, None, None, 4).unwrap_err();
        assert!(matches!(err, CrcForgeError::ShortRead { .. }));
    }

    #[test]
    fn test_consume_matches_direct_update_for_every_window() {
        let data = b"123456789";
        for start in [None, Some(1), Some(2), Some(8), Some(9)] {
            for end in [None, Some(1), Some(2), Some(8), Some(9)] {
                let mut cursor = Cursor::new(data.to_vec());
                let mut engine = CrcEngine::new(CRC32).unwrap();
                consume(&mut engine, &mut cursor, start, end, DEFAULT_CHUNK_SIZE).unwrap();

                let (s, e) = {
                    let s = start.unwrap_or(0) as usize;
                    let e = end.unwrap_or(data.len() as u64) as usize;
                    if s > e { (e, s) } else { (s, e) }
                };
                assert_eq!(engine.digest(), digest_of(&data[s..e]), "start={start:?} end={end:?}");
            }
        }
    }

    #[test]
    fn test_consume_chunked_matches_whole() {
        let data: Vec<u8> = (0u32..5000).map(|i| i as u8).collect();
        let mut cursor = Cursor::new(data.clone());
        for chunk_size in [1, 7, 64, 4096] {
            cursor.set_position(0);
            let mut engine = CrcEngine::new(CRC32).unwrap();
            consume(&mut engine, &mut cursor, None, None, chunk_size).unwrap();
            assert_eq!(engine.digest(), digest_of(&data), "chunk_size={chunk_size}");
        }
    }

    #[test]
    fn test_consume_reverse_then_reverse_restores_forward_scan() {
        let data = b"0123456789ABCDEF";
        let mut cursor = Cursor::new(data.to_vec());

        let mut engine = CrcEngine::new(CRC32).unwrap();
        consume(&mut engine, &mut cursor, None, None, 3).unwrap();
        let forward_raw = engine.raw_value();

        engine.reset(Some(forward_raw));
        consume_reverse(&mut engine, &mut cursor, None, None, 3).unwrap();
        assert_eq!(engine.raw_value(), CRC32.initial_xor);
    }
}
