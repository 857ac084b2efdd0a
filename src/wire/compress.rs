//! Compression at the wire boundary, plus the per-request random token.
//!
//! Requests go out as raw DEFLATE at maximum level; responses come back
//! gzip-wrapped. The asymmetry is the service's, not ours.

use std::io::{Read, Write};

use flate2::read::GzDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;
use rand::RngCore;

use crate::error::{Error, Result};

/// Compress an outgoing frame with raw DEFLATE at maximum level.
pub fn compress(frame: &[u8]) -> Vec<u8> {
    let mut encoder = DeflateEncoder::new(Vec::new(), Compression::best());
    // Writing into a Vec cannot produce an I/O error.
    encoder
        .write_all(frame)
        .and_then(|_| encoder.finish())
        .expect("in-memory deflate cannot fail")
}

/// Decompress a gzip response body and decode it as UTF-8 text.
pub fn decompress(body: &[u8]) -> Result<String> {
    let mut decoder = GzDecoder::new(body);
    let mut buf = Vec::new();
    decoder
        .read_to_end(&mut buf)
        .map_err(|e| Error::Decode(e.to_string()))?;
    String::from_utf8(buf).map_err(|e| Error::Decode(e.to_string()))
}

/// A random lowercase-hex token covering at least `min_bits` bits.
///
/// Sent as the final path segment of the run URL; the service echoes a token
/// back to delimit the response sections.
pub fn generate_random_bits(min_bits: usize) -> String {
    let mut bytes = vec![0u8; (min_bits + 7) / 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
