//! Network font retrieval

use crate::error::{LoadError, Result};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use std::sync::OnceLock;

/// Opens a byte stream for a font URL.
///
/// The cache only ever calls this from a worker thread, so implementations
/// are free to block.
pub trait FontFetcher: Send + Sync {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>>;
}

/// Plain streaming GET over reqwest's blocking client
#[derive(Default)]
pub struct HttpFetcher {
    // Built on first use so it is created on a worker thread, not inside
    // whatever async context constructed the cache
    client: OnceLock<reqwest::blocking::Client>,
}

impl HttpFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self) -> &reqwest::blocking::Client {
        self.client.get_or_init(reqwest::blocking::Client::new)
    }
}

impl FontFetcher for HttpFetcher {
    fn open(&self, url: &str) -> Result<Box<dyn Read + Send>> {
        let response = self
            .client()
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .map_err(|e| LoadError::Http {
                url: url.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Box::new(response))
    }
}

/// Copy `reader` into a new file at `dest` using a fixed-size buffer,
/// writing only the bytes each read returned. Returns the byte count.
pub fn stream_to_file(
    reader: &mut dyn Read,
    dest: &Path,
    buffer_size: usize,
) -> std::io::Result<u64> {
    let mut file = File::create(dest)?;
    let mut buffer = vec![0u8; buffer_size.max(1)];
    let mut total = 0u64;
    loop {
        let read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        file.write_all(&buffer[..read])?;
        total += read as u64;
    }
    file.flush()?;
    Ok(total)
}
