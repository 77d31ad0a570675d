//! HTTP agent construction and bounded response helpers.

use std::io::{self, Read, Write};
use std::time::Duration;

use crate::config::BackendSettings;

/// CSV uploads can be several megabytes on slow links.
const WRITE_TIMEOUT: Duration = Duration::from_secs(60);

/// Build an agent with the timeouts configured for the backend.
pub(crate) fn agent(settings: &BackendSettings) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(settings.connect_timeout())
        .timeout_read(settings.read_timeout())
        .timeout_write(WRITE_TIMEOUT)
        .build()
}

/// Read a response into memory, enforcing a maximum byte size.
pub(crate) fn read_response_bytes(
    response: ureq::Response,
    max_bytes: usize,
) -> Result<Vec<u8>, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut bytes = Vec::new();
    limited.read_to_end(&mut bytes)?;
    if bytes.len() > max_bytes {
        return Err(too_large(max_bytes));
    }
    Ok(bytes)
}

/// Stream a response to `writer`, enforcing a maximum byte size. Returns the
/// number of bytes written.
pub(crate) fn copy_response_to_writer(
    response: ureq::Response,
    writer: &mut impl Write,
    max_bytes: usize,
) -> Result<u64, io::Error> {
    check_content_length(&response, max_bytes)?;
    let reader = response.into_reader();
    let mut limited = reader.take(max_bytes as u64 + 1);
    let mut total = 0usize;
    let mut buf = [0u8; 64 * 1024];
    loop {
        let read = limited.read(&mut buf)?;
        if read == 0 {
            break;
        }
        total += read;
        if total > max_bytes {
            return Err(too_large(max_bytes));
        }
        writer.write_all(&buf[..read])?;
    }
    writer.flush()?;
    Ok(total as u64)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> Result<(), io::Error> {
    let Some(length) = response.header("Content-Length") else {
        return Ok(());
    };
    let Ok(length) = length.parse::<u64>() else {
        return Ok(());
    };
    if length > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response too large: {length} bytes"),
        ));
    }
    Ok(())
}

fn too_large(max_bytes: usize) -> io::Error {
    io::Error::new(
        io::ErrorKind::InvalidData,
        format!("Response exceeded {max_bytes} bytes"),
    )
}
