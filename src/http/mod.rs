pub mod server;
pub use server::*;

pub mod request;
pub use request::*;

pub mod response;
pub use response::*;

pub mod client;
pub use client::*;

use crate::errors::{Error, Result};
use std::io::{BufReader, Read};

/// Head of an HTTP message as decoded by httparse: total head length in bytes, announced body
/// length, and the owned message built from it.
pub(crate) type ParsedHead<M> = (usize, usize, M);

/// Read a full HTTP message (head and body) from a byte stream.
///
/// `parse_head` is called on the accumulated bytes after every read. It returns `None` while
/// the head is still partial. The body is then read until `Content-Length` bytes are available.
pub(crate) fn read_message<T, M, F>(mut buf_reader: BufReader<T>, mut parse_head: F) -> Result<M>
where
    T: Read,
    F: FnMut(&[u8]) -> Result<Option<ParsedHead<M>>>,
    M: WithBody,
{
    let mut buf = [0; 4096];
    let mut data: Vec<u8> = Vec::new();

    let (head_len, body_len, mut message) = loop {
        let bytes_read = buf_reader.read(&mut buf)?;
        if bytes_read == 0 {
            return Err(Error::ConnectionReset);
        }
        data.extend_from_slice(&buf[..bytes_read]);

        if let Some(head) = parse_head(&data)? {
            break head;
        }
    };

    // Anything past the announced body is dropped: the server closes the connection after
    // each response, so there is never a pipelined message behind it.
    while data.len() - head_len < body_len {
        let bytes_read = buf_reader.read(&mut buf)?;
        if bytes_read == 0 {
            return Err(Error::ConnectionReset);
        }
        data.extend_from_slice(&buf[..bytes_read]);
    }

    message.set_body(String::from_utf8_lossy(&data[head_len..head_len + body_len]).to_string());
    Ok(message)
}

/// Messages whose body is filled in after the head is parsed
pub(crate) trait WithBody {
    fn set_body(&mut self, body: String);
}

/// Length of the body announced by the headers, 0 when there is no Content-Length
///
/// Chunked bodies are not supported and are rejected, as is a Content-Length that is not a
/// number.
pub(crate) fn content_length(headers: &[httparse::Header]) -> Result<usize> {
    let chunked = headers
        .iter()
        .filter(|h| h.name.eq_ignore_ascii_case("Transfer-Encoding"))
        .any(|h| String::from_utf8_lossy(h.value).to_ascii_lowercase().contains("chunked"));
    if chunked {
        return Err(Error::BadRequest(
            "Transfer-Encoding: chunked is not supported".to_string(),
        ));
    }

    match headers
        .iter()
        .find(|h| h.name.eq_ignore_ascii_case("Content-Length"))
    {
        None => Ok(0),
        Some(length) => {
            let value = String::from_utf8_lossy(length.value);
            value.trim().parse::<usize>().map_err(|_| {
                Error::BadRequest(format!("Invalid Content-Length '{}'", value))
            })
        }
    }
}

/// Copy parsed headers out of the read buffer
pub(crate) fn owned_headers(headers: &[httparse::Header]) -> Vec<(String, String)> {
    headers
        .iter()
        .map(|h| {
            (
                h.name.to_string(),
                String::from_utf8_lossy(h.value).to_string(),
            )
        })
        .collect()
}
