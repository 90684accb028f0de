use crate::errors;
use crate::http::{parse_response, Response};
use std::io::{BufReader, Write};
use std::net::TcpStream;

/// Simple HTTP client
///
/// It sends HTTP requests from a set of parameters, then parses and yields the server response.
pub struct HttpClient {
    stream: TcpStream,
    /// Value of the Host header, the address as given by the caller
    host: String,
}

impl HttpClient {
    /// Create a new client connected to the given server.
    ///
    /// An error is returned if the connection cannot be made for whatever reason
    pub fn new(server: &str) -> errors::Result<Self> {
        Ok(HttpClient {
            stream: TcpStream::connect(server)?,
            host: server.to_string(),
        })
    }

    /// Send an HTTP request on the open connection.
    ///
    /// The server closes the connection after answering, so the client must be dropped once
    /// the response is retrieved.
    pub fn send(&mut self, method: &str, endpoint: &str, body: &str) -> errors::Result<Response> {
        tracing::debug!(method, endpoint, body_len = body.len(), "sending request");
        self.stream.write_all(
            format!(
                "{} {} HTTP/1.1\r\nHost: {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
                method,
                endpoint,
                self.host,
                body.len(),
                body
            )
            .as_bytes(),
        )?;
        self.stream.flush()?;

        let response = parse_response(BufReader::new(&mut self.stream))?;
        tracing::debug!(method, endpoint, status = ?response.status, "received response");
        Ok(response)
    }
}
