use crate::http::{parse_request, Request, Response};
use crate::{errors, threadpool::ThreadPool};
use std::io::{BufReader, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};

/// Turn an HTTP status code into its reason phrase
pub fn code_to_string(code: u16) -> &'static str {
    match code {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// This is the main server.
///
/// It listens for incomming connections on a TCP socket, parses the requests and dispatches them
/// to a handler. Whatever the handler produces is then converted in an HTTP response and sent
/// back to the client.
pub struct HttpServer {
    listener: TcpListener,
}

impl HttpServer {
    /// Create a new server listening on the given address
    pub fn new(addr: &str) -> errors::Result<Self> {
        Ok(HttpServer {
            listener: TcpListener::bind(addr)?,
        })
    }

    /// Address the server is actually bound to (useful when binding port 0)
    pub fn local_addr(&self) -> errors::Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Start the server
    ///
    /// Calls the handler with the incoming requests on a threadpool sized to the available
    /// parallelism. Blocks until the listener fails.
    pub fn serve<F>(&self, handler: F) -> errors::Result<()>
    where
        F: Fn(Request) -> Response + Send + Sync + 'static + Clone,
    {
        let threadpool = ThreadPool::new(
            std::thread::available_parallelism()
                .map(|x| x.into())
                .unwrap_or(4),
        );
        tracing::info!(addr = ?self.listener.local_addr().ok(), "serving requests");
        for stream in self.listener.incoming() {
            let mut stream = match stream {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::warn!(error = %err, "failed to accept connection");
                    continue;
                }
            };
            let handler = handler.clone();
            threadpool.execute(move || handle_stream(&mut stream, &handler))?;
        }
        Ok(())
    }

    /// Utility function for one-shot servers.
    ///
    /// This is mostly for testing, it listens to a single connection, processes the
    /// request and returns.
    pub fn serve_once<F>(&self, handler: F) -> errors::Result<()>
    where
        F: FnOnce(Request) -> Response,
    {
        let (mut stream, _) = self.listener.accept()?;
        handle_stream(&mut stream, handler);
        Ok(())
    }
}

/// Parse an HTTP request from a TCP stream, calls the handler and write back the answer
fn handle_stream<F>(stream: &mut TcpStream, handler: F)
where
    F: FnOnce(Request) -> Response,
{
    let buf_reader = BufReader::new(&mut *stream);
    let response = match parse_request(buf_reader) {
        Ok(req) => {
            let method = req.method.clone();
            let path = req.path.clone();
            let resp = handler(req);
            tracing::info!(%method, %path, status = ?resp.status, "handled request");
            resp
        }
        Err(err) => {
            tracing::warn!(error = %err, "failed to parse request");
            Response::error(400)
        }
    };
    respond(stream, response);
}

/// Writes an HTTP response to a stream
fn respond(stream: &mut TcpStream, resp: Response) {
    let code = resp.status.unwrap_or(500);
    let status = stream.write_all(
        format!(
            "HTTP/1.1 {} {}\r\nContent-Length: {}\r\nConnection: close\r\n{}\r\n{}",
            code,
            code_to_string(code),
            resp.body.len(),
            resp.headers
                .iter()
                .map(|(k, v)| format!("{}: {}\r\n", k, v))
                .collect::<Vec<_>>()
                .join(""),
            resp.body
        )
        .as_bytes(),
    );

    if let Err(err) = status {
        tracing::warn!(error = %err, "failed to respond");
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_code_to_string() {
        assert_eq!(code_to_string(201), "Created");
        assert_eq!(code_to_string(405), "Method Not Allowed");
        assert_eq!(code_to_string(418), "Unknown");
    }
}
