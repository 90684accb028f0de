use crate::errors::Result;
use crate::http::{content_length, owned_headers, read_message, WithBody};
use std::io::{BufReader, Read};

/// Represents an HTTP request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    /// The HTTP method used in the request
    pub method: String,
    /// The full path of the request
    pub path: String,
    /// Headers of the request
    pub headers: Vec<(String, String)>,
    /// Body of the request
    pub body: String,
}

impl Request {
    /// Create a new request from scratch
    pub fn new(method: &str, path: &str, headers: Vec<(String, String)>, body: String) -> Request {
        Request {
            method: method.to_string(),
            path: path.to_string(),
            headers,
            body,
        }
    }
    /// Create a new GET request for the given path, with an empty body
    pub fn get(path: &str) -> Request {
        Request::new("GET", path, vec![], String::new())
    }
    /// Create a new POST request for the given path, with the given body
    pub fn post(path: &str, body: String) -> Request {
        Request::new("POST", path, vec![], body)
    }
    /// Create a new PUT request for the given path, with the given body
    pub fn put(path: &str, body: String) -> Request {
        Request::new("PUT", path, vec![], body)
    }
    /// Create a new DELETE request for the given path, with an empty body
    pub fn delete(path: &str) -> Request {
        Request::new("DELETE", path, vec![], String::new())
    }

    /// Value of the first header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Path without its query string
    pub fn route_path(&self) -> &str {
        self.path.split('?').next().unwrap_or("/")
    }
}

impl WithBody for Request {
    fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

/// Parse an HTTP request from a byte stream
pub fn parse_request<T>(buf_reader: BufReader<T>) -> Result<Request>
where
    T: Read,
{
    read_message(buf_reader, |data| {
        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut req = httparse::Request::new(&mut headers);
        match req.parse(data)? {
            httparse::Status::Complete(parsed_len) => Ok(Some((
                parsed_len,
                content_length(req.headers)?,
                Request {
                    method: req.method.unwrap_or("GET").to_string(),
                    path: req.path.unwrap_or("/").to_string(),
                    headers: owned_headers(req.headers),
                    body: String::new(),
                },
            ))),
            httparse::Status::Partial => Ok(None),
        }
    })
}
