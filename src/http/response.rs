use std::io::{BufReader, Read};

use crate::errors::{Error, Result};
use crate::http::{content_length, owned_headers, read_message, WithBody};

/// An HTTP response, either built by the server or parsed by the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code of the response. Optional because that's what httparse returns, but it
    /// shouldn't happen in practice since we control the responses.
    pub status: Option<u16>,
    /// Headers for the response. Content-Length is added on serialization.
    pub headers: Vec<(String, String)>,
    /// Body of the response. Empty string for an empty body
    pub body: String,
}

impl Response {
    /// Creates an empty OK response (204)
    pub fn ok() -> Response {
        Response {
            status: Some(204),
            headers: vec![],
            body: String::new(),
        }
    }

    /// Creates an OK (200) response with the given body
    pub fn ok_with_body(str: String) -> Response {
        Response {
            status: Some(200),
            headers: vec![],
            body: str,
        }
    }

    /// Creates an OK (200) response with a JSON body
    pub fn json(body: String) -> Response {
        Self::ok_with_body(body).with_header("Content-Type", "application/json")
    }

    /// Creates a Created (201) response with a JSON body
    pub fn created(body: String) -> Response {
        Response {
            status: Some(201),
            ..Self::json(body)
        }
    }

    /// Creates an error response with an empty body.
    ///
    /// The code must be in the 4xx or 5xx range.
    pub fn error(code: u16) -> Response {
        assert!((400..600).contains(&code), "Invalid error code");
        Response {
            status: Some(code),
            headers: vec![],
            body: String::new(),
        }
    }

    /// Creates an Internal Server Error (500) response.
    pub fn internal_server_error() -> Response {
        Self::error(500)
    }

    /// Add a header to the response
    pub fn with_header(mut self, name: &str, value: &str) -> Response {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// True for 2xx statuses
    pub fn is_success(&self) -> bool {
        matches!(self.status, Some(code) if (200..300).contains(&code))
    }

    /// Turn non-2xx responses into errors, keeping the response otherwise
    pub fn error_for_status(self) -> Result<Response> {
        let status = self.status;
        match status {
            None => Err(Error::NoResponse),
            Some(code) if (200..300).contains(&code) => Ok(self),
            Some(code) => Err(Error::Status(code)),
        }
    }
}

impl WithBody for Response {
    fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

/// Parse an HTTP response from a byte stream
pub fn parse_response<T>(buf_reader: BufReader<T>) -> Result<Response>
where
    T: Read,
{
    read_message(buf_reader, |data| {
        let mut headers = [httparse::EMPTY_HEADER; 64];
        let mut resp = httparse::Response::new(&mut headers);
        match resp.parse(data)? {
            httparse::Status::Complete(parsed_len) => Ok(Some((
                parsed_len,
                content_length(resp.headers)?,
                Response {
                    status: resp.code,
                    headers: owned_headers(resp.headers),
                    body: String::new(),
                },
            ))),
            httparse::Status::Partial => Ok(None),
        }
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_parse_simple_response() {
        let resp_str = b"HTTP/1.1 204 No Content\r\nContent-Length: 0\r\n\r\n";
        let parsed_resp = parse_response(BufReader::new(&resp_str[..])).unwrap();

        assert_eq!(parsed_resp.status, Some(204));
        assert_eq!(parsed_resp.headers.len(), 1);
        assert_eq!(parsed_resp.body, "");
        assert!(parsed_resp.is_success());
    }

    #[test]
    fn test_parse_response_with_body() {
        let body = r#"[{"id":1,"name":"Rice","description":"","price":"4.50","available":true,"image":""}]"#;
        let resp_str = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        let parsed_resp = parse_response(BufReader::new(resp_str.as_bytes())).unwrap();

        assert_eq!(parsed_resp.status, Some(200));
        assert_eq!(parsed_resp.headers.len(), 2);
        assert_eq!(parsed_resp.body, body);
    }

    #[test]
    fn test_parse_response_with_large_body() {
        let mut rng = rand::thread_rng();
        let body: String = (0..10000)
            .map(|_| rng.gen_range(b'a'..=b'z') as char)
            .collect();

        let resp_str = format!(
            "HTTP/1.1 200 OK\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        );

        let parsed_resp = parse_response(BufReader::new(resp_str.as_bytes())).unwrap();

        assert_eq!(parsed_resp.headers.len(), 1);
        assert_eq!(parsed_resp.body, body);
    }

    #[test]
    fn test_parse_response_rejects_chunked_body() {
        let resp_str = b"HTTP/1.1 200 OK\r\nTransfer-Encoding: chunked\r\n\r\n2\r\n[]\r\n0\r\n\r\n";
        let parsed_resp = parse_response(BufReader::new(&resp_str[..]));
        assert!(matches!(parsed_resp, Err(Error::BadRequest(_))));
    }

    #[test]
    fn test_parse_response_rejects_invalid_content_length() {
        let resp_str = b"HTTP/1.1 200 OK\r\nContent-Length: 2x\r\n\r\n[]";
        let parsed_resp = parse_response(BufReader::new(&resp_str[..]));
        assert!(matches!(parsed_resp, Err(Error::BadRequest(_))));
    }

    #[test]
    fn test_error_for_status() {
        assert!(Response::ok().error_for_status().is_ok());
        assert!(Response::created("{}".to_string()).error_for_status().is_ok());
        assert!(matches!(
            Response::error(404).error_for_status(),
            Err(Error::Status(404))
        ));

        let no_status = Response {
            status: None,
            ..Response::ok()
        };
        assert!(matches!(no_status.error_for_status(), Err(Error::NoResponse)));
    }

    #[test]
    fn test_created_is_json() {
        let resp = Response::created("{}".to_string());
        assert_eq!(resp.status, Some(201));
        assert_eq!(
            resp.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }
}
