use std::cell::RefCell;
use std::collections::VecDeque;
use std::io::{self, Cursor, Read};

use super::{FetchError, HttpResponse, HttpSource};

/// Hands out canned responses in order; connection failure once drained.
pub struct MockSource {
    responses: RefCell<VecDeque<Result<HttpResponse, FetchError>>>,
}

impl HttpSource for MockSource {
    fn get(&self, _url: &str) -> Result<HttpResponse, FetchError> {
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or(Err(FetchError::Connection))
    }
}

impl MockSource {
    pub fn new(responses: Vec<Result<HttpResponse, FetchError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
        }
    }

    pub fn response(content_type: &str, body: Vec<u8>) -> HttpResponse {
        HttpResponse {
            content_type: Some(content_type.to_string()),
            content_length: Some(body.len() as u64),
            body: Box::new(Cursor::new(body)),
        }
    }

    pub fn image(content_type: &str, body: Vec<u8>) -> Result<HttpResponse, FetchError> {
        Ok(Self::response(content_type, body))
    }

    /// Serves `prefix`, then fails as if the peer reset the connection.
    pub fn broken(content_type: &str, prefix: Vec<u8>) -> Result<HttpResponse, FetchError> {
        let declared = prefix.len() as u64 * 2;
        Ok(HttpResponse {
            content_type: Some(content_type.to_string()),
            content_length: Some(declared),
            body: Box::new(Cursor::new(prefix).chain(ResetReader)),
        })
    }
}

struct ResetReader;

impl Read for ResetReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::ConnectionReset,
            "connection reset by peer",
        ))
    }
}
