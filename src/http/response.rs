use std::fmt::Write as _;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    Ok,
    Found,
    BadRequest,
    NotFound,
    PayloadTooLarge,
    InternalServerError,
}

impl StatusCode {
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Found => 302,
            StatusCode::BadRequest => 400,
            StatusCode::NotFound => 404,
            StatusCode::PayloadTooLarge => 413,
            StatusCode::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::PayloadTooLarge => "Payload Too Large",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

const HTML: &str = "text/html; charset=utf-8";
const TEXT: &str = "text/plain; charset=utf-8";

/// An HTTP response, built by the handlers and serialized by the server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: StatusCode,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: StatusCode, content_type: &str, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: vec![("Content-Type".to_string(), content_type.to_string())],
            body: body.into(),
        }
    }

    /// 200 with a rendered page
    pub fn html(body: impl Into<Vec<u8>>) -> Self {
        Self::new(StatusCode::Ok, HTML, body)
    }

    /// 302 to `location`
    pub fn redirect(location: &str) -> Self {
        let body = format!("<a href=\"{}\">Found</a>.\n", location);
        let mut response = Self::new(StatusCode::Found, HTML, body);
        response
            .headers
            .push(("Location".to_string(), location.to_string()));
        response
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NotFound, TEXT, "404 page not found\n")
    }

    pub fn bad_request(message: &str) -> Self {
        Self::new(StatusCode::BadRequest, TEXT, format!("{}\n", message))
    }

    pub fn payload_too_large(message: &str) -> Self {
        Self::new(StatusCode::PayloadTooLarge, TEXT, format!("{}\n", message))
    }

    /// 500 carrying the error text
    pub fn internal_error(message: &str) -> Self {
        Self::new(StatusCode::InternalServerError, TEXT, format!("{}\n", message))
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Serialize as an HTTP/1.1 response
    pub fn to_bytes(&self, keep_alive: bool) -> Vec<u8> {
        let mut bytes = self.head_bytes(keep_alive);
        bytes.extend_from_slice(&self.body);
        bytes
    }

    /// Status line and headers only, as sent for a `HEAD` request.
    /// `Content-Length` still describes the body a `GET` would carry.
    pub fn head_bytes(&self, keep_alive: bool) -> Vec<u8> {
        let mut head = String::with_capacity(128);
        // Writing into a String cannot fail
        let _ = write!(
            head,
            "HTTP/1.1 {} {}\r\n",
            self.status.as_u16(),
            self.status.reason()
        );
        for (name, value) in &self.headers {
            let _ = write!(head, "{}: {}\r\n", name, value);
        }
        let _ = write!(head, "Content-Length: {}\r\n", self.body.len());
        let connection = if keep_alive { "keep-alive" } else { "close" };
        let _ = write!(head, "Connection: {}\r\n\r\n", connection);
        head.into_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect() {
        let response = Response::redirect("/edit/Missing");
        assert_eq!(response.status, StatusCode::Found);
        assert_eq!(response.header("location"), Some("/edit/Missing"));
    }

    #[test]
    fn test_internal_error_carries_message() {
        let response = Response::internal_error("disk full");
        assert_eq!(response.status.as_u16(), 500);
        assert_eq!(response.body, b"disk full\n");
    }

    #[test]
    fn test_to_bytes() {
        let bytes = Response::html("<p>hi</p>").to_bytes(false);
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/html; charset=utf-8\r\n"));
        assert!(text.contains("Content-Length: 9\r\n"));
        assert!(text.contains("Connection: close\r\n"));
        assert!(text.ends_with("\r\n\r\n<p>hi</p>"));
    }

    #[test]
    fn test_head_bytes_keep_length_without_body() {
        let response = Response::html("<p>hi</p>");
        let text = String::from_utf8(response.head_bytes(true)).unwrap();
        assert!(text.contains("Content-Length: 9\r\n"));
        assert!(text.contains("Connection: keep-alive\r\n"));
        assert!(text.ends_with("\r\n\r\n"));
        assert!(!text.contains("<p>hi</p>"));
    }
}
