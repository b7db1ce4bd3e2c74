use super::form;

/// A parsed HTTP request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub method: String,
    /// Percent-decoded path, without the query string
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: Option<String>,
    pub version: Version,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    Http10,
    Http11,
}

impl Request {
    /// Build a request from a method and a request target such as `/view/Home?x=1`
    pub fn new(method: &str, target: &str) -> Self {
        let (raw_path, query) = match target.split_once('?') {
            Some((path, query)) => (path, Some(query.to_string())),
            None => (target, None),
        };
        Self {
            method: method.to_string(),
            path: form::percent_decode(raw_path, false),
            query,
            version: Version::Http11,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn is_form_body(&self) -> bool {
        self.header("content-type")
            .map(|ct| {
                ct.split(';')
                    .next()
                    .unwrap_or("")
                    .trim()
                    .eq_ignore_ascii_case("application/x-www-form-urlencoded")
            })
            .unwrap_or(false)
    }

    /// Look up a form field in the urlencoded body, then in the query string.
    /// The value is returned as decoded bytes, without any UTF-8 conversion.
    pub fn form_value(&self, name: &str) -> Option<Vec<u8>> {
        if self.is_form_body() {
            if let Some(value) = form::form_value(&self.body, name) {
                return Some(value);
            }
        }
        self.query
            .as_deref()
            .and_then(|query| form::form_value(query.as_bytes(), name))
    }

    /// `HEAD` responses carry headers only
    pub fn is_head(&self) -> bool {
        self.method == "HEAD"
    }

    /// Whether the connection should stay open after answering this request
    pub fn keep_alive(&self) -> bool {
        let connection = self.header("connection");
        match self.version {
            Version::Http11 => !connection.is_some_and(|c| c.eq_ignore_ascii_case("close")),
            Version::Http10 => connection.is_some_and(|c| c.eq_ignore_ascii_case("keep-alive")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_split() {
        let req = Request::new("GET", "/view/Home?x=1&y=2");
        assert_eq!(req.path, "/view/Home");
        assert_eq!(req.query.as_deref(), Some("x=1&y=2"));

        let req = Request::new("GET", "/view/Ho%6De");
        assert_eq!(req.path, "/view/Home");
        assert_eq!(req.query, None);
    }

    #[test]
    fn test_form_value_from_body() {
        let req = Request::new("POST", "/save/Alpha")
            .with_header("Content-Type", "application/x-www-form-urlencoded; charset=utf-8")
            .with_body("body=hello");
        assert_eq!(req.form_value("body").as_deref(), Some(&b"hello"[..]));
    }

    #[test]
    fn test_form_value_body_needs_form_content_type() {
        let req = Request::new("POST", "/save/Alpha")
            .with_header("Content-Type", "text/plain")
            .with_body("body=hello");
        assert_eq!(req.form_value("body"), None);
    }

    #[test]
    fn test_form_value_falls_back_to_query() {
        let req = Request::new("POST", "/save/Alpha?body=from+query")
            .with_header("content-type", "application/x-www-form-urlencoded")
            .with_body("other=1");
        assert_eq!(req.form_value("body").as_deref(), Some(&b"from query"[..]));
    }

    #[test]
    fn test_form_value_keeps_non_utf8_bytes() {
        let req = Request::new("POST", "/save/Cafe")
            .with_header("Content-Type", "application/x-www-form-urlencoded")
            .with_body(&b"body=caf%E9&raw=\xff"[..]);
        assert_eq!(req.form_value("body"), Some(b"caf\xe9".to_vec()));
        assert_eq!(req.form_value("raw"), Some(vec![0xff]));
    }

    #[test]
    fn test_keep_alive() {
        let req = Request::new("GET", "/");
        assert!(req.keep_alive());
        assert!(!req.clone().with_header("Connection", "Close").keep_alive());

        let mut old = Request::new("GET", "/");
        old.version = Version::Http10;
        assert!(!old.keep_alive());
        assert!(old.with_header("Connection", "keep-alive").keep_alive());
    }
}
