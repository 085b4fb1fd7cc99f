//! The HTTP-shaped response returned to the host server.

use std::fmt;

use crate::reply::TEXT_PLAIN;

/// The only statuses the dispatcher produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    NotFound,
    MethodNotAllowed,
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::NotFound => 404,
            Status::MethodNotAllowed => 405,
            Status::InternalServerError => 500,
        }
    }

    pub fn reason(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NotFound => "Not Found",
            Status::MethodNotAllowed => "Method Not Allowed",
            Status::InternalServerError => "Internal Server Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Status line, a single `Content-Type` header, and a body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    status: Status,
    content_type: &'static str,
    body: String,
}

impl Response {
    pub fn new(status: Status, content_type: &'static str, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type,
            body: body.into(),
        }
    }

    /// A plain-text response whose body is the status line itself
    /// (`404 Not Found`), optionally followed by a detail paragraph.
    pub(crate) fn from_status(status: Status, detail: Option<&str>) -> Self {
        let mut body = status.to_string();
        if let Some(detail) = detail {
            body.push_str("\n\n");
            body.push_str(detail);
        }
        Self::new(status, TEXT_PLAIN, body)
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// E.g. `"200 OK"`.
    pub fn status_line(&self) -> String {
        self.status.to_string()
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn headers(&self) -> [(&'static str, &'static str); 1] {
        [("Content-Type", self.content_type)]
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn into_body(self) -> String {
        self.body
    }
}
