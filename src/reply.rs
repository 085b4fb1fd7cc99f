//! Values returned by operation handlers.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use serde_json::Value;

use crate::error::HandlerError;

pub const TEXT_PLAIN: &str = "text/plain";
pub const APPLICATION_JSON: &str = "application/json";

/// The successful result of an operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Sent as `text/plain`.
    Text(String),
    /// Sent as `application/json`, pretty-printed with 4-space indentation.
    Json(Value),
}

impl Reply {
    pub fn text(body: impl Into<String>) -> Self {
        Reply::Text(body.into())
    }

    /// Serialize any value into a JSON reply.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, HandlerError> {
        Ok(Reply::Json(serde_json::to_value(value)?))
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Reply::Text(_) => TEXT_PLAIN,
            Reply::Json(_) => APPLICATION_JSON,
        }
    }

    /// Produce the response body.
    pub fn render(&self) -> Result<String, HandlerError> {
        match self {
            Reply::Text(body) => Ok(body.clone()),
            Reply::Json(value) => to_pretty_json(value),
        }
    }
}

/// JSON with 4-space indentation and `": "` key separators.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String, HandlerError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser)?;
    String::from_utf8(buf).map_err(|e| HandlerError::Failed(e.to_string()))
}

/// Conversion from a handler's return value into a `Reply`.
///
/// Implemented for strings, `()`, JSON values, `Reply` itself, and any
/// `Result` whose error converts into `HandlerError`, so handlers can use `?`.
pub trait IntoReply {
    fn into_reply(self) -> Result<Reply, HandlerError>;
}

impl IntoReply for Reply {
    fn into_reply(self) -> Result<Reply, HandlerError> {
        Ok(self)
    }
}

impl IntoReply for String {
    fn into_reply(self) -> Result<Reply, HandlerError> {
        Ok(Reply::Text(self))
    }
}

impl IntoReply for &str {
    fn into_reply(self) -> Result<Reply, HandlerError> {
        Ok(Reply::Text(self.to_string()))
    }
}

impl IntoReply for () {
    fn into_reply(self) -> Result<Reply, HandlerError> {
        Ok(Reply::Text(String::new()))
    }
}

impl IntoReply for Value {
    fn into_reply(self) -> Result<Reply, HandlerError> {
        Ok(Reply::Json(self))
    }
}

impl<T, E> IntoReply for Result<T, E>
where
    T: IntoReply,
    E: Into<HandlerError>,
{
    fn into_reply(self) -> Result<Reply, HandlerError> {
        self.map_err(Into::into)?.into_reply()
    }
}
