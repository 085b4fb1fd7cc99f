//! The normalized request handed over by the host server.

use std::collections::BTreeMap;

use serde::Serialize;

/// Parsed query-string arguments: every key maps to all of its values, in
/// order of appearance. Blank values are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QueryArgs(BTreeMap<String, Vec<String>>);

impl QueryArgs {
    /// Parse a raw (`a=1&b=2&a=3`) query string. A leading `?` is ignored.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let mut args: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            if value.is_empty() {
                continue;
            }
            args.entry(key.into_owned())
                .or_default()
                .push(value.into_owned());
        }
        Self(args)
    }

    /// The first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .get(key)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values for `key`; empty when absent.
    pub fn get_all(&self, key: &str) -> &[String] {
        self.0.get(key).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn as_map(&self) -> &BTreeMap<String, Vec<String>> {
        &self.0
    }
}

/// A request as delivered by the transport: method, scheme, `Host` header,
/// path, and query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: String,
    scheme: String,
    host: String,
    path: String,
    raw_query: String,
    args: QueryArgs,
}

impl Request {
    /// Build a request from its transport-level parts.
    ///
    /// The method is upper-cased; `query` is the raw query string without
    /// the leading `?`.
    pub fn new(method: &str, scheme: &str, host: &str, path: &str, query: &str) -> Self {
        let raw_query = query.strip_prefix('?').unwrap_or(query).to_string();
        Self {
            method: method.to_ascii_uppercase(),
            scheme: scheme.to_string(),
            host: host.to_string(),
            path: path.to_string(),
            args: QueryArgs::parse(&raw_query),
            raw_query,
        }
    }

    /// A request for `target` (path plus optional `?query`) against
    /// `http://localhost`.
    pub fn with_method(method: &str, target: &str) -> Self {
        let (path, query) = target.split_once('?').unwrap_or((target, ""));
        Self::new(method, "http", "localhost", path, query)
    }

    /// Shorthand for a `GET` of `target`.
    pub fn get(target: &str) -> Self {
        Self::with_method("GET", target)
    }

    /// Replace the scheme and host.
    pub fn at(mut self, scheme: &str, host: &str) -> Self {
        self.scheme = scheme.to_string();
        self.host = host.to_string();
        self
    }

    pub fn method(&self) -> &str {
        &self.method
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn raw_query(&self) -> &str {
        &self.raw_query
    }

    pub fn args(&self) -> &QueryArgs {
        &self.args
    }

    /// The full URL (`scheme://host/path?query`), for logging only.
    pub fn url(&self) -> String {
        let mut url = format!("{}://{}{}", self.scheme, self.host, self.path);
        if !self.raw_query.is_empty() {
            url.push('?');
            url.push_str(&self.raw_query);
        }
        url
    }
}
