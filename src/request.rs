//! What to poll and how to authenticate.

use std::fmt;
use std::str::FromStr;

use crate::SensorError;

/// The two kinds of broker resource the sensor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Queue,
    Exchange,
}

impl ResourceKind {
    /// The management API path segment, e.g. `queues`.
    pub fn api_segment(&self) -> &'static str {
        match self {
            ResourceKind::Queue => "queues",
            ResourceKind::Exchange => "exchanges",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.api_segment())
    }
}

impl FromStr for ResourceKind {
    type Err = SensorError;

    /// Accepts `queue`, `queues`, `exchange` and `exchanges` in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "queue" | "queues" => Ok(ResourceKind::Queue),
            "exchange" | "exchanges" => Ok(ResourceKind::Exchange),
            _ => Err(SensorError::UnsupportedKind(s.to_string())),
        }
    }
}

/// Basic auth credentials for the management API.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Parse a stored `user:password` string, splitting at the first colon.
    pub fn parse(stored: &str) -> Option<Self> {
        let (user, password) = stored.split_once(':')?;
        Some(Self::new(user, password))
    }
}

// Keep passwords out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// Everything needed for the single management API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceRequest {
    /// `host:port` of the management API.
    pub server_and_port: String,
    pub credentials: Credentials,
    pub kind: ResourceKind,
    /// Virtual host, either raw (`/`) or already escaped (`%2F`).
    pub vhost: String,
    /// Queue or exchange name.
    pub name: String,
}

impl ResourceRequest {
    pub fn new(
        server_and_port: impl Into<String>,
        credentials: Credentials,
        kind: ResourceKind,
        vhost: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            server_and_port: server_and_port.into(),
            credentials,
            kind,
            vhost: vhost.into(),
            name: name.into(),
        }
    }

    /// Base URL of the management API, ending in `/api/`.
    pub fn base_url(&self) -> String {
        format!("http://{}/api/", self.server_and_port)
    }

    /// Full URL of the resource, e.g.
    /// `http://localhost:15672/api/queues/%2F/orders`.
    ///
    /// A vhost or name of `.` or `..` is refused: URL parsers resolve those
    /// segments, and their `%2E` spellings, against the parent path, so the
    /// request would reach a different resource.
    pub fn url(&self) -> Result<String, SensorError> {
        Ok(format!(
            "{}{}/{}/{}",
            self.base_url(),
            self.kind.api_segment(),
            path_segment(&self.vhost)?,
            path_segment(&self.name)?
        ))
    }
}

fn path_segment(s: &str) -> Result<String, SensorError> {
    match s {
        "." | ".." => Err(SensorError::InvalidSegment(s.to_string())),
        _ => Ok(urlencoded(s)),
    }
}

// URL encode a path segment. `%` is left alone so pre-escaped input like
// `%2F` survives.
fn urlencoded(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            ' ' => out.push_str("%20"),
            _ => out.push(c),
        }
    }
    out
}
