use std::fmt;

const PROTOCOL: &str = "http";

/// Resolved base address of a running server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ServerAddress {
    host: String,
    port: u16,
    url: String,
}

impl ServerAddress {
    pub fn new(host: &str, port: u16) -> Self {
        let url = if host.contains(':') && !host.starts_with('[') {
            format!("{PROTOCOL}://[{host}]:{port}/")
        } else {
            format!("{PROTOCOL}://{host}:{port}/")
        };

        Self {
            host: host.to_string(),
            port,
            url,
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Base URL, always ending in `/`.
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Resolve `path` relative to the base URL.
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.url, path.trim_start_matches('/'))
    }
}

impl fmt::Display for ServerAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}
