use std::time::Duration;

/// Client configuration, constructed once per provider instantiation.
#[derive(Debug, Clone)]
pub struct Config {
    /// Control-plane endpoint, e.g. `https://api.meridian-cloud.example:443`.
    pub endpoint: String,
    /// Bearer token presented on every call.
    pub token: String,
    /// Folder that owns resources created through this client.
    pub folder_id: String,
    /// Default availability zone for zonal resources.
    pub zone: String,
    /// Per-call timeout default; individual resources override per phase.
    pub timeout: Duration,
}

impl Config {
    pub const DEFAULT_ZONE: &'static str = "m1-a";
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    pub fn new(
        endpoint: impl Into<String>,
        token: impl Into<String>,
        folder_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            token: token.into(),
            folder_id: folder_id.into(),
            zone: Self::DEFAULT_ZONE.to_owned(),
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    pub fn with_zone(mut self, zone: impl Into<String>) -> Self {
        self.zone = zone.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
