use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub sampler: SamplerConfig,
    #[serde(default)]
    pub probe: ProbeConfig,
    #[serde(default)]
    pub query: QueryConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SamplerConfig {
    /// Sleep between two health snapshots.
    #[serde(default = "default_sample_interval_secs")]
    pub interval_secs: u64,
    /// How often to log sampler stats (snapshots saved/failed) at INFO level.
    #[serde(default = "default_stats_log_interval_secs")]
    pub stats_log_interval_secs: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            interval_secs: default_sample_interval_secs(),
            stats_log_interval_secs: default_stats_log_interval_secs(),
        }
    }
}

/// One week. Sampler timers are deadlines from now and must not overflow `Instant`.
pub const MAX_SAMPLER_INTERVAL_SECS: u64 = 7 * 24 * 3600;

fn default_sample_interval_secs() -> u64 {
    300
}

fn default_stats_log_interval_secs() -> u64 {
    3600
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProbeConfig {
    /// Address pinged by the reachability check.
    #[serde(default = "default_reachability_target")]
    pub reachability_target: String,
    #[serde(default = "default_ping_timeout_secs")]
    pub ping_timeout_secs: u64,
    /// Per-interface counters in the Linux /proc/net/dev format.
    #[serde(default = "default_net_dev_path")]
    pub net_dev_path: String,
    /// Window over which CPU usage is measured for GET /top.
    #[serde(default = "default_cpu_sample_window_ms")]
    pub cpu_sample_window_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            reachability_target: default_reachability_target(),
            ping_timeout_secs: default_ping_timeout_secs(),
            net_dev_path: default_net_dev_path(),
            cpu_sample_window_ms: default_cpu_sample_window_ms(),
        }
    }
}

fn default_reachability_target() -> String {
    "8.8.8.8".into()
}

fn default_ping_timeout_secs() -> u64 {
    5
}

fn default_net_dev_path() -> String {
    "/proc/net/dev".into()
}

fn default_cpu_sample_window_ms() -> u64 {
    1000
}

#[derive(Debug, Clone, Deserialize)]
pub struct QueryConfig {
    /// Max records returned by GET /logs.
    #[serde(default = "default_logs_limit")]
    pub logs_limit: u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            logs_limit: default_logs_limit(),
        }
    }
}

fn default_logs_limit() -> u32 {
    1000
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("reading config {}: {}", path, e))?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.server.host.is_empty(),
            "server.host must be non-empty"
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            (1..=MAX_SAMPLER_INTERVAL_SECS).contains(&self.sampler.interval_secs),
            "sampler.interval_secs must be between 1 and {}, got {}",
            MAX_SAMPLER_INTERVAL_SECS,
            self.sampler.interval_secs
        );
        anyhow::ensure!(
            (1..=MAX_SAMPLER_INTERVAL_SECS).contains(&self.sampler.stats_log_interval_secs),
            "sampler.stats_log_interval_secs must be between 1 and {}, got {}",
            MAX_SAMPLER_INTERVAL_SECS,
            self.sampler.stats_log_interval_secs
        );
        anyhow::ensure!(
            !self.probe.reachability_target.is_empty(),
            "probe.reachability_target must be non-empty"
        );
        anyhow::ensure!(
            self.probe.ping_timeout_secs > 0,
            "probe.ping_timeout_secs must be > 0, got {}",
            self.probe.ping_timeout_secs
        );
        anyhow::ensure!(
            !self.probe.net_dev_path.is_empty(),
            "probe.net_dev_path must be non-empty"
        );
        anyhow::ensure!(
            self.probe.cpu_sample_window_ms > 0,
            "probe.cpu_sample_window_ms must be > 0, got {}",
            self.probe.cpu_sample_window_ms
        );
        anyhow::ensure!(
            self.query.logs_limit > 0,
            "query.logs_limit must be > 0, got {}",
            self.query.logs_limit
        );
        Ok(())
    }
}
