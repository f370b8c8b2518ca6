use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// JSON document holding every submission.
    pub data_file: PathBuf,
    /// JSON document holding the admin username/password pair. Re-read on
    /// every authenticated request.
    pub admin_config_path: PathBuf,
    /// Static front end and the `stats.html` dashboard.
    pub public_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("WAITLIST_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_file: std::env::var("WAITLIST_DATA_FILE")
                .unwrap_or_else(|_| "./submissions.json".to_string())
                .into(),
            admin_config_path: std::env::var("WAITLIST_ADMIN_CONFIG")
                .unwrap_or_else(|_| "./admin-config.json".to_string())
                .into(),
            public_dir: std::env::var("WAITLIST_PUBLIC_DIR")
                .unwrap_or_else(|_| "./public".to_string())
                .into(),
            cors_origins: std::env::var("WAITLIST_CORS_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
        })
    }
}
