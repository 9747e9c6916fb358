//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use tailor_cache::{cache_key, Cache, FileStore};
use tailor_commerce::booking::{Booking, BookingDesk};
use tailor_data::ReqwestTransport;
use tailor_observability::{RequestId, StructuredLogger};
use tailor_storefront::{AuthStatus, StorefrontApi};

use crate::config::CliConfig;
use crate::output::Output;

/// Storage key of the local booking desk.
pub const BOOKINGS_KEY: &str = "bookings";

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Logger for this invocation.
    pub logger: StructuredLogger,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, env: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let mut config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };
        if let Some(env) = env {
            config = config.for_environment(env);
        }
        config.apply_env_vars(std::env::vars());

        let logger = StructuredLogger::new(RequestId::generate())
            .with_component("cli")
            .with_format(config.logging.format)
            .with_min_level(config.logging.level);

        Ok(Self {
            config,
            output,
            logger,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let config_names = ["tailor.toml", ".tailor.toml", "tailor.json"];

        let mut current = start.to_path_buf();
        loop {
            for name in &config_names {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Directory holding local state.
    pub fn data_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.storage.data_dir)
    }

    /// Local key-value storage.
    pub fn cache(&self) -> Result<Cache<FileStore>> {
        let dir = self.data_dir();
        let store = FileStore::open(&dir)
            .with_context(|| format!("Failed to open data directory: {}", dir.display()))?;
        Ok(Cache::new(store))
    }

    /// API bindings against the configured backend.
    pub fn api(&self) -> Result<StorefrontApi<ReqwestTransport>> {
        let timeout = std::time::Duration::from_secs(self.config.api.timeout_secs);
        let transport = ReqwestTransport::new(timeout).context("Failed to build HTTP client")?;
        Ok(StorefrontApi::with_base_url(
            transport,
            self.config.api.base_url.clone(),
        ))
    }

    /// Signed-in status from the stored session token.
    pub fn auth_status(&self) -> Result<AuthStatus> {
        let token: Option<String> = self.cache()?.get(&session_key())?;
        Ok(AuthStatus::from_token(token))
    }

    pub fn save_session(&self, token: Option<&str>) -> Result<()> {
        let cache = self.cache()?;
        match token {
            Some(token) => cache.set(&session_key(), token)?,
            None => cache.delete(&session_key())?,
        }
        Ok(())
    }

    /// The local booking desk.
    pub fn desk(&self) -> Result<BookingDesk> {
        let bookings: Vec<Booking> = self
            .cache()?
            .get_or_default(BOOKINGS_KEY)
            .context("Failed to read stored bookings")?;
        Ok(BookingDesk::from(bookings))
    }

    pub fn save_desk(&self, desk: BookingDesk) -> Result<()> {
        let bookings: Vec<Booking> = desk.into();
        self.cache()?
            .set(BOOKINGS_KEY, &bookings)
            .context("Failed to store bookings")
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }
}

fn session_key() -> String {
    cache_key!("session", "token")
}
