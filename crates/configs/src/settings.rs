use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub database: DatabaseSettings,
    pub forum: ForumSettings,
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Connection string; kept secret so it never lands in logs.
    pub url: SecretString,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ForumSettings {
    pub posts_per_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing` env-filter directive, e.g. `info` or `agora=debug,info`.
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Settings {
    pub fn load() -> Result<Self, SettingsError> {
        // A local .env file is a convenience, not a requirement.
        dotenvy::dotenv().ok();

        let settings: Settings = Config::builder()
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080_i64)?
            .set_default("database.url", "sqlite://agora.db")?
            .set_default("forum.posts_per_page", 10_i64)?
            .set_default("log.filter", "info")?
            .set_default("log.json", false)?
            .add_source(File::with_name("agora").required(false))
            .add_source(
                Environment::with_prefix("AGORA")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.forum.posts_per_page == 0 {
            return Err(SettingsError::Invalid(
                "forum.posts_per_page must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

impl ServerSettings {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    // Tests in this module share the process environment; every test that
    // calls `load` holds this lock so a set/load/remove window in one
    // test can't leak into another.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn env_lock() -> MutexGuard<'static, ()> {
        ENV_LOCK.lock().unwrap_or_else(PoisonError::into_inner)
    }

    #[test]
    fn defaults_stand_on_their_own() {
        let _guard = env_lock();
        let settings = Settings::load().expect("defaults should load");
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.database.url.expose_secret(), "sqlite://agora.db");
        assert_eq!(settings.log.filter, "info");
        assert!(!settings.log.json);
    }

    #[test]
    fn environment_overrides_win() {
        let _guard = env_lock();
        std::env::set_var("AGORA__FORUM__POSTS_PER_PAGE", "25");
        let settings = Settings::load().expect("settings should load");
        std::env::remove_var("AGORA__FORUM__POSTS_PER_PAGE");

        assert_eq!(settings.forum.posts_per_page, 25);
    }

    #[test]
    fn zero_posts_per_page_is_rejected() {
        let _guard = env_lock();
        std::env::set_var("AGORA__FORUM__POSTS_PER_PAGE", "0");
        let result = Settings::load();
        std::env::remove_var("AGORA__FORUM__POSTS_PER_PAGE");

        let err = result.expect_err("a zero page size should not load");
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().contains("posts_per_page"));
    }

    #[test]
    fn bind_address_joins_host_and_port() {
        let server = ServerSettings {
            host: "0.0.0.0".into(),
            port: 9000,
        };
        assert_eq!(server.bind_address(), "0.0.0.0:9000");
    }
}
