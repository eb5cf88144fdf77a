//! # configs
//!
//! Runtime configuration for the binaries, layered lowest to highest:
//! compiled defaults, an optional `agora.toml` next to the process, then
//! `AGORA__`-prefixed environment variables (`AGORA__SERVER__PORT=9000`).

mod settings;

pub use settings::{
    DatabaseSettings, ForumSettings, LogSettings, ServerSettings, Settings, SettingsError,
};
