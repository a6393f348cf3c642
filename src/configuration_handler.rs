use crate::{backend::CorruptionPolicy, configuration::Configuration};
use clap::Parser;
use std::path::PathBuf;

/// Settings for one server run. Every flag can also come from the
/// environment or a `.env` file.
#[derive(Parser, Debug, Clone)]
#[command(version, about = "Static pages and a single-slot booking form")]
pub struct ConfigurationHandler {
    /// Directory holding the page templates (index.html, booking.html, ...)
    #[arg(long, env = "TEMPLATES_PATH", default_value = "templates")]
    templates_path: PathBuf,

    /// JSON file the bookings are persisted to
    #[arg(long, env = "BOOKINGS_FILE", default_value = "instance/bookings.json")]
    bookings_file: PathBuf,

    /// Keep bookings in memory only
    #[arg(long, env = "EPHEMERAL")]
    ephemeral: bool,

    /// Fail requests instead of starting over when the bookings file is unreadable
    #[arg(long, env = "STRICT_STORE")]
    strict_store: bool,

    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    host: String,

    #[arg(short, long, env = "PORT", default_value = "3000")]
    port: String,
}

impl ConfigurationHandler {
    pub fn parse_arguments() -> Self {
        if let Err(err) = dotenvy::dotenv() {
            tracing::debug!(%err, "No .env file loaded");
        }
        Self::parse()
    }
}

impl Configuration for ConfigurationHandler {
    fn templates_path(&self) -> PathBuf {
        self.templates_path.clone()
    }

    fn bookings_file(&self) -> PathBuf {
        self.bookings_file.clone()
    }

    fn ephemeral(&self) -> bool {
        self.ephemeral
    }

    fn corruption_policy(&self) -> CorruptionPolicy {
        match self.strict_store {
            true => CorruptionPolicy::Fail,
            false => CorruptionPolicy::TreatAsEmpty,
        }
    }

    fn host(&self) -> String {
        self.host.clone()
    }

    fn port(&self) -> String {
        self.port.clone()
    }
}
