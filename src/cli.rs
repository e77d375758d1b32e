use clap::{Parser, Subcommand};

use crate::config::{Config, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "job-tracker", version, about = "Kanban job application tracker API")]
pub struct Cli {
    /// Bind address, overrides HOST
    #[arg(long, global = true)]
    pub host: Option<String>,

    /// Bind port, overrides PORT
    #[arg(long, global = true)]
    pub port: Option<u16>,

    /// Storage backend (postgres or memory), overrides STORAGE_BACKEND
    #[arg(long, global = true)]
    pub storage: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start the HTTP server (default)
    Serve,
    /// Apply pending database migrations and exit
    Migrate,
}

impl Cli {
    /// Apply command-line overrides on top of the environment configuration
    pub fn apply(&self, mut config: Config) -> Result<Config, String> {
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(storage) = &self.storage {
            config.storage = storage.parse::<StorageBackend>()?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn command(&self) -> Command {
        self.command.unwrap_or(Command::Serve)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Config {
        Config::from_lookup(|key| match key {
            "STORAGE_BACKEND" => Some("memory".to_string()),
            _ => None,
        })
        .unwrap()
    }

    #[test]
    fn no_subcommand_means_serve() {
        let cli = Cli::parse_from(["job-tracker"]);
        assert_eq!(cli.command(), Command::Serve);
    }

    #[test]
    fn flags_override_environment() {
        let cli = Cli::parse_from(["job-tracker", "serve", "--port", "9000", "--host", "0.0.0.0"]);
        let config = cli.apply(base()).unwrap();
        assert_eq!(config.port, 9000);
        assert_eq!(config.host, "0.0.0.0");
    }

    #[test]
    fn switching_to_postgres_without_url_fails() {
        let cli = Cli::parse_from(["job-tracker", "--storage", "postgres"]);
        assert!(cli.apply(base()).is_err());
    }

    #[test]
    fn migrate_subcommand_parses() {
        let cli = Cli::parse_from(["job-tracker", "migrate"]);
        assert_eq!(cli.command(), Command::Migrate);
    }
}
