//! Command-line interface definitions using clap

use clap::Parser;

/// urlmini - A small URL shortener service with visit analytics
#[derive(Parser, Debug)]
#[command(name = "urlmini")]
#[command(version)]
#[command(about = "A small URL shortener service with visit analytics", long_about = None)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, short = 'c')]
    pub config: Option<String>,

    /// Write a sample configuration file to the given path and exit
    #[arg(long, value_name = "PATH")]
    pub generate_config: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_arguments() {
        let cli = Cli::parse_from(["urlmini"]);
        assert!(cli.config.is_none());
        assert!(cli.generate_config.is_none());
    }

    #[test]
    fn test_config_flag() {
        let cli = Cli::parse_from(["urlmini", "-c", "prod.toml"]);
        assert_eq!(cli.config.as_deref(), Some("prod.toml"));

        let cli = Cli::parse_from(["urlmini", "--config", "dev.toml"]);
        assert_eq!(cli.config.as_deref(), Some("dev.toml"));
    }

    #[test]
    fn test_generate_config_requires_path() {
        let cli = Cli::parse_from(["urlmini", "--generate-config", "out.toml"]);
        assert_eq!(cli.generate_config.as_deref(), Some("out.toml"));

        assert!(Cli::try_parse_from(["urlmini", "--generate-config"]).is_err());
    }
}
