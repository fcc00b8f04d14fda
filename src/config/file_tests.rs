//! Tests for configuration file parsing.

use super::ConfigError;
use super::file::{FileConfig, default_config_template};
use super::host::Host;

mod toml_format {
    use super::*;

    #[test]
    fn parse_full_config() {
        let content = r#"
            interval = 60
            ip_url = "https://api.ipify.org"
            user_agent = "my-agent/1.0"

            [[hosts]]
            host = "a.example.com"
            user = "ua"
            password = "pa"

            [[hosts]]
            host = "b.example.com"
            user = "ub"
            password = "pb"
        "#;

        let config = FileConfig::parse(content).unwrap();

        assert_eq!(config.interval, Some(60));
        assert_eq!(config.ip_url.as_deref(), Some("https://api.ipify.org"));
        assert_eq!(config.user_agent.as_deref(), Some("my-agent/1.0"));
        assert_eq!(
            config.hosts,
            vec![
                Host::new("a.example.com", "ua", "pa"),
                Host::new("b.example.com", "ub", "pb"),
            ]
        );
    }

    #[test]
    fn parse_empty_config() {
        let config = FileConfig::parse("").unwrap();

        assert!(config.interval.is_none());
        assert!(config.hosts.is_empty());
    }

    #[test]
    fn unknown_top_level_key_is_rejected() {
        let result = FileConfig::parse("intervall = 60");

        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn host_without_password_is_rejected() {
        let content = r#"
            [[hosts]]
            host = "a.example.com"
            user = "ua"
        "#;

        assert!(matches!(
            FileConfig::parse(content),
            Err(ConfigError::TomlParse(_))
        ));
    }

    #[test]
    fn default_template_parses() {
        let config = FileConfig::parse(&default_config_template()).unwrap();

        assert_eq!(config.interval, Some(300));
        assert_eq!(config.hosts.len(), 1);
        assert_eq!(config.hosts[0].hostname, "home.example.com");
    }
}

mod json_format {
    use super::*;

    #[test]
    fn parse_json_config() {
        let content = r#"{
            "interval": 30,
            "hosts": [
                {"host": "a.example.com", "user": "ua", "password": "pa"},
                {"host": "a.example.com", "user": "ua", "password": "pa"}
            ]
        }"#;

        let config = FileConfig::parse_json(content).unwrap();

        assert_eq!(config.interval, Some(30));
        // Duplicates are preserved
        assert_eq!(config.hosts.len(), 2);
        assert_eq!(config.hosts[0], config.hosts[1]);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let result = FileConfig::parse_json("{\"interval\": ");

        assert!(matches!(result, Err(ConfigError::JsonParse(_))));
    }
}

mod loading {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    #[test]
    fn json_extension_selects_json_parser() {
        let mut file = Builder::new().suffix(".json").tempfile().unwrap();
        write!(
            file,
            r#"{{"interval": 10, "hosts": [{{"host": "h", "user": "u", "password": "p"}}]}}"#
        )
        .unwrap();

        let config = FileConfig::load(file.path()).unwrap();

        assert_eq!(config.interval, Some(10));
    }

    #[test]
    fn other_extensions_use_toml() {
        let mut file = Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "interval = 15").unwrap();

        let config = FileConfig::load(file.path()).unwrap();

        assert_eq!(config.interval, Some(15));
    }

    #[test]
    fn missing_file_returns_file_read_error() {
        let result = FileConfig::load(std::path::Path::new("/nonexistent_dir_12345/a.toml"));

        assert!(matches!(result, Err(ConfigError::FileRead { .. })));
    }
}
