//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "keeplog.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "keeplog.yaml";

/// Hidden configuration file name
pub const ALT_CONFIG_FILE: &str = ".keeplog.toml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".keeplog.yaml",
    ]
}

/// Generate default configuration TOML
pub fn default_config_toml() -> String {
    let config = Config::default();
    toml::to_string_pretty(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# keeplog configuration

[changelog]
file = "CHANGELOG.md"

[release]
tag_format = "{version}"
# compare_url = "https://github.com/owner/repo/compare/<prev>...<next>"
date_format = "%Y-%m-%d"

[bundle]
directory = "changelog-unreleased"
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.release.tag_format, "{version}");
    }

    #[test]
    fn test_default_config_toml_roundtrips() {
        let config: Config = toml::from_str(&default_config_toml()).unwrap();
        assert_eq!(config.bundle.directory.to_str(), Some("changelog-unreleased"));
    }
}
