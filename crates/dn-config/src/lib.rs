//! Configuration management for docnav.
//!
//! Parses `docnav.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [navigation]
//! declarations = "navigation.toml"
//! prefix_policy = "declaration-order"
//!
//! [zoom]
//! selector = ".main img"
//! background = "var(--vp-c-bg)"
//!
//! [[widgets]]
//! name = "SpringOverview"
//! template = "<div class=\"spring-overview\"></div>"
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use dn_hooks::{TemplateWidget, WidgetRegistry, WidgetRegistryBuilder, ZoomOptions};
use dn_nav::{NavDeclarations, NavError, NavTreeBuilder, PrefixPolicy, SectionTree};
use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override navigation declarations file.
    pub declarations: Option<PathBuf>,
    /// Override prefix selection rule.
    pub prefix_policy: Option<PrefixPolicy>,
}

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docnav.toml";

const DEFAULT_DECLARATIONS: &str = "navigation.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Navigation configuration (paths are relative strings from TOML).
    navigation: NavigationConfigRaw,
    /// Image zoom configuration.
    pub zoom: ZoomConfig,
    /// Widgets registered at startup.
    pub widgets: Vec<WidgetConfig>,

    /// Resolved navigation configuration (set after loading).
    #[serde(skip)]
    pub navigation_resolved: NavigationConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw navigation configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
struct NavigationConfigRaw {
    declarations: Option<String>,
    prefix_policy: Option<PrefixPolicy>,
}

/// Resolved navigation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct NavigationConfig {
    /// Navigation declarations file.
    pub declarations: PathBuf,
    /// Prefix selection rule.
    pub prefix_policy: PrefixPolicy,
}

/// Image zoom configuration.
#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ZoomConfig {
    /// Images to enable zoom on, as `.<container-class> img`.
    pub selector: String,
    /// Overlay background (CSS value).
    pub background: String,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            selector: ".main img".to_owned(),
            background: "var(--vp-c-bg)".to_owned(),
        }
    }
}

/// A widget rendered from an HTML template.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WidgetConfig {
    /// Component name used in embeds (`UpperCamelCase`).
    pub name: String,
    /// HTML template with `{{attr}}` placeholders.
    #[serde(default)]
    pub template: String,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Navigation declarations could not be built.
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavError),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docnav.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else {
            let cwd = std::env::current_dir()?;
            match Self::discover_config(&cwd) {
                Some(discovered) => Self::load_from_file(&discovered)?,
                None => Self::default_with_base(&cwd),
            }
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(declarations) = &settings.declarations {
            self.navigation_resolved
                .declarations
                .clone_from(declarations);
        }
        if let Some(policy) = settings.prefix_policy {
            self.navigation_resolved.prefix_policy = policy;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            navigation: NavigationConfigRaw::default(),
            zoom: ZoomConfig::default(),
            widgets: Vec::new(),
            navigation_resolved: NavigationConfig {
                declarations: base.join(DEFAULT_DECLARATIONS),
                prefix_policy: PrefixPolicy::default(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let declarations = self
            .navigation
            .declarations
            .as_deref()
            .unwrap_or(DEFAULT_DECLARATIONS);

        self.navigation_resolved = NavigationConfig {
            declarations: config_dir.join(declarations),
            prefix_policy: self.navigation.prefix_policy.unwrap_or_default(),
        };
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_zoom()?;
        self.validate_widgets()?;
        Ok(())
    }

    fn validate_zoom(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.zoom.background, "zoom.background")?;
        self.zoom_options().map(|_| ())
    }

    fn validate_widgets(&self) -> Result<(), ConfigError> {
        let mut seen = HashSet::new();
        for widget in &self.widgets {
            if !seen.insert(widget.name.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "widgets: duplicate name \"{}\"",
                    widget.name
                )));
            }
        }
        // Name syntax is checked by the registry itself.
        self.widget_registry().map(|_| ())
    }

    /// Zoom options parsed from `[zoom]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the selector is not `.<class> img`.
    pub fn zoom_options(&self) -> Result<ZoomOptions, ConfigError> {
        ZoomOptions::parse(&self.zoom.selector, self.zoom.background.clone())
            .map_err(|e| ConfigError::Validation(format!("zoom.selector: {e}")))
    }

    /// Build the widget registry from `[[widgets]]`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for invalid or duplicate names.
    pub fn widget_registry(&self) -> Result<WidgetRegistry, ConfigError> {
        let mut builder = WidgetRegistryBuilder::new();
        for widget in &self.widgets {
            builder
                .register(&widget.name, TemplateWidget::new(&widget.template))
                .map_err(|e| ConfigError::Validation(format!("widgets: {e}")))?;
        }
        Ok(builder.build())
    }

    /// Load the navigation declarations and build the section tree.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Navigation` if the declarations file is missing,
    /// malformed, or fails validation.
    pub fn build_navigation(&self) -> Result<SectionTree, ConfigError> {
        let resolved = &self.navigation_resolved;
        let decls = NavDeclarations::load(&resolved.declarations)?;
        let tree = NavTreeBuilder::from_declarations(decls)?
            .with_policy(resolved.prefix_policy)
            .build()?;
        Ok(tree)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));

        assert_eq!(
            config.navigation_resolved.declarations,
            PathBuf::from("/test/navigation.toml")
        );
        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::DeclarationOrder
        );
        assert_eq!(config.zoom.selector, ".main img");
        assert_eq!(config.zoom.background, "var(--vp-c-bg)");
        assert!(config.widgets.is_empty());
        assert!(config.config_path.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();

        assert_eq!(config.zoom.selector, ".main img");
        assert!(config.widgets.is_empty());
    }

    #[test]
    fn test_parse_widgets_config() {
        let toml = r#"
[[widgets]]
name = "SpringOverview"
template = "<div class=\"spring\"></div>"

[[widgets]]
name = "AppLearnPlan"
"#;
        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.widgets.len(), 2);
        assert_eq!(config.widgets[0].name, "SpringOverview");
        assert_eq!(config.widgets[1].template, "");
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let toml = r#"
[zoom]
selector = ".main img"
margin = 24
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_prefix_policy() {
        let toml = r#"
[navigation]
prefix_policy = "shortest-match"
"#;
        let result: Result<Config, _> = toml::from_str(toml);

        assert!(result.is_err());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[navigation]
declarations = "nav/site.toml"
prefix_policy = "longest-match"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.navigation_resolved.declarations,
            PathBuf::from("/project/nav/site.toml")
        );
        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::LongestMatch
        );
    }

    #[test]
    fn test_resolve_paths_defaults() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.navigation_resolved.declarations,
            PathBuf::from("/project/navigation.toml")
        );
    }

    #[test]
    fn test_apply_cli_settings_declarations() {
        let mut config = Config::default_with_base(Path::new("/project"));
        let settings = CliSettings {
            declarations: Some(PathBuf::from("/other/nav.toml")),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.navigation_resolved.declarations,
            PathBuf::from("/other/nav.toml")
        );
    }

    #[test]
    fn test_apply_cli_settings_prefix_policy() {
        let mut config = Config::default_with_base(Path::new("/project"));
        let settings = CliSettings {
            prefix_policy: Some(PrefixPolicy::LongestMatch),
            ..CliSettings::default()
        };

        config.apply_cli_settings(&settings);

        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::LongestMatch
        );
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/project"));

        config.apply_cli_settings(&CliSettings::default());

        assert_eq!(
            config.navigation_resolved.declarations,
            PathBuf::from("/project/navigation.toml")
        );
        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::DeclarationOrder
        );
    }

    #[test]
    fn test_discover_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("docs/guide");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join(CONFIG_FILENAME), "").unwrap();

        let found = Config::discover_config(&nested);

        assert_eq!(found, Some(dir.path().join(CONFIG_FILENAME)));
    }

    #[test]
    fn test_load_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::NotFound(p)) if p == path));
    }

    #[test]
    fn test_load_from_file_resolves_and_validates() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            r#"
[navigation]
declarations = "site-nav.toml"

[zoom]
selector = ".content img"
"#,
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(
            config.navigation_resolved.declarations,
            dir.path().join("site-nav.toml")
        );
        assert_eq!(config.config_path, Some(path));
        assert_eq!(config.zoom_options().unwrap().container(), "content");
    }

    #[test]
    fn test_load_from_file_invalid_selector() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[zoom]\nselector = \"img\"\n").unwrap();

        let result = Config::load(Some(&path), None);

        assert!(matches!(result, Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_applies_cli_settings_after_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[navigation]\nprefix_policy = \"longest-match\"\n").unwrap();
        let settings = CliSettings {
            prefix_policy: Some(PrefixPolicy::DeclarationOrder),
            ..CliSettings::default()
        };

        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(
            config.navigation_resolved.prefix_policy,
            PrefixPolicy::DeclarationOrder
        );
    }

    #[test]
    fn test_build_navigation_from_declarations() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("navigation.toml"),
            r#"
[[fragments]]
name = "spring"
title = "Spring"
items = [{ title = "Overview", path = "/spring/" }]

[[sections]]
prefix = "/software/"
items = [{ fragment = "spring" }]

[[sections]]
prefix = "/hardware/"
items = [
  { title = "Boards", path = "/hardware/boards" },
  { fragment = "spring" },
]
"#,
        )
        .unwrap();
        let config = Config::default_with_base(dir.path());

        let tree = config.build_navigation().unwrap();

        assert_eq!(tree.sections().len(), 2);
        assert_eq!(tree.sidebar("/hardware/boards").len(), 2);
    }

    #[test]
    fn test_build_navigation_missing_declarations() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default_with_base(dir.path());

        let result = config.build_navigation();

        assert!(matches!(
            result,
            Err(ConfigError::Navigation(NavError::NotFound(_)))
        ));
    }

    // Validation tests

    /// Assert that validation fails with expected substrings in the error message.
    fn assert_validation_error(config: &Config, expected_substrings: &[&str]) {
        let result = config.validate();
        assert!(result.is_err(), "Expected validation to fail");
        let err = result.unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(_)),
            "Expected ConfigError::Validation, got {err:?}"
        );
        let msg = err.to_string();
        for s in expected_substrings {
            assert!(
                msg.contains(s),
                "Expected error to contain '{s}', got: {msg}"
            );
        }
    }

    fn widget(name: &str) -> WidgetConfig {
        WidgetConfig {
            name: name.to_owned(),
            template: String::new(),
        }
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/test"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zoom_background_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.zoom.background = String::new();
        assert_validation_error(&config, &["zoom.background", "empty"]);
    }

    #[test]
    fn test_validate_zoom_selector_unsupported() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.zoom.selector = "#main img".to_owned();
        assert_validation_error(&config, &["zoom.selector", "#main img"]);
    }

    #[test]
    fn test_validate_widgets_duplicate_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.widgets = vec![widget("SpringOverview"), widget("SpringOverview")];
        assert_validation_error(&config, &["widgets", "duplicate", "SpringOverview"]);
    }

    #[test]
    fn test_validate_widgets_lowercase_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.widgets = vec![widget("springOverview")];
        assert_validation_error(&config, &["widgets", "springOverview"]);
    }

    #[test]
    fn test_widget_registry_renders_templates() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.widgets = vec![WidgetConfig {
            name: "AppLearnPlan".to_owned(),
            template: "<nav data-track=\"{{track}}\"></nav>".to_owned(),
        }];

        let registry = config.widget_registry().unwrap();
        let expansion = registry.expand("<AppLearnPlan track=\"software\" />");

        assert_eq!(expansion.html, "<nav data-track=\"software\"></nav>");
    }
}
