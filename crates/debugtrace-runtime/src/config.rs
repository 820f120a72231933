use crate::{Error, Result};
use debugtrace_core::{CP_UTF8, DEFAULT_DATETIME_FORMAT, TypeNameStyle};
use debugtrace_engine::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "DEBUGTRACE_CONFIG";

/// When trace lines are coloured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    #[default]
    Never,
    /// Only when the sink is a terminal
    Auto,
    Always,
}

/// Where trace lines are written.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SinkTarget {
    #[default]
    Stderr,
    Stdout,
    /// Appended to, created if missing
    File(PathBuf),
}

/// Tracer configuration. Every field falls back to its default when absent
/// from the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub enter_string: String,
    pub leave_string: String,
    pub limit_string: String,
    pub maximum_indents: usize,
    pub code_indent_string: String,
    pub data_indent_string: String,
    pub open_string: String,
    pub close_string: String,
    pub delimiter: String,
    pub varname_value_separator: String,
    pub pair_separator: String,
    pub log_datetime_format: String,
    pub maximum_data_output_width: usize,
    pub collection_limit: usize,
    pub code_page: u32,
    pub type_names: TypeNameStyle,
    pub color: ColorMode,
    pub sink: SinkTarget,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            enter_string: "Enter ".to_string(),
            leave_string: "Leave ".to_string(),
            limit_string: "...".to_string(),
            maximum_indents: 20,
            code_indent_string: "| ".to_string(),
            data_indent_string: "  ".to_string(),
            open_string: "{".to_string(),
            close_string: "}".to_string(),
            delimiter: ", ".to_string(),
            varname_value_separator: " = ".to_string(),
            pair_separator: ": ".to_string(),
            log_datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
            maximum_data_output_width: 80,
            collection_limit: 256,
            code_page: CP_UTF8,
            type_names: TypeNameStyle::Short,
            color: ColorMode::Never,
            sink: SinkTarget::Stderr,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_path()?;
        self.save_to(&config_path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Resolve the config file location:
    /// 1. DEBUGTRACE_CONFIG environment variable
    /// 2. `<config dir>/debugtrace/debugtrace.toml`
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        dirs::config_dir()
            .map(|dir| dir.join("debugtrace").join("debugtrace.toml"))
            .ok_or_else(|| {
                Error::Config("Could not determine the user config directory".to_string())
            })
    }

    /// Borrow the renderer-facing subset of this configuration.
    pub fn render_options(&self) -> RenderOptions<'_> {
        RenderOptions {
            limit_string: &self.limit_string,
            maximum_indents: self.maximum_indents,
            data_indent_string: &self.data_indent_string,
            open_string: &self.open_string,
            close_string: &self.close_string,
            delimiter: &self.delimiter,
            pair_separator: &self.pair_separator,
            maximum_data_output_width: self.maximum_data_output_width,
            collection_limit: self.collection_limit,
            type_names: self.type_names,
        }
    }
}
