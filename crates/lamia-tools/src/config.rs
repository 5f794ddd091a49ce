//! Configuration for the schema, lint and catalog tools.
//!
//! Every config has a `Default` that reproduces the stock Lamia layout, plus
//! `with_*` builders for the few values the binaries let operators override.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use sqlx::postgres::PgConnectOptions;

use crate::error::{Result, ToolError};
use crate::process::DEFAULT_TIMEOUT;

/// Application name, used as the translation domain.
pub const APP_NAME: &str = "lamia";

/// Locale of the only catalog the pipeline manages.
pub const DEFAULT_LOCALE: &str = "en";

/// Default tree scanned by `dev-cli lint`.
pub const DEFAULT_SOURCE_ROOT: &str = "./lamia";

/// Scores strictly below this value print the lint advisory.
pub const LINT_THRESHOLD: f64 = 7.0;

// =============================================================================
// DATABASE
// =============================================================================

/// Connection settings for the schema manager.
///
/// Environment keys (all optional): `DB_DSN`, `DB_DRIVER`, `DB_HOST`,
/// `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_DATABASE`, `DB_POOL_MIN_SIZE`,
/// `DB_POOL_MAX_SIZE`, `DB_ECHO`. A DSN replaces all the individual parts.
#[derive(Debug, Clone, PartialEq)]
pub struct DatabaseConfig {
    pub dsn: Option<String>,
    pub driver: String,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    pub pool_min_size: u32,
    pub pool_max_size: u32,
    /// Log every executed statement at info level.
    pub echo: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            dsn: None,
            driver: "postgres".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: String::new(),
            database: "postgres".to_string(),
            pool_min_size: 5,
            pool_max_size: 10,
            echo: false,
        }
    }
}

impl DatabaseConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for missing keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let config = Self {
            dsn: get("DB_DSN"),
            driver: get("DB_DRIVER").unwrap_or(defaults.driver),
            host: get("DB_HOST").unwrap_or(defaults.host),
            port: parse_var("DB_PORT", get("DB_PORT"))?.unwrap_or(defaults.port),
            user: get("DB_USER").unwrap_or(defaults.user),
            password: lookup("DB_PASSWORD").unwrap_or(defaults.password),
            database: get("DB_DATABASE").unwrap_or(defaults.database),
            pool_min_size: parse_var("DB_POOL_MIN_SIZE", get("DB_POOL_MIN_SIZE"))?
                .unwrap_or(defaults.pool_min_size),
            pool_max_size: parse_var("DB_POOL_MAX_SIZE", get("DB_POOL_MAX_SIZE"))?
                .unwrap_or(defaults.pool_max_size),
            echo: get("DB_ECHO").map(|v| parse_bool(&v)).unwrap_or(defaults.echo),
        };
        config.validate()?;
        Ok(config)
    }

    /// Use an explicit DSN instead of the individual parts.
    pub fn with_dsn(mut self, dsn: impl Into<String>) -> Self {
        self.dsn = Some(dsn.into());
        self
    }

    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    fn validate(&self) -> Result<()> {
        if self.pool_min_size > self.pool_max_size {
            return Err(ToolError::Config(format!(
                "pool_min_size ({}) exceeds pool_max_size ({})",
                self.pool_min_size, self.pool_max_size
            )));
        }
        Ok(())
    }

    /// Driver-level connection options.
    pub fn connect_options(&self) -> Result<PgConnectOptions> {
        if let Some(dsn) = &self.dsn {
            return PgConnectOptions::from_str(dsn)
                .map_err(|e| ToolError::Config(format!("invalid DB_DSN: {e}")));
        }

        match self.driver.as_str() {
            "postgres" | "postgresql" | "asyncpg" => {}
            other => {
                return Err(ToolError::Config(format!(
                    "unsupported database driver '{other}' (expected postgres)"
                )));
            }
        }

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .database(&self.database);
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }

    /// Connection target without credentials, for log lines.
    pub fn describe(&self) -> String {
        match &self.dsn {
            Some(dsn) => redact_dsn(dsn),
            None => format!(
                "{}://{}@{}:{}/{}",
                self.driver, self.user, self.host, self.port, self.database
            ),
        }
    }
}

fn parse_var<T: FromStr>(key: &str, value: Option<String>) -> Result<Option<T>> {
    value
        .map(|v| {
            v.parse::<T>()
                .map_err(|_| ToolError::Config(format!("{key} has an invalid value: '{v}'")))
        })
        .transpose()
}

fn parse_bool(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn redact_dsn(dsn: &str) -> String {
    let Some((scheme, rest)) = dsn.split_once("://") else {
        return dsn.to_string();
    };
    match rest.split_once('@') {
        Some((credentials, host)) => {
            let user = credentials.split(':').next().unwrap_or_default();
            format!("{scheme}://{user}:***@{host}")
        }
        None => dsn.to_string(),
    }
}

// =============================================================================
// LINT
// =============================================================================

/// Settings for the format-then-lint orchestration.
#[derive(Debug, Clone)]
pub struct LintConfig {
    /// Repository root: holds the style and rule files, and `git diff` runs there.
    pub project_root: PathBuf,
    /// Suffix that marks a source file during a full walk.
    pub source_suffix: String,
    /// Style file handed to the formatter.
    pub style_config: PathBuf,
    /// Rule file handed to the linter.
    pub rc_file: PathBuf,
    pub threshold: f64,
    pub formatter_program: String,
    pub linter_program: String,
    pub vcs_program: String,
    pub timeout: Duration,
}

impl Default for LintConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            source_suffix: ".py".to_string(),
            style_config: PathBuf::from(".style.yapf"),
            rc_file: PathBuf::from(".pylintrc"),
            threshold: LINT_THRESHOLD,
            formatter_program: "yapf".to_string(),
            linter_program: "pylint".to_string(),
            vcs_program: "git".to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LintConfig {
    pub fn with_project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

// =============================================================================
// CATALOG
// =============================================================================

/// Settings for the translation catalog pipeline.
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// Directory the catalog compiler runs from; other paths are relative to it.
    pub project_root: PathBuf,
    pub program: String,
    /// Extraction mapping (which files to scan and how).
    pub mapping_file: PathBuf,
    /// Template written by `extract` and read by `init`/`update`.
    pub template: PathBuf,
    /// Directory holding `<locale>/LC_MESSAGES/<domain>.po`.
    pub catalog_dir: PathBuf,
    /// Tree scanned for translatable strings.
    pub source_dir: PathBuf,
    pub locale: String,
    pub domain: String,
    pub timeout: Duration,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            program: "pybabel".to_string(),
            mapping_file: PathBuf::from("babel.cfg"),
            template: PathBuf::from("lamia/translations/messages.pot"),
            catalog_dir: PathBuf::from("lamia/translations"),
            source_dir: PathBuf::from(APP_NAME),
            locale: DEFAULT_LOCALE.to_string(),
            domain: APP_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl CatalogConfig {
    pub fn with_project_root(mut self, root: impl AsRef<Path>) -> Self {
        self.project_root = root.as_ref().to_path_buf();
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Locale source catalog, `<catalog_dir>/<locale>/LC_MESSAGES/<domain>.po`.
    pub fn locale_catalog(&self) -> PathBuf {
        self.messages_dir().join(format!("{}.po", self.domain))
    }

    /// Compiled catalog next to the locale source.
    pub fn compiled_catalog(&self) -> PathBuf {
        self.messages_dir().join(format!("{}.mo", self.domain))
    }

    fn messages_dir(&self) -> PathBuf {
        self.catalog_dir.join(&self.locale).join("LC_MESSAGES")
    }
}
