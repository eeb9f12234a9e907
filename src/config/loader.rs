//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ClinidataConfig;
use super::secret::secret_string;
use crate::domain::errors::ClinidataError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Prefix of the per-key environment overrides
pub const ENV_PREFIX: &str = "CLINIDATA_";

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ClinidataConfig
/// 4. Applies environment variable overrides (CLINIDATA_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`ClinidataError::Configuration`] if the file cannot be read,
/// a referenced variable is unset, the TOML does not parse, or validation
/// fails.
///
/// # Examples
///
/// ```no_run
/// use clinidata::config::loader::load_config;
///
/// let config = load_config("clinidata.toml").expect("Failed to load config");
/// println!("Listening on {}", config.server.bind_address());
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ClinidataConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ClinidataError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ClinidataError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses, overrides and validates configuration from a TOML string
pub fn parse_config(contents: &str) -> Result<ClinidataConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ClinidataConfig = toml::from_str(&contents)
        .map_err(|e| ClinidataError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        ClinidataError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("placeholder pattern is a valid regex")
    })
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are copied untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = placeholder_regex();
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(ClinidataError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

fn env(key: &str) -> Option<String> {
    std::env::var(format!("{ENV_PREFIX}{key}")).ok()
}

fn env_parsed<T: std::str::FromStr>(key: &str) -> Result<Option<T>> {
    match env(key) {
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            ClinidataError::Configuration(format!(
                "Invalid value '{raw}' for environment variable {ENV_PREFIX}{key}"
            ))
        }),
        None => Ok(None),
    }
}

/// Applies environment variable overrides using the CLINIDATA_* prefix
///
/// Variables follow the pattern `CLINIDATA_<SECTION>_<KEY>`, for example
/// `CLINIDATA_SERVER_PORT` or `CLINIDATA_AUTH_JWT_SECRET`.
fn apply_env_overrides(config: &mut ClinidataConfig) -> Result<()> {
    // Application overrides
    if let Some(val) = env("APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }
    if let Some(environment) = env_parsed("ENVIRONMENT")? {
        config.environment = environment;
    }
    if let Some(target) = env_parsed("DATABASE_TARGET")? {
        config.database_target = target;
    }

    // Server overrides
    if let Some(val) = env("SERVER_HOST") {
        config.server.host = val;
    }
    if let Some(port) = env_parsed("SERVER_PORT")? {
        config.server.port = port;
    }
    if let Some(secs) = env_parsed("SERVER_REQUEST_TIMEOUT_SECONDS")? {
        config.server.request_timeout_seconds = secs;
    }

    // PostgreSQL overrides (only if PostgreSQL is configured)
    if let Some(ref mut pg) = config.postgresql {
        if let Some(val) = env("POSTGRESQL_CONNECTION_STRING") {
            pg.connection_string = secret_string(val);
        }
        if let Some(max) = env_parsed("POSTGRESQL_MAX_CONNECTIONS")? {
            pg.max_connections = max;
        }
        if let Some(val) = env("POSTGRESQL_SSL_MODE") {
            pg.ssl_mode = val;
        }
        if let Some(run) = env_parsed("POSTGRESQL_RUN_MIGRATIONS")? {
            pg.run_migrations = run;
        }
    }

    // Auth overrides
    if let Some(val) = env("AUTH_JWT_SECRET") {
        config.auth.jwt_secret = secret_string(val);
    }
    if let Some(val) = env("AUTH_ISSUER") {
        config.auth.issuer = val;
    }
    if let Some(ttl) = env_parsed("AUTH_TOKEN_TTL_MINUTES")? {
        config.auth.token_ttl_minutes = ttl;
    }
    if let Some(val) = env("AUTH_ADMIN_EMAIL") {
        config.auth.admin_email = Some(val);
    }
    if let Some(val) = env("AUTH_ADMIN_PASSWORD") {
        config.auth.admin_password = Some(secret_string(val));
    }

    // Validation overrides
    if let Some(enforce) = env_parsed("VALIDATION_ENFORCE_CHECK_DIGITS")? {
        config.validation.enforce_check_digits = enforce;
    }

    // Logging overrides
    if let Some(enabled) = env_parsed("LOGGING_LOCAL_ENABLED")? {
        config.logging.local_enabled = enabled;
    }
    if let Some(val) = env("LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Some(val) = env("LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CLINIDATA_LOADER_TEST_VAR", "test_value");
        let input = "password = \"${CLINIDATA_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "password = \"test_value\"\n");
        std::env::remove_var("CLINIDATA_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CLINIDATA_LOADER_MISSING_VAR");
        let input = "password = \"${CLINIDATA_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CLINIDATA_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        let input = "# jwt_secret = \"${CLINIDATA_LOADER_COMMENTED_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert!(result.contains("${CLINIDATA_LOADER_COMMENTED_VAR}"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(ClinidataError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
database_target = "memory"

[application]
log_level = "debug"

[server]
port = 9090

[auth]
jwt_secret = "0123456789abcdef0123456789abcdef"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.auth.issuer, "clinidata");
        assert!(!config.validation.enforce_check_digits);
    }

    #[test]
    fn test_load_config_rejects_short_secret() {
        let toml_content = r#"
database_target = "memory"

[auth]
jwt_secret = "short"
"#;
        let err = parse_config(toml_content).unwrap_err();
        assert!(err.to_string().contains("jwt_secret"));
    }
}
