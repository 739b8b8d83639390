use crate::errors::CliError;
use affinidi_multihash::{Algorithm, Base};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::{
    env, fmt,
    fs::File,
    io::{self, BufRead},
    path::Path,
};
use tracing::{Level, event, level_filters::LevelFilter};
use tracing_subscriber::{Registry, reload::Handle};

/// Used when `--config` isn't given. Missing is fine, defaults apply.
pub const DEFAULT_CONFIG_FILE: &str = "conf/multihash.toml";

/// ConfigRaw Struct is used to deserialize the configuration file
/// We then convert this to the Config Struct
#[derive(Debug, Default, Serialize, Deserialize)]
struct ConfigRaw {
    #[serde(default)]
    pub log_level: String,
    pub algorithm: Option<Algorithm>,
    #[serde(default)]
    pub length: String,
    pub bases: Option<Vec<Base>>,
}

pub struct Config {
    pub log_level: LevelFilter,
    pub algorithm: Algorithm,
    pub length: Option<usize>,
    pub bases: Vec<Base>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("log_level", &self.log_level)
            .field("algorithm", &self.algorithm.name())
            .field(
                "length",
                &self
                    .length
                    .map_or_else(|| "native".to_string(), |l| format!("{l} bytes")),
            )
            .field(
                "bases",
                &self.bases.iter().map(|b| b.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            log_level: LevelFilter::INFO,
            algorithm: Algorithm::Sha2_256,
            length: None,
            bases: Base::SUPPORTED.to_vec(),
        }
    }
}

impl TryFrom<ConfigRaw> for Config {
    type Error = CliError;

    fn try_from(raw: ConfigRaw) -> Result<Self, Self::Error> {
        let defaults = Config::default();

        let length = match raw.length.trim() {
            "" => None,
            l => Some(l.parse().map_err(|err| {
                CliError::ConfigError(format!("length({l}) is not a number. Reason: {err}"))
            })?),
        };

        let bases = raw.bases.unwrap_or(defaults.bases);
        if let Some(base) = bases.iter().find(|b| !Base::SUPPORTED.contains(*b)) {
            return Err(CliError::ConfigError(format!(
                "base({base}) can't be used for output"
            )));
        }

        Ok(Config {
            log_level: parse_log_level(&raw.log_level).unwrap_or(defaults.log_level),
            algorithm: raw.algorithm.unwrap_or(defaults.algorithm),
            length,
            bases,
        })
    }
}

pub fn parse_log_level(level: &str) -> Option<LevelFilter> {
    match level {
        "trace" => Some(LevelFilter::TRACE),
        "debug" => Some(LevelFilter::DEBUG),
        "info" => Some(LevelFilter::INFO),
        "warn" => Some(LevelFilter::WARN),
        "error" => Some(LevelFilter::ERROR),
        _ => None,
    }
}

/// Read the configuration file
/// Returns a ConfigRaw struct, that still needs to be processed for additional information
/// and conversion to Config struct
fn read_config_file(file_name: &Path) -> Result<ConfigRaw, CliError> {
    // Read configuration file parameters
    event!(Level::DEBUG, "Config file({})", file_name.display());
    let raw_config = read_file_lines(file_name)?;

    event!(Level::TRACE, "raw_config = {:?}", raw_config);
    parse_config(&raw_config)
}

fn parse_config(raw_config: &[String]) -> Result<ConfigRaw, CliError> {
    let config_with_vars = expand_env_vars(raw_config);
    toml::from_str(&config_with_vars.join("\n")).map_err(|err| {
        event!(
            Level::ERROR,
            "Could not parse configuration settings. {err:?}"
        );
        CliError::ConfigError(format!(
            "Could not parse configuration settings. Reason: {err}"
        ))
    })
}

/// Reads a file and returns a vector of strings, one for each line in the file.
/// It also strips any lines starting with a # (comments)
/// You can join the Vec back into a single string with `.join("\n")`
pub(crate) fn read_file_lines<P>(file_name: P) -> Result<Vec<String>, CliError>
where
    P: AsRef<Path>,
{
    let file = File::open(file_name.as_ref()).map_err(|err| {
        event!(
            Level::ERROR,
            "Could not open file({}). {}",
            file_name.as_ref().display(),
            err
        );
        CliError::ConfigError(format!(
            "Could not open file({}). {}",
            file_name.as_ref().display(),
            err
        ))
    })?;

    let mut lines = Vec::new();
    for line in io::BufReader::new(file).lines().map_while(Result::ok) {
        // Strip comments out
        if !line.starts_with('#') {
            lines.push(line);
        }
    }

    Ok(lines)
}

/// Replaces all strings ${VAR_NAME:default_value}
/// with the corresponding environment variables (e.g. value of ${VAR_NAME})
/// or with `default_value` if the variable is not defined.
fn expand_env_vars(raw_config: &[String]) -> Vec<String> {
    let re = match Regex::new(r"\$\{(?P<env_var>[A-Z_]{1,}[0-9A-Z_]*):(?P<default_value>[^}]*)\}")
    {
        Ok(re) => re,
        Err(err) => {
            event!(Level::WARN, "Environment expansion disabled. {err}");
            return raw_config.to_vec();
        }
    };

    raw_config
        .iter()
        .map(|line| {
            re.replace_all(line, |caps: &Captures| match env::var(&caps["env_var"]) {
                Ok(val) => val,
                Err(_) => (caps["default_value"]).into(),
            })
            .into_owned()
        })
        .collect()
}

/// Loads the configuration and applies its log level.
///
/// `file_name` of `None` reads [`DEFAULT_CONFIG_FILE`] if present.
pub fn init(
    file_name: Option<&Path>,
    reload_handle: Option<Handle<LevelFilter, Registry>>,
) -> Result<Config, CliError> {
    let raw = match file_name {
        Some(file_name) => read_config_file(file_name)?,
        None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
            read_config_file(Path::new(DEFAULT_CONFIG_FILE))?
        }
        None => {
            event!(Level::DEBUG, "No config file, using defaults");
            ConfigRaw::default()
        }
    };

    if !raw.log_level.is_empty() && parse_log_level(&raw.log_level).is_none() {
        event!(
            Level::WARN,
            "log_level({}) is unknown in config file. Defaults to INFO",
            raw.log_level
        );
    }

    let config = Config::try_from(raw)?;

    // Setup logging
    if let Some(reload_handle) = reload_handle {
        reload_handle
            .modify(|filter| *filter = config.log_level)
            .map_err(|e| CliError::InternalError(e.to_string()))?;
    }

    event!(
        Level::DEBUG,
        "Configuration settings parsed successfully.\n{:#?}",
        config
    );
    Ok(config)
}
