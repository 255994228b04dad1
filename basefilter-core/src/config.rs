use ropey::Rope;
use std::fs;
use std::path::Path;
use textum::{Boundary, BoundaryMode, Snippet, Target};

/// File name of the settings file looked up at the vault root.
pub const CONFIG_FILE_NAME: &str = "basefilter.toml";

const SECTION_HEADER: &str = "[basefilter]";
const MAX_DEBOUNCE_MS: u64 = 2000;

/// Settings shared by discovery, write-back and the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Language tag of the fenced blocks to target (`base` for ```` ```base ````).
    pub code_fence_language: String,
    /// Whether `![[file.base]]` embeds are followed as well.
    pub target_embeds: bool,
    /// Delay before a typed value is applied, in milliseconds.
    pub input_debounce_ms: u64,
    /// Delay before blocks are re-scanned after an edit, in milliseconds.
    pub update_debounce_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            code_fence_language: "base".to_string(),
            target_embeds: true,
            input_debounce_ms: 150,
            update_debounce_ms: 300,
        }
    }
}

/// Errors that can occur while reading settings
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    MissingSection,
    Invalid(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::IoError(err)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::MissingSection => {
                write!(f, "{} section not found", SECTION_HEADER)
            }
            ConfigError::Invalid(msg) => write!(f, "Invalid setting: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Reads settings from the `[basefilter]` section of the file at `path`.
///
/// Keys missing from the section keep their default value.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_settings(&content)
}

/// Reads settings from the nearest `basefilter.toml`, or the defaults if there is none.
pub fn load_settings_from(start: &Path) -> Result<Settings, ConfigError> {
    match crate::path_utils::find_config_file(start) {
        Some(path) => {
            crate::basefilter_debug!("reading settings from {}", path.display());
            load_settings(&path)
        }
        None => Ok(Settings::default()),
    }
}

/// Parses the `[basefilter]` section out of a settings file's content.
pub fn parse_settings(content: &str) -> Result<Settings, ConfigError> {
    let section_text = section_text(content)?;
    let mut settings = Settings::default();

    for line in section_text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let value = value.trim().trim_matches('"');

        match key.trim() {
            "code-fence-language" => {
                if value.is_empty() {
                    return Err(ConfigError::Invalid(
                        "code-fence-language must not be empty".to_string(),
                    ));
                }
                settings.code_fence_language = value.to_string();
            }
            "target-embeds" => settings.target_embeds = parse_bool(key.trim(), value)?,
            "input-debounce-ms" => settings.input_debounce_ms = parse_debounce(key.trim(), value)?,
            "update-debounce-ms" => {
                settings.update_debounce_ms = parse_debounce(key.trim(), value)?
            }
            _ => {}
        }
    }

    Ok(settings)
}

fn section_text(content: &str) -> Result<String, ConfigError> {
    if !content.contains(SECTION_HEADER) {
        return Err(ConfigError::MissingSection);
    }
    let rope = Rope::from_str(content);

    // Try to find the section text - handle both cases: another section exists or EOF
    if let Ok(resolution) = (Snippet::Between {
        start: Boundary::new(
            Target::Literal(SECTION_HEADER.to_string()),
            BoundaryMode::Exclude,
        ),
        end: Boundary::new(Target::Literal("[".to_string()), BoundaryMode::Exclude),
    })
    .resolve(&rope)
    {
        return Ok(rope.slice(resolution.start..resolution.end).to_string());
    }

    let snippet = Snippet::From(Boundary::new(
        Target::Literal(SECTION_HEADER.to_string()),
        BoundaryMode::Exclude,
    ));
    let resolution = snippet
        .resolve(&rope)
        .map_err(|e| ConfigError::Invalid(format!("Failed to resolve section: {:?}", e)))?;
    Ok(rope.slice(resolution.start..resolution.end).to_string())
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        other => Err(ConfigError::Invalid(format!(
            "{key} expects true or false, got {other:?}"
        ))),
    }
}

fn parse_debounce(key: &str, value: &str) -> Result<u64, ConfigError> {
    let ms: u64 = value
        .parse()
        .map_err(|_| ConfigError::Invalid(format!("{key} expects an integer, got {value:?}")))?;
    if ms > MAX_DEBOUNCE_MS {
        return Err(ConfigError::Invalid(format!(
            "{key} must be between 0 and {MAX_DEBOUNCE_MS}, got {ms}"
        )));
    }
    Ok(ms)
}
