//! Runtime configuration.
//!
//! An INI-style rcfile with a single `[sprig]` section whose keys mirror the
//! long command-line flags. List values are comma-separated; an indented
//! line continues the previous value. Lines starting with `#` or `;` are
//! comments.

use std::path::PathBuf;

use sprig::codegen::{Encoding, MatchPolicy};

/// Configuration-file failure categories.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("missing runtime configuration section `[sprig]`")]
    MissingSection,

    #[error("line {0}: expected `key=value`")]
    MalformedLine(usize),

    #[error("unrecognized option `{0}`")]
    UnknownKey(String),

    #[error("invalid value `{value}` for `{key}`")]
    InvalidValue { key: String, value: String },
}

/// Fully resolved run settings; the defaults are what a bare invocation
/// gets.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub encoding: Encoding,
    pub match_policy: MatchPolicy,
    pub force: bool,
    pub generate: Vec<String>,
    pub output: String,
    pub parsers: Vec<PathBuf>,
    pub scanners: Vec<PathBuf>,
    pub time: bool,
    pub verbose: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            encoding: Encoding::Table,
            match_policy: MatchPolicy::Longest,
            force: false,
            generate: Vec::new(),
            output: "out".to_owned(),
            parsers: Vec::new(),
            scanners: Vec::new(),
            time: false,
            verbose: false,
        }
    }
}

/// Parse an rcfile into settings, starting from the defaults.
pub fn parse(text: &str) -> Result<Settings, ConfigError> {
    let mut settings = Settings::default();
    for (key, value) in section_values(text)? {
        match key.as_str() {
            // mirrors the -c flag; carries no meaning inside the file
            "configuration" => {}
            "encoding" => {
                settings.encoding = match value.as_str() {
                    "table" => Encoding::Table,
                    "direct" => Encoding::Direct,
                    _ => return Err(invalid(&key, &value)),
                }
            }
            "match" => {
                settings.match_policy = match value.as_str() {
                    "longest" => MatchPolicy::Longest,
                    "shortest" => MatchPolicy::Shortest,
                    _ => return Err(invalid(&key, &value)),
                }
            }
            "force" => settings.force = boolean(&key, &value)?,
            "time" => settings.time = boolean(&key, &value)?,
            "verbose" => settings.verbose = boolean(&key, &value)?,
            "generate" => settings.generate = list(&value),
            "output" => settings.output = value,
            "parsers" => settings.parsers = list(&value).into_iter().map(PathBuf::from).collect(),
            "scanners" => settings.scanners = list(&value).into_iter().map(PathBuf::from).collect(),
            _ => return Err(ConfigError::UnknownKey(key)),
        }
    }
    Ok(settings)
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_owned(),
        value: value.to_owned(),
    }
}

fn boolean(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value {
        "True" => Ok(true),
        "False" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}

/// Split a comma-separated list, dropping empty entries.
fn list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Collect `key=value` pairs from the `[sprig]` section.
fn section_values(text: &str) -> Result<Vec<(String, String)>, ConfigError> {
    let mut values: Vec<(String, String)> = Vec::new();
    let mut in_section = false;
    let mut seen_section = false;

    for (number, raw) in text.lines().enumerate() {
        let line = raw.trim_end();
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        if trimmed.starts_with('[') {
            in_section = trimmed == "[sprig]";
            seen_section |= in_section;
            continue;
        }
        if !in_section {
            continue;
        }

        if line.starts_with(char::is_whitespace) {
            // continuation of the previous value
            let Some((_, value)) = values.last_mut() else {
                return Err(ConfigError::MalformedLine(number + 1));
            };
            value.push_str(trimmed);
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::MalformedLine(number + 1));
        };
        values.push((key.trim().to_owned(), value.trim().to_owned()));
    }

    if !seen_section {
        return Err(ConfigError::MissingSection);
    }
    Ok(values)
}

/// Template written by `-G`.
pub const TEMPLATE: &str = "\
[sprig]
# Path to the runtime configuration file.
# Ignored; present to mirror the command-line option.
configuration=.sprigrc

# Source encoding for generated output: 'table' or 'direct'.
encoding=table

# Matching strategy for generated scanners: 'longest' or 'shortest'.
match=longest

# Overwrite pre-existing output files: 'True' or 'False'.
force=True

# Languages targeted for generation.
generate=c

# Base filename for generated outputs.
output=out

# Paths to JSON parser specifications, if any.
parsers=

# Paths to JSON scanner specifications, if any.
scanners=

# Report the wall time taken for each step: 'True' or 'False'.
time=False

# Output more information while running: 'True' or 'False'.
verbose=False
";

#[cfg(test)]
mod tests {
    use indoc::indoc;

    use super::*;

    #[test]
    fn template_round_trips() {
        let settings = parse(TEMPLATE).unwrap();
        assert_eq!(settings.encoding, Encoding::Table);
        assert_eq!(settings.match_policy, MatchPolicy::Longest);
        assert!(settings.force);
        assert_eq!(settings.generate, ["c"]);
        assert_eq!(settings.output, "out");
        assert!(settings.parsers.is_empty());
        assert!(settings.scanners.is_empty());
        assert!(!settings.time);
        assert!(!settings.verbose);
    }

    #[test]
    fn continuation_lines_extend_lists() {
        let text = indoc! {"
            [sprig]
            scanners=one.json,
                     two.json,
                     three.json
        "};
        let settings = parse(text).unwrap();
        assert_eq!(
            settings.scanners,
            [
                PathBuf::from("one.json"),
                PathBuf::from("two.json"),
                PathBuf::from("three.json")
            ]
        );
    }

    #[test]
    fn other_sections_are_ignored() {
        let text = indoc! {"
            [other]
            encoding=bogus

            [sprig]
            encoding=direct
        "};
        let settings = parse(text).unwrap();
        assert_eq!(settings.encoding, Encoding::Direct);
    }

    #[test]
    fn missing_section_is_an_error() {
        assert_eq!(
            parse("[other]\nencoding=table\n").unwrap_err(),
            ConfigError::MissingSection
        );
        assert_eq!(parse("").unwrap_err(), ConfigError::MissingSection);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let text = "[sprig]\ncolor=always\n";
        assert_eq!(
            parse(text).unwrap_err(),
            ConfigError::UnknownKey("color".to_string())
        );
    }

    #[test]
    fn malformed_booleans_are_rejected() {
        let text = "[sprig]\nforce=yes\n";
        assert!(matches!(
            parse(text).unwrap_err(),
            ConfigError::InvalidValue { .. }
        ));
    }

    #[test]
    fn malformed_lines_are_rejected() {
        let text = "[sprig]\nencoding\n";
        assert_eq!(parse(text).unwrap_err(), ConfigError::MalformedLine(2));
    }

    #[test]
    fn empty_lists_collapse() {
        let text = "[sprig]\ngenerate=\nscanners= ,\n";
        let settings = parse(text).unwrap();
        assert!(settings.generate.is_empty());
        assert!(settings.scanners.is_empty());
    }
}
