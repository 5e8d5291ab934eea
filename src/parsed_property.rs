use std::{ops::Deref, path::PathBuf};

/// A configuration value together with the layer it was resolved from.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedProperty<T> {
    /// Value from a command line flag (parsed_value, flag_name)
    Cli(T, String),
    /// Value from an environment variable (parsed_value, variable_name)
    Env(T, String),
    /// Value from the configuration file (parsed_value, file_path)
    File(T, PathBuf),
    /// Built-in default
    Default(T),
}

impl<T> ParsedProperty<T> {
    /// Get the parsed value
    pub fn value(&self) -> &T {
        match self {
            ParsedProperty::Cli(value, _)
            | ParsedProperty::Env(value, _)
            | ParsedProperty::File(value, _)
            | ParsedProperty::Default(value) => value,
        }
    }

    /// Consume the property and return the parsed value
    pub fn into_value(self) -> T {
        match self {
            ParsedProperty::Cli(value, _)
            | ParsedProperty::Env(value, _)
            | ParsedProperty::File(value, _)
            | ParsedProperty::Default(value) => value,
        }
    }

    /// Short name of the layer this value came from
    pub fn source_name(&self) -> &'static str {
        match self {
            ParsedProperty::Cli(_, _) => "cli",
            ParsedProperty::Env(_, _) => "env",
            ParsedProperty::File(_, _) => "file",
            ParsedProperty::Default(_) => "default",
        }
    }

    /// Human readable origin, e.g. `env UNMERGED_COMMITS_REPO`
    pub fn describe_source(&self) -> String {
        match self {
            ParsedProperty::Cli(_, flag) => format!("cli {}", flag),
            ParsedProperty::Env(_, var) => format!("env {}", var),
            ParsedProperty::File(_, path) => format!("file {}", path.display()),
            ParsedProperty::Default(_) => "default".to_string(),
        }
    }
}

impl<T> Deref for ParsedProperty<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        self.value()
    }
}

impl<T> From<T> for ParsedProperty<T> {
    fn from(value: T) -> Self {
        ParsedProperty::Default(value)
    }
}
