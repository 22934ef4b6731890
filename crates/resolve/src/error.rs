use std::fmt;

#[derive(Debug)]
pub enum ResolveError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (same input/output file, etc.).
    ConfigValidation(String),
    /// A mapped column is missing from the input header.
    MissingColumn { column: String },
    /// CSV read or write error.
    Csv(String),
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ResolveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { column } => write!(f, "missing column '{column}' in input header"),
            Self::Csv(msg) => write!(f, "CSV error: {msg}"),
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ResolveError {}
