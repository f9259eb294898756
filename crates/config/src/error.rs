#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Interval `{0}` must be greater than zero")]
    ZeroInterval(&'static str),

    #[error("Stall threshold must lie within 0 to 100, got {0}")]
    ThresholdOutOfRange(f64),

    #[error("Failed to serialize TOML: {0}")]
    SerializeTOML(#[from] toml_edit::ser::Error),

    #[error("Failed to deserialize TOML: {0}")]
    DeserializeTOML(#[from] toml_edit::de::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseTOML(#[from] toml_edit::TomlError),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),
}
