#[derive(Debug, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("unknown section key: {0}")]
    InvalidKey(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid script: {0}")]
    Script(String),
    #[error("failed to read script file: {0}")]
    FileRead(std::io::Error),
    #[error("failed to serialize record: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to serialize YAML: {0}")]
    YamlSerialization(serde_yaml::Error),
    #[error("invalid value: {0}")]
    Types(#[from] intake_types::TypesError),
}

pub type IntakeResult<T> = std::result::Result<T, IntakeError>;
