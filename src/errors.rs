use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumperError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Missing required option '{field}'")]
    ConfigurationGap { field: &'static str },

    #[error("Invalid option: {0}")]
    InvalidOption(String),

    #[error("Unknown database engine: {0}")]
    UnknownEngine(String),

    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),

    // Launch failures, carrying the original message.
    #[error("Process error: {0}")]
    Process(String),

    #[error("Command exited with {}: {stderr}", describe_exit(.exit_code))]
    CommandFailed { exit_code: Option<i32>, stderr: String },

    #[error("Command timed out after {secs} seconds")]
    Timeout { secs: u64 },
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("status {}", code),
        None => "a signal".to_string(),
    }
}

pub type Result<T> = std::result::Result<T, DumperError>;
