use thiserror::Error;

#[derive(Error, Debug)]
pub enum DlparError {
    #[error("Command '{command}' failed: {detail}")]
    CommandError { command: String, detail: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Install the required packages: {}", .packages.join(", "))]
    MissingPackagesError { packages: Vec<String> },

    #[error("RSCT services are still inoperative after startsrc")]
    ServiceInactiveError,

    #[error("Lpar {lpar} not found in managed system {managed_system}")]
    LparNotFoundError { lpar: String, managed_system: String },

    #[error("Failed to get location code for device '{device}': {reason}")]
    LocationCodeError { device: String, reason: String },

    #[error("No {subtype} entry for location code '{location_code}' on lpar {lpar}")]
    SlotNotFoundError {
        subtype: String,
        location_code: String,
        lpar: String,
    },

    #[error("Verification failed after dlpar {operation} of {resource}: {detail}")]
    VerificationError {
        operation: String,
        resource: String,
        detail: String,
    },
}

pub type Result<T> = std::result::Result<T, DlparError>;
