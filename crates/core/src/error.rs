use leon::{ParseError, RenderError};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Misuse of the declaration surface by the script author.
///
/// These are defects in the script itself. The lifecycle never catches them.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("The script was already configured. This command is not allowed outside configure().")]
    AlreadyInitialized,

    #[error("Invalid option: {}. Only alphanumeric characters.", .0)]
    InvalidOption(String),

    #[error("Invalid alias: {}. Only alphanumeric characters.", .0)]
    InvalidAlias(String),

    #[error("This option was already registered: {}.", .0)]
    DuplicateOption(String),

    #[error("This alias already exists: {}.", .0)]
    DuplicateAlias(String),

    #[error("No option is registered under `{}`.", .0)]
    UnknownOption(String),

    #[error("There's no point setting a default value for a flag option.")]
    DefaultOnFlag,

    #[error("A validation rule was already set for option `{}`.", .0)]
    RuleAlreadySet(String),

    #[error("Discrete Error: Invalid discrete options.")]
    EmptyDiscreteSet,

    #[error("Range Error: Malformed range.")]
    MalformedRange,

    #[error("Range Error: Lower bound must be lower than upper bound.")]
    InvertedRange,

    #[error("{} Error: Invalid value.", .0)]
    InvalidBound(&'static str),

    #[error("Library not found: {}.", .0)]
    LibraryNotFound(String),

    #[error("Unable to load main script file. Expected script: {}", .0)]
    ScriptNotFound(String),

    #[error("The {} phase cannot run while the script is {}.", .phase, .state)]
    PhaseOrder { phase: String, state: String },

    #[error("Invalid version format `{}`: {}", .format, .reason)]
    VersionFormat { format: String, reason: String },
}

/// Misuse of a script by the person running it.
///
/// Caught once by [`crate::lifecycle::run`], printed, and turned into a
/// failure exit status.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UsageError {
    #[error("Invalid option: {}", .0)]
    InvalidOption(String),

    #[error("Option requires an argument: {}", .0)]
    MissingArgument(String),

    #[error("Invalid value. Option: {} Value: {}.", .option, .value)]
    InvalidValue { option: String, value: String },

    #[error("Custom validation function failed.")]
    CustomRejected { option: String },

    #[error("{}\nUse {} to see help.", .inner, .help)]
    WithHelp {
        inner: Box<UsageError>,
        help: String,
    },

    #[error("{}", .0)]
    Script(String),
}

impl UsageError {
    /// Appends a pointer to the active help option.
    #[must_use]
    pub fn with_help(self, help: Option<String>) -> Self {
        match help {
            Some(help) => Self::WithHelp {
                inner: Box::new(self),
                help,
            },
            None => self,
        }
    }

    /// The error without any help hint attached.
    #[must_use]
    pub fn root(&self) -> &UsageError {
        match self {
            Self::WithHelp { inner, .. } => inner.root(),
            other => other,
        }
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("IO error with {} file at path `{}`: {}", .file_description, .path, .original)]
    Io {
        file_description: String,
        path: String,
        original: std::io::Error,
    },

    #[error("Error {} {} file at `{}`: {}", .action, .file_description, .path, .original)]
    Yaml {
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    },

    #[error("Error parsing version format: {}", .0)]
    Parse(#[from] ParseError),

    #[error("Error rendering version format: {}", .0)]
    Render(#[from] RenderError),

    #[error("STDIO error: {}", .0)]
    Stdio(#[from] std::io::Error),
}

impl Error {
    pub fn io_error(file_description: String, path: String, original: std::io::Error) -> Self {
        Self::Io {
            file_description,
            path,
            original,
        }
    }

    pub fn yaml_error(
        action: String,
        file_description: String,
        path: String,
        original: serde_yaml::Error,
    ) -> Self {
        Self::Yaml {
            action,
            file_description,
            path,
            original,
        }
    }

    /// Shorthand for scripts that reject their input from inside `execute`.
    pub fn usage(message: impl Into<String>) -> Self {
        Self::Usage(UsageError::Script(message.into()))
    }
}
