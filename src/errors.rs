use std::error::Error as StdError;
use std::fmt;
use std::num::{ParseFloatError, ParseIntError};

// type alias for Result for use across the library
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug)]
pub enum Error {
    Io(std::io::Error),
    Parse(String),
    InvalidValue(String, String),
    Validation(String),
    Document(String),
    Cli(String),
    Message(String),
    Other(Box<dyn StdError + Send + Sync>),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(source) => write!(f, "IO error: {source}"),
            Error::Parse(reason) => write!(f, "Parse error: {reason}"),
            Error::InvalidValue(what, value) => write!(f, "Invalid {what}: '{value}'"),
            Error::Validation(reason) => write!(f, "Invalid settings: {reason}"),
            Error::Document(reason) => write!(f, "Document error: {reason}"),
            Error::Cli(reason) => write!(f, "Command line error: {reason}"),
            Error::Message(reason) => write!(f, "{reason}"),
            Error::Other(source) => write!(f, "{source}"),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::Io(source) => Some(source),
            Error::Other(e) => Some(&**e),
            _ => None,
        }
    }
}

impl Error {
    pub fn from_err<T>(err: T) -> Error
    where
        T: StdError + Send + Sync + 'static,
    {
        Error::Other(Box::new(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Error {
        Error::Io(err)
    }
}

impl From<ParseFloatError> for Error {
    fn from(err: ParseFloatError) -> Error {
        Error::Parse(format!("float: {err}"))
    }
}

impl From<ParseIntError> for Error {
    fn from(err: ParseIntError) -> Error {
        Error::Parse(format!("int: {err}"))
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Error {
        Error::Message(err.to_string())
    }
}
