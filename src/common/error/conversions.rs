//! Conversions from foreign error types into [`Error`].

use super::types::Error;

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}
