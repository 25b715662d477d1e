pub mod error;

pub use error::{ErrorClassifier, ErrorKind, InferenceError, MunError, Result};
