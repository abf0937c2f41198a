use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::PathError;

#[derive(Debug, thiserror::Error)]
pub enum TypedError {
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("nothing at `{0}`")]
    Missing(String),
    #[error("at `{path}` → {inner_path}: {message}")]
    Deserialize {
        path: String,
        inner_path: String,
        message: String,
    },
}

/// Reads the value at `path` and deserializes it, naming the inner JSON path on failure.
pub fn get_as<T: DeserializeOwned>(target: &Value, path: &str) -> Result<T, TypedError> {
    let value = crate::get(target, path)?.ok_or_else(|| TypedError::Missing(path.to_string()))?;
    serde_path_to_error::deserialize::<_, T>(value).map_err(|err| TypedError::Deserialize {
        path: path.to_string(),
        inner_path: err.path().to_string(),
        message: err.into_inner().to_string(),
    })
}

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T, String> {
    let de = &mut serde_json::Deserializer::from_str(src);
    match serde_path_to_error::deserialize::<_, T>(de) {
        Ok(v) => Ok(v),
        Err(err) => {
            let path = err.path().to_string();
            Err(format!("at JSON path {path} → {}", err.into_inner()))
        }
    }
}
