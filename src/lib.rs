mod api_key;
mod headers;

pub use api_key::{get_api_key, ApiKeyError, ApiKeyExtractor, ConfigError};
pub use headers::HeaderMap;
