use crate::headers::HeaderMap;
use std::borrow::Cow;
use tracing::trace;

const AUTHORIZATION_HEADER: &str = "authorization";
const API_KEY_SCHEME: &str = "ApiKey";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiKeyError {
    #[error("no authorization header included")]
    NoAuthHeader,
    #[error("malformed authorization header")]
    MalformedHeader,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("header name cannot be empty")]
    EmptyHeaderName,
    #[error("scheme {0:?} must be non-empty and cannot contain whitespace")]
    InvalidScheme(String),
}

/// Reads the API key presented as `<scheme> <key>` in a request header.
///
/// The default extractor looks for `ApiKey <key>` in the `Authorization` header.
#[derive(Debug, Clone)]
pub struct ApiKeyExtractor {
    header_name: Cow<'static, str>,
    scheme: Cow<'static, str>,
}

impl Default for ApiKeyExtractor {
    fn default() -> Self {
        Self {
            header_name: Cow::Borrowed(AUTHORIZATION_HEADER),
            scheme: Cow::Borrowed(API_KEY_SCHEME),
        }
    }
}

impl ApiKeyExtractor {
    pub fn with_header_name(
        mut self,
        header_name: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ConfigError> {
        let header_name = header_name.into();
        if header_name.is_empty() {
            return Err(ConfigError::EmptyHeaderName);
        }
        self.header_name = header_name;
        Ok(self)
    }

    /// Replaces the scheme token. The comparison against the header stays case-sensitive.
    pub fn with_scheme(
        mut self,
        scheme: impl Into<Cow<'static, str>>,
    ) -> Result<Self, ConfigError> {
        let scheme = scheme.into();
        if scheme.is_empty() || scheme.contains(char::is_whitespace) {
            return Err(ConfigError::InvalidScheme(scheme.into_owned()));
        }
        self.scheme = scheme;
        Ok(self)
    }

    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// Returns everything after the first whitespace run following the scheme token,
    /// verbatim. An empty key (`"ApiKey "`) is a valid result.
    pub fn extract<'h, H>(&self, headers: &'h H) -> Result<&'h str, ApiKeyError>
    where
        H: HeaderMap + ?Sized,
    {
        let header_name: &str = &self.header_name;

        let value = headers.extract(header_name).map_err(|e| {
            trace!(header = header_name, error = ?e, "Cannot read header value");
            ApiKeyError::MalformedHeader
        })?;
        let value = match value {
            Some(v) if !v.is_empty() => v,
            _ => {
                trace!(header = header_name, "Missing header");
                return Err(ApiKeyError::NoAuthHeader);
            }
        };

        let Some((scheme, key)) = value.split_once(char::is_whitespace) else {
            trace!(header = header_name, "No separator after the scheme token");
            return Err(ApiKeyError::MalformedHeader);
        };
        if scheme != self.scheme {
            trace!(
                header = header_name,
                expected_scheme = %self.scheme,
                "Unexpected scheme token"
            );
            return Err(ApiKeyError::MalformedHeader);
        }

        Ok(key.trim_start_matches(char::is_whitespace))
    }
}

/// Extracts the key of an `Authorization: ApiKey <key>` header.
pub fn get_api_key<H>(headers: &H) -> Result<&str, ApiKeyError>
where
    H: HeaderMap + ?Sized,
{
    ApiKeyExtractor::default().extract(headers)
}
