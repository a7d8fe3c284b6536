use std::convert::Infallible;
use std::fmt;

/// Read access to a request's headers.
///
/// `extract` returns the first value stored under `name`. Names are compared
/// case-insensitively.
pub trait HeaderMap {
    type Error: fmt::Debug;

    fn extract(&self, name: &str) -> Result<Option<&str>, Self::Error>;
}

impl HeaderMap for Vec<(String, String)> {
    type Error = Infallible;

    fn extract(&self, name: &str) -> Result<Option<&str>, Self::Error> {
        for (k, v) in self {
            if k.eq_ignore_ascii_case(name) {
                return Ok(Some(v));
            }
        }
        Ok(None)
    }
}

impl HeaderMap for [(&str, &str)] {
    type Error = Infallible;

    fn extract(&self, name: &str) -> Result<Option<&str>, Self::Error> {
        Ok(self
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| *v))
    }
}

impl<const N: usize> HeaderMap for [(&str, &str); N] {
    type Error = Infallible;

    fn extract(&self, name: &str) -> Result<Option<&str>, Self::Error> {
        self.as_slice().extract(name)
    }
}

#[cfg(feature = "http")]
impl HeaderMap for http::HeaderMap {
    type Error = http::header::ToStrError;

    fn extract(&self, name: &str) -> Result<Option<&str>, Self::Error> {
        self.get(name).map(|hv| hv.to_str()).transpose()
    }
}
