use std::convert::Infallible;

use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// JSON body extractor that never rejects.
///
/// An empty, unreadable or malformed body (or one that does not fit `T`)
/// yields `T::default()` instead of a 4xx, so handlers can apply whatever
/// fields they understand.
#[derive(Debug, Clone, Default)]
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        let body = match Bytes::from_request(req, state).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("failed to read request body: {e}");
                return Ok(Self(T::default()));
            }
        };

        Ok(Self(parse_or_default(&body)))
    }
}

/// Parses `body` as `T`, falling back to `T::default()`.
pub fn parse_or_default<T>(body: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return T::default();
    }

    serde_json::from_slice(body).unwrap_or_else(|e| {
        tracing::debug!("ignoring malformed JSON body: {e}");
        T::default()
    })
}
