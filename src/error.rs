// SPDX-License-Identifier: MIT

use thiserror::Error;

/// cognito-session Errors
#[derive(Debug, Error)]
pub enum Error {
    /// Identity provider rejected the request or could not be reached
    #[error(transparent)]
    Provider(#[from] ProviderError),
    /// Identity token is structurally malformed
    #[error(transparent)]
    TokenFormat(#[from] TokenFormatError),
    /// No identity token in the session store
    #[error("no identity token in the session store")]
    MissingToken,
    /// Token decoded, but the claim is absent
    #[error("identity token has no `{0}` claim")]
    MissingClaim(&'static str),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::Provider(ProviderError::Transport(err))
    }
}

impl From<Error> for http::StatusCode {
    /// For convenience, convert crate::Error into HTTP status code
    fn from(e: Error) -> Self {
        use Error::*;
        match e {
            Provider(ProviderError::Transport(_)) => http::StatusCode::BAD_GATEWAY,
            Provider(ProviderError::Status(_)) => http::StatusCode::BAD_GATEWAY,
            Provider(_) => http::StatusCode::UNAUTHORIZED,
            TokenFormat(_) | MissingToken | MissingClaim(_) => http::StatusCode::UNAUTHORIZED,
        }
    }
}

/// Failure reported by or on the way to the identity provider.
///
/// Service messages are passed through unchanged so callers can present
/// them as-is.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Error body returned by the user pool API, e.g. `NotAuthorizedException`
    #[error("{code}: {message}")]
    Service { code: String, message: String },
    /// Sign-in answered with an auth challenge this client does not drive
    #[error("unsupported authentication challenge `{0}`")]
    Challenge(String),
    /// Non-JSON error response from the endpoint
    #[error("identity provider returned status {0}")]
    Status(http::StatusCode),
    /// Network or protocol failure below the provider API
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Structural decode failure of an identity token
#[derive(Debug, Error)]
pub enum TokenFormatError {
    #[error("identity token is empty")]
    Empty,
    /// Not a `header.payload.signature` compact encoding
    #[error("identity token is not a three-part compact token")]
    Structure,
    #[error("identity token payload is not valid base64url: {0}")]
    PayloadEncoding(base64::DecodeError),
    #[error("identity token payload is not valid JSON: {0}")]
    PayloadJson(serde_json::Error),
    #[error("identity token payload is not a JSON object")]
    PayloadNotObject,
}

impl From<base64::DecodeError> for TokenFormatError {
    /// Base64 decode error in the identity token payload
    fn from(err: base64::DecodeError) -> Self {
        log::warn!("Invalid identity token: {:?}", err);
        Self::PayloadEncoding(err)
    }
}

impl From<serde_json::Error> for TokenFormatError {
    /// JSON decode error in the identity token payload
    fn from(err: serde_json::Error) -> Self {
        log::warn!("Invalid identity token: {:?}", err);
        Self::PayloadJson(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_message_passes_through() {
        let err = Error::from(ProviderError::Service {
            code: "NotAuthorizedException".to_string(),
            message: "Incorrect username or password.".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "NotAuthorizedException: Incorrect username or password."
        );
    }

    #[test]
    fn missing_claim_names_the_claim() {
        let err = Error::MissingClaim("cognito:username");
        assert!(err.to_string().contains("cognito:username"));
    }

    #[test]
    fn status_code_mapping() {
        let unauthorized = Error::from(ProviderError::Service {
            code: "NotAuthorizedException".to_string(),
            message: "no".to_string(),
        });
        assert_eq!(
            http::StatusCode::from(unauthorized),
            http::StatusCode::UNAUTHORIZED
        );

        assert_eq!(
            http::StatusCode::from(Error::MissingToken),
            http::StatusCode::UNAUTHORIZED
        );

        let bad_gateway = Error::from(ProviderError::Status(
            http::StatusCode::SERVICE_UNAVAILABLE,
        ));
        assert_eq!(
            http::StatusCode::from(bad_gateway),
            http::StatusCode::BAD_GATEWAY
        );
    }
}
