// SPDX-License-Identifier: MIT

//! Cognito user pool ID Provider

use crate::client::ClientBuilder;

/// Identity provider reachable by [`crate::Client`].
pub trait Provider {
    /// Service endpoint receiving the provider API calls.
    ///
    /// Returned as a plain string and resolved on each call, so that an
    /// invalid region or backend URL surfaces as a provider error at call
    /// time rather than as a local validation failure.
    fn endpoint(&self) -> String;

    /// Issuer of tokens from this provider, informative only.
    /// This crate never verifies `iss`; pass it to whatever external
    /// authority verifies tokens for you.
    fn issuer(&self) -> String;
}

/// Amazon Cognito user pool in one region.
///
/// `region` and `user_pool_id` normally come from the environment of the
/// embedding application. They are not validated here; the user pool API
/// rejects unknown pools and client ids when called.
#[derive(Clone, Debug)]
pub struct UserPoolProvider {
    region: String,
    user_pool_id: String,
    endpoint: Option<url::Url>,
}

impl UserPoolProvider {
    pub fn new(region: &str, user_pool_id: &str) -> Self {
        Self {
            region: region.to_string(),
            user_pool_id: user_pool_id.to_string(),
            endpoint: None,
        }
    }

    /// Route API calls to an alternate backend URL instead of the public
    /// `cognito-idp` endpoint. Used for proxies and for tests against a
    /// local mock provider.
    pub fn with_endpoint(self, endpoint: url::Url) -> Self {
        let mut provider = self;
        provider.endpoint = Some(endpoint);
        provider
    }

    /// Builder for a [`crate::Client`] on this user pool
    pub fn client(self) -> ClientBuilder<Self> {
        ClientBuilder::from_provider(self)
    }
}

impl Provider for UserPoolProvider {
    fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.to_string(),
            None => format!("https://cognito-idp.{}.amazonaws.com/", self.region),
        }
    }

    fn issuer(&self) -> String {
        format!(
            "https://cognito-idp.{}.amazonaws.com/{}",
            self.region, self.user_pool_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_from_region() {
        let provider = UserPoolProvider::new("eu-west-1", "eu-west-1_AbCdEfGhI");
        assert_eq!(
            provider.endpoint(),
            "https://cognito-idp.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn endpoint_override_wins() {
        let backend = url::Url::parse("http://127.0.0.1:9229/").unwrap();
        let provider = UserPoolProvider::new("eu-west-1", "eu-west-1_AbCdEfGhI")
            .with_endpoint(backend);
        assert_eq!(provider.endpoint(), "http://127.0.0.1:9229/");
    }

    #[test]
    fn issuer_names_the_pool() {
        let provider = UserPoolProvider::new("us-east-1", "us-east-1_Example1");
        assert_eq!(
            provider.issuer(),
            "https://cognito-idp.us-east-1.amazonaws.com/us-east-1_Example1"
        );
    }
}
