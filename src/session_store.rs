// SPDX-License-Identifier: MIT

//! Session-scoped credential store
//!
//! Holds the credential triple issued on sign-in for the rest of the
//! session, under the same key names a browser front end would use in
//! `sessionStorage`. The store is an explicit value handed to whatever
//! needs credentials, not ambient global state, so tests can run against
//! a plain in-memory instance.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::client::AuthenticationResult;
use crate::error::Error;
use crate::id_token::{IdToken, USERNAME_CLAIM};

/// Store key of the identity token
pub const ID_TOKEN_KEY: &str = "idToken";
/// Store key of the access token
pub const ACCESS_TOKEN_KEY: &str = "accessToken";
/// Store key of the refresh token
pub const REFRESH_TOKEN_KEY: &str = "refreshToken";

/// Identity, access and refresh tokens issued together by one
/// authentication event.
///
/// All three are opaque provider-issued strings. A token the provider did
/// not include is carried as an empty string rather than omitted, so the
/// triple is always complete once written.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialTriple {
    pub id_token: String,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&AuthenticationResult> for CredentialTriple {
    fn from(result: &AuthenticationResult) -> Self {
        Self {
            id_token: result.id_token.clone().unwrap_or_default(),
            access_token: result.access_token.clone().unwrap_or_default(),
            refresh_token: result.refresh_token.clone().unwrap_or_default(),
        }
    }
}

/// Custom `Debug` that redacts the token values
impl std::fmt::Debug for CredentialTriple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialTriple")
            .field("id_token", &"[REDACTED]")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Session-lifetime key/value store of the credential triple.
///
/// Clones share the same underlying map, like two references to the same
/// browser tab session. Store operations never fail; error handling
/// happens at the call sites that populate and consume it.
#[derive(Clone, Default)]
pub struct SessionStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl SessionStore {
    /// Empty store, nothing signed in yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Write all three credentials of one authentication event.
    /// Overwrites any previous triple wholesale; never a partial update.
    pub fn store(&self, triple: &CredentialTriple) {
        let mut values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.insert(ID_TOKEN_KEY.to_string(), triple.id_token.clone());
        values.insert(ACCESS_TOKEN_KEY.to_string(), triple.access_token.clone());
        values.insert(REFRESH_TOKEN_KEY.to_string(), triple.refresh_token.clone());
    }

    /// Stored value for `key`, absent if never set.
    /// No expiry and no validation is performed on reads.
    pub fn read(&self, key: &str) -> Option<String> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        values.get(key).cloned()
    }

    /// Username from the stored identity token.
    ///
    /// Degrades to `None` when no token is stored, the token does not
    /// decode, or the claim is absent; the failure is logged. Use
    /// [`try_username`](Self::try_username) when the caller needs the
    /// failure itself.
    pub fn username(&self) -> Option<String> {
        match self.try_username() {
            Ok(username) => Some(username),
            Err(err) => {
                log::warn!("Error retrieving username: {}", err);
                None
            }
        }
    }

    /// Username from the stored identity token, with the failure reported.
    ///
    /// The claim is read from the decoded payload without signature or
    /// expiry verification, see [`IdToken::decode_without_verification`].
    pub fn try_username(&self) -> Result<String, Error> {
        let id_token = self
            .read(ID_TOKEN_KEY)
            .filter(|token| !token.is_empty())
            .ok_or(Error::MissingToken)?;

        let id_token = IdToken::decode_without_verification(&id_token)?;
        let username = id_token
            .username()
            .ok_or(Error::MissingClaim(USERNAME_CLAIM))?;
        Ok(username.to_string())
    }
}
