mod client;
mod error;
mod id_token;
mod provider;
mod session_store;

// exports
pub use client::{AuthenticationResult, Client, ClientBuilder, CodeDeliveryDetails, SignUpOutcome};
pub use error::{Error, ProviderError, TokenFormatError};
pub use id_token::IdToken;
pub use provider::Provider;
pub use provider::UserPoolProvider;
pub use session_store::{CredentialTriple, SessionStore};
pub use session_store::{ACCESS_TOKEN_KEY, ID_TOKEN_KEY, REFRESH_TOKEN_KEY};
