// SPDX-License-Identifier: MIT
use crate::error::ProviderError;
use crate::session_store::{CredentialTriple, SessionStore};
use crate::{Error, Provider};

// `X-Amz-Target` operation names of the user pool API.
// See <https://docs.aws.amazon.com/cognito-user-identity-pools/latest/APIReference/Welcome.html>
const TARGET_INITIATE_AUTH: &str = "AWSCognitoIdentityProviderService.InitiateAuth";
const TARGET_SIGN_UP: &str = "AWSCognitoIdentityProviderService.SignUp";
const TARGET_CONFIRM_SIGN_UP: &str = "AWSCognitoIdentityProviderService.ConfirmSignUp";

// All user pool API calls speak this content type
const AMZ_JSON: &str = "application/x-amz-json-1.1";

/// Cognito user pool client.
///
/// Every operation is a single POST to the pool endpoint with no retry and
/// no local timeout policy; timeouts are whatever the HTTP stack applies.
#[derive(Clone, Debug)]
pub struct Client<P: Provider> {
    client_id: String,
    provider: P,
}

impl<P: Provider> Client<P> {
    /// Authenticate user with the `USER_PASSWORD_AUTH` flow.
    ///
    /// On success the issued credential triple is written wholesale into
    /// `session`; on any failure `session` is left untouched and the error
    /// is returned to the caller after being logged.
    ///
    /// ```ignore
    /// let session = SessionStore::new();
    /// let result = client.sign_in("bob", &password, &session).await?;
    /// ```
    pub async fn sign_in(
        &self,
        username: &str,
        password: &str,
        session: &SessionStore,
    ) -> Result<AuthenticationResult, Error> {
        let request = InitiateAuthRequest {
            auth_flow: "USER_PASSWORD_AUTH",
            client_id: &self.client_id,
            auth_parameters: AuthParameters { username, password },
        };
        let response: InitiateAuthResponse = self.call(TARGET_INITIATE_AUTH, &request).await?;
        log::debug!("InitiateAuth returns {:?}", response);

        if let Some(result) = response.authentication_result {
            session.store(&CredentialTriple::from(&result));
            Ok(result)
        } else {
            // The pool asked for a challenge round (MFA, password reset, ...)
            // this client does not drive.
            let challenge = response.challenge_name.unwrap_or_default();
            log::warn!("Sign-in returned challenge {} instead of tokens", challenge);
            Err(ProviderError::Challenge(challenge).into())
        }
    }

    /// Register a new user, with the e-mail address doubling as the username
    /// and registered as the `email` attribute for confirmation delivery.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<SignUpOutcome, Error> {
        let request = SignUpRequest {
            client_id: &self.client_id,
            username: email,
            password,
            user_attributes: vec![UserAttribute {
                name: "email",
                value: email,
            }],
        };
        let outcome: SignUpOutcome = self.call(TARGET_SIGN_UP, &request).await?;
        log::debug!("SignUp returns {:?}", outcome);
        Ok(outcome)
    }

    /// Confirm a signed-up user with the code delivered out of band
    pub async fn confirm_sign_up(&self, username: &str, code: &str) -> Result<(), Error> {
        let request = ConfirmSignUpRequest {
            client_id: &self.client_id,
            username,
            confirmation_code: code,
        };
        let _: ConfirmSignUpResponse = self.call(TARGET_CONFIRM_SIGN_UP, &request).await?;
        log::info!("User {} confirmed", username);
        Ok(())
    }

    /// Send one `x-amz-json-1.1` POST request to the pool endpoint
    async fn call<Req, Resp>(&self, target: &str, request: &Req) -> Result<Resp, Error>
    where
        Req: serde::Serialize,
        Resp: serde::de::DeserializeOwned,
    {
        let response = reqwest::Client::new()
            .post(self.provider.endpoint())
            .header("content-type", AMZ_JSON)
            .header("x-amz-target", target)
            .json(request)
            .send()
            .await?;

        if response.error_for_status_ref().is_ok() {
            Ok(response.json::<Resp>().await?)
        } else {
            let status = response.status();
            let err_body = response.text().await?;
            log::warn!("{} returns error {}", target, err_body);

            match serde_json::from_str::<ServiceException>(&err_body) {
                Ok(exception) => Err(ProviderError::from(exception).into()),
                // Not the service error shape, report the bare status
                Err(_) => Err(ProviderError::Status(status).into()),
            }
        }
    }
}

/// Setup Client
pub struct ClientBuilder<P: Provider> {
    client_id: Option<String>,
    provider: P,
}

impl<P: Provider> ClientBuilder<P> {
    /// Client builder from a user pool provider
    pub(crate) fn from_provider(provider: P) -> Self {
        Self {
            client_id: None,
            provider,
        }
    }

    /// Build the user pool Client
    pub fn build(self) -> Option<Client<P>> {
        match self {
            Self {
                client_id: Some(client_id),
                provider,
            } => Some(Client {
                client_id,
                provider,
            }),
            _ => {
                // Some elements are not initialized.
                None
            }
        }
    }

    /// App client ID of the user pool
    pub fn client_id(self, client_id: &str) -> Self {
        let mut builder = self;
        builder.client_id = Some(client_id.to_string());
        builder
    }
}

/// Tokens issued together on successful sign-in
#[derive(Clone, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthenticationResult {
    #[serde(default)]
    pub id_token: Option<String>,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u32>,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// Custom `Debug` that redacts token values; they are bearer credentials
/// and must not leak through debug logging.
impl std::fmt::Debug for AuthenticationResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redact = |token: &Option<String>| token.as_deref().map(|_| "[REDACTED]");
        f.debug_struct("AuthenticationResult")
            .field("id_token", &redact(&self.id_token))
            .field("access_token", &redact(&self.access_token))
            .field("refresh_token", &redact(&self.refresh_token))
            .field("expires_in", &self.expires_in)
            .field("token_type", &self.token_type)
            .finish()
    }
}

/// Registration outcome from `SignUp`
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct SignUpOutcome {
    /// false until `confirm_sign_up` succeeds
    #[serde(default)]
    pub user_confirmed: bool,
    /// Provider-assigned unique user id (`sub` claim of later tokens)
    #[serde(default)]
    pub user_sub: String,
    #[serde(default)]
    pub code_delivery_details: Option<CodeDeliveryDetails>,
}

/// Where the confirmation code was sent
#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CodeDeliveryDetails {
    #[serde(default)]
    pub attribute_name: Option<String>,
    #[serde(default)]
    pub delivery_medium: Option<String>,
    /// Masked destination, e.g. `a***@e***.com`
    #[serde(default)]
    pub destination: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthRequest<'a> {
    auth_flow: &'a str,
    client_id: &'a str,
    auth_parameters: AuthParameters<'a>,
}

#[derive(serde::Serialize)]
struct AuthParameters<'a> {
    #[serde(rename = "USERNAME")]
    username: &'a str,
    #[serde(rename = "PASSWORD")]
    password: &'a str,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "PascalCase")]
struct InitiateAuthResponse {
    #[serde(default)]
    authentication_result: Option<AuthenticationResult>,
    #[serde(default)]
    challenge_name: Option<String>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct SignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    password: &'a str,
    user_attributes: Vec<UserAttribute<'a>>,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct UserAttribute<'a> {
    name: &'a str,
    value: &'a str,
}

#[derive(serde::Serialize)]
#[serde(rename_all = "PascalCase")]
struct ConfirmSignUpRequest<'a> {
    client_id: &'a str,
    username: &'a str,
    confirmation_code: &'a str,
}

// ConfirmSignUp answers with an empty JSON object
#[derive(serde::Deserialize)]
struct ConfirmSignUpResponse {}

/// Error body JSON of the user pool API
#[derive(serde::Deserialize)]
struct ServiceException {
    #[serde(rename = "__type", default)]
    exception_type: String,
    #[serde(alias = "Message", default)]
    message: String,
}

impl From<ServiceException> for ProviderError {
    fn from(exception: ServiceException) -> Self {
        // Some services prefix the exception with its namespace
        let code = exception
            .exception_type
            .rsplit('#')
            .next()
            .unwrap_or_default()
            .to_string();
        Self::Service {
            code,
            message: exception.message,
        }
    }
}
