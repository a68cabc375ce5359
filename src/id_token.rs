// SPDX-License-Identifier: MIT
use crate::error::TokenFormatError;

/// Claim holding the user pool username.
/// See [Using tokens with user pools](https://docs.aws.amazon.com/cognito/latest/developerguide/amazon-cognito-user-pools-using-tokens-with-identity-providers.html)
pub(crate) const USERNAME_CLAIM: &str = "cognito:username";

/// Decoded identity token claims.
///
/// Claims are taken straight from the token payload. Neither the JWS
/// signature nor `exp`/`iat` are checked, so a well-formed forged or expired
/// token decodes successfully. Callers that need trust guarantees must
/// verify the token through an external authority before relying on any
/// claim here.
#[derive(Debug)]
pub struct IdToken {
    claims: serde_json::Map<String, serde_json::Value>,
}

impl IdToken {
    /// Decode claims from a compact `header.payload.signature` token string.
    /// Warning: This function does not validate the JWS signature.
    pub fn decode_without_verification(token: &str) -> Result<Self, TokenFormatError> {
        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};

        if token.is_empty() {
            return Err(TokenFormatError::Empty);
        }

        let mut parts = token.split('.');
        let (Some(_header), Some(payload), Some(_sign), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            // Invalid compact token structure
            return Err(TokenFormatError::Structure);
        };

        let json_str = URL_SAFE_NO_PAD.decode(payload)?;
        match serde_json::from_slice(&json_str)? {
            serde_json::Value::Object(claims) => Ok(Self { claims }),
            _ => Err(TokenFormatError::PayloadNotObject),
        }
    }
}

// expose identity token values
impl IdToken {
    /// Full claims mapping, as decoded
    pub fn claims(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.claims
    }

    /// User pool username (`cognito:username` claim), when present as a string
    pub fn username(&self) -> Option<&str> {
        self.claims.get(USERNAME_CLAIM)?.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_token(payload: &serde_json::Value) -> String {
        use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"RS256","typ":"JWT"}"#);
        let payload = URL_SAFE_NO_PAD.encode(payload.to_string());
        format!("{}.{}.c2lnbmF0dXJl", header, payload)
    }

    #[test]
    fn decode_extracts_username_claim() {
        let token = encode_token(&serde_json::json!({
            "sub": "3f1c2e44-0000-4000-8000-caffe0c0ffee",
            "cognito:username": "alice",
            "email": "alice@example.com",
        }));

        let id_token = IdToken::decode_without_verification(&token).unwrap();
        assert_eq!(id_token.username(), Some("alice"));
        assert_eq!(
            id_token.claims().get("email").and_then(|v| v.as_str()),
            Some("alice@example.com")
        );
    }

    #[test]
    fn empty_token_is_rejected() {
        let err = IdToken::decode_without_verification("").unwrap_err();
        assert!(matches!(err, TokenFormatError::Empty));
    }

    #[test]
    fn two_part_token_is_rejected() {
        let err = IdToken::decode_without_verification("eyJhbGciOiJub25lIn0.e30").unwrap_err();
        assert!(matches!(err, TokenFormatError::Structure));
    }

    #[test]
    fn four_part_token_is_rejected() {
        let err = IdToken::decode_without_verification("a.e30.c.d").unwrap_err();
        assert!(matches!(err, TokenFormatError::Structure));
    }

    #[test]
    fn invalid_base64_payload_is_rejected() {
        let err = IdToken::decode_without_verification("header.!!!.sign").unwrap_err();
        assert!(matches!(err, TokenFormatError::PayloadEncoding(_)));
    }

    #[test]
    fn non_json_payload_is_rejected() {
        // base64url("not json")
        let err = IdToken::decode_without_verification("header.bm90IGpzb24.sign").unwrap_err();
        assert!(matches!(err, TokenFormatError::PayloadJson(_)));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        // base64url("42") decodes as JSON, but not as a claims mapping
        let err = IdToken::decode_without_verification("header.NDI.sign").unwrap_err();
        assert!(matches!(err, TokenFormatError::PayloadNotObject));
    }

    #[test]
    fn missing_username_claim_yields_none() {
        let token = encode_token(&serde_json::json!({"sub": "1234"}));
        let id_token = IdToken::decode_without_verification(&token).unwrap();
        assert_eq!(id_token.username(), None);
    }

    #[test]
    fn non_string_username_claim_yields_none() {
        let token = encode_token(&serde_json::json!({"cognito:username": 42}));
        let id_token = IdToken::decode_without_verification(&token).unwrap();
        assert_eq!(id_token.username(), None);
    }

    #[test]
    fn expired_or_unsigned_token_still_decodes() {
        // exp in the past, no real signature: structurally fine, so it decodes
        let token = encode_token(&serde_json::json!({
            "cognito:username": "mallory",
            "exp": 0,
        }));
        let id_token = IdToken::decode_without_verification(&token).unwrap();
        assert_eq!(id_token.username(), Some("mallory"));
    }
}
