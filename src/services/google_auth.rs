//! Google service-account authentication.
//!
//! Implements the OAuth 2.0 JWT bearer grant: an RS256-signed assertion is
//! exchanged at the token endpoint for a short-lived access token.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};

use crate::error::{UpstreamError, check_status};

/// OAuth scope granting read/write access to spreadsheets.
pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the assertion (Google's maximum).
const ASSERTION_TTL_SECS: i64 = 3600;

/// Service-account identity used to sign assertions.
#[derive(Debug, Clone)]
pub struct ServiceAccount {
    pub client_email: String,
    /// PEM-encoded RSA private key (PKCS#1 or PKCS#8).
    pub private_key: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Build the signed JWT assertion for `token_url`, issued at `issued_at` (unix seconds).
fn signed_assertion(
    account: &ServiceAccount,
    token_url: &str,
    issued_at: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AssertionClaims {
        iss: account.client_email.clone(),
        scope: SPREADSHEETS_SCOPE.to_string(),
        aud: token_url.to_string(),
        iat: issued_at,
        exp: issued_at + ASSERTION_TTL_SECS,
    };

    let key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())?;
    encode(&Header::new(Algorithm::RS256), &claims, &key)
}

/// Exchange a fresh assertion for an access token.
///
/// # Errors
///
/// - `Credential`: the private key is not a usable RSA PEM key
/// - `Api`: the token endpoint rejected the assertion
/// - `Http`: transport failure or malformed token response
pub async fn fetch_access_token(
    http: &reqwest::Client,
    token_url: &str,
    account: &ServiceAccount,
) -> Result<String, UpstreamError> {
    let assertion = signed_assertion(account, token_url, Utc::now().timestamp())?;

    let response = http
        .post(token_url)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
        .send()
        .await?;

    let token: TokenResponse = check_status(response).await?.json().await?;
    tracing::debug!(client_email = %account.client_email, "Obtained Google access token");

    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::errors::ErrorKind;

    const TEST_KEY: &str = include_str!("../../tests/fixtures/service_account_key.pem");

    fn account(private_key: &str) -> ServiceAccount {
        ServiceAccount {
            client_email: "relay@project.iam.gserviceaccount.com".to_string(),
            private_key: private_key.to_string(),
        }
    }

    #[test]
    fn assertion_is_rs256_with_service_account_claims() {
        let token_url = "https://oauth2.googleapis.com/token";
        let jwt = signed_assertion(&account(TEST_KEY), token_url, 1_700_000_000).unwrap();

        let header = jsonwebtoken::decode_header(&jwt).unwrap();
        assert_eq!(header.alg, Algorithm::RS256);

        let mut validation = jsonwebtoken::Validation::new(Algorithm::RS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.set_audience(&[token_url]);
        let data = jsonwebtoken::decode::<AssertionClaims>(
            &jwt,
            &jsonwebtoken::DecodingKey::from_secret(&[]),
            &validation,
        )
        .unwrap();

        assert_eq!(data.claims.iss, "relay@project.iam.gserviceaccount.com");
        assert_eq!(data.claims.scope, SPREADSHEETS_SCOPE);
        assert_eq!(data.claims.aud, token_url);
        assert_eq!(data.claims.exp - data.claims.iat, ASSERTION_TTL_SECS);
    }

    #[test]
    fn malformed_key_is_rejected_before_any_request() {
        let err = signed_assertion(&account("not a pem key"), "https://example.com", 0).unwrap_err();
        assert!(matches!(
            err.kind(),
            ErrorKind::InvalidKeyFormat | ErrorKind::InvalidRsaKey(_)
        ));
    }
}
