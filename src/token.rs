use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Token lifetime. AMO rejects tokens valid for longer than 5 minutes.
const TOKEN_TTL_SECS: i64 = 300;

/// Claims carried by the signed request token.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// Mint a short-lived HS256 token for one deploy invocation. Each call
/// produces a fresh `jti`, so tokens are never reused across invocations.
pub fn sign(issuer: &str, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        iss: issuer.to_string(),
        jti: Uuid::new_v4().to_string(),
        iat,
        exp: iat + TOKEN_TTL_SECS,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

    fn verify(token: &str, secret: &str, issuer: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[issuer]);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .unwrap()
        .claims
    }

    #[test]
    fn roundtrip_token() {
        let token = sign("someIssuer", "someSecret").unwrap();
        let claims = verify(&token, "someSecret", "someIssuer");
        assert_eq!(claims.iss, "someIssuer");
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn fresh_jti_per_invocation() {
        let t1 = sign("i", "s").unwrap();
        let t2 = sign("i", "s").unwrap();
        let c1 = verify(&t1, "s", "i");
        let c2 = verify(&t2, "s", "i");
        assert_ne!(c1.jti, c2.jti);
    }

    #[test]
    fn rejects_wrong_secret() {
        let token = sign("i", "secret-a").unwrap();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&["i"]);
        assert!(decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"secret-b"),
            &validation
        )
        .is_err());
    }
}
