use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Structure des claims d'un JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,  // Identifiant de l'utilisateur
    pub role: String, // Rôle au moment de l'émission
    pub iat: usize,
    pub exp: usize, // Date d'expiration en timestamp UNIX
}

impl Claims {
    pub fn user_id(&self) -> Option<i32> {
        self.sub.parse().ok()
    }
}

/// Crée un JWT pour un utilisateur et renvoie sa date d'expiration
pub fn create_token(
    user_id: i32,
    role: &str,
    secret: &str,
    ttl: Duration,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let expires_at = issued_at + ttl;

    let claims = Claims {
        sub: user_id.to_string(),
        role: role.to_string(),
        iat: issued_at.timestamp().max(0) as usize,
        exp: expires_at.timestamp().max(0) as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;
    Ok((token, expires_at))
}

/// Valide un JWT et renvoie les claims s'ils sont valides
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_claims() {
        let (token, expires_at) = create_token(42, "admin", "secret", Duration::hours(1)).unwrap();
        let claims = validate_token(&token, "secret").unwrap();

        assert_eq!(claims.user_id(), Some(42));
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.exp as i64, expires_at.timestamp());
    }

    #[test]
    fn rejects_wrong_secret() {
        let (token, _) = create_token(1, "user", "secret", Duration::hours(1)).unwrap();
        assert!(validate_token(&token, "autre").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let (token, _) = create_token(1, "user", "secret", Duration::hours(-2)).unwrap();
        assert!(validate_token(&token, "secret").is_err());
    }
}
