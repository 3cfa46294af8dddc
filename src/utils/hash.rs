use bcrypt::{hash, verify};

/// Hache un mot de passe en utilisant bcrypt avec le coût configuré
pub fn hash_password(password: &str, cost: u32) -> Result<String, bcrypt::BcryptError> {
    hash(password, cost)
}

/// Vérifie si un mot de passe correspond à un hachage
pub fn verify_password(password: &str, hashed_password: &str) -> bool {
    verify(password, hashed_password).unwrap_or(false)
}

/// Règle minimale appliquée aux nouveaux mots de passe
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < 8 {
        return Err("Le mot de passe doit contenir au moins 8 caractères".to_string());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_hashed_password() {
        let hashed = hash_password("motdepasse", 4).unwrap();
        assert!(verify_password("motdepasse", &hashed));
        assert!(!verify_password("autre", &hashed));
    }

    #[test]
    fn invalid_hash_never_verifies() {
        assert!(!verify_password("motdepasse", "pas-un-hash"));
    }

    #[test]
    fn rejects_short_passwords() {
        assert!(validate_password("court").is_err());
        assert!(validate_password("suffisant").is_ok());
    }
}
