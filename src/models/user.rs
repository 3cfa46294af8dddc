use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_USER: &str = "user";

/// Représente un utilisateur dans la base de données
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    pub fn is_active_admin(&self) -> bool {
        self.is_admin() && self.is_active
    }
}

/// Vrai si la modification (`after` = `None` pour une suppression) retirerait
/// le dernier administrateur actif.
pub fn removes_last_admin(
    before: &User,
    after: Option<&User>,
    other_active_admins: usize,
) -> bool {
    let still_active_admin = after.is_some_and(User::is_active_admin);
    before.is_active_admin() && !still_active_admin && other_active_admins == 0
}

/// Vue publique d'un utilisateur (sans le hachage du mot de passe)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i32,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            role: user.role,
            is_active: user.is_active,
            created_at: user.created_at,
        }
    }
}

/// Session renvoyée à la connexion et au rafraîchissement du jeton
#[derive(Debug, Serialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub expires_at: DateTime<Utc>,
}

/// Structure pour les requêtes d'inscription d'utilisateur
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub access_code: Option<String>, // Code d'accès admin optionnel
}

/// Structure pour les requêtes de connexion d'utilisateur
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Modification du profil par l'utilisateur lui-même
#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

/// Création d'un utilisateur par un administrateur
#[derive(Debug, Deserialize)]
pub struct CreateUserForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default = "default_role")]
    pub role: String,
}

/// Mise à jour d'un utilisateur par un administrateur
#[derive(Debug, Deserialize)]
pub struct UpdateUserForm {
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub role: Option<String>,
    pub is_active: Option<bool>,
    pub password: Option<String>,
}

fn default_role() -> String {
    ROLE_USER.to_string()
}

/// Vérifie qu'un rôle fait partie des valeurs connues
pub fn is_known_role(role: &str) -> bool {
    role == ROLE_ADMIN || role == ROLE_USER
}
