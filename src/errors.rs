use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

/// Corps JSON renvoyé pour toute erreur
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

/// Erreurs de l'API, converties en réponse HTTP par actix-web
#[derive(Debug, Error)]
pub enum ApiError {
    /// Entrée invalide
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    /// Conflit avec l'état existant (email déjà utilisé, dernier admin, ...)
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("erreur de base de données: {0}")]
    Database(#[from] sqlx::Error),

    #[error("erreur de hachage du mot de passe: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("erreur de jeton: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    /// Échec de génération d'un rapport
    #[error("erreur d'export: {0}")]
    Export(String),
}

impl ApiError {
    fn is_internal(&self) -> bool {
        matches!(
            self,
            Self::Database(_) | Self::Hash(_) | Self::Token(_) | Self::Export(_)
        )
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Database(_) | Self::Hash(_) | Self::Token(_) | Self::Export(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Les détails internes restent dans les logs
        let message = if self.is_internal() {
            tracing::error!(error = %self, "erreur interne");
            "Erreur interne du serveur".to_string()
        } else {
            self.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse { message })
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
