use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest, ResponseError};
use futures_util::future::{ok, ready, LocalBoxFuture, Ready};
use std::rc::Rc;

use crate::config::Config;
use crate::errors::ApiError;
use crate::models::user::ROLE_ADMIN;
use crate::utils::jwt;

/// Utilisateur authentifié, déposé dans les extensions de la requête par `ExtractUser`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: i32,
    pub role: String,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

// Vérifie le jeton Bearer s'il est présent. Une requête sans en-tête passe :
// ce sont les extracteurs `AuthenticatedUser` / `AdminUser` qui exigent l'authentification.
// Un jeton invalide produit une réponse 401 (et non une erreur) pour que les
// middlewares extérieurs, CORS compris, la traitent normalement.
pub struct ExtractUser;

impl<S, B> Transform<S, ServiceRequest> for ExtractUser
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = ExtractUserMiddleware<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(ExtractUserMiddleware {
            service: Rc::new(service),
        })
    }
}

pub struct ExtractUserMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ExtractUserMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut std::task::Context<'_>) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            match authenticate(&req) {
                Ok(Some(user)) => {
                    req.extensions_mut().insert(user);
                }
                Ok(None) => {}
                Err(error) => {
                    let response = error.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn authenticate(req: &ServiceRequest) -> Result<Option<AuthenticatedUser>, ApiError> {
    let Some(token) = bearer_token(req) else {
        return Ok(None);
    };

    let secret = req
        .app_data::<web::Data<Config>>()
        .map(|config| config.jwt_secret.clone())
        .ok_or_else(|| ApiError::Unauthorized("Configuration JWT absente".into()))?;

    let claims = jwt::validate_token(&token, &secret).map_err(|error| {
        tracing::debug!(%error, "jeton rejeté");
        ApiError::Unauthorized("Jeton JWT invalide ou expiré".into())
    })?;

    let id = claims.user_id().ok_or_else(|| {
        ApiError::Unauthorized("Identifiant utilisateur invalide dans le JWT".into())
    })?;

    Ok(Some(AuthenticatedUser {
        id,
        role: claims.role,
    }))
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(
            req.extensions()
                .get::<AuthenticatedUser>()
                .cloned()
                .ok_or_else(|| ApiError::Unauthorized("Authentification requise".into())),
        )
    }
}

/// Utilisateur authentifié ayant le rôle administrateur
#[derive(Debug, Clone)]
pub struct AdminUser(pub AuthenticatedUser);

impl FromRequest for AdminUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let result = AuthenticatedUser::from_request(req, payload)
            .into_inner()
            .and_then(|user| {
                if user.is_admin() {
                    Ok(AdminUser(user))
                } else {
                    Err(ApiError::Forbidden("Accès réservé aux administrateurs".into()))
                }
            });
        ready(result)
    }
}
