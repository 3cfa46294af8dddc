mod analyse;
mod config;
mod db;
mod errors;
mod models;
mod reports;
mod routes;
mod utils;

use actix_cors::Cors; // Importation pour CORS
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{http, web, App, HttpServer};
use anyhow::Context;
use tracing_subscriber::EnvFilter;

use config::Config;
use errors::ApiError;
use utils::extract_user::ExtractUser;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    // Charger la configuration depuis .env
    let config = Config::from_env().context("chargement de la configuration")?;

    tracing::info!("Connexion à la base de données...");
    let pool = db::init_pool(&config)
        .await
        .context("connexion à la base de données")?;
    db::run_migrations(&pool)
        .await
        .context("application des migrations")?;

    let address = (config.host.clone(), config.port);
    tracing::info!("Démarrage du serveur sur http://{}:{}", address.0, address.1);

    let config = web::Data::new(config);
    let pool = web::Data::new(pool);

    HttpServer::new(move || {
        App::new()
            .app_data(pool.clone()) // Partager le pool de connexions avec les handlers
            .app_data(config.clone())
            .app_data(web::JsonConfig::default().error_handler(|error, _| {
                ApiError::Validation(format!("Corps JSON invalide: {error}")).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|error, _| {
                ApiError::Validation(format!("Paramètres invalides: {error}")).into()
            }))
            .wrap(ExtractUser)
            .wrap(NormalizePath::trim())
            .wrap(
                Cors::default() // Configuration de CORS
                    .allowed_origin(&config.frontend_url) // Autoriser les requêtes du frontend React
                    .allowed_methods(vec!["GET", "POST", "PUT", "DELETE", "OPTIONS"])
                    .allowed_headers(vec![http::header::CONTENT_TYPE, http::header::AUTHORIZATION])
                    .expose_headers(vec![http::header::CONTENT_DISPOSITION])
                    .max_age(3600), // Durée de validité des pré-requêtes
            )
            .wrap(Logger::default())
            .configure(routes::config)
    })
    .bind(address)
    .context("ouverture du port d'écoute")?
    .run()
    .await
    .context("arrêt du serveur")
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}
