use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use sqlx::PgPool;

use taskvault::auth::{PasswordVault, SessionAuth};
use taskvault::config::Config;
use taskvault::routes;
use taskvault::store::{TaskStore, UserStore};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();

    let pool = PgPool::connect(&config.database_url)
        .await
        .expect("Failed to connect to database");

    let vault = PasswordVault::new(&config.password_encryption_key)
        .expect("PASSWORD_ENCRYPTION_KEY must be exactly 32 bytes");
    let session = SessionAuth::new(&config.jwt_secret);
    let user_store = UserStore::new(pool.clone());
    let task_store = TaskStore::new(pool);

    log::info!("Starting taskvault server at {}", config.server_url());

    let bind_addr = (config.server_host.clone(), config.server_port);
    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(vault.clone()))
            .app_data(web::Data::new(session.clone()))
            .app_data(web::Data::new(user_store.clone()))
            .app_data(web::Data::new(task_store.clone()))
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .wrap(Logger::default())
            .service(routes::health::health)
            .service(web::scope("/api").configure(routes::config))
    })
    .bind(bind_addr)?
    .run()
    .await
}
