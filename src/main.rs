use std::env;

use actix_web::middleware::Logger;
use actix_web::web::{get, post, Data};
use actix_web::{App, HttpServer};
use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use volunhub::core::notifier::{deliver, Outbox};
use volunhub::handlers;
use volunhub::impls::grader::HttpGrader;
use volunhub::impls::mailer::{HttpMailer, LogMailer};
use volunhub::impls::store::postgres::PgStore;

const MAIL_MAX_ATTEMPTS: u32 = 3;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    env_logger::init();

    let database_url = env::var("DATABASE_URL").context("DATABASE_URL not set")?;
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .context("failed to connect to database")?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("failed to run migrations")?;
    let store = PgStore::new(pool);

    let (outbox, rx) = Outbox::channel();
    match HttpMailer::from_env() {
        Some(mailer) => {
            actix_web::rt::spawn(deliver(rx, mailer, MAIL_MAX_ATTEMPTS));
        }
        None => {
            log::warn!("mail transport not configured, notifications go to the log");
            actix_web::rt::spawn(deliver(rx, LogMailer, MAIL_MAX_ATTEMPTS));
        }
    }

    let grader_url = env::var("GRADER_URL").unwrap_or_else(|_| "http://127.0.0.1:4000".to_string());
    let grader = HttpGrader::new(grader_url);

    let port: u16 = env::var("PORT").ok().and_then(|p| p.parse().ok()).unwrap_or(3000);
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .app_data(Data::new(store.clone()))
            .app_data(Data::new(outbox.clone()))
            .app_data(Data::new(grader.clone()))
            .route("/api/create-profile", post().to(handlers::profile::create::<PgStore>))
            .route("/api/get-user/{email}", get().to(handlers::profile::user_id::<PgStore>))
            .route("/api/user/{email}", get().to(handlers::profile::profile::<PgStore>))
            .route("/api/update-profile", post().to(handlers::profile::update::<PgStore>))
            .route("/api/events", get().to(handlers::event::list::<PgStore>))
            .route("/api/events", post().to(handlers::event::create::<PgStore>))
            .route("/api/AdminEvents", get().to(handlers::event::admin_list::<PgStore>))
            .route("/api/events/{id}", get().to(handlers::event::detail::<PgStore>))
            .route("/api/events/detail/{id}", get().to(handlers::event::detail::<PgStore>))
            .route("/organization-register", post().to(handlers::organization::register::<PgStore>))
            .route("/organizations/{id}/approve", post().to(handlers::organization::decide::<PgStore>))
            .route("/api/admin/organizations", get().to(handlers::organization::list::<PgStore>))
            .route("/organization/{email}", get().to(handlers::organization::by_email::<PgStore>))
            .route("/api/applications", post().to(handlers::application::submit::<PgStore>))
            .route("/api/applications/{id}/approve", post().to(handlers::application::decide::<PgStore>))
            .route("/api/applications/{email}", get().to(handlers::application::for_user::<PgStore>))
            .route(
                "/api/organizations/email/{email}/applications",
                get().to(handlers::application::for_organization::<PgStore>),
            )
            .route("/api/questions", get().to(handlers::questionnaire::questions::<HttpGrader>))
            .route("/api/evaluate", post().to(handlers::questionnaire::evaluate::<HttpGrader>))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await?;
    Ok(())
}
