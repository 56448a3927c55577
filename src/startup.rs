use crate::account_service::{AccountError, AccountService};
use crate::authentication::{GuardMode, PasswordHasher, SessionIssuer};
use crate::configuration::{DatabaseSettings, Settings, StoreBackend};
use crate::credential_store::{CredentialStore, InMemoryCredentialStore, PgCredentialStore};
use crate::routes::{change_password, health_check, log_in, log_out, sign_up, UserRouteError};
use actix_web::dev::Server;
use actix_web::{web, App, HttpServer};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::net::TcpListener;
use std::sync::Arc;
use tracing_actix_web::TracingLogger;

pub struct Application {
    server: Server,
    port: u16,
}

impl Application {
    /// Wire the service from `settings` and bind its listener.
    ///
    /// A blank signing secret or an unusable work factor fails here, before
    /// any request is served.
    pub async fn build(settings: Settings) -> Result<Self, anyhow::Error> {
        let store: Arc<dyn CredentialStore> = match settings.application.credential_store {
            StoreBackend::Postgres => {
                let store = PgCredentialStore::new(get_connection_pool(&settings.database));
                store.migrate().await?;
                Arc::new(store)
            }
            StoreBackend::InMemory => Arc::new(InMemoryCredentialStore::new()),
        };
        let hasher = PasswordHasher::new(&settings.hashing).map_err(AccountError::Misconfiguration)?;
        let issuer =
            SessionIssuer::new(&settings.session.signing_secret).map_err(AccountError::Misconfiguration)?;
        let service = AccountService::new(store, hasher, issuer);

        let listener = TcpListener::bind(format!(
            "{}:{}",
            settings.application.host, settings.application.port
        ))?;
        let port = listener.local_addr()?.port();
        let server = run(listener, service, settings.session.guard)?;

        tracing::info!(port, "Identity service is listening");
        Ok(Self { port, server })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn get_connection_pool(database: &DatabaseSettings) -> PgPool {
    PgPoolOptions::new()
        .acquire_timeout(std::time::Duration::from_secs(2))
        .connect_lazy_with(database.with_db())
}

fn run(
    listener: TcpListener,
    service: AccountService,
    guard: GuardMode,
) -> Result<Server, std::io::Error> {
    // Wraps it in an Arc
    let service = web::Data::new(service);
    let guard = web::Data::new(guard);
    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(service.clone())
            .app_data(guard.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                tracing::warn!(error = %err, "Rejected a malformed request body");
                UserRouteError::invalid_input(err.to_string()).into()
            }))
            .service(health_check)
            .service(
                // Password changes and logouts wrap their own session guard.
                web::scope("/users")
                    .service(sign_up)
                    .service(log_in)
                    .service(change_password)
                    .service(log_out),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
