use actix_web::body::BoxBody;
use actix_web::middleware::ErrorHandlers;
use actix_web::{web, App, HttpServer};
use anyhow::Context as _;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct HttpServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    4567
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self { port: default_port() }
    }
}

impl HttpServerConfig {
    /// Runs the server until it is stopped by a signal. `configure` registers the
    /// routes, `error_handlers` rewrites error responses for every route.
    pub async fn run_server<F, E>(&self, configure: F, error_handlers: E) -> anyhow::Result<()>
    where
        F: Fn(&mut web::ServiceConfig) + Send + Clone + 'static,
        E: Fn() -> ErrorHandlers<BoxBody> + Send + Clone + 'static,
    {
        let http_server = HttpServer::new(move || {
            let configure = configure.clone();

            App::new()
                .wrap(error_handlers())
                .wrap(tracing_actix_web::TracingLogger::default())
                .configure(move |cfg| configure(cfg))
        })
        .workers(1)
        .bind(("0.0.0.0", self.port))
        .with_context(|| format!("Error binding HTTP server to port {}", self.port))?;

        tracing::info!("HTTP server listening on port {}", self.port);

        http_server
            .run()
            .await
            .with_context(|| format!("Error starting HTTP server on port {}", self.port))
    }
}
