use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::routes::{health_check, me, post_only};

pub struct Application {
    port: u16,
    server: Server,
}

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let address = config.app.address();
        let listener = TcpListener::bind(&address)
            .with_context(|| format!("Failed to bind to {address}."))?;
        let port = listener
            .local_addr()
            .context("Failed to read the bound address.")?
            .port();
        let server = run(listener)?;

        tracing::info!(%address, port, "Listening for requests");

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(listener: TcpListener) -> Result<Server, anyhow::Error> {
    let server = HttpServer::new(|| {
        App::new()
            .wrap(TracingLogger::default())
            .route("/health_check", web::get().to(health_check))
            .service(
                web::resource("/me")
                    .name("me")
                    .route(web::post().to(me))
                    .default_service(web::to(post_only)),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}
