pub mod domain;
pub mod forms;
pub mod models;
pub mod services;

#[cfg(feature = "server")]
pub mod dto;
#[cfg(feature = "server")]
pub mod routes;

#[cfg(feature = "server")]
pub use server::run;

#[cfg(feature = "server")]
mod server {
    use actix_web::{App, HttpServer, middleware, web};
    use tera::Tera;

    use crate::models::config::ServerConfig;
    use crate::routes::api::{api_v1_search, api_v1_search_url};
    use crate::routes::search::{show_index, show_search, submit_search};

    /// Builds and runs the Actix-Web HTTP server using the provided configuration.
    pub async fn run(server_config: ServerConfig) -> std::io::Result<()> {
        let tera = Tera::new(&server_config.templates_dir)
            .map_err(|e| std::io::Error::other(format!("Template parsing error(s): {e}")))?;

        let bind_address = (server_config.address.clone(), server_config.port);
        log::info!(
            "Serving search on {}:{} for {}",
            bind_address.0,
            bind_address.1,
            server_config.search_base
        );

        HttpServer::new(move || {
            App::new()
                .wrap(middleware::Compress::default())
                .wrap(middleware::Logger::default())
                .service(web::scope("/api").service(api_v1_search).service(api_v1_search_url))
                .service(show_index)
                .service(show_search)
                .service(submit_search)
                .app_data(web::Data::new(tera.clone()))
                .app_data(web::Data::new(server_config.clone()))
        })
        .bind(bind_address)?
        .run()
        .await
    }
}
