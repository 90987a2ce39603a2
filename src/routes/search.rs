//! Routes rendering and submitting the search form.

use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};
use tera::{Context, Tera};

use crate::domain::search::SearchQueryParams;
use crate::models::config::ServerConfig;
use crate::routes::{redirect, render_template};
use crate::services::{ServiceError, search as search_service};

#[get("/")]
pub async fn show_index(server_config: web::Data<ServerConfig>) -> impl Responder {
    redirect(&server_config.search_base)
}

#[get("/search")]
/// Show the search form filled from the current query.
pub async fn show_search(
    req: HttpRequest,
    server_config: web::Data<ServerConfig>,
    tera: web::Data<Tera>,
) -> impl Responder {
    let params = SearchQueryParams::from_query(req.query_string());
    match search_service::load_search_page(params, &server_config) {
        Ok(data) => {
            let mut context = Context::new();
            context.insert("current_page", "search");
            context.insert("page", &data);
            render_template(&tera, "search/index.html", &context)
        }
        Err(err) => {
            log::error!("Failed to load search page: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}

#[post("/search")]
/// Redirect a submitted search form to its search URL.
pub async fn submit_search(
    body: web::Bytes,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match search_service::submit_search_form(&body, &server_config) {
        Ok(location) => redirect(&location),
        Err(ServiceError::Form(message)) => HttpResponse::BadRequest().body(message),
        Err(err) => {
            log::error!("Failed to submit search: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
