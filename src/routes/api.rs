use actix_web::{HttpRequest, HttpResponse, Responder, get, post, web};

use crate::domain::search::SearchQueryParams;
use crate::dto::api::SearchUrlPayload;
use crate::models::config::ServerConfig;
use crate::services::api as api_service;

#[get("/v1/search")]
pub async fn api_v1_search(req: HttpRequest) -> impl Responder {
    let params = SearchQueryParams::from_query(req.query_string());
    HttpResponse::Ok().json(api_service::decode_search(params))
}

#[post("/v1/search-url")]
pub async fn api_v1_search_url(
    payload: web::Json<SearchUrlPayload>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    match api_service::search_url(payload.into_inner(), &server_config) {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(err) => {
            log::error!("Failed to build search url: {err}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
