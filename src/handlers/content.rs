// src/handlers/content.rs
use actix_web::{web, HttpResponse};
use serde_json::json;

use crate::content::SiteContent;

pub async fn index() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "message": "Mid·Night API is running."
    }))
}

pub async fn get_organizations(content: web::Data<SiteContent>) -> HttpResponse {
    HttpResponse::Ok().json(&content.organizations)
}

pub async fn get_philosophy(content: web::Data<SiteContent>) -> HttpResponse {
    HttpResponse::Ok().json(&content.philosophy)
}

pub async fn get_goals(content: web::Data<SiteContent>) -> HttpResponse {
    HttpResponse::Ok().json(&content.goals)
}

// Raw markdown as a JSON string; the frontend renders it.
pub async fn get_rules(content: web::Data<SiteContent>) -> HttpResponse {
    HttpResponse::Ok().json(&content.rules)
}
