#[cfg(feature = "ssr")]
use actix_web::{web, HttpRequest, HttpResponse, ResponseError};
#[cfg(feature = "ssr")]
use crate::db::Database;
#[cfg(feature = "ssr")]
use crate::error::AppError;
#[cfg(feature = "ssr")]
use crate::models::review::{ReviewFilters, ReviewInput};
#[cfg(feature = "ssr")]
use crate::rating::VenueRating;
#[cfg(feature = "ssr")]
use leptos::logging::log;
#[cfg(feature = "ssr")]
use serde::{Deserialize, Serialize};

/// Header carrying the caller's id as issued by the external identity provider.
pub const USER_HEADER: &str = "X-User-Id";

/// Most venues returned by a name search.
pub const VENUE_SEARCH_LIMIT: u32 = 10;

#[cfg(feature = "ssr")]
#[derive(Serialize, Deserialize, Default)]
pub struct VenueQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[cfg(feature = "ssr")]
fn current_user(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(USER_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(feature = "ssr")]
fn respond<T: Serialize>(context: &str, result: Result<T, AppError>) -> HttpResponse {
    match result {
        Ok(body) => HttpResponse::Ok().json(body),
        Err(err) => {
            log!("[API ERROR] {}: {}", context, err);
            err.error_response()
        }
    }
}

/// Registers every `/api` route.
#[cfg(feature = "ssr")]
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::MalformedPayload(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::InvalidFilter(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            .route("/venues", web::get().to(get_venues))
            .route("/venues/{id}", web::get().to(get_venue))
            .route("/venues/{id}/reviews", web::get().to(get_venue_reviews))
            .route("/venues/{id}/reviews", web::post().to(create_review))
            .route("/venues/{id}/rating", web::get().to(get_venue_rating))
            .route("/reviews/{id}", web::get().to(get_review))
            .route("/reviews/{id}", web::put().to(update_review))
            .route("/reviews/{id}", web::delete().to(delete_review))
            .route("/reviews/{id}/likes", web::get().to(get_likes))
            .route("/reviews/{id}/likes", web::post().to(toggle_like))
            .route("/artists", web::get().to(get_artists))
            .route("/users/{id}/reviews", web::get().to(get_user_reviews)),
    );
}

#[cfg(feature = "ssr")]
pub async fn get_venues(db: web::Data<Database>, query: web::Query<VenueQuery>) -> HttpResponse {
    let result = match query.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
        Some(q) => {
            log!("[API] Searching venues for '{}'", q);
            db.search_venues(q, VENUE_SEARCH_LIMIT).await
        }
        None => db.list_venues().await,
    };
    respond("Failed to fetch venues", result)
}

#[cfg(feature = "ssr")]
pub async fn get_venue(db: web::Data<Database>, venue_id: web::Path<String>) -> HttpResponse {
    respond("Failed to fetch venue", db.get_venue(&venue_id).await)
}

#[cfg(feature = "ssr")]
pub async fn get_venue_reviews(
    db: web::Data<Database>,
    venue_id: web::Path<String>,
    filters: web::Query<ReviewFilters>,
) -> HttpResponse {
    log!("[API] Reviews for venue {} with {:?}", venue_id, filters);
    respond(
        "Failed to fetch reviews",
        db.fetch_reviews(&venue_id, &filters).await,
    )
}

/// Aggregate rating for a venue. A failed fetch counts as no reviews, but a
/// malformed filter is still reported.
#[cfg(feature = "ssr")]
pub async fn get_venue_rating(
    db: web::Data<Database>,
    venue_id: web::Path<String>,
    filters: web::Query<ReviewFilters>,
) -> HttpResponse {
    if let Err(err) = filters.validate() {
        return err.error_response();
    }

    let reviews = match db.fetch_reviews(&venue_id, &filters).await {
        Ok(reviews) => reviews,
        Err(err) => {
            log!("[API ERROR] Rating fetch for venue {} failed, showing no rating: {}", venue_id, err);
            Vec::new()
        }
    };
    HttpResponse::Ok().json(VenueRating::from_reviews(&reviews))
}

#[cfg(feature = "ssr")]
pub async fn create_review(
    req: HttpRequest,
    db: web::Data<Database>,
    venue_id: web::Path<String>,
    input: web::Json<ReviewInput>,
) -> HttpResponse {
    let user = current_user(&req);
    log!("[API] Received review for venue {} from {:?}", venue_id, user);
    respond(
        "Failed to create review",
        db.create_review(&venue_id, user.as_deref(), &input).await,
    )
}

#[cfg(feature = "ssr")]
pub async fn get_review(db: web::Data<Database>, review_id: web::Path<String>) -> HttpResponse {
    respond("Failed to fetch review", db.get_review_detail(&review_id).await)
}

#[cfg(feature = "ssr")]
pub async fn update_review(
    req: HttpRequest,
    db: web::Data<Database>,
    review_id: web::Path<String>,
    input: web::Json<ReviewInput>,
) -> HttpResponse {
    let user = current_user(&req);
    respond(
        "Failed to update review",
        db.update_review(&review_id, user.as_deref(), &input).await,
    )
}

#[cfg(feature = "ssr")]
pub async fn delete_review(
    req: HttpRequest,
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> HttpResponse {
    let user = current_user(&req);
    match db.delete_review(&review_id, user.as_deref()).await {
        Ok(()) => HttpResponse::Ok().body("Review deleted"),
        Err(err) => {
            log!("[API ERROR] Failed to delete review {}: {}", review_id, err);
            err.error_response()
        }
    }
}

#[cfg(feature = "ssr")]
pub async fn get_likes(
    req: HttpRequest,
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> HttpResponse {
    let user = current_user(&req);
    respond(
        "Failed to fetch likes",
        db.like_status(&review_id, user.as_deref()).await,
    )
}

#[cfg(feature = "ssr")]
pub async fn toggle_like(
    req: HttpRequest,
    db: web::Data<Database>,
    review_id: web::Path<String>,
) -> HttpResponse {
    let result = match current_user(&req) {
        Some(user) => db.toggle_like(&review_id, &user).await,
        None => Err(AppError::Unauthorized),
    };
    respond("Failed to toggle like", result)
}

#[cfg(feature = "ssr")]
pub async fn get_artists(db: web::Data<Database>) -> HttpResponse {
    respond("Failed to fetch artists", db.list_artists().await)
}

#[cfg(feature = "ssr")]
pub async fn get_user_reviews(db: web::Data<Database>, user_id: web::Path<String>) -> HttpResponse {
    respond("Failed to fetch user reviews", db.reviews_by_user(&user_id).await)
}
