//! Browser-side calls into the `/api` routes.
//!
//! Requests are only issued from effects and event handlers, so these helpers
//! run in the hydrated client, never during server rendering.

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::api::USER_HEADER;
use crate::error::{AppError, Result};
use crate::models::artist::Artist;
use crate::models::like::LikeStatus;
use crate::models::review::{Review, ReviewDetail, ReviewFilters, ReviewInput, ReviewSummary};
use crate::models::venue::Venue;
use crate::rating::VenueRating;

/// Public address used in share links.
pub const SITE_URL: &str = match option_env!("SEATRATE_SITE_URL") {
    Some(url) => url,
    None => "http://127.0.0.1:3004",
};

const SHARE_TEXT: &str = "I posted a seat report!";

/// Local storage key holding the id issued by the identity provider.
const USER_STORAGE_KEY: &str = "seatrate.user_id";

pub fn stored_user_id() -> Option<String> {
    leptos::window()
        .local_storage()
        .ok()
        .flatten()?
        .get_item(USER_STORAGE_KEY)
        .ok()
        .flatten()
        .filter(|id| !id.trim().is_empty())
}

/// Link that opens a prefilled post on X pointing at the review page.
pub fn share_intent_url(site_url: &str, review_id: &str) -> String {
    let review_url = format!("{}/review/{}", site_url.trim_end_matches('/'), review_id);
    format!(
        "https://twitter.com/intent/tweet?url={}&text={}",
        urlencoding::encode(&review_url),
        urlencoding::encode(SHARE_TEXT)
    )
}

fn with_user(builder: RequestBuilder, user: Option<&str>) -> RequestBuilder {
    match user {
        Some(user) => builder.header(USER_HEADER, user),
        None => builder,
    }
}

fn request_error(err: gloo_net::Error) -> AppError {
    AppError::Request(err.to_string())
}

async fn check(response: Response) -> Result<Response> {
    if response.ok() {
        Ok(response)
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Request(format!("{} {}", status, body)))
    }
}

async fn read_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
    let response = builder.send().await.map_err(request_error)?;
    check(response).await?.json::<T>().await.map_err(request_error)
}

async fn send_json<B: Serialize, T: DeserializeOwned>(builder: RequestBuilder, body: &B) -> Result<T> {
    let request = builder.json(body).map_err(request_error)?;
    let response = request.send().await.map_err(request_error)?;
    check(response).await?.json::<T>().await.map_err(request_error)
}

/// `/api/venues/{id}` plus `suffix`, with the id percent-encoded.
fn venue_path(venue_id: &str, suffix: &str) -> String {
    format!("/api/venues/{}{}", urlencoding::encode(venue_id), suffix)
}

fn review_path(review_id: &str, suffix: &str) -> String {
    format!("/api/reviews/{}{}", urlencoding::encode(review_id), suffix)
}

fn with_filters(path: String, filters: &ReviewFilters) -> String {
    let query = filters.to_query_string();
    if query.is_empty() {
        path
    } else {
        format!("{}?{}", path, query)
    }
}

pub async fn list_venues() -> Result<Vec<Venue>> {
    read_json(Request::get("/api/venues")).await
}

pub async fn search_venues(query: &str) -> Result<Vec<Venue>> {
    let url = format!("/api/venues?q={}", urlencoding::encode(query));
    read_json(Request::get(&url)).await
}

pub async fn fetch_venue(venue_id: &str) -> Result<Venue> {
    read_json(Request::get(&venue_path(venue_id, ""))).await
}

pub async fn fetch_reviews(venue_id: &str, filters: &ReviewFilters) -> Result<Vec<Review>> {
    let url = with_filters(venue_path(venue_id, "/reviews"), filters);
    read_json(Request::get(&url)).await
}

pub async fn fetch_rating(venue_id: &str, filters: &ReviewFilters) -> Result<VenueRating> {
    let url = with_filters(venue_path(venue_id, "/rating"), filters);
    read_json(Request::get(&url)).await
}

pub async fn create_review(venue_id: &str, input: &ReviewInput, user: Option<&str>) -> Result<Review> {
    let url = venue_path(venue_id, "/reviews");
    send_json(with_user(Request::post(&url), user), input).await
}

pub async fn fetch_review(review_id: &str) -> Result<ReviewDetail> {
    read_json(Request::get(&review_path(review_id, ""))).await
}

pub async fn update_review(review_id: &str, input: &ReviewInput, user: Option<&str>) -> Result<Review> {
    let url = review_path(review_id, "");
    send_json(with_user(Request::put(&url), user), input).await
}

pub async fn delete_review(review_id: &str, user: Option<&str>) -> Result<()> {
    let url = review_path(review_id, "");
    let response = with_user(Request::delete(&url), user)
        .send()
        .await
        .map_err(request_error)?;
    check(response).await.map(|_| ())
}

pub async fn fetch_likes(review_id: &str, user: Option<&str>) -> Result<LikeStatus> {
    let url = review_path(review_id, "/likes");
    read_json(with_user(Request::get(&url), user)).await
}

pub async fn toggle_like(review_id: &str, user: &str) -> Result<LikeStatus> {
    let url = review_path(review_id, "/likes");
    read_json(with_user(Request::post(&url), Some(user))).await
}

pub async fn fetch_artists() -> Result<Vec<Artist>> {
    read_json(Request::get("/api/artists")).await
}

pub async fn fetch_user_reviews(user: &str) -> Result<Vec<ReviewSummary>> {
    read_json(Request::get(&format!("/api/users/{}/reviews", urlencoding::encode(user)))).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_link_encodes_review_url() {
        let url = share_intent_url("https://seats.example.com/", "abc-123");
        assert_eq!(
            url,
            "https://twitter.com/intent/tweet?url=https%3A%2F%2Fseats.example.com%2Freview%2Fabc-123&text=I%20posted%20a%20seat%20report%21"
        );
    }

    #[test]
    fn ids_are_encoded_in_paths() {
        assert_eq!(venue_path("zepp/haneda", "/reviews"), "/api/venues/zepp%2Fhaneda/reviews");
        assert_eq!(venue_path("budokan", ""), "/api/venues/budokan");
        assert_eq!(review_path("r 1?x", "/likes"), "/api/reviews/r%201%3Fx/likes");
        assert_eq!(review_path("abc-123", ""), "/api/reviews/abc-123");
    }

    #[test]
    fn filters_become_query_string() {
        let filters = ReviewFilters {
            keyword: Some("sound".into()),
            ..Default::default()
        };
        assert_eq!(
            with_filters("/api/venues/v1/reviews".into(), &filters),
            "/api/venues/v1/reviews?keyword=sound"
        );
        assert_eq!(
            with_filters("/api/venues/v1/rating".into(), &ReviewFilters::default()),
            "/api/venues/v1/rating"
        );
    }
}
