use leptos::*;
use leptos::logging::{log, warn};
use leptos_router::{use_navigate, use_params_map, A};
use crate::app::use_current_user;
use crate::client;
use crate::components::like_button::LikeButton;
use crate::components::rating_display::LabeledRating;
use crate::models::review::{Category, ReviewDetail};

/// Full review: per-category ratings and comments, thanks button, share link,
/// and edit/delete controls for its author.
#[component]
pub fn ReviewDetailPage() -> impl IntoView {
    let params = use_params_map();
    let review_id = move || params.with(|p| p.get("review_id").cloned().unwrap_or_default());
    let user = use_current_user();
    let navigate = store_value(use_navigate());

    let (detail, set_detail) = create_signal(None::<ReviewDetail>);
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let id = review_id();
        spawn_local(async move {
            match client::fetch_review(&id).await {
                Ok(found) => set_detail.set(Some(found)),
                Err(err) => {
                    log!("[REVIEW] Failed to load review {}: {}", id, err);
                    set_error.set(Some("Review not found".to_string()));
                }
            }
        });
    });

    let is_author = move || {
        detail.with(|d| {
            d.as_ref()
                .is_some_and(|d| d.review.is_authored_by(user.get().as_deref()))
        })
    };

    let delete = move |_: ev::MouseEvent| {
        let confirmed = window()
            .confirm_with_message("Delete this review?")
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        let Some(found) = detail.get_untracked() else {
            return;
        };
        let author = user.get_untracked();
        spawn_local(async move {
            match client::delete_review(&found.review.id, author.as_deref()).await {
                Ok(()) => {
                    let target = format!("/venue/{}", found.review.venue_id);
                    navigate.with_value(|navigate| navigate(&target, Default::default()));
                }
                Err(err) => {
                    warn!("[REVIEW] Delete of {} failed: {}", found.review.id, err);
                    set_error.set(Some(format!("Could not delete the review: {}", err)));
                }
            }
        });
    };

    view! {
        <div class="review-detail">
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            {move || {
                detail
                    .get()
                    .map(|found| {
                        let review = found.review;
                        let share_url = client::share_intent_url(client::SITE_URL, &review.id);
                        view! {
                            <h1>
                                <A href=format!("/venue/{}", review.venue_id)>{found.venue_name}</A>
                            </h1>
                            <p class="seat">{format!("Seat: {}", review.seat_number)}</p>
                            {found.artist_name.map(|name| view! { <p class="artist">{format!("Artist: {}", name)}</p> })}
                            <time>{review.created_at.format("%Y-%m-%d %H:%M").to_string()}</time>
                            <div class="categories">
                                {Category::ALL
                                    .into_iter()
                                    .map(|category| {
                                        view! {
                                            <section class="category">
                                                <LabeledRating
                                                    category=category
                                                    rating=f64::from(category.score(&review.scores))
                                                />
                                                <p>{category.comment(&review.comments).to_string()}</p>
                                            </section>
                                        }
                                    })
                                    .collect_view()}
                            </div>
                            <LikeButton review_id=review.id.clone()/>
                            <a class="share" href=share_url target="_blank">"Share on X"</a>
                        }
                    })
            }}
            <Show when=is_author>
                <div class="author-actions">
                    <A href=move || format!("/review/{}/edit", review_id())>"Edit"</A>
                    <button class="danger" on:click=delete>"Delete"</button>
                </div>
            </Show>
        </div>
    }
}
