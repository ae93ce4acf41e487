use leptos::*;
use leptos::logging::log;
use leptos_router::A;
use crate::client;
use crate::components::like_button::LikeButton;
use crate::components::rating_display::{IconRatingDisplay, STAR_ICON};
use crate::models::review::{Category, Review, ReviewFilters};
use crate::rating::VenueRating;

/// Whether a finished request still matches the venue and filters on screen.
fn is_latest_search(requested: (&str, &ReviewFilters), latest: (&str, &ReviewFilters)) -> bool {
    requested == latest
}

#[component]
pub fn ReviewsList(
    #[prop(into)] venue_id: Signal<String>,
    #[prop(into)] filters: Signal<ReviewFilters>,
) -> impl IntoView {
    let (reviews, set_reviews) = create_signal(Vec::<Review>::new());
    let (summary, set_summary) = create_signal(None::<VenueRating>);
    let (loading, set_loading) = create_signal(true);

    create_effect(move |_| {
        let id = venue_id.get();
        let current = filters.get();
        set_loading.set(true);
        spawn_local(async move {
            let (listed, rated) = futures::join!(
                client::fetch_reviews(&id, &current),
                client::fetch_rating(&id, &current)
            );
            // a newer search has started; its answer wins
            if !is_latest_search((id.as_str(), &current), (venue_id.get_untracked().as_str(), &filters.get_untracked())) {
                return;
            }
            match listed {
                Ok(found) => set_reviews.set(found),
                Err(err) => {
                    log!("[REVIEWS] Failed to load reviews for {}: {}", id, err);
                    set_reviews.set(Vec::new());
                }
            }
            set_summary.set(rated.ok());
            set_loading.set(false);
        });
    });

    view! {
        <section class="reviews-list">
            {move || {
                summary
                    .get()
                    .filter(|s| s.review_count > 0)
                    .map(|s| {
                        view! {
                            <div class="reviews-summary">
                                <span>{format!("{} matching reviews", s.review_count)}</span>
                                <IconRatingDisplay rating=s.averages.overall icon=STAR_ICON size="icon-sm"/>
                            </div>
                        }
                    })
            }}
            <Show
                when=move || !reviews.with(Vec::is_empty)
                fallback=move || {
                    view! {
                        <p class="empty">
                            {move || if loading.get() { "Loading reviews..." } else { "No reviews yet" }}
                        </p>
                    }
                }
            >
                <For
                    each=move || reviews.get()
                    key=|review| review.id.clone()
                    children=move |review| view! { <ReviewCard review=review/> }
                />
            </Show>
        </section>
    }
}

/// Compact review entry linking to the full review page.
#[component]
pub fn ReviewCard(review: Review) -> impl IntoView {
    let posted = review.created_at.format("%Y-%m-%d").to_string();
    let scores = review.scores;
    let comments = review.comments.clone();

    view! {
        <article class="review-card">
            <header>
                <A href=format!("/review/{}", review.id)>{format!("Seat: {}", review.seat_number)}</A>
                <time>{posted}</time>
            </header>
            <ul>
                {Category::ALL
                    .into_iter()
                    .map(|category| {
                        view! {
                            <li>
                                {format!(
                                    "{}: {} / 5 ({})",
                                    category.label(),
                                    category.score(&scores),
                                    category.comment(&comments),
                                )}
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
            <LikeButton review_id=review.id.clone()/>
        </article>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_to_older_searches_are_dropped() {
        let older = ReviewFilters {
            seat: Some("A".into()),
            ..Default::default()
        };
        let newer = ReviewFilters {
            seat: Some("A-12".into()),
            ..Default::default()
        };

        assert!(is_latest_search(("budokan", &newer), ("budokan", &newer)));
        assert!(!is_latest_search(("budokan", &older), ("budokan", &newer)));
        assert!(!is_latest_search(("budokan", &newer), ("tokyo-dome", &newer)));
    }
}
