use leptos::*;
use leptos::logging::log;
use leptos_router::{use_params_map, A};
use crate::client;
use crate::components::rating_display::{IconRatingDisplay, LabeledRating, STAR_ICON};
use crate::components::review_search_form::ReviewSearchForm;
use crate::components::reviews_list::ReviewsList;
use crate::models::artist::Artist;
use crate::models::review::{Category, ReviewFilters};
use crate::models::venue::Venue;
use crate::rating::VenueRating;

#[component]
fn VenueInfo(venue: Venue) -> impl IntoView {
    view! {
        <div class="venue-info">
            <img class="venue-image" src=venue.image_url.clone() alt=venue.name.clone()/>
            <dl>
                <dt>"Category"</dt>
                <dd>{venue.category.to_string()}</dd>
                <dt>"Capacity"</dt>
                <dd>{venue.capacity.to_string()}</dd>
                <dt>"Access"</dt>
                <dd>{venue.access.clone()}</dd>
                <dt>"Seating"</dt>
                <dd>{venue.seat.clone()}</dd>
            </dl>
            <a class="venue-website" href=venue.website.clone() target="_blank">"Seating map"</a>
        </div>
    }
}

#[component]
fn VenueRatingSummary(rating: VenueRating) -> impl IntoView {
    let averages = rating.averages;
    view! {
        <div class="venue-rating">
            <div class="overall">
                <IconRatingDisplay rating=averages.overall icon=STAR_ICON size="icon-lg"/>
                <span class="review-count">{format!("({} reviews)", rating.review_count)}</span>
            </div>
            <div class="categories">
                <LabeledRating category=Category::Visibility rating=averages.visibility/>
                <LabeledRating category=Category::Sound rating=averages.sound/>
                <LabeledRating category=Category::Facilities rating=averages.facilities/>
                <LabeledRating category=Category::Access rating=averages.access/>
            </div>
        </div>
    }
}

/// Venue detail: info card, overall rating, and the searchable review list.
#[component]
pub fn VenuePage() -> impl IntoView {
    let params = use_params_map();
    let venue_id = Signal::derive(move || params.with(|p| p.get("id").cloned().unwrap_or_default()));

    let (venue, set_venue) = create_signal(None::<Venue>);
    let (rating, set_rating) = create_signal(None::<VenueRating>);
    let (artists, set_artists) = create_signal(Vec::<Artist>::new());
    let (not_found, set_not_found) = create_signal(false);
    let filters = create_rw_signal(ReviewFilters::default());

    create_effect(move |_| {
        let id = venue_id.get();
        if id.is_empty() {
            return;
        }
        spawn_local(async move {
            // the headline rating ignores the list filters
            let unfiltered = ReviewFilters::default();
            let (found, rated, listed) = futures::join!(
                client::fetch_venue(&id),
                client::fetch_rating(&id, &unfiltered),
                client::fetch_artists()
            );
            match found {
                Ok(found) => {
                    set_not_found.set(false);
                    set_venue.set(Some(found));
                }
                Err(err) => {
                    log!("[VENUE] Failed to load venue {}: {}", id, err);
                    set_not_found.set(true);
                }
            }
            set_rating.set(rated.ok());
            match listed {
                Ok(listed) => set_artists.set(listed),
                Err(err) => log!("[VENUE] Failed to load artists: {}", err),
            }
        });
    });

    let on_search = Callback::new(move |next: ReviewFilters| filters.set(next));

    view! {
        <div class="venue-page">
            <Show
                when=move || venue.with(Option::is_some)
                fallback=move || {
                    view! {
                        <p class="empty">
                            {move || if not_found.get() { "Venue not found" } else { "Loading..." }}
                        </p>
                    }
                }
            >
                {move || {
                    venue
                        .get()
                        .map(|venue| {
                            view! {
                                <h1>{venue.name.clone()}</h1>
                                <VenueInfo venue=venue/>
                            }
                        })
                }}
                {move || rating.get().map(|rating| view! { <VenueRatingSummary rating=rating/> })}
                <A class="post-review" href=move || format!("/venue/{}/review", venue_id.get())>
                    "Post a seat report"
                </A>
                <ReviewSearchForm artists=artists on_search=on_search/>
                <ReviewsList venue_id=venue_id filters=filters/>
            </Show>
        </div>
    }
}
