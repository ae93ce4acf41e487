use leptos::*;
use leptos::logging::log;
use leptos_router::{use_navigate, use_params_map};
use crate::app::use_current_user;
use crate::client;
use crate::components::review_form::ReviewForm;
use crate::models::artist::Artist;
use crate::models::review::ReviewInput;

#[component]
pub fn NewReviewPage() -> impl IntoView {
    let params = use_params_map();
    let venue_id = move || params.with(|p| p.get("id").cloned().unwrap_or_default());
    let user = use_current_user();
    let navigate = store_value(use_navigate());

    let (venue_name, set_venue_name) = create_signal(String::new());
    let (artists, set_artists) = create_signal(Vec::<Artist>::new());
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let id = venue_id();
        spawn_local(async move {
            let (venue, listed) = futures::join!(client::fetch_venue(&id), client::fetch_artists());
            match venue {
                Ok(venue) => set_venue_name.set(venue.name),
                Err(err) => log!("[REVIEW] Failed to load venue {}: {}", id, err),
            }
            match listed {
                Ok(listed) => set_artists.set(listed),
                Err(err) => log!("[REVIEW] Failed to load artists: {}", err),
            }
        });
    });

    let on_submit = Callback::new(move |input: ReviewInput| {
        let id = venue_id();
        let author = user.get_untracked();
        spawn_local(async move {
            match client::create_review(&id, &input, author.as_deref()).await {
                Ok(created) => {
                    log!("[REVIEW] Posted review {} for venue {}", created.id, id);
                    let target = format!("/venue/{}", id);
                    navigate.with_value(|navigate| navigate(&target, Default::default()));
                }
                Err(err) => set_error.set(Some(format!("Could not post the review: {}", err))),
            }
        });
    });

    view! {
        <div class="new-review-page">
            <h1>{move || format!("Seat report: {}", venue_name.get())}</h1>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <ReviewForm
                initial=ReviewInput::default()
                artists=artists
                submit_label="Post"
                on_submit=on_submit
            />
        </div>
    }
}
