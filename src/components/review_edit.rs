use leptos::*;
use leptos::logging::log;
use leptos_router::{use_navigate, use_params_map};
use crate::app::use_current_user;
use crate::client;
use crate::components::review_form::ReviewForm;
use crate::models::artist::Artist;
use crate::models::review::{ReviewDetail, ReviewInput};

#[component]
pub fn ReviewEditPage() -> impl IntoView {
    let params = use_params_map();
    let review_id = move || params.with(|p| p.get("review_id").cloned().unwrap_or_default());
    let user = use_current_user();
    let navigate = store_value(use_navigate());

    let (detail, set_detail) = create_signal(None::<ReviewDetail>);
    let (artists, set_artists) = create_signal(Vec::<Artist>::new());
    let (error, set_error) = create_signal(None::<String>);

    create_effect(move |_| {
        let id = review_id();
        spawn_local(async move {
            let (found, listed) = futures::join!(client::fetch_review(&id), client::fetch_artists());
            match found {
                Ok(found) => set_detail.set(Some(found)),
                Err(err) => {
                    log!("[REVIEW] Failed to load review {}: {}", id, err);
                    set_error.set(Some("Review not found".to_string()));
                }
            }
            match listed {
                Ok(listed) => set_artists.set(listed),
                Err(err) => log!("[REVIEW] Failed to load artists: {}", err),
            }
        });
    });

    let back_to_review = move || {
        let target = format!("/review/{}", review_id());
        navigate.with_value(|navigate| navigate(&target, Default::default()));
    };

    let on_submit = Callback::new(move |input: ReviewInput| {
        let id = review_id();
        let author = user.get_untracked();
        spawn_local(async move {
            match client::update_review(&id, &input, author.as_deref()).await {
                Ok(_) => back_to_review(),
                Err(err) => set_error.set(Some(format!("Could not save the review: {}", err))),
            }
        });
    });
    let on_cancel = Callback::new(move |()| back_to_review());

    view! {
        <div class="review-edit-page">
            <h1>"Edit seat report"</h1>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            {move || {
                detail
                    .get()
                    .map(|found| {
                        if found.review.is_authored_by(user.get().as_deref()) {
                            view! {
                                <ReviewForm
                                    initial=ReviewInput::from(&found.review)
                                    artists=artists
                                    submit_label="Save"
                                    on_submit=on_submit
                                    on_cancel=on_cancel
                                />
                            }
                                .into_view()
                        } else {
                            view! { <p class="empty">"Only the author can edit this review."</p> }
                                .into_view()
                        }
                    })
            }}
        </div>
    }
}
