use leptos::*;
use leptos::logging::log;
use crate::app::use_current_user;
use crate::client;
use crate::models::like::LikeStatus;

/// "Thanks" button under a review. Everyone sees the count; only a signed-in
/// user can toggle it.
#[component]
pub fn LikeButton(#[prop(into)] review_id: String) -> impl IntoView {
    let user = use_current_user();
    let review_id = store_value(review_id);
    let (status, set_status) = create_signal(LikeStatus::default());
    let (pending, set_pending) = create_signal(false);

    create_effect(move |_| {
        let current_user = user.get();
        let id = review_id.get_value();
        spawn_local(async move {
            match client::fetch_likes(&id, current_user.as_deref()).await {
                Ok(fetched) => set_status.set(fetched),
                Err(err) => log!("[LIKES] Failed to load likes for {}: {}", id, err),
            }
        });
    });

    let toggle = move |_: ev::MouseEvent| {
        let Some(current_user) = user.get_untracked() else {
            return;
        };
        if pending.get_untracked() {
            return;
        }
        set_pending.set(true);
        let id = review_id.get_value();
        spawn_local(async move {
            match client::toggle_like(&id, &current_user).await {
                Ok(updated) => set_status.set(updated),
                Err(err) => log!("[LIKES] Failed to toggle like on {}: {}", id, err),
            }
            set_pending.set(false);
        });
    };

    view! {
        <div class="like">
            {move || {
                if user.get().is_some() {
                    view! {
                        <button
                            class=move || if status.get().liked { "like-button liked" } else { "like-button" }
                            disabled=move || pending.get()
                            on:click=toggle
                        >
                            "Thanks ♥ " {move || status.get().count}
                        </button>
                    }
                        .into_view()
                } else {
                    view! {
                        <div class="like-button inactive">
                            "Thanks ♥ " {move || status.get().count}
                            <span class="hint">" (sign in to say thanks)"</span>
                        </div>
                    }
                        .into_view()
                }
            }}
        </div>
    }
}
