use leptos::*;
use leptos::logging::log;
use leptos_router::A;
use crate::app::use_current_user;
use crate::client;
use crate::models::review::ReviewSummary;

/// The signed-in user's review history, newest first.
#[component]
pub fn MyPage() -> impl IntoView {
    let user = use_current_user();
    let (reviews, set_reviews) = create_signal(Vec::<ReviewSummary>::new());

    create_effect(move |_| {
        let Some(current) = user.get() else {
            set_reviews.set(Vec::new());
            return;
        };
        spawn_local(async move {
            match client::fetch_user_reviews(&current).await {
                Ok(found) => set_reviews.set(found),
                Err(err) => log!("[MYPAGE] Failed to load reviews for {}: {}", current, err),
            }
        });
    });

    view! {
        <div class="my-page">
            <h1>"My reviews"</h1>
            <Show
                when=move || user.get().is_some()
                fallback=|| view! { <p class="empty">"Sign in to see your reviews."</p> }
            >
                <Show
                    when=move || !reviews.with(Vec::is_empty)
                    fallback=|| view! { <p class="empty">"You have not posted any reviews yet."</p> }
                >
                    <ul class="my-reviews">
                        <For
                            each=move || reviews.get()
                            key=|summary| summary.id.clone()
                            children=move |summary| {
                                view! {
                                    <li>
                                        <A href=format!("/review/{}", summary.id)>
                                            {format!("{} / {}", summary.venue_name, summary.seat_number)}
                                        </A>
                                        <time>{summary.created_at.format("%Y-%m-%d").to_string()}</time>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </Show>
        </div>
    }
}
