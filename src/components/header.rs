/// Site header: logo link, venue search box with suggestions, and the
/// signed-in user's entry point.
use leptos::*;
use leptos::logging::log;
use leptos_router::A;
use crate::app::use_current_user;
use crate::client;
use crate::models::venue::Venue;

#[component]
pub fn Header() -> impl IntoView {
    let user = use_current_user();
    let (query, set_query) = create_signal(String::new());
    let (results, set_results) = create_signal(Vec::<Venue>::new());
    let (show_results, set_show_results) = create_signal(false);

    create_effect(move |_| {
        let q = query.get();
        if q.trim().is_empty() {
            set_results.set(Vec::new());
            return;
        }
        spawn_local(async move {
            match client::search_venues(&q).await {
                // drop answers to queries the user has already typed past
                Ok(found) if query.get_untracked() == q => set_results.set(found),
                Ok(_) => {}
                Err(err) => log!("[SEARCH] Venue search for '{}' failed: {}", q, err),
            }
        });
    });

    let clear = move |_: ev::MouseEvent| {
        set_query.set(String::new());
        set_results.set(Vec::new());
        set_show_results.set(false);
    };

    view! {
        <header class="site-header">
            <h1 class="logo"><A href="/">"Seat Reports"</A></h1>
            <div class="venue-search">
                <input
                    type="text"
                    placeholder="🔍 Search venues"
                    prop:value=move || query.get()
                    on:input=move |ev| set_query.set(event_target_value(&ev))
                    on:focus=move |_| set_show_results.set(true)
                />
                <Show when=move || show_results.get() && !results.with(Vec::is_empty)>
                    <ul class="search-results">
                        <For
                            each=move || results.get()
                            key=|venue| venue.id.clone()
                            children=move |venue| {
                                view! {
                                    <li on:click=clear>
                                        <A href=format!("/venue/{}", venue.id)>{venue.name}</A>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </div>
            <nav class="account">
                {move || match user.get() {
                    Some(_) => view! { <A href="/mypage">"My page"</A> }.into_view(),
                    None => view! { <span class="guest">"Guest"</span> }.into_view(),
                }}
            </nav>
        </header>
    }
}
