use leptos::*;
use leptos::logging::log;
use leptos_router::A;
use crate::client;
use crate::models::venue::Venue;

#[component]
pub fn HomePage() -> impl IntoView {
    let (venues, set_venues) = create_signal(Vec::<Venue>::new());

    create_effect(move |_| {
        spawn_local(async move {
            match client::list_venues().await {
                Ok(found) => set_venues.set(found),
                Err(err) => log!("[HOME] Failed to load venues: {}", err),
            }
        });
    });

    view! {
        <div class="home-page">
            <p class="lead">"Find out how the view, sound and facilities are from your seat."</p>
            <ul class="venue-grid">
                <For
                    each=move || venues.get()
                    key=|venue| venue.id.clone()
                    children=move |venue| {
                        view! {
                            <li class="venue-card">
                                <A href=format!("/venue/{}", venue.id)>
                                    <img src=venue.image_url alt=venue.name.clone()/>
                                    <span class="venue-name">{venue.name}</span>
                                    <span class="venue-category">{venue.category.to_string()}</span>
                                </A>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
