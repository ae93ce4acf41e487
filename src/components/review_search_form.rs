use chrono::{Datelike, Utc};
use leptos::*;
use leptos::ev::SubmitEvent;
use crate::models::artist::Artist;
use crate::models::review::ReviewFilters;

/// How many past years the period selects offer.
const YEAR_CHOICES: i32 = 10;

/// Filter bar above a venue's review list. Emits the filters only when both
/// halves of each period bound are chosen together.
#[component]
pub fn ReviewSearchForm(
    #[prop(into)] artists: Signal<Vec<Artist>>,
    on_search: Callback<ReviewFilters>,
) -> impl IntoView {
    let form = create_rw_signal(ReviewFilters::default());
    let (error, set_error) = create_signal(None::<String>);

    let this_year = Utc::now().year();
    let years: Vec<i32> = (0..YEAR_CHOICES).map(|offset| this_year - offset).collect();

    let year_options = move || {
        years
            .iter()
            .map(|year| view! { <option value=year.to_string()>{year.to_string()}</option> })
            .collect_view()
    };
    let month_options = || {
        (1..=12u32)
            .map(|month| view! { <option value=format!("{:02}", month)>{month.to_string()}</option> })
            .collect_view()
    };

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let filters = form.get();
        match filters.validate() {
            Ok(()) => {
                set_error.set(None);
                on_search.call(filters);
            }
            Err(err) => set_error.set(Some(err.to_string())),
        }
    };

    view! {
        <div class="review-search">
            <h2>"Reviews"</h2>
            <form on:submit=handle_submit>
                <input
                    type="text"
                    placeholder="Seat"
                    on:input=move |ev| form.update(|f| f.seat = Some(event_target_value(&ev)))
                />
                <select on:change=move |ev| form.update(|f| f.artist_id = Some(event_target_value(&ev)))>
                    <option value="">"Artist"</option>
                    {move || {
                        artists
                            .get()
                            .into_iter()
                            .map(|artist| view! { <option value=artist.id>{artist.name}</option> })
                            .collect_view()
                    }}
                </select>
                <label>"Period:"</label>
                <select on:change=move |ev| form.update(|f| f.start_year = Some(event_target_value(&ev)))>
                    <option value="">"Year"</option>
                    {year_options.clone()}
                </select>
                <select on:change=move |ev| form.update(|f| f.start_month = Some(event_target_value(&ev)))>
                    <option value="">"Month"</option>
                    {month_options}
                </select>
                <span>" ~ "</span>
                <select on:change=move |ev| form.update(|f| f.end_year = Some(event_target_value(&ev)))>
                    <option value="">"Year"</option>
                    {year_options}
                </select>
                <select on:change=move |ev| form.update(|f| f.end_month = Some(event_target_value(&ev)))>
                    <option value="">"Month"</option>
                    {month_options}
                </select>
                <input
                    type="text"
                    placeholder="Keyword"
                    on:input=move |ev| form.update(|f| f.keyword = Some(event_target_value(&ev)))
                />
                <button type="submit">"Search"</button>
            </form>
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
        </div>
    }
}
