use leptos::*;
use leptos::ev::SubmitEvent;
use crate::components::rating_display::{category_color, category_icon};
use crate::models::artist::Artist;
use crate::models::review::{Category, ReviewInput, MAX_SCORE};

/// Clickable icon row for picking a 0..=5 score. Clicking the current score
/// again clears it.
#[component]
fn StarInput(category: Category, form: RwSignal<ReviewInput>) -> impl IntoView {
    let current = move || form.with(|input| category.score(&input.scores));

    view! {
        <div class="star-input">
            {(1..=MAX_SCORE)
                .map(|value| {
                    let pick = move |_: ev::MouseEvent| {
                        form.update(|input| {
                            let score = category.score_mut(&mut input.scores);
                            *score = if *score == value { 0 } else { value };
                        })
                    };
                    view! {
                        <button
                            type="button"
                            class=move || {
                                if value <= current() {
                                    format!("icon-lg {}", category_color(category))
                                } else {
                                    "icon-lg icon-empty".to_string()
                                }
                            }
                            on:click=pick
                        >
                            {category_icon(category)}
                        </button>
                    }
                })
                .collect_view()}
            <span class="star-value">{move || current().to_string()}</span>
        </div>
    }
}

/// Seat report form shared by the submission and edit pages.
#[component]
pub fn ReviewForm(
    initial: ReviewInput,
    #[prop(into)] artists: Signal<Vec<Artist>>,
    #[prop(into)] submit_label: String,
    on_submit: Callback<ReviewInput>,
    #[prop(optional)] on_cancel: Option<Callback<()>>,
) -> impl IntoView {
    let form = create_rw_signal(initial);
    let (error, set_error) = create_signal(None::<String>);

    let selected_artist = move || form.with(|input| input.artist_id.clone().unwrap_or_default());

    let handle_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let input = form.get();
        if input.seat_number.trim().is_empty() {
            set_error.set(Some("Enter a seat number".to_string()));
            return;
        }
        match input.validate() {
            Ok(()) => {
                set_error.set(None);
                on_submit.call(input);
            }
            Err(err) => set_error.set(Some(err.to_string())),
        }
    };

    view! {
        <form class="review-form" on:submit=handle_submit>
            <label>
                "Seat"
                <input
                    type="text"
                    placeholder="e.g. Block A, row 12"
                    prop:value=move || form.with(|input| input.seat_number.clone())
                    on:input=move |ev| form.update(|input| input.seat_number = event_target_value(&ev))
                />
            </label>
            <label>
                "Artist"
                <select
                    prop:value=selected_artist
                    on:change=move |ev| {
                        let value = event_target_value(&ev);
                        form.update(|input| {
                            input.artist_id = (!value.is_empty()).then_some(value);
                        })
                    }
                >
                    <option value="">"Not listed / none"</option>
                    {move || {
                        artists
                            .get()
                            .into_iter()
                            .map(|artist| {
                                let selected = selected_artist() == artist.id;
                                view! {
                                    <option value=artist.id selected=selected>{artist.name}</option>
                                }
                            })
                            .collect_view()
                    }}
                </select>
            </label>
            <Show when=move || form.with(|input| input.artist_id.is_none())>
                <label>
                    "Other artist"
                    <input
                        type="text"
                        placeholder="Artist name"
                        prop:value=move || form.with(|input| input.custom_artist.clone().unwrap_or_default())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            form.update(|input| {
                                input.custom_artist = (!value.trim().is_empty()).then_some(value);
                            })
                        }
                    />
                </label>
            </Show>
            {Category::ALL
                .into_iter()
                .map(|category| {
                    view! {
                        <fieldset class="category-input">
                            <legend>{category.label()}</legend>
                            <StarInput category=category form=form/>
                            <textarea
                                placeholder=format!("How was the {}?", category.field_name())
                                prop:value=move || form.with(|input| category.comment(&input.comments).to_string())
                                on:input=move |ev| {
                                    let value = event_target_value(&ev);
                                    form.update(|input| *category.comment_mut(&mut input.comments) = value)
                                }
                            ></textarea>
                        </fieldset>
                    }
                })
                .collect_view()}
            {move || error.get().map(|message| view! { <p class="form-error">{message}</p> })}
            <div class="form-actions">
                {on_cancel.map(|cancel| {
                    view! {
                        <button type="button" on:click=move |_| cancel.call(())>"Cancel"</button>
                    }
                })}
                <button type="submit">{submit_label}</button>
            </div>
        </form>
    }
}
