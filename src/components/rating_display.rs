/// Icon-row rendering of a rating value, with an optional category label.
use leptos::*;
use crate::models::review::Category;
use crate::rating::{map_to_display, DEFAULT_MAX_STARS};

pub const STAR_ICON: &str = "★";

/// Icon shown for a rating category.
pub fn category_icon(category: Category) -> &'static str {
    match category {
        Category::Visibility => "👁",
        Category::Sound => "🎧",
        Category::Facilities => "🏪",
        Category::Access => "🚃",
    }
}

/// CSS class of the filled icons for a rating category.
pub fn category_color(category: Category) -> &'static str {
    match category {
        Category::Visibility => "icon-green",
        Category::Sound => "icon-blue",
        Category::Facilities => "icon-pink",
        Category::Access => "icon-orange",
    }
}

#[component]
pub fn IconRatingDisplay(
    rating: f64,
    icon: &'static str,
    #[prop(default = "icon-md")] size: &'static str,
    #[prop(default = "icon-yellow")] full_class: &'static str,
    #[prop(default = "icon-half")] half_class: &'static str,
    #[prop(default = "icon-empty")] empty_class: &'static str,
) -> impl IntoView {
    let display = map_to_display(rating, DEFAULT_MAX_STARS);

    let icons = move |count: u32, class: &'static str| {
        (0..count)
            .map(move |_| view! { <span class=format!("{} {}", size, class)>{icon}</span> })
            .collect_view()
    };

    view! {
        <div class="rating-display">
            <div class="rating-icons">
                {icons(display.full_count, full_class)}
                {display.has_half.then(|| icons(1, half_class))}
                {icons(display.empty_count, empty_class)}
            </div>
            {display.label.map(|label| view! { <span class="rating-label">{label}</span> })}
        </div>
    }
}

#[component]
pub fn LabeledRating(category: Category, rating: f64) -> impl IntoView {
    view! {
        <div class="labeled-rating">
            <span class="rating-name">{category.label()}</span>
            <IconRatingDisplay
                rating=rating
                icon=category_icon(category)
                full_class=category_color(category)
            />
        </div>
    }
}
