//! Rating aggregation for a venue and the star-style display of a single value.
//!
//! Averages are computed per category and the overall score is the mean of the
//! four category means. Both functions are pure: an empty review list or an
//! unusable rating value maps to "no rating yet", never to an error.

use serde::{Deserialize, Serialize};

use crate::models::review::{RatingScores, Review};

/// Number of icons shown for a rating unless a caller asks otherwise.
pub const DEFAULT_MAX_STARS: u32 = 5;

/// Tolerance applied to the fractional part before the half-icon comparison.
const HALF_STAR_EPSILON: f64 = 1e-9;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
pub struct AggregateRating {
    pub visibility: f64,
    pub sound: f64,
    pub facilities: f64,
    pub access: f64,
    pub overall: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct StarDisplay {
    pub full_count: u32,
    pub has_half: bool,
    pub empty_count: u32,
    /// One-decimal label, absent when there is no rating to show.
    pub label: Option<String>,
}

/// Display tuples for every value of an [`AggregateRating`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CategoryDisplays {
    pub overall: StarDisplay,
    pub visibility: StarDisplay,
    pub sound: StarDisplay,
    pub facilities: StarDisplay,
    pub access: StarDisplay,
}

/// Aggregate for one venue's (filtered) reviews, ready for display.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct VenueRating {
    pub review_count: usize,
    pub averages: AggregateRating,
    pub displays: CategoryDisplays,
}

impl VenueRating {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let averages = compute_averages(reviews.iter().map(|review| review.scores));
        VenueRating {
            review_count: reviews.len(),
            averages,
            displays: averages.displays(),
        }
    }
}

impl AggregateRating {
    pub fn displays(&self) -> CategoryDisplays {
        CategoryDisplays {
            overall: StarDisplay::for_rating(self.overall),
            visibility: StarDisplay::for_rating(self.visibility),
            sound: StarDisplay::for_rating(self.sound),
            facilities: StarDisplay::for_rating(self.facilities),
            access: StarDisplay::for_rating(self.access),
        }
    }
}

impl StarDisplay {
    pub fn for_rating(rating: f64) -> Self {
        map_to_display(rating, DEFAULT_MAX_STARS)
    }
}

/// Averages each rating category across `reviews`.
///
/// `overall` is the mean of the four category means, not the mean of every
/// individual score. The two agree while every review carries all four scores.
pub fn compute_averages<I>(reviews: I) -> AggregateRating
where
    I: IntoIterator<Item = RatingScores>,
{
    let mut count = 0u32;
    let mut sums = [0u32; 4];

    for scores in reviews {
        count += 1;
        sums[0] += u32::from(scores.visibility);
        sums[1] += u32::from(scores.sound);
        sums[2] += u32::from(scores.facilities);
        sums[3] += u32::from(scores.access);
    }

    let mean = |sum: u32| {
        if count > 0 {
            f64::from(sum) / f64::from(count)
        } else {
            0.0
        }
    };

    let visibility = mean(sums[0]);
    let sound = mean(sums[1]);
    let facilities = mean(sums[2]);
    let access = mean(sums[3]);

    AggregateRating {
        visibility,
        sound,
        facilities,
        access,
        overall: (visibility + sound + facilities + access) / 4.0,
    }
}

/// Splits `rating` into full, half and empty icons out of `max_stars`.
///
/// Non-finite and non-positive values show as all-empty without a label. The
/// label is rounded on its own, so `4.49` shows four full icons next to "4.5".
pub fn map_to_display(rating: f64, max_stars: u32) -> StarDisplay {
    let valid = rating.is_finite() && rating > 0.0;
    if !valid {
        return StarDisplay {
            full_count: 0,
            has_half: false,
            empty_count: max_stars,
            label: None,
        };
    }

    let capped = rating.min(f64::from(max_stars));
    let full_count = capped.floor() as u32;
    let fraction = capped - capped.floor();
    let has_half = full_count < max_stars && fraction + HALF_STAR_EPSILON >= 0.5;
    let empty_count = max_stars - full_count - u32::from(has_half);

    StarDisplay {
        full_count,
        has_half,
        empty_count,
        // ties round away from zero: 2.25 reads "2.3"
        label: Some(format!("{:.1}", (rating * 10.0).round() / 10.0)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(visibility: u8, sound: u8, facilities: u8, access: u8) -> RatingScores {
        RatingScores {
            visibility,
            sound,
            facilities,
            access,
        }
    }

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(compute_averages(Vec::<RatingScores>::new()), AggregateRating::default());
    }

    #[test]
    fn averages_two_reviews() {
        let averages = compute_averages(vec![scores(5, 4, 3, 2), scores(3, 2, 1, 0)]);
        assert_eq!(
            averages,
            AggregateRating {
                visibility: 4.0,
                sound: 3.0,
                facilities: 2.0,
                access: 1.0,
                overall: 2.5,
            }
        );
    }

    #[test]
    fn overall_is_mean_of_category_means() {
        let averages = compute_averages(vec![
            scores(5, 5, 0, 1),
            scores(4, 0, 2, 1),
            scores(1, 3, 5, 5),
        ]);
        let expected = (averages.visibility + averages.sound + averages.facilities + averages.access) / 4.0;
        assert!((averages.overall - expected).abs() < 1e-12);
        for value in [
            averages.visibility,
            averages.sound,
            averages.facilities,
            averages.access,
            averages.overall,
        ] {
            assert!((0.0..=5.0).contains(&value));
        }
    }

    #[test]
    fn invalid_ratings_show_empty_without_label() {
        for rating in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let display = map_to_display(rating, 5);
            assert_eq!(display.full_count, 0);
            assert!(!display.has_half);
            assert_eq!(display.empty_count, 5);
            assert_eq!(display.label, None);
        }
    }

    #[test]
    fn half_icon_at_threshold() {
        let display = map_to_display(3.5, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (3, true, 1));
        assert_eq!(display.label.as_deref(), Some("3.5"));
    }

    #[test]
    fn full_rating() {
        let display = map_to_display(5.0, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (5, false, 0));
        assert_eq!(display.label.as_deref(), Some("5.0"));
    }

    #[test]
    fn label_rounds_independently_of_icons() {
        let display = map_to_display(4.49, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (4, false, 1));
        assert_eq!(display.label.as_deref(), Some("4.5"));
    }

    #[test]
    fn label_ties_round_up() {
        let averages = compute_averages(vec![
            scores(3, 1, 1, 1),
            scores(2, 1, 1, 1),
            scores(2, 1, 1, 1),
            scores(2, 1, 1, 1),
        ]);
        assert_eq!(averages.visibility, 2.25);
        assert_eq!(map_to_display(averages.visibility, 5).label.as_deref(), Some("2.3"));
        assert_eq!(map_to_display(0.25, 5).label.as_deref(), Some("0.3"));
        assert_eq!(map_to_display(2.75, 5).label.as_deref(), Some("2.8"));
    }

    #[test]
    fn below_half_rounds_down_to_nothing() {
        let display = map_to_display(0.49, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (0, false, 5));
        assert_eq!(display.label.as_deref(), Some("0.5"));
    }

    #[test]
    fn near_whole_value_keeps_half_icon() {
        let display = map_to_display(4.999999, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (4, true, 0));
    }

    #[test]
    fn values_above_max_are_capped() {
        let display = map_to_display(7.0, 5);
        assert_eq!((display.full_count, display.has_half, display.empty_count), (5, false, 0));
        assert_eq!(display.label.as_deref(), Some("7.0"));
    }

    #[test]
    fn displays_cover_every_category() {
        let displays = compute_averages(vec![scores(5, 4, 3, 2), scores(3, 2, 1, 0)]).displays();
        assert_eq!(displays.visibility.full_count, 4);
        assert_eq!(displays.access.label.as_deref(), Some("1.0"));
        assert!(displays.overall.has_half);
        assert_eq!(displays.overall.full_count, 2);
    }
}
