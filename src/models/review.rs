use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Highest score a single rating category accepts.
pub const MAX_SCORE: u8 = 5;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RatingScores {
    pub visibility: u8,
    pub sound: u8,
    pub facilities: u8,
    pub access: u8,
}

impl RatingScores {
    pub fn validate(&self) -> Result<()> {
        match Category::ALL
            .into_iter()
            .find(|category| category.score(self) > MAX_SCORE)
        {
            Some(category) => Err(AppError::InvalidRating {
                field: category.field_name(),
                value: i64::from(category.score(self)),
            }),
            None => Ok(()),
        }
    }
}

/// The four rated aspects of a seat.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Visibility,
    Sound,
    Facilities,
    Access,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Visibility,
        Category::Sound,
        Category::Facilities,
        Category::Access,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            Category::Visibility => "visibility",
            Category::Sound => "sound",
            Category::Facilities => "facilities",
            Category::Access => "access",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Visibility => "Visibility",
            Category::Sound => "Sound",
            Category::Facilities => "Facilities",
            Category::Access => "Access",
        }
    }

    pub fn score(&self, scores: &RatingScores) -> u8 {
        match self {
            Category::Visibility => scores.visibility,
            Category::Sound => scores.sound,
            Category::Facilities => scores.facilities,
            Category::Access => scores.access,
        }
    }

    pub fn score_mut<'a>(&self, scores: &'a mut RatingScores) -> &'a mut u8 {
        match self {
            Category::Visibility => &mut scores.visibility,
            Category::Sound => &mut scores.sound,
            Category::Facilities => &mut scores.facilities,
            Category::Access => &mut scores.access,
        }
    }

    pub fn comment<'a>(&self, comments: &'a ReviewComments) -> &'a str {
        match self {
            Category::Visibility => &comments.visibility,
            Category::Sound => &comments.sound,
            Category::Facilities => &comments.facilities,
            Category::Access => &comments.access,
        }
    }

    pub fn comment_mut<'a>(&self, comments: &'a mut ReviewComments) -> &'a mut String {
        match self {
            Category::Visibility => &mut comments.visibility,
            Category::Sound => &mut comments.sound,
            Category::Facilities => &mut comments.facilities,
            Category::Access => &mut comments.access,
        }
    }
}

/// Free-text comments, one per rating category.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct ReviewComments {
    #[serde(default)]
    pub visibility: String,
    #[serde(default)]
    pub sound: String,
    #[serde(default)]
    pub facilities: String,
    #[serde(default)]
    pub access: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Review {
    pub id: String,
    pub venue_id: String,
    pub user_id: Option<String>, // None for anonymous submissions
    pub artist_id: Option<String>,
    pub seat_number: String,
    pub scores: RatingScores,
    pub comments: ReviewComments,
    pub created_at: DateTime<Utc>,
}

impl Review {
    pub fn is_authored_by(&self, user_id: Option<&str>) -> bool {
        matches!((self.user_id.as_deref(), user_id), (Some(author), Some(user)) if author == user)
    }
}

/// Body of a create or edit request.
///
/// `custom_artist` names an artist to look up or create when no `artist_id` is
/// selected.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ReviewInput {
    #[serde(default)]
    pub seat_number: String,
    #[serde(default)]
    pub artist_id: Option<String>,
    #[serde(default)]
    pub custom_artist: Option<String>,
    pub scores: RatingScores,
    #[serde(default)]
    pub comments: ReviewComments,
}

impl ReviewInput {
    pub fn validate(&self) -> Result<()> {
        self.scores.validate()
    }
}

impl From<&Review> for ReviewInput {
    fn from(review: &Review) -> Self {
        ReviewInput {
            seat_number: review.seat_number.clone(),
            artist_id: review.artist_id.clone(),
            custom_artist: None,
            scores: review.scores,
            comments: review.comments.clone(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewDetail {
    pub review: Review,
    pub venue_name: String,
    pub artist_name: Option<String>,
}

/// One line of a user's review history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ReviewSummary {
    pub id: String,
    pub venue_id: String,
    pub venue_name: String,
    pub seat_number: String,
    pub created_at: DateTime<Utc>,
}

/// Narrowing options for a venue's review list. Blank strings count as unset.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReviewFilters {
    pub artist_id: Option<String>,
    pub seat: Option<String>,
    pub keyword: Option<String>,
    pub start_year: Option<String>,
    pub start_month: Option<String>,
    pub end_year: Option<String>,
    pub end_month: Option<String>,
}

/// Half-open `created_at` window: `start <= t < end`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// Stored timestamps compare as text, which only orders four-digit years.
const MIN_FILTER_YEAR: i32 = 0;
const MAX_FILTER_YEAR: i32 = 9999;

fn month_start(year: Option<&str>, month: Option<&str>, bound: &str) -> Result<Option<NaiveDate>> {
    match (year, month) {
        (None, None) => Ok(None),
        (Some(year), Some(month)) => {
            let year: i32 = year
                .parse()
                .map_err(|_| AppError::InvalidFilter(format!("{} year '{}' is not a number", bound, year)))?;
            if !(MIN_FILTER_YEAR..=MAX_FILTER_YEAR).contains(&year) {
                return Err(AppError::InvalidFilter(format!(
                    "{} year {} is outside {}..={}",
                    bound, year, MIN_FILTER_YEAR, MAX_FILTER_YEAR
                )));
            }
            let month: u32 = month
                .parse()
                .map_err(|_| AppError::InvalidFilter(format!("{} month '{}' is not a number", bound, month)))?;
            NaiveDate::from_ymd_opt(year, month, 1)
                .map(Some)
                .ok_or_else(|| AppError::InvalidFilter(format!("{} month {}-{} does not exist", bound, year, month)))
        }
        _ => Err(AppError::InvalidFilter(format!(
            "{} year and month must be given together",
            bound
        ))),
    }
}

fn next_month(date: NaiveDate) -> Option<NaiveDate> {
    if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    }
}

impl ReviewFilters {
    pub fn artist_id(&self) -> Option<&str> {
        non_blank(&self.artist_id)
    }

    pub fn seat(&self) -> Option<&str> {
        non_blank(&self.seat)
    }

    pub fn keyword(&self) -> Option<&str> {
        non_blank(&self.keyword)
    }

    /// Resolves the month bounds into a window covering the whole end month.
    pub fn date_range(&self) -> Result<DateRange> {
        let start = month_start(non_blank(&self.start_year), non_blank(&self.start_month), "start")?;
        let end = month_start(non_blank(&self.end_year), non_blank(&self.end_month), "end")?;

        // a range ending in December 9999 has no upper bound
        let end = end.and_then(next_month).filter(|date| date.year() <= MAX_FILTER_YEAR);

        Ok(DateRange {
            start: start.and_then(|d| d.and_hms_opt(0, 0, 0)),
            end: end.and_then(|d| d.and_hms_opt(0, 0, 0)),
        })
    }

    pub fn validate(&self) -> Result<()> {
        self.date_range().map(|_| ())
    }

    pub fn to_query_string(&self) -> String {
        [
            ("artist_id", &self.artist_id),
            ("seat", &self.seat),
            ("keyword", &self.keyword),
            ("start_year", &self.start_year),
            ("start_month", &self.start_month),
            ("end_year", &self.end_year),
            ("end_month", &self.end_month),
        ]
        .into_iter()
        .filter_map(|(key, value)| non_blank(value).map(|v| format!("{}={}", key, urlencoding::encode(v))))
        .collect::<Vec<_>>()
        .join("&")
    }
}
