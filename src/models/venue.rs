use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::artist::Artist;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum VenueCategory {
    Arena,
    Dome,
    Hall,
    Stadium,
    Livehouse,
    Theater,
}

impl VenueCategory {
    pub const ALL: [VenueCategory; 6] = [
        VenueCategory::Arena,
        VenueCategory::Dome,
        VenueCategory::Hall,
        VenueCategory::Stadium,
        VenueCategory::Livehouse,
        VenueCategory::Theater,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VenueCategory::Arena => "arena",
            VenueCategory::Dome => "dome",
            VenueCategory::Hall => "hall",
            VenueCategory::Stadium => "stadium",
            VenueCategory::Livehouse => "livehouse",
            VenueCategory::Theater => "theater",
        }
    }
}

impl fmt::Display for VenueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for VenueCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        VenueCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| format!("unknown venue category '{}'", s))
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Venue {
    pub id: String,
    pub name: String,
    pub image_url: String,
    pub capacity: u32,
    pub access: String,  // directions from the nearest station
    pub seat: String,    // seat layout description
    pub category: VenueCategory,
    pub website: String, // official seating map
}

/// Reference data loaded into an empty store at startup.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct SeedData {
    #[serde(default)]
    pub venues: Vec<Venue>,
    #[serde(default)]
    pub artists: Vec<Artist>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_its_name() {
        for category in VenueCategory::ALL {
            assert_eq!(category.as_str().parse::<VenueCategory>(), Ok(category));
        }
        assert!("stadiums".parse::<VenueCategory>().is_err());
    }

    #[test]
    fn seed_file_parses_with_defaults() {
        let seed: SeedData = serde_json::from_str(
            r#"{
                "venues": [{
                    "id": "budokan",
                    "name": "Nippon Budokan",
                    "image_url": "/assets/budokan.jpg",
                    "capacity": 14471,
                    "access": "Kudanshita station, 5 min walk",
                    "seat": "Arena and stand seating",
                    "category": "arena",
                    "website": "https://www.nipponbudokan.or.jp/"
                }],
                "artists": [{ "id": "a1", "name": "Band" }]
            }"#,
        )
        .unwrap();

        assert_eq!(seed.venues[0].category, VenueCategory::Arena);
        assert!(seed.artists[0].is_official);
        assert_eq!(seed.artists[0].kana, None);
    }
}
