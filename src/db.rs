#[cfg(feature = "ssr")]
mod db_impl {
    use crate::error::{AppError, Result};
    use crate::models::artist::Artist;
    use crate::models::like::LikeStatus;
    use crate::models::review::{
        RatingScores, Review, ReviewComments, ReviewDetail, ReviewFilters, ReviewInput, ReviewSummary,
    };
    use crate::models::venue::{SeedData, Venue, VenueCategory};
    use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
    use leptos::logging::log;
    use rusqlite::types::Type;
    use rusqlite::{params, Connection, OptionalExtension, Row, Transaction};
    use std::path::Path;
    use std::sync::Arc;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    #[cfg(test)]
    mod tests {
        use super::*;
        use chrono::NaiveDate;

        // Helper function to create test database
        async fn create_test_db() -> Database {
            log!("[TEST] Creating in-memory test database");
            let db = Database::new(":memory:").unwrap();
            db.create_schema().await.unwrap();
            db.seed(&test_seed()).await.unwrap();
            log!("[TEST] Database schema created and seeded");
            db
        }

        fn venue(id: &str, name: &str) -> Venue {
            Venue {
                id: id.into(),
                name: name.into(),
                image_url: format!("/assets/{}.jpg", id),
                capacity: 10000,
                access: "5 min from the station".into(),
                seat: "Arena and stands".into(),
                category: VenueCategory::Arena,
                website: format!("https://{}.example.com", id),
            }
        }

        fn test_seed() -> SeedData {
            SeedData {
                venues: vec![
                    venue("budokan", "Nippon Budokan"),
                    venue("saitama", "Saitama Super Arena"),
                    venue("yokohama", "Yokohama Arena"),
                ],
                artists: vec![
                    Artist {
                        id: "a-zutomayo".into(),
                        name: "Zutomayo".into(),
                        kana: Some("zutomayo".into()),
                        is_official: true,
                    },
                    Artist {
                        id: "a-aimer".into(),
                        name: "Aimer".into(),
                        kana: Some("eme".into()),
                        is_official: true,
                    },
                ],
            }
        }

        fn input(seat: &str, scores: (u8, u8, u8, u8), comment: &str) -> ReviewInput {
            ReviewInput {
                seat_number: seat.into(),
                artist_id: None,
                custom_artist: None,
                scores: RatingScores {
                    visibility: scores.0,
                    sound: scores.1,
                    facilities: scores.2,
                    access: scores.3,
                },
                comments: ReviewComments {
                    visibility: comment.into(),
                    ..Default::default()
                },
            }
        }

        fn at(year: i32, month: u32, day: u32) -> DateTime<Utc> {
            let naive = NaiveDate::from_ymd_opt(year, month, day)
                .and_then(|d| d.and_hms_opt(12, 0, 0))
                .unwrap();
            Utc.from_utc_datetime(&naive)
        }

        #[tokio::test]
        async fn test_schema_creation() {
            log!("[TEST] Starting test_schema_creation");
            let db = create_test_db().await;

            let conn = db.conn.lock().await;
            let mut stmt = conn
                .prepare("SELECT name FROM sqlite_master WHERE type='table'")
                .unwrap();
            let tables: Vec<String> = stmt
                .query_map([], |row| row.get(0))
                .unwrap()
                .collect::<std::result::Result<_, _>>()
                .unwrap();

            for table in ["venues", "artists", "reviews", "likes"] {
                assert!(tables.contains(&table.to_string()), "missing table {}", table);
            }
        }

        #[tokio::test]
        async fn test_seed_is_idempotent() {
            log!("[TEST] Starting test_seed_is_idempotent");
            let db = create_test_db().await;
            db.seed(&test_seed()).await.unwrap();

            assert_eq!(db.list_venues().await.unwrap().len(), 3);
            let artists = db.list_artists().await.unwrap();
            assert_eq!(artists.len(), 2);
            // sorted by reading, not display name
            assert_eq!(artists[0].name, "Aimer");
        }

        #[tokio::test]
        async fn test_venue_lookup_and_search() {
            log!("[TEST] Starting test_venue_lookup_and_search");
            let db = create_test_db().await;

            let budokan = db.get_venue("budokan").await.unwrap();
            assert_eq!(budokan.name, "Nippon Budokan");
            assert!(matches!(db.get_venue("nowhere").await, Err(AppError::NotFound(_))));

            let results = db.search_venues("ARENA", 10).await.unwrap();
            let names: Vec<_> = results.iter().map(|v| v.name.as_str()).collect();
            assert_eq!(names, vec!["Yokohama Arena", "Saitama Super Arena"]);

            assert!(db.search_venues("100%", 10).await.unwrap().is_empty());
            assert_eq!(db.search_venues("a", 1).await.unwrap().len(), 1);
        }

        #[tokio::test]
        async fn test_full_review_lifecycle() {
            log!("[TEST] Starting test_full_review_lifecycle");
            let db = create_test_db().await;

            log!("[TEST] Testing review creation");
            let review = db
                .create_review("budokan", Some("user-1"), &input("A-12", (5, 4, 3, 2), "close"))
                .await
                .unwrap();
            assert_eq!(review.user_id.as_deref(), Some("user-1"));

            let stored = db.get_review(&review.id).await.unwrap();
            assert_eq!(stored.scores, review.scores);
            assert_eq!(stored.comments.visibility, "close");

            log!("[TEST] Testing review update by author");
            let mut edit = input("B-3", (1, 1, 1, 1), "far");
            edit.custom_artist = Some("New Band".into());
            let updated = db.update_review(&review.id, Some("user-1"), &edit).await.unwrap();
            assert_eq!(updated.seat_number, "B-3");
            assert_eq!(updated.created_at, stored.created_at);
            assert!(updated.artist_id.is_some());

            let detail = db.get_review_detail(&review.id).await.unwrap();
            assert_eq!(detail.venue_name, "Nippon Budokan");
            assert_eq!(detail.artist_name.as_deref(), Some("New Band"));

            log!("[TEST] Testing review deletion");
            db.delete_review(&review.id, Some("user-1")).await.unwrap();
            assert!(matches!(db.get_review(&review.id).await, Err(AppError::NotFound(_))));
            log!("[TEST] test_full_review_lifecycle completed successfully");
        }

        #[tokio::test]
        async fn test_only_author_can_change_review() {
            log!("[TEST] Starting test_only_author_can_change_review");
            let db = create_test_db().await;
            let owned = db
                .create_review("budokan", Some("user-1"), &input("A", (3, 3, 3, 3), ""))
                .await
                .unwrap();
            let anonymous = db
                .create_review("budokan", None, &input("B", (3, 3, 3, 3), ""))
                .await
                .unwrap();

            let edit = input("C", (0, 0, 0, 0), "");
            assert!(matches!(
                db.update_review(&owned.id, Some("user-2"), &edit).await,
                Err(AppError::Forbidden)
            ));
            assert!(matches!(
                db.delete_review(&owned.id, None).await,
                Err(AppError::Forbidden)
            ));
            assert!(matches!(
                db.delete_review(&anonymous.id, None).await,
                Err(AppError::Forbidden)
            ));
            assert!(matches!(
                db.delete_review("missing", Some("user-1")).await,
                Err(AppError::NotFound(_))
            ));
            assert_eq!(db.get_review(&owned.id).await.unwrap().seat_number, "A");
        }

        #[tokio::test]
        async fn test_review_validation() {
            log!("[TEST] Starting test_review_validation");
            let db = create_test_db().await;

            let result = db
                .create_review("budokan", None, &input("A", (6, 0, 0, 0), ""))
                .await;
            assert!(matches!(result, Err(AppError::InvalidRating { field: "visibility", .. })));

            let result = db.create_review("nowhere", None, &input("A", (1, 1, 1, 1), "")).await;
            assert!(matches!(result, Err(AppError::NotFound(_))));

            let mut unknown_artist = input("A", (1, 1, 1, 1), "");
            unknown_artist.artist_id = Some("a-unknown".into());
            let result = db.create_review("budokan", None, &unknown_artist).await;
            assert!(matches!(result, Err(AppError::NotFound(_))));
        }

        #[tokio::test]
        async fn test_custom_artist_reuses_existing_name() {
            log!("[TEST] Starting test_custom_artist_reuses_existing_name");
            let db = create_test_db().await;

            let mut with_known = input("A", (1, 1, 1, 1), "");
            with_known.custom_artist = Some("  aimer ".into());
            let review = db.create_review("budokan", None, &with_known).await.unwrap();
            assert_eq!(review.artist_id.as_deref(), Some("a-aimer"));

            let mut with_new = input("A", (1, 1, 1, 1), "");
            with_new.custom_artist = Some("Indie Act".into());
            let first = db.create_review("budokan", None, &with_new).await.unwrap();
            let second = db.create_review("saitama", None, &with_new).await.unwrap();
            assert_eq!(first.artist_id, second.artist_id);

            let artists = db.list_artists().await.unwrap();
            let indie = artists.iter().find(|a| a.name == "Indie Act").unwrap();
            assert!(!indie.is_official);
        }

        #[tokio::test]
        async fn test_fetch_reviews_filters() {
            log!("[TEST] Starting test_fetch_reviews_filters");
            let db = create_test_db().await;

            let mut first = input("Arena A-5", (5, 5, 5, 5), "Great VIEW of the stage");
            first.artist_id = Some("a-aimer".into());
            db.create_review_at("budokan", Some("u1"), &first, at(2024, 1, 15)).await.unwrap();

            let mut second = input("North stand 2F", (2, 3, 4, 1), "pillar in the way");
            second.comments.access = "crowded exit, long queue".into();
            db.create_review_at("budokan", Some("u2"), &second, at(2024, 3, 31)).await.unwrap();

            let third = input("arena b-1", (4, 4, 4, 4), "");
            db.create_review_at("budokan", None, &third, at(2024, 6, 1)).await.unwrap();

            db.create_review_at("saitama", None, &input("A-5", (1, 1, 1, 1), "view"), at(2024, 1, 1))
                .await
                .unwrap();

            log!("[TEST] Testing unfiltered venue reviews, newest first");
            let all = db.fetch_reviews("budokan", &ReviewFilters::default()).await.unwrap();
            let seats: Vec<_> = all.iter().map(|r| r.seat_number.as_str()).collect();
            assert_eq!(seats, vec!["arena b-1", "North stand 2F", "Arena A-5"]);

            log!("[TEST] Testing artist filter");
            let filters = ReviewFilters {
                artist_id: Some("a-aimer".into()),
                ..Default::default()
            };
            assert_eq!(db.fetch_reviews("budokan", &filters).await.unwrap().len(), 1);

            log!("[TEST] Testing case-insensitive seat filter");
            let filters = ReviewFilters {
                seat: Some("ARENA".into()),
                ..Default::default()
            };
            assert_eq!(db.fetch_reviews("budokan", &filters).await.unwrap().len(), 2);

            log!("[TEST] Testing keyword across comment fields");
            let filters = ReviewFilters {
                keyword: Some("view".into()),
                ..Default::default()
            };
            let found = db.fetch_reviews("budokan", &filters).await.unwrap();
            assert_eq!(found.len(), 1);
            assert_eq!(found[0].seat_number, "Arena A-5");

            let filters = ReviewFilters {
                keyword: Some("QUEUE".into()),
                ..Default::default()
            };
            let found = db.fetch_reviews("budokan", &filters).await.unwrap();
            assert_eq!(found[0].seat_number, "North stand 2F");

            log!("[TEST] Testing inclusive month range");
            let filters = ReviewFilters {
                start_year: Some("2024".into()),
                start_month: Some("01".into()),
                end_year: Some("2024".into()),
                end_month: Some("03".into()),
                ..Default::default()
            };
            assert_eq!(db.fetch_reviews("budokan", &filters).await.unwrap().len(), 2);

            let filters = ReviewFilters {
                start_year: Some("2024".into()),
                start_month: Some("04".into()),
                ..Default::default()
            };
            assert_eq!(db.fetch_reviews("budokan", &filters).await.unwrap().len(), 1);

            log!("[TEST] Testing wildcard characters are literal");
            let filters = ReviewFilters {
                seat: Some("%".into()),
                ..Default::default()
            };
            assert!(db.fetch_reviews("budokan", &filters).await.unwrap().is_empty());

            let filters = ReviewFilters {
                end_year: Some("2024".into()),
                ..Default::default()
            };
            assert!(matches!(
                db.fetch_reviews("budokan", &filters).await,
                Err(AppError::InvalidFilter(_))
            ));
        }

        #[tokio::test]
        async fn test_like_toggle() {
            log!("[TEST] Starting test_like_toggle");
            let db = create_test_db().await;
            let review = db
                .create_review("budokan", Some("author"), &input("A", (3, 3, 3, 3), ""))
                .await
                .unwrap();

            let status = db.like_status(&review.id, None).await.unwrap();
            assert_eq!(status, LikeStatus { count: 0, liked: false });

            let status = db.toggle_like(&review.id, "fan-1").await.unwrap();
            assert_eq!(status, LikeStatus { count: 1, liked: true });
            db.toggle_like(&review.id, "fan-2").await.unwrap();

            let status = db.like_status(&review.id, Some("fan-1")).await.unwrap();
            assert_eq!(status, LikeStatus { count: 2, liked: true });
            let status = db.like_status(&review.id, None).await.unwrap();
            assert_eq!(status, LikeStatus { count: 2, liked: false });

            let status = db.toggle_like(&review.id, "fan-1").await.unwrap();
            assert_eq!(status, LikeStatus { count: 1, liked: false });

            assert!(matches!(
                db.toggle_like("missing", "fan-1").await,
                Err(AppError::NotFound(_))
            ));

            log!("[TEST] Testing likes go away with their review");
            db.delete_review(&review.id, Some("author")).await.unwrap();
            let conn = db.conn.lock().await;
            let remaining: i64 = conn
                .query_row("SELECT COUNT(*) FROM likes", [], |row| row.get(0))
                .unwrap();
            assert_eq!(remaining, 0);
        }

        #[tokio::test]
        async fn test_reviews_by_user() {
            log!("[TEST] Starting test_reviews_by_user");
            let db = create_test_db().await;
            db.create_review_at("budokan", Some("me"), &input("A", (1, 1, 1, 1), ""), at(2023, 5, 1))
                .await
                .unwrap();
            db.create_review_at("saitama", Some("me"), &input("B", (1, 1, 1, 1), ""), at(2024, 5, 1))
                .await
                .unwrap();
            db.create_review_at("saitama", Some("someone"), &input("C", (1, 1, 1, 1), ""), at(2024, 6, 1))
                .await
                .unwrap();

            let mine = db.reviews_by_user("me").await.unwrap();
            let venues: Vec<_> = mine.iter().map(|r| r.venue_name.as_str()).collect();
            assert_eq!(venues, vec!["Saitama Super Arena", "Nippon Budokan"]);
        }
    }

    /// Timestamp layout in the `created_at` column; sorts lexically by time.
    const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";
    const TIMESTAMP_PARSE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    const REVIEW_COLUMNS: &str = "r.id, r.venue_id, r.user_id, r.artist_id, r.seat_number,
        r.visibility, r.sound, r.facilities, r.access,
        r.v_comment, r.s_comment, r.f_comment, r.a_comment, r.created_at";

    const VENUE_COLUMNS: &str = "id, name, image_url, capacity, access, seat, category, website";

    fn format_timestamp(naive: &NaiveDateTime) -> String {
        naive.format(TIMESTAMP_FORMAT).to_string()
    }

    fn conversion_error(idx: usize, err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> rusqlite::Error {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, err.into())
    }

    fn review_from_row(row: &Row<'_>) -> rusqlite::Result<Review> {
        let created_at: String = row.get(13)?;
        let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_PARSE_FORMAT)
            .map_err(|e| conversion_error(13, e))?;

        Ok(Review {
            id: row.get(0)?,
            venue_id: row.get(1)?,
            user_id: row.get(2)?,
            artist_id: row.get(3)?,
            seat_number: row.get(4)?,
            scores: RatingScores {
                visibility: row.get(5)?,
                sound: row.get(6)?,
                facilities: row.get(7)?,
                access: row.get(8)?,
            },
            comments: ReviewComments {
                visibility: row.get(9)?,
                sound: row.get(10)?,
                facilities: row.get(11)?,
                access: row.get(12)?,
            },
            created_at: Utc.from_utc_datetime(&created_at),
        })
    }

    fn venue_from_row(row: &Row<'_>) -> rusqlite::Result<Venue> {
        let category: String = row.get(6)?;
        let category = category
            .parse::<VenueCategory>()
            .map_err(|e| conversion_error(6, e))?;

        Ok(Venue {
            id: row.get(0)?,
            name: row.get(1)?,
            image_url: row.get(2)?,
            capacity: row.get(3)?,
            access: row.get(4)?,
            seat: row.get(5)?,
            category,
            website: row.get(7)?,
        })
    }

    /// Wraps `term` for a `LIKE ... ESCAPE '\'` substring match.
    fn like_pattern(term: &str) -> String {
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        format!("%{}%", escaped)
    }

    fn find_review(tx: &Transaction<'_>, review_id: &str) -> Result<Review> {
        tx.query_row(
            &format!("SELECT {} FROM reviews r WHERE r.id = ?", REVIEW_COLUMNS),
            [review_id],
            review_from_row,
        )
        .optional()?
        .ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))
    }

    fn ensure_review_exists(conn: &Connection, review_id: &str) -> Result<()> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM reviews WHERE id = ?)",
            [review_id],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(AppError::NotFound(format!("review {}", review_id)))
        }
    }

    /// Picks the artist for a review: the selected id, else an artist matching
    /// the typed name, else a new unofficial artist with that name.
    fn resolve_artist(tx: &Transaction<'_>, input: &ReviewInput) -> Result<Option<String>> {
        let selected = input.artist_id.as_deref().map(str::trim).filter(|id| !id.is_empty());
        if let Some(artist_id) = selected {
            let exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)",
                [artist_id],
                |row| row.get(0),
            )?;
            return if exists {
                Ok(Some(artist_id.to_string()))
            } else {
                Err(AppError::NotFound(format!("artist {}", artist_id)))
            };
        }

        let name = match input.custom_artist.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(None),
        };

        let existing: Option<String> = tx
            .query_row(
                "SELECT id FROM artists WHERE lower(name) = lower(?) LIMIT 1",
                [name],
                |row| row.get(0),
            )
            .optional()?;
        if let Some(id) = existing {
            return Ok(Some(id));
        }

        let id = Uuid::new_v4().to_string();
        tx.execute(
            "INSERT INTO artists (id, name, kana, is_official) VALUES (?, ?, NULL, 0)",
            params![id, name],
        )?;
        log!("[DB] Created unofficial artist '{}' ({})", name, id);
        Ok(Some(id))
    }

    /// Reads a JSON seed file of venues and artists.
    pub fn load_seed_file(path: &Path) -> Result<SeedData> {
        let raw = std::fs::read_to_string(path)?;
        let seed = serde_json::from_str(&raw)?;
        Ok(seed)
    }

    #[derive(Debug, Clone)]
    pub struct Database {
        conn: Arc<Mutex<Connection>>,
    }

    impl Database {
        pub fn new(db_path: &str) -> Result<Self> {
            let conn = Connection::open(db_path)?;
            conn.execute_batch("PRAGMA foreign_keys = ON;")?;
            log!("[DB] Connection established at: {}", db_path);
            Ok(Database {
                conn: Arc::new(Mutex::new(conn)),
            })
        }

        pub async fn create_schema(&self) -> Result<()> {
            let conn = self.conn.lock().await;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS venues (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    image_url TEXT NOT NULL DEFAULT '',
                    capacity INTEGER NOT NULL DEFAULT 0,
                    access TEXT NOT NULL DEFAULT '',
                    seat TEXT NOT NULL DEFAULT '',
                    category TEXT NOT NULL,
                    website TEXT NOT NULL DEFAULT ''
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating venues table: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS artists (
                    id TEXT PRIMARY KEY,
                    name TEXT NOT NULL,
                    kana TEXT,
                    is_official INTEGER NOT NULL DEFAULT 1
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating artists table: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS reviews (
                    id TEXT PRIMARY KEY,
                    venue_id TEXT NOT NULL,
                    user_id TEXT,
                    artist_id TEXT,
                    seat_number TEXT NOT NULL DEFAULT '',
                    visibility INTEGER NOT NULL CHECK (visibility BETWEEN 0 AND 5),
                    sound INTEGER NOT NULL CHECK (sound BETWEEN 0 AND 5),
                    facilities INTEGER NOT NULL CHECK (facilities BETWEEN 0 AND 5),
                    access INTEGER NOT NULL CHECK (access BETWEEN 0 AND 5),
                    v_comment TEXT NOT NULL DEFAULT '',
                    s_comment TEXT NOT NULL DEFAULT '',
                    f_comment TEXT NOT NULL DEFAULT '',
                    a_comment TEXT NOT NULL DEFAULT '',
                    created_at TEXT NOT NULL,
                    FOREIGN KEY (venue_id) REFERENCES venues(id) ON DELETE CASCADE,
                    FOREIGN KEY (artist_id) REFERENCES artists(id) ON DELETE SET NULL
                );
                CREATE INDEX IF NOT EXISTS idx_reviews_venue ON reviews (venue_id, created_at);
                CREATE INDEX IF NOT EXISTS idx_reviews_user ON reviews (user_id, created_at);",
            )
            .map_err(|e| {
                log!("[DB] Failed creating reviews table: {}", e);
                e
            })?;

            conn.execute_batch(
                "CREATE TABLE IF NOT EXISTS likes (
                    user_id TEXT NOT NULL,
                    review_id TEXT NOT NULL,
                    PRIMARY KEY (user_id, review_id),
                    FOREIGN KEY (review_id) REFERENCES reviews(id) ON DELETE CASCADE
                );",
            )
            .map_err(|e| {
                log!("[DB] Failed creating likes table: {}", e);
                e
            })?;
            Ok(())
        }

        /// Upserts reference venues and artists. Existing reviews are kept.
        pub async fn seed(&self, seed: &SeedData) -> Result<()> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            for venue in &seed.venues {
                tx.execute(
                    "INSERT INTO venues (id, name, image_url, capacity, access, seat, category, website)
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        image_url = excluded.image_url,
                        capacity = excluded.capacity,
                        access = excluded.access,
                        seat = excluded.seat,
                        category = excluded.category,
                        website = excluded.website",
                    params![
                        venue.id,
                        venue.name,
                        venue.image_url,
                        venue.capacity,
                        venue.access,
                        venue.seat,
                        venue.category.as_str(),
                        venue.website
                    ],
                )?;
            }

            for artist in &seed.artists {
                tx.execute(
                    "INSERT INTO artists (id, name, kana, is_official)
                    VALUES (?, ?, ?, ?)
                    ON CONFLICT(id) DO UPDATE SET
                        name = excluded.name,
                        kana = excluded.kana,
                        is_official = excluded.is_official",
                    params![artist.id, artist.name, artist.kana, artist.is_official],
                )?;
            }

            tx.commit()?;
            Ok(())
        }

        pub async fn list_venues(&self) -> Result<Vec<Venue>> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!("SELECT {} FROM venues ORDER BY name", VENUE_COLUMNS))?;
            let venues = stmt
                .query_map([], venue_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            log!("[DB] Fetched {} venues", venues.len());
            Ok(venues)
        }

        /// Name search for the header search box; earlier matches rank first.
        pub async fn search_venues(&self, query: &str, limit: u32) -> Result<Vec<Venue>> {
            let query = query.trim();
            if query.is_empty() {
                return Ok(Vec::new());
            }

            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&format!(
                "SELECT {} FROM venues
                WHERE name LIKE ?1 ESCAPE '\\'
                ORDER BY instr(lower(name), lower(?2)), name
                LIMIT ?3",
                VENUE_COLUMNS
            ))?;
            let venues = stmt
                .query_map(params![like_pattern(query), query, limit], venue_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(venues)
        }

        pub async fn get_venue(&self, venue_id: &str) -> Result<Venue> {
            let conn = self.conn.lock().await;
            conn.query_row(
                &format!("SELECT {} FROM venues WHERE id = ?", VENUE_COLUMNS),
                [venue_id],
                venue_from_row,
            )
            .optional()?
            .ok_or_else(|| AppError::NotFound(format!("venue {}", venue_id)))
        }

        pub async fn list_artists(&self) -> Result<Vec<Artist>> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT id, name, kana, is_official FROM artists
                ORDER BY COALESCE(kana, name), name",
            )?;
            let artists = stmt
                .query_map([], |row| {
                    Ok(Artist {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        kana: row.get(2)?,
                        is_official: row.get(3)?,
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(artists)
        }

        pub async fn create_review(
            &self,
            venue_id: &str,
            user_id: Option<&str>,
            input: &ReviewInput,
        ) -> Result<Review> {
            self.create_review_at(venue_id, user_id, input, Utc::now()).await
        }

        pub(crate) async fn create_review_at(
            &self,
            venue_id: &str,
            user_id: Option<&str>,
            input: &ReviewInput,
            created_at: DateTime<Utc>,
        ) -> Result<Review> {
            input.validate()?;
            log!("[DB] Creating review for venue {} (user: {:?})", venue_id, user_id);

            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let venue_exists: bool = tx.query_row(
                "SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)",
                [venue_id],
                |row| row.get(0),
            )?;
            if !venue_exists {
                return Err(AppError::NotFound(format!("venue {}", venue_id)));
            }

            // Stored at microsecond precision; return what a later read returns.
            let created_at_text = format_timestamp(&created_at.naive_utc());
            let created_at = NaiveDateTime::parse_from_str(&created_at_text, TIMESTAMP_PARSE_FORMAT)
                .map(|naive| Utc.from_utc_datetime(&naive))
                .unwrap_or(created_at);

            let artist_id = resolve_artist(&tx, input)?;
            let review = Review {
                id: Uuid::new_v4().to_string(),
                venue_id: venue_id.to_string(),
                user_id: user_id.map(str::to_string),
                artist_id,
                seat_number: input.seat_number.trim().to_string(),
                scores: input.scores,
                comments: input.comments.clone(),
                created_at,
            };

            tx.execute(
                "INSERT INTO reviews (id, venue_id, user_id, artist_id, seat_number,
                    visibility, sound, facilities, access,
                    v_comment, s_comment, f_comment, a_comment, created_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                params![
                    review.id,
                    review.venue_id,
                    review.user_id,
                    review.artist_id,
                    review.seat_number,
                    review.scores.visibility,
                    review.scores.sound,
                    review.scores.facilities,
                    review.scores.access,
                    review.comments.visibility,
                    review.comments.sound,
                    review.comments.facilities,
                    review.comments.access,
                    created_at_text,
                ],
            )?;
            tx.commit()?;

            log!("[DB] Review {} created", review.id);
            Ok(review)
        }

        pub async fn get_review(&self, review_id: &str) -> Result<Review> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;
            let review = find_review(&tx, review_id)?;
            tx.commit()?;
            Ok(review)
        }

        pub async fn get_review_detail(&self, review_id: &str) -> Result<ReviewDetail> {
            let conn = self.conn.lock().await;
            conn.query_row(
                &format!(
                    "SELECT {}, v.name, a.name
                    FROM reviews r
                    JOIN venues v ON v.id = r.venue_id
                    LEFT JOIN artists a ON a.id = r.artist_id
                    WHERE r.id = ?",
                    REVIEW_COLUMNS
                ),
                [review_id],
                |row| {
                    Ok(ReviewDetail {
                        review: review_from_row(row)?,
                        venue_name: row.get(14)?,
                        artist_name: row.get(15)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| AppError::NotFound(format!("review {}", review_id)))
        }

        /// Reviews of one venue matching `filters`, newest first.
        pub async fn fetch_reviews(&self, venue_id: &str, filters: &ReviewFilters) -> Result<Vec<Review>> {
            let range = filters.date_range()?;

            let mut sql = format!("SELECT {} FROM reviews r WHERE r.venue_id = ?1", REVIEW_COLUMNS);
            let mut args: Vec<String> = vec![venue_id.to_string()];
            let bind = |args: &mut Vec<String>, value: String| {
                args.push(value);
                format!("?{}", args.len())
            };

            if let Some(artist_id) = filters.artist_id() {
                let p = bind(&mut args, artist_id.to_string());
                sql.push_str(&format!(" AND r.artist_id = {}", p));
            }
            if let Some(seat) = filters.seat() {
                let p = bind(&mut args, like_pattern(seat));
                sql.push_str(&format!(" AND r.seat_number LIKE {} ESCAPE '\\'", p));
            }
            if let Some(keyword) = filters.keyword() {
                let p = bind(&mut args, like_pattern(keyword));
                let clauses = ["r.v_comment", "r.s_comment", "r.f_comment", "r.a_comment"]
                    .iter()
                    .map(|column| format!("{} LIKE {} ESCAPE '\\'", column, p))
                    .collect::<Vec<_>>()
                    .join(" OR ");
                sql.push_str(&format!(" AND ({})", clauses));
            }
            if let Some(start) = range.start {
                let p = bind(&mut args, format_timestamp(&start));
                sql.push_str(&format!(" AND r.created_at >= {}", p));
            }
            if let Some(end) = range.end {
                let p = bind(&mut args, format_timestamp(&end));
                sql.push_str(&format!(" AND r.created_at < {}", p));
            }
            sql.push_str(" ORDER BY r.created_at DESC, r.rowid DESC");

            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(&sql)?;
            let reviews = stmt
                .query_map(rusqlite::params_from_iter(args.iter()), review_from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            log!("[DB] Fetched {} reviews for venue {}", reviews.len(), venue_id);
            Ok(reviews)
        }

        pub async fn update_review(
            &self,
            review_id: &str,
            user_id: Option<&str>,
            input: &ReviewInput,
        ) -> Result<Review> {
            input.validate()?;

            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let current = find_review(&tx, review_id)?;
            if !current.is_authored_by(user_id) {
                log!("[DB] Rejected edit of review {} by {:?}", review_id, user_id);
                return Err(AppError::Forbidden);
            }

            let artist_id = resolve_artist(&tx, input)?;
            tx.execute(
                "UPDATE reviews SET
                    artist_id = ?, seat_number = ?,
                    visibility = ?, sound = ?, facilities = ?, access = ?,
                    v_comment = ?, s_comment = ?, f_comment = ?, a_comment = ?
                WHERE id = ?",
                params![
                    artist_id,
                    input.seat_number.trim(),
                    input.scores.visibility,
                    input.scores.sound,
                    input.scores.facilities,
                    input.scores.access,
                    input.comments.visibility,
                    input.comments.sound,
                    input.comments.facilities,
                    input.comments.access,
                    review_id,
                ],
            )?;

            let updated = find_review(&tx, review_id)?;
            tx.commit()?;
            log!("[DB] Review {} updated", review_id);
            Ok(updated)
        }

        pub async fn delete_review(&self, review_id: &str, user_id: Option<&str>) -> Result<()> {
            let mut conn = self.conn.lock().await;
            let tx = conn.transaction()?;

            let current = find_review(&tx, review_id)?;
            if !current.is_authored_by(user_id) {
                log!("[DB] Rejected delete of review {} by {:?}", review_id, user_id);
                return Err(AppError::Forbidden);
            }

            tx.execute("DELETE FROM reviews WHERE id = ?", [review_id])?;
            tx.commit()?;
            log!("[DB] Review deleted: {}", review_id);
            Ok(())
        }

        pub async fn like_status(&self, review_id: &str, user_id: Option<&str>) -> Result<LikeStatus> {
            let conn = self.conn.lock().await;
            ensure_review_exists(&conn, review_id)?;
            let count: u32 = conn.query_row(
                "SELECT COUNT(*) FROM likes WHERE review_id = ?",
                [review_id],
                |row| row.get(0),
            )?;
            let liked = match user_id {
                Some(user_id) => conn.query_row(
                    "SELECT EXISTS(SELECT 1 FROM likes WHERE review_id = ? AND user_id = ?)",
                    [review_id, user_id],
                    |row| row.get(0),
                )?,
                None => false,
            };
            Ok(LikeStatus { count, liked })
        }

        /// Likes the review for `user_id`, or removes the like if already there.
        pub async fn toggle_like(&self, review_id: &str, user_id: &str) -> Result<LikeStatus> {
            {
                let mut conn = self.conn.lock().await;
                ensure_review_exists(&conn, review_id)?;
                let tx = conn.transaction()?;
                let removed = tx.execute(
                    "DELETE FROM likes WHERE review_id = ? AND user_id = ?",
                    [review_id, user_id],
                )?;
                if removed == 0 {
                    tx.execute(
                        "INSERT INTO likes (user_id, review_id) VALUES (?, ?)",
                        [user_id, review_id],
                    )?;
                }
                tx.commit()?;
                log!(
                    "[DB] {} {} review {}",
                    user_id,
                    if removed == 0 { "liked" } else { "unliked" },
                    review_id
                );
            }
            self.like_status(review_id, Some(user_id)).await
        }

        pub async fn reviews_by_user(&self, user_id: &str) -> Result<Vec<ReviewSummary>> {
            let conn = self.conn.lock().await;
            let mut stmt = conn.prepare(
                "SELECT r.id, r.venue_id, v.name, r.seat_number, r.created_at
                FROM reviews r
                JOIN venues v ON v.id = r.venue_id
                WHERE r.user_id = ?
                ORDER BY r.created_at DESC, r.rowid DESC",
            )?;
            let summaries = stmt
                .query_map([user_id], |row| {
                    let created_at: String = row.get(4)?;
                    let created_at = NaiveDateTime::parse_from_str(&created_at, TIMESTAMP_PARSE_FORMAT)
                        .map_err(|e| conversion_error(4, e))?;
                    Ok(ReviewSummary {
                        id: row.get(0)?,
                        venue_id: row.get(1)?,
                        venue_name: row.get(2)?,
                        seat_number: row.get(3)?,
                        created_at: Utc.from_utc_datetime(&created_at),
                    })
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(summaries)
        }
    }
}

#[cfg(feature = "ssr")]
pub use db_impl::{load_seed_file, Database};
