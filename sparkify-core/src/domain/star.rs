// sparkify-core/src/domain/star.rs

use serde::Serialize;

use crate::domain::calendar::CalendarFields;
use crate::domain::schema::{ARTISTS, Cell, RowSet, SONGPLAYS, SONGS, StarRow, TIME, TableDef, USERS};

/// Fact row: one song play.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongPlay {
    pub songplay_id: String,
    pub start_time: Option<i64>,
    pub length_played: Option<f64>,
    pub user_id: Option<i64>,
    pub level: Option<String>,
    pub song_id: Option<String>,
    pub artist_id: Option<String>,
    pub session_id: Option<i64>,
    pub location: Option<String>,
    pub user_agent: Option<String>,
}

impl StarRow for SongPlay {
    const TABLE: &'static TableDef = &SONGPLAYS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.songplay_id.as_str()),
            Cell::from(self.start_time),
            Cell::from(self.length_played),
            Cell::from(self.user_id),
            Cell::from(self.level.as_deref()),
            Cell::from(self.song_id.as_deref()),
            Cell::from(self.artist_id.as_deref()),
            Cell::from(self.session_id),
            Cell::from(self.location.as_deref()),
            Cell::from(self.user_agent.as_deref()),
        ]
    }
}

/// One distinct `(user_id, first_name, last_name, gender, level)` combination.
/// A user whose level changed appears once per level.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDim {
    pub user_unique_id: String,
    pub user_id: Option<i64>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub gender: Option<String>,
    pub level: Option<String>,
}

impl StarRow for UserDim {
    const TABLE: &'static TableDef = &USERS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.user_unique_id.as_str()),
            Cell::from(self.user_id),
            Cell::from(self.first_name.as_deref()),
            Cell::from(self.last_name.as_deref()),
            Cell::from(self.gender.as_deref()),
            Cell::from(self.level.as_deref()),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SongDim {
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub artist_id: Option<String>,
    pub year: Option<i64>,
    pub duration: Option<f64>,
}

impl StarRow for SongDim {
    const TABLE: &'static TableDef = &SONGS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.song_id.as_deref()),
            Cell::from(self.title.as_deref()),
            Cell::from(self.artist_id.as_deref()),
            Cell::from(self.year),
            Cell::from(self.duration),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDim {
    pub artist_id: Option<String>,
    pub name: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl StarRow for ArtistDim {
    const TABLE: &'static TableDef = &ARTISTS;

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.artist_id.as_deref()),
            Cell::from(self.name.as_deref()),
            Cell::from(self.location.as_deref()),
            Cell::from(self.latitude),
            Cell::from(self.longitude),
        ]
    }
}

/// Calendar breakdown of a play, keyed by its `songplay_id`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeDim {
    pub songplay_id: String,
    pub start_time: Option<i64>,
    pub calendar: Option<CalendarFields>,
}

impl StarRow for TimeDim {
    const TABLE: &'static TableDef = &TIME;

    fn cells(&self) -> Vec<Cell> {
        let c = self.calendar.as_ref();
        vec![
            Cell::from(self.songplay_id.as_str()),
            Cell::from(self.start_time),
            Cell::from(c.map(|f| f.hour)),
            Cell::from(c.map(|f| f.day)),
            Cell::from(c.map(|f| f.week)),
            Cell::from(c.map(|f| f.month)),
            Cell::from(c.map(|f| f.year)),
            Cell::from(c.map(|f| f.weekday)),
        ]
    }
}

/// The five row-sets produced by one transformation pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StarSchema {
    pub songplays: Vec<SongPlay>,
    pub users: Vec<UserDim>,
    pub songs: Vec<SongDim>,
    pub artists: Vec<ArtistDim>,
    pub time: Vec<TimeDim>,
}

impl StarSchema {
    /// Generic payloads in load order.
    pub fn row_sets(&self) -> Vec<RowSet> {
        vec![
            RowSet::from_rows(&self.songplays),
            RowSet::from_rows(&self.users),
            RowSet::from_rows(&self.songs),
            RowSet::from_rows(&self.artists),
            RowSet::from_rows(&self.time),
        ]
    }
}
