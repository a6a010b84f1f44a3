// sparkify-core/src/application/transformer.rs

use std::collections::HashSet;
use std::hash::Hash;
use tracing::{debug, instrument};

use crate::domain::calendar::CalendarFields;
use crate::domain::identity::IdGenerator;
use crate::domain::records::{CatalogEntry, JoinedPlay};
use crate::domain::star::{ArtistDim, SongDim, SongPlay, StarSchema, TimeDim, UserDim};

/// Builds the fact and dimension row-sets. Pure: no I/O, one pass per table.
pub struct Transformer;

impl Transformer {
    #[instrument(skip_all, fields(plays = plays.len(), catalog = catalog.len()))]
    pub fn transform<G: IdGenerator + ?Sized>(
        plays: &[JoinedPlay],
        catalog: &[CatalogEntry],
        ids: &mut G,
    ) -> StarSchema {
        let songplays = songplays(plays, ids);
        let time = time_rows(&songplays);
        let schema = StarSchema {
            users: users(plays, ids),
            songs: songs(catalog),
            artists: artists(catalog),
            songplays,
            time,
        };

        debug!(
            songplays = schema.songplays.len(),
            users = schema.users.len(),
            songs = schema.songs.len(),
            artists = schema.artists.len(),
            "Star schema built"
        );
        schema
    }
}

pub fn songplays<G: IdGenerator + ?Sized>(plays: &[JoinedPlay], ids: &mut G) -> Vec<SongPlay> {
    plays
        .iter()
        .map(|play| {
            let e = &play.event;
            SongPlay {
                songplay_id: ids.next_id(),
                start_time: e.ts,
                length_played: e.length,
                user_id: e.user_id,
                level: e.level.clone(),
                song_id: play.song_id().map(str::to_string),
                artist_id: play.artist_id().map(str::to_string),
                session_id: e.session_id,
                location: e.location.clone(),
                user_agent: e.user_agent.clone(),
            }
        })
        .collect()
}

/// Distinct user tuples in first-seen order, each with a fresh key.
pub fn users<G: IdGenerator + ?Sized>(plays: &[JoinedPlay], ids: &mut G) -> Vec<UserDim> {
    let tuples = plays.iter().map(|p| {
        let e = &p.event;
        (
            e.user_id,
            e.first_name.clone(),
            e.last_name.clone(),
            e.gender.clone(),
            e.level.clone(),
        )
    });

    distinct_by(tuples, Clone::clone)
        .into_iter()
        .map(|(user_id, first_name, last_name, gender, level)| UserDim {
            user_unique_id: ids.next_id(),
            user_id,
            first_name,
            last_name,
            gender,
            level,
        })
        .collect()
}

pub fn songs(catalog: &[CatalogEntry]) -> Vec<SongDim> {
    let rows = catalog.iter().map(|c| SongDim {
        song_id: c.song_id.clone(),
        title: c.title.clone(),
        artist_id: c.artist_id.clone(),
        year: c.year,
        duration: c.duration,
    });
    distinct_by(rows, |s| {
        (
            s.song_id.clone(),
            s.title.clone(),
            s.artist_id.clone(),
            s.year,
            float_key(s.duration),
        )
    })
}

pub fn artists(catalog: &[CatalogEntry]) -> Vec<ArtistDim> {
    let rows = catalog.iter().map(|c| ArtistDim {
        artist_id: c.artist_id.clone(),
        name: c.artist_name.clone(),
        location: c.artist_location.clone(),
        latitude: c.artist_latitude,
        longitude: c.artist_longitude,
    });
    distinct_by(rows, |a| {
        (
            a.artist_id.clone(),
            a.name.clone(),
            a.location.clone(),
            float_key(a.latitude),
            float_key(a.longitude),
        )
    })
}

/// One calendar row per fact row, sharing its key.
pub fn time_rows(songplays: &[SongPlay]) -> Vec<TimeDim> {
    songplays
        .iter()
        .map(|sp| TimeDim {
            songplay_id: sp.songplay_id.clone(),
            start_time: sp.start_time,
            calendar: sp.start_time.and_then(CalendarFields::from_epoch_millis),
        })
        .collect()
}

fn float_key(value: Option<f64>) -> Option<u64> {
    value.map(f64::to_bits)
}

/// Keeps the first occurrence of every key, preserving input order.
fn distinct_by<T, K, F>(rows: impl IntoIterator<Item = T>, key: F) -> Vec<T>
where
    K: Eq + Hash,
    F: Fn(&T) -> K,
{
    let mut seen = HashSet::new();
    rows.into_iter().filter(|row| seen.insert(key(row))).collect()
}
