// sparkify-core/src/domain/records.rs

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// `page` value of an event emitted when a track was played.
pub const SONG_PLAY_PAGE: &str = "NextSong";

/// One line of the activity log.
///
/// Every field is optional: logged-out events carry no user, navigation
/// events carry no track. `userId` and `sessionId` are accepted as numbers or
/// numeric strings, and an empty string is read as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventRecord {
    pub artist: Option<String>,
    pub auth: Option<String>,
    pub first_name: Option<String>,
    pub gender: Option<String>,
    pub item_in_session: Option<i64>,
    pub last_name: Option<String>,
    pub length: Option<f64>,
    pub level: Option<String>,
    pub location: Option<String>,
    pub method: Option<String>,
    pub page: Option<String>,
    pub registration: Option<f64>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub session_id: Option<i64>,
    pub song: Option<String>,
    pub status: Option<i64>,
    pub ts: Option<i64>,
    pub user_agent: Option<String>,
    #[serde(default, deserialize_with = "lenient_integer")]
    pub user_id: Option<i64>,
}

impl EventRecord {
    pub fn is_song_play(&self) -> bool {
        self.page.as_deref() == Some(SONG_PLAY_PAGE)
    }

    /// Join key against [`CatalogEntry::key`]. `None` when artist or song is missing.
    pub fn key(&self) -> Option<CatalogKey<'_>> {
        Some(CatalogKey {
            artist_name: self.artist.as_deref()?,
            title: self.song.as_deref()?,
        })
    }
}

/// One song metadata document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub num_songs: Option<i64>,
    pub artist_id: Option<String>,
    pub artist_latitude: Option<f64>,
    pub artist_longitude: Option<f64>,
    pub artist_location: Option<String>,
    pub artist_name: Option<String>,
    pub song_id: Option<String>,
    pub title: Option<String>,
    pub duration: Option<f64>,
    pub year: Option<i64>,
}

impl CatalogEntry {
    pub fn key(&self) -> Option<CatalogKey<'_>> {
        Some(CatalogKey {
            artist_name: self.artist_name.as_deref()?,
            title: self.title.as_deref()?,
        })
    }
}

/// Natural key shared by events `(artist, song)` and catalog entries `(artist_name, title)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CatalogKey<'a> {
    pub artist_name: &'a str,
    pub title: &'a str,
}

/// A song-play event with its catalog match, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinedPlay {
    pub event: EventRecord,
    pub song: Option<CatalogEntry>,
}

impl JoinedPlay {
    pub fn song_id(&self) -> Option<&str> {
        self.song.as_ref().and_then(|s| s.song_id.as_deref())
    }

    pub fn artist_id(&self) -> Option<&str> {
        self.song.as_ref().and_then(|s| s.artist_id.as_deref())
    }
}

fn lenient_integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Float(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(v)) => Ok(Some(v)),
        // i64::MAX as f64 rounds up to 2^63, hence the strict bound
        Some(Raw::Float(v))
            if v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 =>
        {
            Ok(Some(v as i64))
        }
        Some(Raw::Float(v)) => Err(de::Error::custom(format!(
            "expected an integer identifier, found {v}"
        ))),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<i64>()
                .map(Some)
                .map_err(|_| de::Error::custom(format!("expected an integer identifier, found '{s}'")))
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use anyhow::Result;

    #[test]
    fn test_event_deserialization() -> Result<()> {
        let line = r#"{"artist":"Des'ree","auth":"Logged In","firstName":"Kaylee","gender":"F","itemInSession":1,"lastName":"Summers","length":246.30812,"level":"free","location":"Phoenix-Mesa-Scottsdale, AZ","method":"PUT","page":"NextSong","registration":1540344794796.0,"sessionId":139,"song":"You Gotta Be","status":200,"ts":1541106106796,"userAgent":"Mozilla/5.0","userId":"8"}"#;

        let event: EventRecord = serde_json::from_str(line)?;

        assert!(event.is_song_play());
        assert_eq!(event.user_id, Some(8));
        assert_eq!(event.session_id, Some(139));
        assert_eq!(event.ts, Some(1_541_106_106_796));
        assert_eq!(event.first_name.as_deref(), Some("Kaylee"));
        let key = event.key().expect("key");
        assert_eq!(key.artist_name, "Des'ree");
        assert_eq!(key.title, "You Gotta Be");
        Ok(())
    }

    #[test]
    fn test_logged_out_event_has_no_user() -> Result<()> {
        let line = r#"{"artist":null,"auth":"Logged Out","firstName":null,"gender":null,"itemInSession":0,"lastName":null,"length":null,"level":"free","location":null,"method":"PUT","page":"Login","registration":null,"sessionId":52,"song":null,"status":307,"ts":1541207073796,"userAgent":null,"userId":""}"#;

        let event: EventRecord = serde_json::from_str(line)?;

        assert!(!event.is_song_play());
        assert_eq!(event.user_id, None);
        assert!(event.key().is_none());
        Ok(())
    }

    #[test]
    fn test_missing_fields_default_to_none() -> Result<()> {
        let event: EventRecord = serde_json::from_str(r#"{"page":"Home"}"#)?;
        assert_eq!(event.user_id, None);
        assert_eq!(event.session_id, None);
        assert_eq!(event.ts, None);
        Ok(())
    }

    #[test]
    fn test_non_numeric_user_id_is_rejected() {
        let result = serde_json::from_str::<EventRecord>(r#"{"page":"NextSong","userId":"abc"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_integral_float_ids() -> Result<()> {
        let event: EventRecord = serde_json::from_str(r#"{"userId":26.0,"sessionId":583}"#)?;
        assert_eq!(event.user_id, Some(26));
        assert_eq!(event.session_id, Some(583));

        for raw in ["1e20", "-1e20", "9223372036854775808", "26.5"] {
            let line = format!(r#"{{"page":"NextSong","userId":{raw}}}"#);
            assert!(
                serde_json::from_str::<EventRecord>(&line).is_err(),
                "userId {raw} should be rejected"
            );
        }
        Ok(())
    }

    #[test]
    fn test_catalog_entry_deserialization() -> Result<()> {
        let line = r#"{"num_songs": 1, "artist_id": "ARD7TVE1187B99BFB1", "artist_latitude": null, "artist_longitude": null, "artist_location": "California - LA", "artist_name": "Casual", "song_id": "SOMZWCG12A8C13C480", "title": "I Didn't Mean To", "duration": 218.93179, "year": 0}"#;

        let entry: CatalogEntry = serde_json::from_str(line)?;

        assert_eq!(entry.song_id.as_deref(), Some("SOMZWCG12A8C13C480"));
        assert_eq!(entry.artist_latitude, None);
        assert_eq!(entry.year, Some(0));
        let key = entry.key().expect("key");
        assert_eq!(key.artist_name, "Casual");
        assert_eq!(key.title, "I Didn't Mean To");
        Ok(())
    }
}
