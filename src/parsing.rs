//! JSON decoding for ABC radio search responses.
//!
//! Every record type gets a pure `from_json` constructor that works on an already
//! parsed [`serde_json::Value`]. The upstream payloads are inconsistent: release
//! information can sit in two different places, link and artwork arrays are often
//! empty, and most artist flags are null. Each of those fallbacks is an explicit
//! check here. Anything that does not fit one of the documented fallbacks surfaces
//! as a [`DecodeError`] naming the record type and field.

use crate::error::DecodeError;
use crate::{Album, Artist, Artwork, ArtworkSize, RadioSong, Result, SearchResult, Song};
use chrono::{DateTime, FixedOffset};
use serde_json::{Map, Value};

/// Result of decoding a single record.
pub type DecodeResult<T> = std::result::Result<T, DecodeError>;

/// Parse a raw response body into a [`SearchResult`].
pub fn parse_search_response(body: &str) -> Result<SearchResult> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| DecodeError::InvalidJson(e.to_string()))?;
    Ok(SearchResult::from_json(&value)?)
}

/// Field accessor over one JSON object, tagged with the record type being decoded
/// so errors can name it.
#[derive(Debug, Clone, Copy)]
struct JsonObject<'a> {
    entity: &'static str,
    fields: &'a Map<String, Value>,
}

impl<'a> JsonObject<'a> {
    fn new(entity: &'static str, value: &'a Value) -> DecodeResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { entity, fields }),
            _ => Err(DecodeError::NotAnObject { entity }),
        }
    }

    /// The field's value, treating JSON `null` like a missing key.
    fn get(&self, field: &'static str) -> Option<&'a Value> {
        self.fields.get(field).filter(|value| !value.is_null())
    }

    fn required(&self, field: &'static str) -> DecodeResult<&'a Value> {
        self.get(field).ok_or(DecodeError::MissingField {
            entity: self.entity,
            field,
        })
    }

    fn invalid(&self, field: &'static str, reason: impl Into<String>) -> DecodeError {
        DecodeError::InvalidField {
            entity: self.entity,
            field,
            reason: reason.into(),
        }
    }

    fn required_str(&self, field: &'static str) -> DecodeResult<&'a str> {
        self.required(field)?
            .as_str()
            .ok_or_else(|| self.invalid(field, "expected a string"))
    }

    fn required_u32(&self, field: &'static str) -> DecodeResult<u32> {
        let number = self
            .required(field)?
            .as_u64()
            .ok_or_else(|| self.invalid(field, "expected a non-negative integer"))?;
        u32::try_from(number).map_err(|_| self.invalid(field, format!("{number} is out of range")))
    }

    fn required_array(&self, field: &'static str) -> DecodeResult<&'a Vec<Value>> {
        self.required(field)?
            .as_array()
            .ok_or_else(|| self.invalid(field, "expected an array"))
    }

    fn required_object(&self, field: &'static str, entity: &'static str) -> DecodeResult<Self> {
        let value = self.required(field)?;
        Self::new(entity, value).map_err(|_| self.invalid(field, "expected an object"))
    }

    fn optional_bool(&self, field: &'static str) -> DecodeResult<Option<bool>> {
        self.get(field)
            .map(|value| {
                value
                    .as_bool()
                    .ok_or_else(|| self.invalid(field, "expected a boolean"))
            })
            .transpose()
    }

    /// An array field where missing and null both mean "no elements".
    fn optional_array(&self, field: &'static str) -> DecodeResult<&'a [Value]> {
        match self.get(field) {
            None => Ok(&[]),
            Some(value) => value
                .as_array()
                .map(Vec::as_slice)
                .ok_or_else(|| self.invalid(field, "expected an array")),
        }
    }

    /// First element of an array field, if the array exists and is non-empty.
    fn first_of(&self, field: &'static str) -> DecodeResult<Option<&'a Value>> {
        Ok(self.optional_array(field)?.first())
    }

    /// URL of the first entry of the `links` array, if any.
    fn first_link_url(&self) -> DecodeResult<Option<String>> {
        match self.first_of("links")? {
            Some(link) => {
                let link = JsonObject::new("Link", link)?;
                Ok(Some(link.required_str("url")?.to_string()))
            }
            None => Ok(None),
        }
    }
}

impl ArtworkSize {
    /// Decode one entry of an artwork's `sizes` array.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("ArtworkSize", value)?;
        Ok(Self {
            url: json.required_str("url")?.to_string(),
            width: json.required_u32("width")?,
            height: json.required_u32("height")?,
            aspect_ratio: json.required_str("aspect_ratio")?.to_string(),
        })
    }
}

impl Artwork {
    /// Decode one entry of a release's `artwork` array.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("Artwork", value)?;
        let sizes = json
            .optional_array("sizes")?
            .iter()
            .map(ArtworkSize::from_json)
            .collect::<DecodeResult<Vec<_>>>()?;

        Ok(Self {
            url: json.required_str("url")?.to_string(),
            artwork_type: json.required_str("type")?.to_string(),
            sizes,
        })
    }
}

impl Album {
    /// Decode a release object.
    ///
    /// The artwork is the first element of the `artwork` array, and the url is the
    /// first element of `links`; either is `None` when its array is empty.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("Album", value)?;
        let artwork = json.first_of("artwork")?.map(Artwork::from_json).transpose()?;

        Ok(Self {
            url: json.first_link_url()?,
            title: json.required_str("title")?.to_string(),
            artwork,
            release_year: release_year(&json)?,
        })
    }
}

/// Null, zero and empty values all mean "unknown year".
fn release_year(json: &JsonObject<'_>) -> DecodeResult<Option<i32>> {
    const FIELD: &str = "release_year";
    let year = match json.get(FIELD) {
        None => return Ok(None),
        Some(Value::Number(number)) => number
            .as_i64()
            .ok_or_else(|| json.invalid(FIELD, format!("{number} is not an integer")))?,
        Some(Value::String(text)) if text.trim().is_empty() => return Ok(None),
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map_err(|_| json.invalid(FIELD, format!("'{text}' is not a year")))?,
        Some(Value::Bool(false)) => return Ok(None),
        Some(other) => return Err(json.invalid(FIELD, format!("unexpected value {other}"))),
    };

    if year == 0 {
        return Ok(None);
    }
    i32::try_from(year)
        .map(Some)
        .map_err(|_| json.invalid(FIELD, format!("{year} is out of range")))
}

impl Artist {
    /// Decode one entry of a release's `artists` array.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("Artist", value)?;
        Ok(Self {
            url: json.first_link_url()?,
            name: json.required_str("name")?.to_string(),
            is_australian: json.optional_bool("is_australian")?,
        })
    }
}

impl Song {
    /// Decode a song from a whole play object.
    ///
    /// The play object carries both the `recording` (title, duration, links) and the
    /// release the song was played from. Release lookup order:
    ///
    /// 1. the play's `release`, if it is a non-empty object;
    /// 2. the first element of `recording.releases`;
    /// 3. otherwise no album and no artists.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let play = JsonObject::new("RadioSong", value)?;
        let recording = play.required_object("recording", "Song")?;

        let (album, artists) = match release_payload(&play, &recording)? {
            Some(release) => {
                let album = Album::from_json(release)?;
                let artists = JsonObject::new("Album", release)?
                    .optional_array("artists")?
                    .iter()
                    .map(Artist::from_json)
                    .collect::<DecodeResult<Vec<_>>>()?;
                (Some(album), artists)
            }
            None => {
                log::trace!("Play has no release information, leaving album empty");
                (None, Vec::new())
            }
        };

        Ok(Self {
            title: recording.required_str("title")?.to_string(),
            duration: recording.required_u32("duration")?,
            artists,
            album,
            url: recording.first_link_url()?,
        })
    }
}

/// Locate the release object for a play, following the documented fallbacks.
fn release_payload<'a>(
    play: &JsonObject<'a>,
    recording: &JsonObject<'a>,
) -> DecodeResult<Option<&'a Value>> {
    match play.get("release") {
        Some(release @ Value::Object(fields)) if !fields.is_empty() => return Ok(Some(release)),
        Some(Value::Object(_)) | None => {}
        Some(_) => return Err(play.invalid("release", "expected an object")),
    }

    match recording.first_of("releases")? {
        Some(release @ Value::Object(_)) => Ok(Some(release)),
        Some(_) => Err(recording.invalid("releases", "expected an array of objects")),
        None => Ok(None),
    }
}

impl RadioSong {
    /// Decode one element of a search response's `items` array.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("RadioSong", value)?;
        let played_time = parse_played_time(json.required_str("played_time")?)
            .map_err(|reason| json.invalid("played_time", reason))?;

        Ok(Self {
            played_time,
            channel: json.required_str("service_id")?.to_string(),
            song: Song::from_json(value)?,
        })
    }
}

/// Parse an ISO-8601 timestamp that carries a UTC offset.
fn parse_played_time(text: &str) -> std::result::Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f%:z"))
        .map_err(|e| format!("'{text}' is not an ISO-8601 timestamp with offset: {e}"))
}

impl SearchResult {
    /// Build the record hierarchy for one search response.
    pub fn from_json(value: &Value) -> DecodeResult<Self> {
        let json = JsonObject::new("SearchResult", value)?;
        let radio_songs = json
            .required_array("items")?
            .iter()
            .map(RadioSong::from_json)
            .collect::<DecodeResult<Vec<_>>>()?;

        let result = Self {
            total: json.required_u32("total")?,
            offset: json.required_u32("offset")?,
            limit: json.required_u32("limit")?,
            radio_songs,
        };
        log::trace!(
            "Decoded page offset={} limit={} total={} with {} plays",
            result.offset,
            result.limit,
            result.total,
            result.radio_songs.len()
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn play(release: Value, releases: Value) -> Value {
        json!({
            "entity": "Play",
            "arid": "play-1",
            "played_time": "2024-01-01T00:00:35+00:00",
            "service_id": "triplej",
            "recording": {
                "title": "Sunsets",
                "duration": 201,
                "links": [],
                "releases": releases
            },
            "release": release
        })
    }

    fn release(title: &str) -> Value {
        json!({
            "title": title,
            "release_year": "2023",
            "links": [{"url": "https://musicbrainz.org/release/1"}],
            "artwork": [],
            "artists": [{"name": "Artist", "is_australian": null, "links": []}]
        })
    }

    #[test]
    fn test_release_preferred_over_recording_releases() {
        let song = Song::from_json(&play(release("Direct"), json!([release("Nested")]))).unwrap();
        let album = song.album.unwrap();
        assert_eq!(album.title, "Direct");
        assert_eq!(album.release_year, Some(2023));
        assert_eq!(album.url.as_deref(), Some("https://musicbrainz.org/release/1"));
        assert_eq!(album.artwork, None);
        assert_eq!(song.artists.len(), 1);
    }

    #[test]
    fn test_falls_back_to_first_recording_release() {
        let song = Song::from_json(&play(Value::Null, json!([release("Nested"), release("Other")])))
            .unwrap();
        assert_eq!(song.album.unwrap().title, "Nested");
        assert_eq!(song.artists[0].name, "Artist");
    }

    #[test]
    fn test_empty_release_object_falls_back() {
        let song = Song::from_json(&play(json!({}), json!([release("Nested")]))).unwrap();
        assert_eq!(song.album.unwrap().title, "Nested");
    }

    #[test]
    fn test_no_release_anywhere_is_not_an_error() {
        let song = Song::from_json(&play(Value::Null, json!([]))).unwrap();
        assert_eq!(song.album, None);
        assert!(song.artists.is_empty());

        let mut missing = play(Value::Null, Value::Null);
        missing["recording"]
            .as_object_mut()
            .unwrap()
            .remove("releases");
        let song = Song::from_json(&missing).unwrap();
        assert_eq!(song.album, None);
        assert!(song.artists.is_empty());
        assert_eq!(song.title, "Sunsets");
        assert_eq!(song.url, None);
    }

    #[test]
    fn test_missing_release_key_and_null_releases() {
        // No `release` key at all, recording releases present
        let mut no_key = play(Value::Null, json!([release("Nested")]));
        no_key.as_object_mut().unwrap().remove("release");
        let song = Song::from_json(&no_key).unwrap();
        assert_eq!(song.album.unwrap().title, "Nested");
        assert_eq!(song.artists[0].name, "Artist");

        // `recording.releases` explicitly null
        let song = Song::from_json(&play(Value::Null, Value::Null)).unwrap();
        assert_eq!(song.album, None);
        assert!(song.artists.is_empty());

        // Neither source present
        no_key["recording"]["releases"] = Value::Null;
        let song = Song::from_json(&no_key).unwrap();
        assert_eq!(song.album, None);
    }

    #[test]
    fn test_unexpected_release_shape_is_reported() {
        let err = Song::from_json(&play(json!("not-an-object"), json!([]))).unwrap_err();
        assert_eq!(err.entity(), Some("RadioSong"));
        assert_eq!(err.field(), Some("release"));

        let err = Song::from_json(&play(Value::Null, json!(["nope"]))).unwrap_err();
        assert_eq!(err.entity(), Some("Song"));
        assert_eq!(err.field(), Some("releases"));
    }

    #[test]
    fn test_release_year_empty_values() {
        for empty in [Value::Null, json!(0), json!(""), json!("0"), json!(false)] {
            let mut value = release("Album");
            value["release_year"] = empty.clone();
            let album = Album::from_json(&value).unwrap();
            assert_eq!(album.release_year, None, "value {empty} should be absent");
        }

        let mut value = release("Album");
        value["release_year"] = json!(1999);
        assert_eq!(Album::from_json(&value).unwrap().release_year, Some(1999));

        value["release_year"] = json!("nineteen");
        let err = Album::from_json(&value).unwrap_err();
        assert_eq!(err.field(), Some("release_year"));
    }

    #[test]
    fn test_is_australian_is_tri_state() {
        let cases = [
            (Value::Null, None),
            (json!(true), Some(true)),
            (json!(false), Some(false)),
        ];
        for (raw, expected) in cases {
            let artist =
                Artist::from_json(&json!({"name": "A", "is_australian": raw, "links": []})).unwrap();
            assert_eq!(artist.is_australian, expected);
        }

        let artist = Artist::from_json(&json!({"name": "A"})).unwrap();
        assert_eq!(artist.is_australian, None);
        assert_eq!(artist.url, None);
    }

    #[test]
    fn test_first_artwork_is_used() {
        let mut value = release("Album");
        value["artwork"] = json!([
            {
                "url": "https://example.com/first.jpg",
                "type": "cover",
                "sizes": [{
                    "url": "https://example.com/first-100.jpg",
                    "width": 100,
                    "height": 100,
                    "aspect_ratio": "1x1"
                }]
            },
            {"url": "https://example.com/second.jpg", "type": "cover", "sizes": []}
        ]);
        let artwork = Album::from_json(&value).unwrap().artwork.unwrap();
        assert_eq!(artwork.url, "https://example.com/first.jpg");
        assert_eq!(artwork.artwork_type, "cover");
        assert_eq!(artwork.sizes[0].width, 100);
    }

    #[test]
    fn test_played_time_keeps_offset() {
        let radio_song = RadioSong::from_json(&play(Value::Null, json!([]))).unwrap();
        assert_eq!(radio_song.channel, "triplej");
        assert_eq!(radio_song.played_time.offset().local_minus_utc(), 0);
        assert_eq!(
            radio_song.played_time.to_rfc3339(),
            "2024-01-01T00:00:35+00:00"
        );

        let mut value = play(Value::Null, json!([]));
        value["played_time"] = json!("2024-01-01T10:00:35+10:00");
        let radio_song = RadioSong::from_json(&value).unwrap();
        assert_eq!(radio_song.played_time.offset().local_minus_utc(), 36000);
    }

    #[test]
    fn test_missing_required_fields() {
        let mut value = play(Value::Null, json!([]));
        value.as_object_mut().unwrap().remove("played_time");
        let err = RadioSong::from_json(&value).unwrap_err();
        assert_eq!(
            err,
            DecodeError::MissingField {
                entity: "RadioSong",
                field: "played_time"
            }
        );

        let mut value = play(Value::Null, json!([]));
        value["service_id"] = Value::Null;
        let err = RadioSong::from_json(&value).unwrap_err();
        assert_eq!(err.field(), Some("service_id"));

        let mut value = play(Value::Null, json!([]));
        value["recording"].as_object_mut().unwrap().remove("title");
        let err = RadioSong::from_json(&value).unwrap_err();
        assert_eq!(err.entity(), Some("Song"));
        assert_eq!(err.field(), Some("title"));

        let mut value = play(Value::Null, json!([]));
        value["played_time"] = json!("yesterday");
        let err = RadioSong::from_json(&value).unwrap_err();
        assert_eq!(err.field(), Some("played_time"));
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "total": 1,
            "offset": 0,
            "limit": 10,
            "items": [play(release("Album"), json!([]))]
        })
        .to_string();
        let page = parse_search_response(&body).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.radio_songs.len(), 1);

        let err = parse_search_response("<html>").unwrap_err();
        assert!(matches!(
            err,
            crate::AbcRadioError::Decode(DecodeError::InvalidJson(_))
        ));

        let err = parse_search_response(r#"{"offset": 0, "limit": 10, "items": []}"#).unwrap_err();
        match err {
            crate::AbcRadioError::Decode(e) => {
                assert_eq!(e.entity(), Some("SearchResult"));
                assert_eq!(e.field(), Some("total"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
