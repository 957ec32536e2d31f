use serde::{Deserialize, Serialize};

/// A single catalog entry as returned by the search and lookup endpoints.
///
/// Every field is optional: the catalog omits keys freely, and views only
/// show what is present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(rename = "trackId", default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub primary_genre_name: Option<String>,
    #[serde(rename = "artworkUrl100", default)]
    pub artwork_url: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

impl Track {
    /// True when every field a result card needs is present and non-empty.
    pub fn is_card_complete(&self) -> bool {
        let present = |s: &Option<String>| s.as_deref().is_some_and(|s| !s.is_empty());

        self.id.is_some_and(|id| id != 0)
            && present(&self.track_name)
            && present(&self.collection_name)
            && present(&self.artist_name)
            && present(&self.country)
            && present(&self.primary_genre_name)
            && present(&self.artwork_url)
    }

    /// Release date trimmed to `YYYY-MM-DD` when the catalog sends a full timestamp.
    pub fn release_day(&self) -> Option<&str> {
        self.release_date
            .as_deref()
            .map(|d| d.split_once('T').map_or(d, |(day, _)| day))
    }
}

/// Envelope shared by `search` and `lookup`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResponse {
    #[serde(default)]
    pub result_count: usize,
    #[serde(default)]
    pub results: Vec<Track>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_catalog_field_names() {
        let body = r#"{
            "resultCount": 1,
            "results": [{
                "wrapperType": "track",
                "trackId": 1,
                "trackName": "Thunder Struck",
                "artistName": "AC/DC",
                "collectionName": "X",
                "country": "AU",
                "primaryGenreName": "Rock",
                "artworkUrl100": "http://x/art.jpg",
                "previewUrl": "http://x/preview.m4a",
                "releaseDate": "1990-09-10T07:00:00Z"
            }]
        }"#;

        let response: CatalogResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.result_count, 1);

        let track = &response.results[0];
        assert_eq!(track.id, Some(1));
        assert_eq!(track.track_name.as_deref(), Some("Thunder Struck"));
        assert_eq!(track.artwork_url.as_deref(), Some("http://x/art.jpg"));
        assert_eq!(track.preview_url.as_deref(), Some("http://x/preview.m4a"));
        assert_eq!(track.release_day(), Some("1990-09-10"));
        assert!(track.is_card_complete());
    }

    #[test]
    fn missing_keys_decode_as_none() {
        let response: CatalogResponse =
            serde_json::from_str(r#"{"results":[{"trackName":"Only a name"}]}"#).unwrap();

        let track = &response.results[0];
        assert_eq!(track.id, None);
        assert_eq!(track.primary_genre_name, None);
        assert!(!track.is_card_complete());
    }

    #[test]
    fn empty_strings_do_not_count_as_present() {
        let track = Track {
            id: Some(7),
            track_name: Some("a".into()),
            collection_name: Some("b".into()),
            artist_name: Some("c".into()),
            country: Some("US".into()),
            primary_genre_name: Some(String::new()),
            artwork_url: Some("http://x/a.jpg".into()),
            ..Track::default()
        };

        assert!(!track.is_card_complete());
    }
}
