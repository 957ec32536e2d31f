//! English strings for the message keys used across views.

/// Looks up `key`. Unknown keys come back unchanged, so raw catalog error
/// text can be passed straight through.
pub fn translate(key: &str) -> &str {
    match key {
        "songs_search_input_placeholder" => "Type a song name…",
        "songs_search_default" => "Search for a song to see results here",
        "song_not_found" => "No songs found for this search",
        "something_went_wrong" => "Something went wrong",
        "oops" => "Oops!",
        "media_list" => "Songs",
        "search" => "Search",
        "track_details" => "Track details",
        "no_preview" => "No preview playing",
        "track_name" => "Track",
        "collection_name" => "Album",
        "artist_name" => "Artist",
        "country" => "Country",
        "primary_genre_name" => "Genre",
        "release_date" => "Released",
        "artwork" => "Artwork",
        _ => key,
    }
}
