use super::utils::format_play_time;
use abc_radio_plays::{RadioSong, SearchResult};
use chrono::FixedOffset;
use serde::Serialize;

/// Events emitted by search commands (JSON output to stdout)
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type")]
pub enum SearchEvent<'a> {
    /// A page was fetched
    PageFetched {
        total: u32,
        offset: u32,
        limit: u32,
        entries: usize,
    },
    /// A play was found
    PlayFound {
        index: usize,
        radio_song: &'a RadioSong,
    },
}

/// Output a search event as JSON to stdout
pub fn output_event(event: &SearchEvent<'_>) {
    if let Ok(json) = serde_json::to_string(event) {
        println!("{json}");
    } else {
        log::error!("Failed to serialize event to JSON");
    }
}

/// Print one play as a line of text.
pub fn print_play(radio_song: &RadioSong, offset: &FixedOffset, latest: bool) {
    let song = &radio_song.song;
    let mut line = format!(
        "{:>8}  {:<10} {}",
        format_play_time(&radio_song.played_time, offset),
        radio_song.channel,
        song.title
    );
    if !song.artists.is_empty() {
        line.push_str(&format!(" by {}", song.artist_names()));
    }
    if let Some(album) = &song.album {
        line.push_str(&format!(" from {album}"));
    }
    if latest {
        line.push_str("  ◀ latest");
    }
    println!("{line}");
}

/// Print a whole page, as text or JSON lines.
///
/// `first_index` is the running index of the page's first play.
pub fn print_page(page: &SearchResult, first_index: usize, offset: &FixedOffset, json: bool) {
    if json {
        output_event(&SearchEvent::PageFetched {
            total: page.total,
            offset: page.offset,
            limit: page.limit,
            entries: page.radio_songs.len(),
        });
        for (i, radio_song) in page.radio_songs.iter().enumerate() {
            output_event(&SearchEvent::PlayFound {
                index: first_index + i,
                radio_song,
            });
        }
    } else {
        for radio_song in &page.radio_songs {
            print_play(radio_song, offset, false);
        }
    }
}
