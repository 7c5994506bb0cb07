use super::output::{output_event, print_play, SearchEvent};
use super::utils::display_offset;
use super::OutputArgs;
use abc_radio_plays::{AbcRadioClientImpl, AsyncPaginatedIterator, SearchParams};
use chrono::{Duration, Utc};

/// Handle the recent command: everything a station played in the last `minutes`.
pub async fn handle_recent_command(
    client: &AbcRadioClientImpl,
    minutes: u32,
    station: &str,
    limit: u32,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let offset = display_offset(output.utc_offset)?;
    let now = Utc::now();
    let params = SearchParams::new()
        .with_from(now - Duration::minutes(i64::from(minutes)))
        .with_to(now)
        .with_station(station)
        .with_limit(limit);

    let recently_played = client.radio_songs(params).collect_all().await?;
    if recently_played.is_empty() {
        println!("Nothing played on {station} in the last {minutes} minutes");
        return Ok(());
    }

    let latest = recently_played
        .iter()
        .map(|radio_song| radio_song.played_time)
        .max();

    for (index, radio_song) in recently_played.iter().enumerate() {
        if output.json {
            output_event(&SearchEvent::PlayFound { index, radio_song });
        } else {
            print_play(radio_song, &offset, Some(radio_song.played_time) == latest);
        }
    }
    Ok(())
}
