pub mod output;
pub mod recent;
pub mod search;
pub mod stations;
pub mod utils;

use abc_radio_plays::{AbcRadioClientImpl, SearchParams};
use chrono::{DateTime, Utc};
use clap::{Args, Subcommand};

/// Output options shared by the commands that print plays
#[derive(Args, Clone, Debug)]
pub struct OutputArgs {
    /// Print one JSON object per line instead of text
    #[arg(long)]
    pub json: bool,

    /// Hours from UTC used to display play times (10 is Sydney standard time)
    #[arg(long, default_value = "10", allow_negative_numbers = true)]
    pub utc_offset: i32,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the stations known to the search API
    Stations,

    /// Search the play-out history
    ///
    /// Without --all only the first page is fetched. With --all every page of the
    /// result set is followed; without a --from/--to window that can mean hundreds
    /// of thousands of records, so consider --max-pages.
    ///
    /// Usage examples:
    /// # First song played in 2024 (UTC)
    /// abc-radio search --from 2024-01-01T00:00:00Z --to 2024-01-01T00:01:00Z
    ///
    /// # Everything triple j played in one hour
    /// abc-radio search --station triplej --from 2024-01-01T00:00:00Z --to 2024-01-01T01:00:00Z --limit 100 --all
    Search {
        /// Earliest play time (RFC 3339, or YYYY-MM-DD[THH:MM[:SS]] in UTC)
        #[arg(long, value_parser = utils::parse_datetime)]
        from: Option<DateTime<Utc>>,

        /// Latest play time (same formats as --from)
        #[arg(long, value_parser = utils::parse_datetime)]
        to: Option<DateTime<Utc>>,

        /// Station identifier, e.g. triplej (unknown identifiers are passed through)
        #[arg(long)]
        station: Option<String>,

        /// Index of the first result
        #[arg(long)]
        offset: Option<u32>,

        /// Results per page (the API caps this at 100)
        #[arg(long)]
        limit: Option<u32>,

        /// Follow every page of the result set
        #[arg(long)]
        all: bool,

        /// Stop after this many pages when --all is given
        #[arg(long, requires = "all")]
        max_pages: Option<u32>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Show what a station played in the last few minutes
    Recent {
        /// Size of the window, in minutes
        #[arg(long, default_value = "30")]
        minutes: u32,

        /// Station identifier
        #[arg(long, default_value = "triplej")]
        station: String,

        /// Results per page
        #[arg(long, default_value = "100")]
        limit: u32,

        #[command(flatten)]
        output: OutputArgs,
    },
}

pub async fn execute_command(
    command: Commands,
    client: &AbcRadioClientImpl,
) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Commands::Stations => {
            stations::handle_stations();
            Ok(())
        }

        Commands::Search {
            from,
            to,
            station,
            offset,
            limit,
            all,
            max_pages,
            output,
        } => {
            let params = SearchParams {
                from,
                to,
                station: station.map(Into::into),
                offset,
                limit,
            };
            search::handle_search_command(client, params, all, max_pages, &output).await
        }

        Commands::Recent {
            minutes,
            station,
            limit,
            output,
        } => recent::handle_recent_command(client, minutes, &station, limit, &output).await,
    }
}
