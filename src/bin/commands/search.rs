use super::output::print_page;
use super::utils::display_offset;
use super::OutputArgs;
use abc_radio_plays::{AbcRadioClient, AbcRadioClientImpl, AsyncPaginatedIterator, SearchParams};

/// Handle the search command
pub async fn handle_search_command(
    client: &AbcRadioClientImpl,
    params: SearchParams,
    all: bool,
    max_pages: Option<u32>,
    output: &OutputArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let offset = display_offset(output.utc_offset)?;
    log::info!("Searching with query '{}'", params.to_query_string());

    if !all {
        let mut client = client.clone();
        let page = client.search(&params).await?;
        print_page(&page, page.offset as usize, &offset, output.json);
        if !output.json && page.has_next_page() {
            println!(
                "Showing {} of {} plays; use --all or --offset {} for more",
                page.radio_songs.len(),
                page.total,
                page.next_offset()
            );
        }
        return Ok(());
    }

    let mut pages = client.continuous_search(params);
    let mut count = 0;
    while let Some(page) = pages.next().await? {
        print_page(&page, count, &offset, output.json);
        count += page.radio_songs.len();

        if let Some(max_pages) = max_pages {
            if pages.pages_fetched() >= max_pages {
                log::info!("Stopping after {max_pages} pages as requested");
                break;
            }
        }
    }

    log::info!(
        "Fetched {count} plays in {} pages (total reported: {:?})",
        pages.pages_fetched(),
        pages.total()
    );
    Ok(())
}
