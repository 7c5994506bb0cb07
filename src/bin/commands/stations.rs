use abc_radio_plays::Station;

/// Handle the stations command
pub fn handle_stations() {
    println!("Known stations (other identifiers are passed through to the API):");
    for station in Station::KNOWN {
        println!("  {station}");
    }
}
