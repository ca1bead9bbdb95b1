use aerodesk_catalog::{Flight, FlightCatalog, Ticket, TicketPool};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

use crate::{StoreError, StoreResult};

/// On-disk catalog layout. Both collections must be present.
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    #[serde(default)]
    flights: Option<Vec<Flight>>,
    #[serde(default)]
    tickets: Option<Vec<Ticket>>,
}

pub fn load_catalog(path: impl AsRef<Path>) -> StoreResult<(FlightCatalog, TicketPool)> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let (flights, tickets) = parse_catalog(&raw)?;
    info!(
        "Loaded {} flights and {} tickets from {}",
        flights.len(),
        tickets.len(),
        path.display()
    );
    Ok((flights, tickets))
}

pub fn parse_catalog(raw: &str) -> StoreResult<(FlightCatalog, TicketPool)> {
    let document: CatalogDocument = serde_json::from_str(raw)?;

    let flights = document
        .flights
        .ok_or(StoreError::MissingCollection("flights"))?;
    let tickets = document
        .tickets
        .ok_or(StoreError::MissingCollection("tickets"))?;

    Ok((FlightCatalog::new(flights)?, TicketPool::new(tickets)?))
}
