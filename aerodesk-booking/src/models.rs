use aerodesk_catalog::{FlightId, TicketId};
use aerodesk_core::{CityName, FareClass, Passenger};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

use crate::error::{BookingError, BookingResult};

/// One committed leg of a purchase.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookedLeg {
    pub ticket_id: TicketId,
    pub flight_id: FlightId,
    pub origin: CityName,
    pub destination: CityName,
    pub fare_class: FareClass,
    pub price: i32,
    pub seats_left: u32,
}

/// Proof of a successful commit
#[derive(Debug, Clone, Serialize)]
pub struct Receipt {
    pub id: Uuid,
    pub passenger_name: String,
    pub legs: Vec<BookedLeg>,
    pub total: i32,
    pub created_at: DateTime<Utc>,
}

impl Receipt {
    /// Fails when the leg prices do not sum to a representable total.
    pub fn new(passenger: &Passenger, legs: Vec<BookedLeg>) -> BookingResult<Self> {
        let total = legs
            .iter()
            .try_fold(0i32, |total, leg| total.checked_add(leg.price))
            .ok_or_else(|| {
                BookingError::PriceOverflow(legs.iter().map(|leg| leg.ticket_id).collect())
            })?;
        Ok(Self {
            id: Uuid::new_v4(),
            passenger_name: passenger.full_name(),
            legs,
            total,
            created_at: Utc::now(),
        })
    }

    pub fn ticket_ids(&self) -> Vec<TicketId> {
        self.legs.iter().map(|leg| leg.ticket_id).collect()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for Receipt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Receipt {} for {}", self.id, self.passenger_name)?;
        for leg in &self.legs {
            writeln!(
                f,
                "  ticket {} flight {} {} -> {} [{}] ${}",
                leg.ticket_id, leg.flight_id, leg.origin, leg.destination, leg.fare_class, leg.price
            )?;
        }
        write!(f, "Total: ${}", self.total)
    }
}
