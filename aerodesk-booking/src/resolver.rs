use aerodesk_catalog::{FlightCatalog, FlightId, TicketId, TicketPool};
use aerodesk_core::CityName;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{BookingError, BookingResult};

/// An itinerary the counter can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Route {
    /// One flight; `tickets` are its unbooked tickets in pool order.
    Direct {
        flight_id: FlightId,
        tickets: Vec<TicketId>,
    },
    /// Two flights connecting through `via`, each with the first unbooked ticket found.
    Transfer {
        first_flight: FlightId,
        second_flight: FlightId,
        via: CityName,
        first_ticket: TicketId,
        second_ticket: TicketId,
    },
}

/// Finds a direct or single-transfer itinerary between two cities.
pub struct RouteResolver<'a> {
    flights: &'a FlightCatalog,
    tickets: &'a TicketPool,
}

impl<'a> RouteResolver<'a> {
    pub fn new(flights: &'a FlightCatalog, tickets: &'a TicketPool) -> Self {
        Self { flights, tickets }
    }

    pub fn resolve(&self, city_a: &str, city_b: &str) -> BookingResult<Route> {
        let from = CityName::parse(city_a).map_err(BookingError::Validation)?;
        let to = CityName::parse(city_b).map_err(BookingError::Validation)?;

        if let Some(direct) = self.flights.between(&from, &to) {
            info!("Direct flight {} found from {} to {}", direct.id, from, to);

            let tickets: Vec<TicketId> = self
                .tickets
                .available_for_flight(direct.id)
                .map(|t| t.id)
                .collect();

            if tickets.is_empty() {
                return Err(BookingError::NoAvailableTickets {
                    flight_id: direct.id,
                });
            }

            return Ok(Route::Direct {
                flight_id: direct.id,
                tickets,
            });
        }

        info!("No direct flight from {} to {}, searching transfer options", from, to);
        self.find_transfer(&from, &to)
    }

    /// Scan flights landing at `to` in catalog order; the first whose connecting leg
    /// exists and where both legs still have an unbooked ticket wins.
    fn find_transfer(&self, from: &CityName, to: &CityName) -> BookingResult<Route> {
        for second in self.flights.arriving_at(to) {
            let via = &second.origin;

            let Some(first) = self.flights.between(from, via) else {
                continue;
            };
            debug!(
                "Candidate transfer {} -> {} -> {} (flights {} and {})",
                from, via, to, first.id, second.id
            );

            let first_ticket = self.tickets.first_available_for_flight(first.id);
            let second_ticket = self.tickets.first_available_for_flight(second.id);

            if let (Some(first_ticket), Some(second_ticket)) = (first_ticket, second_ticket) {
                info!(
                    "Transfer route found: {} -> {} -> {} with tickets {} and {}",
                    from, via, to, first_ticket, second_ticket
                );
                return Ok(Route::Transfer {
                    first_flight: first.id,
                    second_flight: second.id,
                    via: via.clone(),
                    first_ticket,
                    second_ticket,
                });
            }
        }

        info!("No transfer routes available from {} to {}", from, to);
        Err(BookingError::NoPossibleRoute {
            from: from.clone(),
            to: to.clone(),
        })
    }
}
