use aerodesk_catalog::{FlightCatalog, PricingPolicy, StandardPricing, Ticket, TicketId, TicketPool};
use aerodesk_core::CityName;
use std::fmt;
use tracing::info;

use crate::commit::PurchaseDesk;
use crate::error::{BookingError, BookingResult};
use crate::input::CustomerInput;
use crate::models::Receipt;
use crate::resolver::{Route, RouteResolver};

#[derive(Debug, Clone)]
pub enum BookingOutcome {
    Booked(Receipt),
    /// The customer cancelled or turned down the offered itinerary. Nothing changed.
    Declined,
}

/// A purchased ticket together with the endpoints of its flight.
#[derive(Debug, Clone)]
pub struct HeldTicket {
    pub origin: CityName,
    pub destination: CityName,
    pub ticket: Ticket,
}

#[derive(Debug, Clone)]
pub struct TicketSummary {
    pub tickets: Vec<HeldTicket>,
}

impl fmt::Display for TicketSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, held) in self.tickets.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            writeln!(
                f,
                "You have bought a ticket for flight {} - {}",
                held.origin, held.destination
            )?;
            writeln!(f)?;
            writeln!(f, "Details:")?;
            write!(f, "{}", held.ticket)?;
        }
        Ok(())
    }
}

/// One reservation counter: the catalogs it sells from and the last purchase it made.
pub struct Counter<P: PricingPolicy = StandardPricing> {
    flights: FlightCatalog,
    tickets: TicketPool,
    pricing: P,
    held: Vec<TicketId>,
}

impl<P: PricingPolicy> Counter<P> {
    pub fn new(flights: FlightCatalog, tickets: TicketPool, pricing: P) -> Self {
        Self {
            flights,
            tickets,
            pricing,
            held: Vec::new(),
        }
    }

    pub fn catalog(&self) -> &FlightCatalog {
        &self.flights
    }

    pub fn tickets(&self) -> &TicketPool {
        &self.tickets
    }

    pub fn resolve(&self, city_a: &str, city_b: &str) -> BookingResult<Route> {
        RouteResolver::new(&self.flights, &self.tickets).resolve(city_a, city_b)
    }

    fn desk(&mut self) -> PurchaseDesk<'_> {
        PurchaseDesk::new(&mut self.flights, &mut self.tickets, &self.pricing)
    }

    /// Find an itinerary from `city_a` to `city_b`, let the customer pick or accept it, and buy it.
    pub fn choose_ticket(
        &mut self,
        city_a: &str,
        city_b: &str,
        input: &mut dyn CustomerInput,
    ) -> BookingResult<BookingOutcome> {
        let route = self.resolve(city_a, city_b)?;
        let result = match &route {
            Route::Direct { flight_id, tickets } => {
                let flight_id = *flight_id;
                let selected = input.select_ticket(tickets).map_err(BookingError::Input)?;

                let ticket = self
                    .tickets
                    .get(selected)
                    .ok_or(BookingError::InvalidTicketSelection(selected))?;
                if ticket.flight_id != Some(flight_id) {
                    return Err(BookingError::TicketNotForFlight {
                        ticket_id: selected,
                        flight_id,
                    });
                }

                self.buy_ticket(selected, input)
            }
            Route::Transfer {
                via,
                first_ticket,
                second_ticket,
                ..
            } => {
                if !input.confirm_transfer(&route).map_err(BookingError::Input)? {
                    info!("Customer declined transfer via {}", via);
                    return Ok(BookingOutcome::Declined);
                }
                self.buy_transfer(*first_ticket, *second_ticket, input)
            }
        };

        match result {
            Ok(receipt) => Ok(BookingOutcome::Booked(receipt)),
            Err(BookingError::PurchaseCancelled) => Ok(BookingOutcome::Declined),
            Err(err) => Err(err),
        }
    }

    pub fn buy_ticket(
        &mut self,
        ticket_id: TicketId,
        input: &mut dyn CustomerInput,
    ) -> BookingResult<Receipt> {
        let receipt = self.desk().commit(ticket_id, input)?;
        self.held = receipt.ticket_ids();
        Ok(receipt)
    }

    pub fn buy_transfer(
        &mut self,
        first: TicketId,
        second: TicketId,
        input: &mut dyn CustomerInput,
    ) -> BookingResult<Receipt> {
        let receipt = self.desk().commit_pair(first, second, input)?;
        self.held = receipt.ticket_ids();
        Ok(receipt)
    }

    /// The purchase made most recently at this counter.
    pub fn show_ticket(&self) -> BookingResult<TicketSummary> {
        if self.held.is_empty() {
            return Err(BookingError::NoFlightDetails);
        }

        let tickets = self
            .held
            .iter()
            .map(|&id| {
                let ticket = self.tickets.get(id).ok_or(BookingError::NoFlightDetails)?;
                let flight = ticket
                    .flight_id
                    .and_then(|flight_id| self.flights.get(flight_id))
                    .ok_or(BookingError::NoFlightDetails)?;
                Ok(HeldTicket {
                    origin: flight.origin.clone(),
                    destination: flight.destination.clone(),
                    ticket: ticket.clone(),
                })
            })
            .collect::<BookingResult<Vec<_>>>()?;

        Ok(TicketSummary { tickets })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ScriptedInput;
    use aerodesk_catalog::{Airplane, Flight, FlightId};
    use aerodesk_core::{FareClass, PassengerDetails, PaymentDetails};

    fn input() -> ScriptedInput {
        ScriptedInput::new(
            PassengerDetails {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                age: 36,
                gender: "Woman".to_string(),
                email: "ada@example.com".to_string(),
                phone: "+61400111222".to_string(),
                passport: "AL1815".to_string(),
            },
            PaymentDetails {
                card_number: "5500000000000004".to_string(),
                security_code: 321,
            },
        )
    }

    fn flight(id: FlightId, from: &str, to: &str) -> Flight {
        Flight::new(
            id,
            CityName::parse(from).unwrap(),
            CityName::parse(to).unwrap(),
            Airplane::new(id + 10, "Embraer E190", 7, 7, 3).unwrap(),
        )
    }

    fn counter() -> Counter {
        let flights = FlightCatalog::new(vec![
            flight(1, "Melbourne", "Sydney"),
            flight(2, "Sydney", "Perth"),
            flight(3, "Perth", "Darwin"),
        ])
        .unwrap();
        let tickets = TicketPool::new(vec![
            Ticket::new(10, 1, FareClass::Economy, 200),
            Ticket::new(11, 1, FareClass::Economy, 250),
            Ticket::new(20, 2, FareClass::Economy, 400),
            Ticket::new(30, 3, FareClass::Business, 900),
        ])
        .unwrap();
        Counter::new(flights, tickets, StandardPricing::default())
    }

    #[test]
    fn test_show_ticket_before_purchase() {
        let counter = counter();
        assert!(matches!(counter.show_ticket(), Err(BookingError::NoFlightDetails)));
    }

    #[test]
    fn test_choose_direct_ticket() {
        let mut counter = counter();
        let mut input = input().selecting(11);

        let outcome = counter.choose_ticket("Melbourne", "Sydney", &mut input).unwrap();
        let BookingOutcome::Booked(receipt) = outcome else {
            panic!("expected a booking");
        };
        assert_eq!(receipt.ticket_ids(), vec![11]);
        assert_eq!(receipt.total, 280);
        assert!(!counter.tickets().get(10).unwrap().is_booked());

        let summary = counter.show_ticket().unwrap().to_string();
        assert!(summary.starts_with("You have bought a ticket for flight Melbourne - Sydney\n\nDetails:\n"));
        assert!(summary.contains("Ticket 11"));
    }

    #[test]
    fn test_selection_must_exist_and_match_flight() {
        let mut counter = counter();

        let err = counter
            .choose_ticket("Melbourne", "Sydney", &mut input().selecting(99))
            .unwrap_err();
        assert!(matches!(err, BookingError::InvalidTicketSelection(99)));

        let err = counter
            .choose_ticket("Melbourne", "Sydney", &mut input().selecting(20))
            .unwrap_err();
        assert!(matches!(
            err,
            BookingError::TicketNotForFlight {
                ticket_id: 20,
                flight_id: 1
            }
        ));
        assert!(!counter.tickets().get(20).unwrap().is_booked());
    }

    #[test]
    fn test_choose_transfer() {
        let mut counter = counter();
        let mut input = input();

        let outcome = counter.choose_ticket("Melbourne", "Perth", &mut input).unwrap();
        assert!(matches!(outcome, BookingOutcome::Booked(_)));

        let summary = counter.show_ticket().unwrap();
        assert_eq!(summary.tickets.len(), 2);
        assert_eq!(summary.tickets[0].origin.as_str(), "Melbourne");
        assert_eq!(summary.tickets[1].destination.as_str(), "Perth");
        assert_eq!(input.details_requests, 1);
    }

    #[test]
    fn test_declined_transfer_changes_nothing() {
        let mut counter = counter();
        let mut input = input().declining_transfer();

        let outcome = counter.choose_ticket("Melbourne", "Perth", &mut input).unwrap();
        assert!(matches!(outcome, BookingOutcome::Declined));
        assert_eq!(input.details_requests, 0);
        assert_eq!(counter.tickets().available().count(), 4);
    }

    #[test]
    fn test_cancelled_purchase_is_declined() {
        let mut counter = counter();
        let mut input = input().declining_purchase();

        let outcome = counter.choose_ticket("Sydney", "Perth", &mut input).unwrap();
        assert!(matches!(outcome, BookingOutcome::Declined));
        assert!(matches!(counter.show_ticket(), Err(BookingError::NoFlightDetails)));
    }

    #[test]
    fn test_failed_purchase_keeps_previous_ticket() {
        let mut counter = counter();
        counter.buy_ticket(20, &mut input()).unwrap();

        assert!(counter.buy_ticket(20, &mut input()).is_err());
        let summary = counter.show_ticket().unwrap();
        assert_eq!(summary.tickets[0].ticket.id, 20);
    }
}
