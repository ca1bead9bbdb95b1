use aerodesk_core::{FareClass, Passenger};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::flight::FlightId;
use crate::{CatalogError, CatalogResult};

pub type TicketId = u32;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    #[default]
    Available,
    Booked,
}

/// A sellable ticket on one flight.
///
/// `price()` is the base fare until the ticket is booked, then the final
/// price fixed at commit time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    #[serde(default)]
    pub flight_id: Option<FlightId>,
    pub fare_class: FareClass,
    pub base_price: i32,
    #[serde(skip)]
    final_price: Option<i32>,
    #[serde(skip_deserializing, default)]
    status: TicketStatus,
    #[serde(skip_deserializing, default)]
    passenger: Option<Passenger>,
}

impl Ticket {
    pub fn new(id: TicketId, flight_id: FlightId, fare_class: FareClass, base_price: i32) -> Self {
        Self {
            id,
            flight_id: Some(flight_id),
            fare_class,
            base_price,
            final_price: None,
            status: TicketStatus::Available,
            passenger: None,
        }
    }

    pub fn status(&self) -> TicketStatus {
        self.status
    }

    pub fn is_booked(&self) -> bool {
        self.status == TicketStatus::Booked
    }

    pub fn price(&self) -> i32 {
        self.final_price.unwrap_or(self.base_price)
    }

    pub fn passenger(&self) -> Option<&Passenger> {
        self.passenger.as_ref()
    }

    /// Transition: Available → Booked. Fixes the final price and attaches the passenger.
    pub fn book(&mut self, passenger: Passenger, final_price: i32) -> CatalogResult<()> {
        if self.status != TicketStatus::Available {
            return Err(CatalogError::InvalidTransition {
                id: self.id,
                from: self.status,
                to: TicketStatus::Booked,
            });
        }
        if final_price < 0 {
            return Err(CatalogError::InvalidPrice {
                id: self.id,
                price: final_price,
            });
        }

        self.passenger = Some(passenger);
        self.final_price = Some(final_price);
        self.status = TicketStatus::Booked;
        Ok(())
    }
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticket {} [{}] ${}", self.id, self.fare_class, self.price())?;
        match self.flight_id {
            Some(flight_id) => write!(f, " on flight {flight_id}")?,
            None => f.write_str(" (no flight)")?,
        }
        match (&self.status, &self.passenger) {
            (TicketStatus::Booked, Some(passenger)) => write!(f, ", booked for {passenger}"),
            (TicketStatus::Booked, None) => f.write_str(", booked"),
            (TicketStatus::Available, _) => f.write_str(", available"),
        }
    }
}

/// Ordered ticket pool with an id index.
#[derive(Debug, Clone, Default)]
pub struct TicketPool {
    tickets: Vec<Ticket>,
    index: HashMap<TicketId, usize>,
}

impl TicketPool {
    pub fn new(tickets: Vec<Ticket>) -> CatalogResult<Self> {
        let mut pool = Self::default();
        for ticket in tickets {
            if pool.index.contains_key(&ticket.id) {
                return Err(CatalogError::DuplicateTicket(ticket.id));
            }
            if ticket.base_price < 0 {
                return Err(CatalogError::InvalidPrice {
                    id: ticket.id,
                    price: ticket.base_price,
                });
            }
            pool.index.insert(ticket.id, pool.tickets.len());
            pool.tickets.push(ticket);
        }
        tracing::debug!("Loaded ticket pool with {} tickets", pool.len());
        Ok(pool)
    }

    pub fn get(&self, id: TicketId) -> Option<&Ticket> {
        self.index.get(&id).map(|&i| &self.tickets[i])
    }

    pub fn get_mut(&mut self, id: TicketId) -> Option<&mut Ticket> {
        self.index.get(&id).map(|&i| &mut self.tickets[i])
    }

    /// Unbooked tickets on `flight_id`, in pool order.
    pub fn available_for_flight(&self, flight_id: FlightId) -> impl Iterator<Item = &Ticket> {
        self.tickets
            .iter()
            .filter(move |t| t.flight_id == Some(flight_id) && !t.is_booked())
    }

    pub fn first_available_for_flight(&self, flight_id: FlightId) -> Option<TicketId> {
        self.available_for_flight(flight_id).next().map(|t| t.id)
    }

    /// Every unbooked ticket, in pool order.
    pub fn available(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter().filter(|t| !t.is_booked())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ticket> {
        self.tickets.iter()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aerodesk_core::PassengerDetails;

    fn passenger() -> Passenger {
        Passenger::from_details(&PassengerDetails {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            age: 40,
            gender: "Woman".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "+61400111222".to_string(),
            passport: "N1234567".to_string(),
        })
        .unwrap()
    }

    #[test]
    fn test_book_is_one_way() {
        let mut ticket = Ticket::new(10, 1, FareClass::Economy, 1000);
        assert_eq!(ticket.price(), 1000);

        ticket.book(passenger(), 1120).unwrap();
        assert!(ticket.is_booked());
        assert_eq!(ticket.price(), 1120);
        assert_eq!(ticket.passenger().unwrap().first_name(), "Grace");

        let again = ticket.book(passenger(), 1254);
        assert!(matches!(again, Err(CatalogError::InvalidTransition { id: 10, .. })));
        assert_eq!(ticket.price(), 1120);
    }

    #[test]
    fn test_book_rejects_negative_price() {
        let mut ticket = Ticket::new(11, 1, FareClass::Economy, 1000);
        let result = ticket.book(passenger(), -1);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { id: 11, price: -1 })));
        assert!(!ticket.is_booked());
        assert!(ticket.passenger().is_none());
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let result = TicketPool::new(vec![
            Ticket::new(1, 1, FareClass::Economy, 100),
            Ticket::new(1, 2, FareClass::Business, 300),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateTicket(1))));
    }

    #[test]
    fn test_rejects_negative_base_price() {
        let result = TicketPool::new(vec![
            Ticket::new(1, 1, FareClass::Economy, 100),
            Ticket::new(2, 1, FareClass::Economy, -50),
        ]);
        assert!(matches!(result, Err(CatalogError::InvalidPrice { id: 2, price: -50 })));
    }

    #[test]
    fn test_available_for_flight_keeps_pool_order() {
        let mut pool = TicketPool::new(vec![
            Ticket::new(5, 1, FareClass::Economy, 100),
            Ticket::new(3, 2, FareClass::Economy, 100),
            Ticket::new(7, 1, FareClass::Business, 300),
            Ticket::new(2, 1, FareClass::Economy, 100),
        ])
        .unwrap();

        pool.get_mut(5).unwrap().book(passenger(), 112).unwrap();

        let ids: Vec<_> = pool.available_for_flight(1).map(|t| t.id).collect();
        assert_eq!(ids, vec![7, 2]);
        assert_eq!(pool.first_available_for_flight(1), Some(7));
        assert_eq!(pool.first_available_for_flight(9), None);
        assert_eq!(pool.available().count(), 3);
    }

    #[test]
    fn test_deserialize_starts_available() {
        let ticket: Ticket = serde_json::from_str(
            r#"{"id": 4, "flight_id": 2, "fare_class": "BUSINESS", "base_price": 900, "status": "BOOKED"}"#,
        )
        .unwrap();
        assert_eq!(ticket.status(), TicketStatus::Available);
        assert_eq!(ticket.price(), 900);

        let orphan: Ticket =
            serde_json::from_str(r#"{"id": 5, "fare_class": "ECONOMY", "base_price": 100}"#).unwrap();
        assert!(orphan.flight_id.is_none());
    }
}
