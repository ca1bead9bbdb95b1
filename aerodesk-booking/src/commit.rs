use aerodesk_catalog::{Airplane, FlightCatalog, FlightId, PricingPolicy, Ticket, TicketId, TicketPool};
use aerodesk_core::{CityName, FareClass, Passenger};
use tracing::{error, info, warn};

use crate::error::{BookingError, BookingResult};
use crate::input::{CustomerInput, PurchasePreview};
use crate::models::{BookedLeg, Receipt};

/// A leg that passed every pre-commit check.
#[derive(Debug, Clone)]
struct ValidatedLeg {
    ticket_id: TicketId,
    flight_id: FlightId,
    fare_class: FareClass,
    base_price: i32,
    origin: CityName,
    destination: CityName,
}

/// A leg that has been applied, with what is needed to undo it.
struct AppliedLeg {
    snapshot: Ticket,
    booked: BookedLeg,
}

/// Validates and commits ticket purchases against the shared catalogs.
///
/// The desk holds exclusive borrows of both catalogs, so at most one commit can be in
/// flight and nothing else can observe a half-applied purchase.
pub struct PurchaseDesk<'a> {
    flights: &'a mut FlightCatalog,
    tickets: &'a mut TicketPool,
    pricing: &'a dyn PricingPolicy,
}

impl<'a> PurchaseDesk<'a> {
    pub fn new(
        flights: &'a mut FlightCatalog,
        tickets: &'a mut TicketPool,
        pricing: &'a dyn PricingPolicy,
    ) -> Self {
        Self {
            flights,
            tickets,
            pricing,
        }
    }

    /// Book a single ticket.
    pub fn commit(
        &mut self,
        ticket_id: TicketId,
        input: &mut dyn CustomerInput,
    ) -> BookingResult<Receipt> {
        let leg = self.validate_leg(ticket_id).map_err(rejected)?;

        let preview = PurchasePreview {
            tickets: vec![ticket_id],
            base_total: leg.base_price,
        };
        let passenger = collect_passenger(input, &preview)?;

        let applied = self.apply_leg(&leg, &passenger)?;
        let receipt = match Receipt::new(&passenger, vec![applied.booked.clone()]) {
            Ok(receipt) => receipt,
            Err(err) => {
                self.rollback_leg(&leg, applied)?;
                return Err(err);
            }
        };

        info!(
            "Payment successful, ticket {} booked on flight {} for ${}",
            ticket_id, leg.flight_id, receipt.total
        );
        Ok(receipt)
    }

    /// Book both legs of a transfer, or neither.
    pub fn commit_pair(
        &mut self,
        first_id: TicketId,
        second_id: TicketId,
        input: &mut dyn CustomerInput,
    ) -> BookingResult<Receipt> {
        info!("Processing transfer booking: {} -> {}", first_id, second_id);

        if first_id == second_id {
            return Err(rejected(BookingError::SameTicketTwice(first_id)));
        }

        let first = self.validate_leg(first_id).map_err(rejected)?;
        let second = self.validate_leg(second_id).map_err(rejected)?;
        self.check_shared_airplane(&first, &second).map_err(rejected)?;

        let base_total = first
            .base_price
            .checked_add(second.base_price)
            .ok_or_else(|| rejected(BookingError::PriceOverflow(vec![first_id, second_id])))?;
        let preview = PurchasePreview {
            tickets: vec![first_id, second_id],
            base_total,
        };
        let passenger = collect_passenger(input, &preview)?;

        // Final prices are quoted before anything is applied so an unrepresentable total is
        // rejected while the catalog is still untouched.
        let quoted = self
            .quote(&first, &passenger)?
            .checked_add(self.quote(&second, &passenger)?);
        if quoted.is_none() {
            return Err(rejected(BookingError::PriceOverflow(vec![first_id, second_id])));
        }

        let applied_first = self.apply_leg(&first, &passenger)?;
        let applied_second = match self.apply_leg(&second, &passenger) {
            Ok(applied) => applied,
            Err(err) => {
                warn!(
                    "Second leg {} failed ({}), rolling back ticket {}",
                    second_id, err, first_id
                );
                self.rollback_leg(&first, applied_first)?;
                return Err(err);
            }
        };

        let legs = vec![applied_first.booked.clone(), applied_second.booked.clone()];
        let receipt = match Receipt::new(&passenger, legs) {
            Ok(receipt) => receipt,
            Err(err) => {
                self.rollback_leg(&second, applied_second)?;
                self.rollback_leg(&first, applied_first)?;
                return Err(err);
            }
        };
        info!(
            "Payment successful, tickets {} and {} booked for a total of ${}",
            first_id, second_id, receipt.total
        );
        Ok(receipt)
    }

    fn validate_leg(&self, ticket_id: TicketId) -> BookingResult<ValidatedLeg> {
        let ticket = self
            .tickets
            .get(ticket_id)
            .ok_or(BookingError::TicketNotFound(ticket_id))?;

        if ticket.is_booked() {
            return Err(BookingError::AlreadyBooked(ticket_id));
        }

        let flight_id = ticket
            .flight_id
            .ok_or(BookingError::NoAssociatedFlight(ticket_id))?;

        let flight = self
            .flights
            .get(flight_id)
            .ok_or(BookingError::FlightNotFound(flight_id))?;

        let airplane = flight
            .airplane
            .as_ref()
            .ok_or(BookingError::AirplaneNotFound(flight_id))?;

        if !airplane.has_seat(ticket.fare_class) {
            return Err(BookingError::NoSeatsAvailable {
                flight_id,
                class: ticket.fare_class,
            });
        }

        Ok(ValidatedLeg {
            ticket_id,
            flight_id,
            fare_class: ticket.fare_class,
            base_price: ticket.base_price,
            origin: flight.origin.clone(),
            destination: flight.destination.clone(),
        })
    }

    fn quote(&self, leg: &ValidatedLeg, passenger: &Passenger) -> BookingResult<i32> {
        let ticket = self
            .tickets
            .get(leg.ticket_id)
            .ok_or(BookingError::TicketNotFound(leg.ticket_id))?;
        Ok(self.pricing.final_price(ticket, passenger))
    }

    /// Two legs drawing on the same cabin of one airplane need two seats there.
    fn check_shared_airplane(&self, first: &ValidatedLeg, second: &ValidatedLeg) -> BookingResult<()> {
        if first.flight_id != second.flight_id || first.fare_class != second.fare_class {
            return Ok(());
        }

        let remaining = self.airplane(first.flight_id)?.remaining(first.fare_class);
        if remaining < 2 {
            return Err(BookingError::NoSeatsAvailable {
                flight_id: first.flight_id,
                class: first.fare_class,
            });
        }
        Ok(())
    }

    /// Price, book and seat one leg. Either all of it happens or none of it does.
    fn apply_leg(&mut self, leg: &ValidatedLeg, passenger: &Passenger) -> BookingResult<AppliedLeg> {
        let snapshot = self
            .tickets
            .get(leg.ticket_id)
            .cloned()
            .ok_or(BookingError::TicketNotFound(leg.ticket_id))?;
        let price = self.pricing.final_price(&snapshot, passenger);

        let seats_left = self
            .airplane_mut(leg.flight_id)?
            .take_seat(leg.fare_class)
            .map_err(|_| BookingError::NoSeatsAvailable {
                flight_id: leg.flight_id,
                class: leg.fare_class,
            })?;

        let booked = self
            .tickets
            .get_mut(leg.ticket_id)
            .map(|ticket| ticket.book(passenger.clone(), price));

        match booked {
            Some(Ok(())) => Ok(AppliedLeg {
                snapshot,
                booked: BookedLeg {
                    ticket_id: leg.ticket_id,
                    flight_id: leg.flight_id,
                    origin: leg.origin.clone(),
                    destination: leg.destination.clone(),
                    fare_class: leg.fare_class,
                    price,
                    seats_left,
                },
            }),
            Some(Err(err)) => {
                self.release_seat(leg)?;
                Err(err.into())
            }
            None => {
                self.release_seat(leg)?;
                Err(BookingError::TicketNotFound(leg.ticket_id))
            }
        }
    }

    fn rollback_leg(&mut self, leg: &ValidatedLeg, applied: AppliedLeg) -> BookingResult<()> {
        match self.tickets.get_mut(leg.ticket_id) {
            Some(ticket) => *ticket = applied.snapshot,
            None => {
                error!("Ticket {} vanished during rollback", leg.ticket_id);
                return Err(BookingError::RollbackFailed {
                    ticket_id: leg.ticket_id,
                    reason: "ticket no longer in pool".to_string(),
                });
            }
        }
        self.release_seat(leg)
    }

    fn release_seat(&mut self, leg: &ValidatedLeg) -> BookingResult<()> {
        self.airplane_mut(leg.flight_id)?
            .release_seat(leg.fare_class)
            .map(|_| ())
            .map_err(|err| {
                error!("Could not return seat for ticket {}: {}", leg.ticket_id, err);
                BookingError::RollbackFailed {
                    ticket_id: leg.ticket_id,
                    reason: err.to_string(),
                }
            })
    }

    fn airplane(&self, flight_id: FlightId) -> BookingResult<&Airplane> {
        self.flights
            .get(flight_id)
            .ok_or(BookingError::FlightNotFound(flight_id))?
            .airplane
            .as_ref()
            .ok_or(BookingError::AirplaneNotFound(flight_id))
    }

    fn airplane_mut(&mut self, flight_id: FlightId) -> BookingResult<&mut Airplane> {
        self.flights
            .get_mut(flight_id)
            .ok_or(BookingError::FlightNotFound(flight_id))?
            .airplane
            .as_mut()
            .ok_or(BookingError::AirplaneNotFound(flight_id))
    }
}

/// Ask for passenger details, confirmation and payment, in that order.
/// Nothing has been mutated when this returns an error.
fn collect_passenger(
    input: &mut dyn CustomerInput,
    preview: &PurchasePreview,
) -> BookingResult<Passenger> {
    let details = input.passenger_details().map_err(BookingError::Input)?;
    let mut passenger = Passenger::from_details(&details).map_err(BookingError::Passenger)?;

    if !input.confirm_purchase(preview).map_err(BookingError::Input)? {
        info!("Purchase cancelled for tickets {:?}", preview.tickets);
        return Err(BookingError::PurchaseCancelled);
    }

    let payment = input.payment_details().map_err(BookingError::Input)?;
    passenger.set_payment(&payment).map_err(BookingError::Passenger)?;

    Ok(passenger)
}

fn rejected(err: BookingError) -> BookingError {
    warn!("Booking rejected: {}", err);
    err
}
