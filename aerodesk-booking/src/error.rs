use aerodesk_catalog::{CatalogError, FlightId, TicketId};
use aerodesk_core::{CityName, CoreError, FareClass};

/// Broad classes of booking failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input; nothing was read or changed
    Validation,
    /// The request conflicts with current state; another ticket may work
    Conflict,
    /// An id did not resolve; nothing was changed
    NotFound,
    /// The customer backed out
    Cancelled,
    Internal,
}

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("{}", core_message(.0))]
    Validation(CoreError),

    #[error("Invalid passenger details: {}", core_message(.0))]
    Passenger(CoreError),

    #[error("Could not read customer input: {0}")]
    Input(CoreError),

    #[error("This ticket does not exist: {0}")]
    TicketNotFound(TicketId),

    #[error("Ticket {0} is already booked")]
    AlreadyBooked(TicketId),

    #[error("Ticket {0} has no associated flight")]
    NoAssociatedFlight(TicketId),

    #[error("Flight information not found: {0}")]
    FlightNotFound(FlightId),

    #[error("Airplane information not found for flight {0}")]
    AirplaneNotFound(FlightId),

    #[error("No {class} class seats available on flight {flight_id}")]
    NoSeatsAvailable { flight_id: FlightId, class: FareClass },

    #[error("No available tickets for flight {flight_id}")]
    NoAvailableTickets { flight_id: FlightId },

    #[error("No possible route found from {from} to {to}")]
    NoPossibleRoute { from: CityName, to: CityName },

    #[error("Invalid ticket ID: {0}")]
    InvalidTicketSelection(TicketId),

    #[error("Selected ticket {ticket_id} is not for flight {flight_id}")]
    TicketNotForFlight { ticket_id: TicketId, flight_id: FlightId },

    #[error("A transfer needs two different tickets (got {0} twice)")]
    SameTicketTwice(TicketId),

    #[error("Total price for tickets {0:?} is out of range")]
    PriceOverflow(Vec<TicketId>),

    #[error("Purchase cancelled")]
    PurchaseCancelled,

    #[error("No flight details available")]
    NoFlightDetails,

    #[error("Rollback of ticket {ticket_id} failed: {reason}")]
    RollbackFailed { ticket_id: TicketId, reason: String },

    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl BookingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::Validation(_)
            | BookingError::Passenger(_)
            | BookingError::InvalidTicketSelection(_)
            | BookingError::TicketNotForFlight { .. }
            | BookingError::SameTicketTwice(_)
            | BookingError::PriceOverflow(_) => ErrorKind::Validation,
            BookingError::AlreadyBooked(_)
            | BookingError::NoSeatsAvailable { .. }
            | BookingError::NoAvailableTickets { .. }
            | BookingError::NoPossibleRoute { .. } => ErrorKind::Conflict,
            BookingError::TicketNotFound(_)
            | BookingError::NoAssociatedFlight(_)
            | BookingError::FlightNotFound(_)
            | BookingError::AirplaneNotFound(_)
            | BookingError::NoFlightDetails => ErrorKind::NotFound,
            BookingError::PurchaseCancelled => ErrorKind::Cancelled,
            BookingError::Input(_)
            | BookingError::RollbackFailed { .. }
            | BookingError::Catalog(_) => ErrorKind::Internal,
        }
    }
}

fn core_message(err: &CoreError) -> &str {
    match err {
        CoreError::ValidationError(msg) | CoreError::InternalError(msg) => msg,
    }
}

pub type BookingResult<T> = Result<T, BookingError>;
