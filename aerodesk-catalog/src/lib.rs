pub mod airplane;
pub mod flight;
pub mod ticket;
pub mod pricing;

pub use airplane::{Airplane, AirplaneError, AirplaneRecord};
pub use flight::{Flight, FlightCatalog, FlightId, PairMatch};
pub use ticket::{Ticket, TicketId, TicketPool, TicketStatus};
pub use pricing::{PricingConfig, PricingPolicy, StandardPricing};

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Duplicate flight id: {0}")]
    DuplicateFlight(FlightId),

    #[error("Duplicate ticket id: {0}")]
    DuplicateTicket(TicketId),

    #[error("Invalid ticket transition for {id}: {from:?} -> {to:?}")]
    InvalidTransition {
        id: TicketId,
        from: TicketStatus,
        to: TicketStatus,
    },

    #[error("Invalid price for ticket {id}: {price}")]
    InvalidPrice { id: TicketId, price: i32 },

    #[error(transparent)]
    Airplane(#[from] AirplaneError),
}

pub type CatalogResult<T> = Result<T, CatalogError>;
