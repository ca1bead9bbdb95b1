pub mod error;
pub mod models;
pub mod input;
pub mod resolver;
pub mod commit;
pub mod session;

pub use error::{BookingError, BookingResult, ErrorKind};
pub use models::{BookedLeg, Receipt};
pub use input::{CustomerInput, PurchasePreview, ScriptedInput};
pub use resolver::{Route, RouteResolver};
pub use commit::PurchaseDesk;
pub use session::{BookingOutcome, Counter, HeldTicket, TicketSummary};
