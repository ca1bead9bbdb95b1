use aerodesk_booking::{BookingOutcome, Counter};
use aerodesk_catalog::PricingPolicy;
use aerodesk_core::CoreResult;
use std::io::{BufRead, Write};
use tracing::{info, warn};

use crate::console::ConsoleInput;

/// Serve customers until one answers "0" to booking another ticket.
pub fn run<P, R, W>(counter: &mut Counter<P>, console: &mut ConsoleInput<R, W>) -> CoreResult<()>
where
    P: PricingPolicy,
    R: BufRead,
    W: Write,
{
    loop {
        let from = console.prompt("Enter the departure city:")?;
        let to = console.prompt("Enter the destination city:")?;

        match counter.choose_ticket(&from, &to, console) {
            Ok(BookingOutcome::Booked(receipt)) => {
                info!("Receipt {} issued for ${}", receipt.id, receipt.total);
                console.say(&receipt)?;
                match counter.show_ticket() {
                    Ok(summary) => console.say(summary)?,
                    Err(err) => console.say(err)?,
                }
            }
            Ok(BookingOutcome::Declined) => console.say("No ticket was purchased.")?,
            Err(err) => {
                warn!("Booking from {} to {} failed: {}", from, to, err);
                console.say(err)?;
            }
        }

        if !console.yes_no("Book another ticket? (1 = yes, 0 = no)")? {
            console.say("Thank you for flying with us.")?;
            return Ok(());
        }
    }
}
