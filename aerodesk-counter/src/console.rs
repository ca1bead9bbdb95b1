use aerodesk_booking::{CustomerInput, PurchasePreview, Route};
use aerodesk_catalog::TicketId;
use aerodesk_core::{CoreError, CoreResult, PassengerDetails, PaymentDetails};
use std::fmt::Display;
use std::io::{BufRead, Write};

/// Line-oriented customer dialogue over any reader/writer pair (stdin/stdout in the binary).
pub struct ConsoleInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ConsoleInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    pub fn say(&mut self, message: impl Display) -> CoreResult<()> {
        writeln!(self.writer, "{message}").map_err(io_error)
    }

    /// Print `label` and read one trimmed line. End of input is an error.
    pub fn prompt(&mut self, label: &str) -> CoreResult<String> {
        writeln!(self.writer, "{label}").map_err(io_error)?;
        self.writer.flush().map_err(io_error)?;

        let mut line = String::new();
        let read = self.reader.read_line(&mut line).map_err(io_error)?;
        if read == 0 {
            return Err(CoreError::InternalError("input closed".to_string()));
        }
        Ok(line.trim().to_string())
    }

    /// "1" is yes and "0" is no; anything else asks again.
    pub fn yes_no(&mut self, label: &str) -> CoreResult<bool> {
        loop {
            match self.prompt(label)?.as_str() {
                "1" => return Ok(true),
                "0" => return Ok(false),
                other => self.say(format!("Please enter 1 or 0, not '{other}'"))?,
            }
        }
    }

    fn number<T: std::str::FromStr>(&mut self, label: &str, what: &str) -> CoreResult<T> {
        let raw = self.prompt(label)?;
        raw.parse()
            .map_err(|_| CoreError::validation(format!("{what} must be a number")))
    }
}

impl<R: BufRead, W: Write> CustomerInput for ConsoleInput<R, W> {
    fn passenger_details(&mut self) -> CoreResult<PassengerDetails> {
        Ok(PassengerDetails {
            first_name: self.prompt("Enter your first name:")?,
            last_name: self.prompt("Enter your last name:")?,
            age: self.number("Enter your age:", "Age")?,
            gender: self.prompt("Enter your gender (Male, Woman, Non-binary, Other):")?,
            email: self.prompt("Enter your email:")?,
            phone: self.prompt("Enter your phone number:")?,
            passport: self.prompt("Enter your passport number:")?,
        })
    }

    fn confirm_purchase(&mut self, preview: &PurchasePreview) -> CoreResult<bool> {
        let ids: Vec<String> = preview.tickets.iter().map(|id| id.to_string()).collect();
        self.say(format!(
            "Tickets {} with a base fare of ${} (discounts and service tax apply at payment)",
            ids.join(", "),
            preview.base_total
        ))?;
        self.yes_no("Do you want to purchase? (1 = yes, 0 = no)")
    }

    fn payment_details(&mut self) -> CoreResult<PaymentDetails> {
        Ok(PaymentDetails {
            card_number: self.prompt("Enter your card number:")?,
            security_code: self.number("Enter the security code:", "Security code")?,
        })
    }

    fn select_ticket(&mut self, offered: &[TicketId]) -> CoreResult<TicketId> {
        let ids: Vec<String> = offered.iter().map(|id| id.to_string()).collect();
        self.say(format!("Available tickets: {}", ids.join(", ")))?;
        self.number("Enter the ID of the ticket you want to buy:", "Ticket ID")
    }

    fn confirm_transfer(&mut self, route: &Route) -> CoreResult<bool> {
        if let Route::Transfer {
            first_flight,
            second_flight,
            via,
            first_ticket,
            second_ticket,
        } = route
        {
            self.say(format!(
                "No direct flight. Transfer via {via}: flight {first_flight} (ticket {first_ticket}) \
                 then flight {second_flight} (ticket {second_ticket})"
            ))?;
        }
        self.yes_no("Do you want to book this transfer? (1 = yes, 0 = no)")
    }
}

fn io_error(err: std::io::Error) -> CoreError {
    CoreError::InternalError(format!("console I/O failed: {err}"))
}
