use aerodesk_booking::{BookingError, BookingOutcome, Counter, ErrorKind, Route, ScriptedInput};
use aerodesk_catalog::{Airplane, Flight, FlightCatalog, StandardPricing, Ticket, TicketPool};
use aerodesk_core::{CityName, FareClass, PassengerDetails, PaymentDetails};

fn passenger(age: i32) -> ScriptedInput {
    ScriptedInput::new(
        PassengerDetails {
            first_name: "Grace".to_string(),
            last_name: "Hopper".to_string(),
            age,
            gender: "Woman".to_string(),
            email: "grace@navy.mil".to_string(),
            phone: "0298765432".to_string(),
            passport: "GH1906".to_string(),
        },
        PaymentDetails {
            card_number: "4000000000000002".to_string(),
            security_code: 456,
        },
    )
}

fn flight(id: u32, from: &str, to: &str, business: u32, economy: u32) -> Flight {
    Flight::new(
        id,
        CityName::parse(from).unwrap(),
        CityName::parse(to).unwrap(),
        Airplane::new(id * 100, "Boeing 787", business, economy, 8).unwrap(),
    )
}

fn counter(flights: Vec<Flight>, tickets: Vec<Ticket>) -> Counter {
    Counter::new(
        FlightCatalog::new(flights).unwrap(),
        TicketPool::new(tickets).unwrap(),
        StandardPricing::default(),
    )
}

fn economy_left(counter: &Counter, flight_id: u32) -> u32 {
    counter
        .catalog()
        .get(flight_id)
        .unwrap()
        .airplane
        .as_ref()
        .unwrap()
        .economy_remaining()
}

#[test]
fn test_direct_purchase_end_to_end() {
    let mut counter = counter(
        vec![flight(1, "Sydney", "Melbourne", 2, 5)],
        vec![Ticket::new(10, 1, FareClass::Economy, 1000)],
    );

    let outcome = counter
        .choose_ticket("Sydney", "Melbourne", &mut passenger(40))
        .unwrap();

    let BookingOutcome::Booked(receipt) = outcome else {
        panic!("expected the ticket to be booked");
    };
    assert_eq!(receipt.total, 1120);
    assert_eq!(economy_left(&counter, 1), 4);
    assert!(counter.tickets().get(10).unwrap().is_booked());
}

#[test]
fn test_transfer_purchase_end_to_end() {
    let mut counter = counter(
        vec![
            flight(1, "Melbourne", "Sydney", 0, 7),
            flight(2, "Sydney", "Perth", 0, 7),
        ],
        vec![
            Ticket::new(10, 1, FareClass::Economy, 300),
            Ticket::new(20, 2, FareClass::Economy, 500),
        ],
    );

    let route = counter.resolve("Melbourne", "Perth").unwrap();
    assert_eq!(
        route,
        Route::Transfer {
            first_flight: 1,
            second_flight: 2,
            via: CityName::parse("Sydney").unwrap(),
            first_ticket: 10,
            second_ticket: 20,
        }
    );

    // Child fare: half price on both legs before tax
    let mut input = passenger(10);
    let outcome = counter.choose_ticket("Melbourne", "Perth", &mut input).unwrap();
    let BookingOutcome::Booked(receipt) = outcome else {
        panic!("expected the transfer to be booked");
    };

    assert_eq!(receipt.ticket_ids(), vec![10, 20]);
    assert_eq!(receipt.total, 168 + 280);
    assert_eq!(input.details_requests, 1);
    assert_eq!(economy_left(&counter, 1), 6);
    assert_eq!(economy_left(&counter, 2), 6);

    let summary = counter.show_ticket().unwrap().to_string();
    assert!(summary.contains("You have bought a ticket for flight Melbourne - Sydney"));
    assert!(summary.contains("You have bought a ticket for flight Sydney - Perth"));

    // Both legs are gone, so the same trip can no longer be routed
    let err = counter.resolve("Melbourne", "Perth").unwrap_err();
    assert!(matches!(err, BookingError::NoPossibleRoute { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);
}

#[test]
fn test_rejections_leave_catalog_untouched() {
    let mut counter = counter(
        vec![flight(1, "Brisbane", "Cairns", 0, 7)],
        vec![
            Ticket::new(10, 1, FareClass::Business, 800),
            Ticket::new(11, 1, FareClass::Economy, 200),
        ],
    );

    let err = counter.buy_ticket(10, &mut passenger(30)).unwrap_err();
    assert!(matches!(
        err,
        BookingError::NoSeatsAvailable {
            class: FareClass::Business,
            ..
        }
    ));

    let err = counter.buy_ticket(42, &mut passenger(30)).unwrap_err();
    assert_eq!(err.to_string(), "This ticket does not exist: 42");
    assert_eq!(err.kind(), ErrorKind::NotFound);

    let err = counter
        .choose_ticket("Brisbane123", "Cairns", &mut passenger(30))
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let outcome = counter
        .choose_ticket("Brisbane", "Cairns", &mut passenger(30).selecting(11).declining_purchase())
        .unwrap();
    assert!(matches!(outcome, BookingOutcome::Declined));

    assert_eq!(economy_left(&counter, 1), 7);
    assert_eq!(counter.tickets().available().count(), 2);
    assert!(matches!(counter.show_ticket(), Err(BookingError::NoFlightDetails)));
}

#[test]
fn test_senior_travels_free() {
    let mut counter = counter(
        vec![flight(1, "Hobart", "Adelaide", 7, 7)],
        vec![Ticket::new(10, 1, FareClass::Business, 1500)],
    );

    let receipt = counter.buy_ticket(10, &mut passenger(72)).unwrap();
    assert_eq!(receipt.total, 0);
    assert_eq!(receipt.legs[0].seats_left, 6);
}
