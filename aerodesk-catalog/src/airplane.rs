use aerodesk_core::FareClass;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

pub const SEATS_PER_ROW: u32 = 7;
pub const MIN_PASSENGER_SEATS: u32 = 7;
pub const MAX_PASSENGER_SEATS: u32 = 70;

/// Airplane as it appears in a catalog fixture.
///
/// The remaining counters are optional; a fresh fixture leaves them out and every seat is free.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirplaneRecord {
    pub id: u32,
    pub model: String,
    pub business_seats: u32,
    pub economy_seats: u32,
    #[serde(default)]
    pub crew_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_remaining: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub economy_remaining: Option<u32>,
}

/// Seat inventory of the aircraft operating a flight.
///
/// Capacity is fixed at construction and must fill whole rows of seven.
/// Remaining counters only move through [`Airplane::take_seat`] and
/// [`Airplane::release_seat`] (or the bounded setters) and never leave `0..=capacity`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AirplaneRecord", into = "AirplaneRecord")]
pub struct Airplane {
    id: u32,
    model: String,
    business_capacity: u32,
    economy_capacity: u32,
    business_remaining: u32,
    economy_remaining: u32,
    crew_seats: u32,
}

impl Airplane {
    pub fn new(
        id: u32,
        model: impl Into<String>,
        business_seats: u32,
        economy_seats: u32,
        crew_seats: u32,
    ) -> Result<Self, AirplaneError> {
        let model = model.into();

        if id == 0 {
            return Err(AirplaneError::InvalidId(id));
        }
        if model.trim().is_empty() {
            return Err(AirplaneError::BlankModel);
        }

        let invalid = AirplaneError::InvalidCapacity {
            business: business_seats,
            economy: economy_seats,
        };
        let total = business_seats.checked_add(economy_seats).ok_or(invalid.clone())?;
        if !(MIN_PASSENGER_SEATS..=MAX_PASSENGER_SEATS).contains(&total) || total % SEATS_PER_ROW != 0 {
            return Err(invalid);
        }

        Ok(Self {
            id,
            model,
            business_capacity: business_seats,
            economy_capacity: economy_seats,
            business_remaining: business_seats,
            economy_remaining: economy_seats,
            crew_seats,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn crew_seats(&self) -> u32 {
        self.crew_seats
    }

    pub fn business_remaining(&self) -> u32 {
        self.business_remaining
    }

    pub fn economy_remaining(&self) -> u32 {
        self.economy_remaining
    }

    pub fn capacity(&self, class: FareClass) -> u32 {
        match class {
            FareClass::Business => self.business_capacity,
            FareClass::Economy => self.economy_capacity,
        }
    }

    pub fn remaining(&self, class: FareClass) -> u32 {
        match class {
            FareClass::Business => self.business_remaining,
            FareClass::Economy => self.economy_remaining,
        }
    }

    pub fn has_seat(&self, class: FareClass) -> bool {
        self.remaining(class) > 0
    }

    pub fn set_business_remaining(&mut self, value: u32) -> Result<(), AirplaneError> {
        self.set_remaining(FareClass::Business, value)
    }

    pub fn set_economy_remaining(&mut self, value: u32) -> Result<(), AirplaneError> {
        self.set_remaining(FareClass::Economy, value)
    }

    fn set_remaining(&mut self, class: FareClass, value: u32) -> Result<(), AirplaneError> {
        let capacity = self.capacity(class);
        if value > capacity {
            return Err(AirplaneError::AboveCapacity { class, value, capacity });
        }

        match class {
            FareClass::Business => self.business_remaining = value,
            FareClass::Economy => self.economy_remaining = value,
        }
        Ok(())
    }

    /// Sell one seat in `class`, returning what is left.
    pub fn take_seat(&mut self, class: FareClass) -> Result<u32, AirplaneError> {
        let remaining = self.remaining(class);
        if remaining == 0 {
            return Err(AirplaneError::SeatsExhausted(class));
        }
        self.set_remaining(class, remaining - 1)?;
        Ok(remaining - 1)
    }

    /// Return one previously sold seat in `class`.
    pub fn release_seat(&mut self, class: FareClass) -> Result<u32, AirplaneError> {
        let remaining = self.remaining(class) + 1;
        self.set_remaining(class, remaining)?;
        Ok(remaining)
    }

    /// Row letter to seat labels, seven seats per row, business rows first.
    pub fn seat_rows(&self) -> BTreeMap<char, Vec<String>> {
        let rows = (self.business_capacity + self.economy_capacity) / SEATS_PER_ROW;

        (0..rows)
            .map(|row| {
                let letter = char::from(b'A' + row as u8);
                let seats = (1..=SEATS_PER_ROW).map(|n| format!("{letter}{n}")).collect();
                (letter, seats)
            })
            .collect()
    }
}

impl TryFrom<AirplaneRecord> for Airplane {
    type Error = AirplaneError;

    fn try_from(record: AirplaneRecord) -> Result<Self, Self::Error> {
        let mut airplane = Airplane::new(
            record.id,
            record.model,
            record.business_seats,
            record.economy_seats,
            record.crew_seats,
        )?;
        if let Some(value) = record.business_remaining {
            airplane.set_business_remaining(value)?;
        }
        if let Some(value) = record.economy_remaining {
            airplane.set_economy_remaining(value)?;
        }
        Ok(airplane)
    }
}

impl From<Airplane> for AirplaneRecord {
    fn from(airplane: Airplane) -> Self {
        Self {
            id: airplane.id,
            model: airplane.model,
            business_seats: airplane.business_capacity,
            economy_seats: airplane.economy_capacity,
            crew_seats: airplane.crew_seats,
            business_remaining: Some(airplane.business_remaining),
            economy_remaining: Some(airplane.economy_remaining),
        }
    }
}

impl fmt::Display for Airplane {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Airplane {} ({}): business {}/{}, economy {}/{}, crew {}",
            self.id,
            self.model,
            self.business_remaining,
            self.business_capacity,
            self.economy_remaining,
            self.economy_capacity,
            self.crew_seats
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AirplaneError {
    #[error("Airplane id must be positive (got {0})")]
    InvalidId(u32),

    #[error("Airplane model cannot be blank")]
    BlankModel,

    #[error(
        "Passenger seats must be a multiple of 7 between 7 and 70 (got {business} business and {economy} economy)"
    )]
    InvalidCapacity { business: u32, economy: u32 },

    #[error("Cannot set {class} seats to {value}: capacity is {capacity}")]
    AboveCapacity {
        class: FareClass,
        value: u32,
        capacity: u32,
    },

    #[error("No {0} class seats available")]
    SeatsExhausted(FareClass),
}
