use aerodesk_core::CityName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

use crate::airplane::Airplane;
use crate::{CatalogError, CatalogResult};

pub type FlightId = u32;

/// A scheduled flight and the airplane that operates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flight {
    pub id: FlightId,
    #[serde(default)]
    pub flight_number: String,
    pub origin: CityName,
    pub destination: CityName,
    #[serde(default)]
    pub departure_time: Option<DateTime<Utc>>,
    #[serde(default)]
    pub airplane: Option<Airplane>,
}

impl Flight {
    pub fn new(id: FlightId, origin: CityName, destination: CityName, airplane: Airplane) -> Self {
        Self {
            id,
            flight_number: String::new(),
            origin,
            destination,
            departure_time: None,
            airplane: Some(airplane),
        }
    }
}

impl fmt::Display for Flight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Flight {}", self.id)?;
        if !self.flight_number.is_empty() {
            write!(f, " ({})", self.flight_number)?;
        }
        write!(f, ": {} -> {}", self.origin, self.destination)?;
        if let Some(departure) = self.departure_time {
            write!(f, " departing {}", departure.format("%Y-%m-%d %H:%M UTC"))?;
        }
        Ok(())
    }
}

/// Which way round the endpoint-pair lookup compares its arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMatch {
    /// `between(a, b)` finds a flight departing `a` and landing at `b`.
    #[default]
    Forward,
    /// `between(a, b)` finds a flight departing `b` and landing at `a`,
    /// as the legacy counter did.
    Reversed,
}

impl PairMatch {
    fn matches(self, flight: &Flight, city1: &CityName, city2: &CityName) -> bool {
        match self {
            PairMatch::Forward => flight.origin == *city1 && flight.destination == *city2,
            PairMatch::Reversed => flight.origin == *city2 && flight.destination == *city1,
        }
    }
}

/// Ordered flight catalog with an id index.
#[derive(Debug, Clone, Default)]
pub struct FlightCatalog {
    flights: Vec<Flight>,
    index: HashMap<FlightId, usize>,
    pair_match: PairMatch,
}

impl FlightCatalog {
    pub fn new(flights: Vec<Flight>) -> CatalogResult<Self> {
        let mut catalog = Self::default();
        for flight in flights {
            catalog.insert(flight)?;
        }
        tracing::debug!("Loaded flight catalog with {} flights", catalog.len());
        Ok(catalog)
    }

    pub fn with_pair_match(mut self, pair_match: PairMatch) -> Self {
        self.pair_match = pair_match;
        self
    }

    pub fn pair_match(&self) -> PairMatch {
        self.pair_match
    }

    /// Append a flight; ids must be unique.
    pub fn insert(&mut self, flight: Flight) -> CatalogResult<()> {
        if self.index.contains_key(&flight.id) {
            return Err(CatalogError::DuplicateFlight(flight.id));
        }
        self.index.insert(flight.id, self.flights.len());
        self.flights.push(flight);
        Ok(())
    }

    pub fn get(&self, id: FlightId) -> Option<&Flight> {
        self.index.get(&id).map(|&i| &self.flights[i])
    }

    pub fn get_mut(&mut self, id: FlightId) -> Option<&mut Flight> {
        self.index.get(&id).map(|&i| &mut self.flights[i])
    }

    /// Every flight landing at `city`, in catalog order.
    pub fn arriving_at<'a>(&'a self, city: &'a CityName) -> impl Iterator<Item = &'a Flight> + 'a {
        self.flights.iter().filter(move |f| f.destination == *city)
    }

    /// The most recently inserted flight landing at `city`.
    pub fn last_arriving_at(&self, city: &CityName) -> Option<&Flight> {
        self.flights.iter().rfind(|f| f.destination == *city)
    }

    /// Endpoint-pair lookup, compared according to [`PairMatch`].
    ///
    /// When several flights match, the most recently inserted one wins.
    pub fn between(&self, city1: &CityName, city2: &CityName) -> Option<&Flight> {
        let found = self
            .flights
            .iter()
            .filter(|f| self.pair_match.matches(f, city1, city2))
            .last();

        tracing::debug!(
            "Pair lookup {} / {} ({:?}): {:?}",
            city1,
            city2,
            self.pair_match,
            found.map(|f| f.id)
        );
        found
    }

    pub fn iter(&self) -> impl Iterator<Item = &Flight> {
        self.flights.iter()
    }

    pub fn len(&self) -> usize {
        self.flights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flights.is_empty()
    }
}
