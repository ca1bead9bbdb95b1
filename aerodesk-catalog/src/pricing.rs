use aerodesk_core::{FareClass, Passenger};
use serde::{Deserialize, Serialize};

use crate::ticket::Ticket;

/// Computes the price a passenger pays for a ticket at commit time.
pub trait PricingPolicy {
    fn final_price(&self, ticket: &Ticket, passenger: &Passenger) -> i32;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Service tax applied after any discount (0.12 = 12%)
    pub service_tax_rate: f64,

    /// Passengers at or below this age get `child_discount`
    pub child_max_age: u8,
    pub child_discount: f64,

    /// Passengers at or above this age get `senior_discount`
    pub senior_min_age: u8,
    pub senior_discount: f64,

    /// Whether age discounts also apply to business fares
    pub discount_business: bool,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            service_tax_rate: 0.12,
            child_max_age: 14,
            child_discount: 0.5,
            senior_min_age: 60,
            senior_discount: 1.0,
            discount_business: true,
        }
    }
}

/// Age discount followed by service tax, rounded to whole currency units.
#[derive(Debug, Clone, Default)]
pub struct StandardPricing {
    config: PricingConfig,
}

impl StandardPricing {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn age_discount(&self, class: FareClass, age: u8) -> f64 {
        if class == FareClass::Business && !self.config.discount_business {
            return 0.0;
        }

        let discount = if age <= self.config.child_max_age {
            self.config.child_discount
        } else if age >= self.config.senior_min_age {
            self.config.senior_discount
        } else {
            0.0
        };

        discount.clamp(0.0, 1.0)
    }
}

impl PricingPolicy for StandardPricing {
    fn final_price(&self, ticket: &Ticket, passenger: &Passenger) -> i32 {
        let discounted =
            ticket.base_price as f64 * (1.0 - self.age_discount(ticket.fare_class, passenger.age()));
        let taxed = discounted * (1.0 + self.config.service_tax_rate.max(0.0));
        taxed.round() as i32
    }
}
