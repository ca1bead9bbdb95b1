use aerodesk_catalog::TicketId;
use aerodesk_core::{CoreError, CoreResult, PassengerDetails, PaymentDetails};
use std::collections::VecDeque;

use crate::resolver::Route;

/// What the customer is asked to confirm before anything is committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchasePreview {
    pub tickets: Vec<TicketId>,
    /// Sum of base fares; discounts and tax are applied at commit
    pub base_total: i32,
}

/// Source of everything the counter asks the customer.
///
/// Implementations may block (the console reads stdin).
pub trait CustomerInput {
    /// First name, last name, age, gender, email, phone and passport, in that order.
    fn passenger_details(&mut self) -> CoreResult<PassengerDetails>;

    /// `Ok(false)` cancels the purchase.
    fn confirm_purchase(&mut self, preview: &PurchasePreview) -> CoreResult<bool>;

    fn payment_details(&mut self) -> CoreResult<PaymentDetails>;

    fn select_ticket(&mut self, offered: &[TicketId]) -> CoreResult<TicketId>;

    /// `Ok(false)` declines the offered transfer itinerary.
    fn confirm_transfer(&mut self, route: &Route) -> CoreResult<bool>;
}

/// Pre-recorded answers, for tests and demos.
#[derive(Debug, Clone)]
pub struct ScriptedInput {
    details: PassengerDetails,
    payment: PaymentDetails,
    confirm_purchase: bool,
    accept_transfer: bool,
    selections: VecDeque<TicketId>,
    pub details_requests: usize,
    pub payment_requests: usize,
    pub previews: Vec<PurchasePreview>,
}

impl ScriptedInput {
    pub fn new(details: PassengerDetails, payment: PaymentDetails) -> Self {
        Self {
            details,
            payment,
            confirm_purchase: true,
            accept_transfer: true,
            selections: VecDeque::new(),
            details_requests: 0,
            payment_requests: 0,
            previews: Vec::new(),
        }
    }

    /// Answer "no" at the purchase confirmation.
    pub fn declining_purchase(mut self) -> Self {
        self.confirm_purchase = false;
        self
    }

    /// Answer "no" when offered a transfer itinerary.
    pub fn declining_transfer(mut self) -> Self {
        self.accept_transfer = false;
        self
    }

    /// Queue a ticket id to pick from a direct-flight offer.
    pub fn selecting(mut self, ticket_id: TicketId) -> Self {
        self.selections.push_back(ticket_id);
        self
    }
}

impl CustomerInput for ScriptedInput {
    fn passenger_details(&mut self) -> CoreResult<PassengerDetails> {
        self.details_requests += 1;
        Ok(self.details.clone())
    }

    fn confirm_purchase(&mut self, preview: &PurchasePreview) -> CoreResult<bool> {
        self.previews.push(preview.clone());
        Ok(self.confirm_purchase)
    }

    fn payment_details(&mut self) -> CoreResult<PaymentDetails> {
        self.payment_requests += 1;
        Ok(self.payment.clone())
    }

    fn select_ticket(&mut self, offered: &[TicketId]) -> CoreResult<TicketId> {
        self.selections
            .pop_front()
            .or_else(|| offered.first().copied())
            .ok_or_else(|| CoreError::InternalError("no ticket to select".to_string()))
    }

    fn confirm_transfer(&mut self, _route: &Route) -> CoreResult<bool> {
        Ok(self.accept_transfer)
    }
}
