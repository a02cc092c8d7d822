//! Local state changes triggered from detail views
//!
//! These mutate the in-memory entity the way a detail page does before the
//! change is sent to the backend. Nothing here talks to the network.

use crate::types::{Order, OrderStatus, Payment, PaymentStatus, Subscription, SubscriptionStatus};
use crate::{Error, Result};
use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use tracing::debug;

fn transition(from: impl ToString, to: impl ToString) -> Error {
    Error::InvalidTransition {
        from: from.to_string(),
        to: to.to_string(),
    }
}

impl Subscription {
    /// Cancel an active or pending subscription
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] for expired or already canceled
    /// subscriptions.
    pub fn cancel(&mut self) -> Result<()> {
        match self.status {
            SubscriptionStatus::Active | SubscriptionStatus::Pending => {
                debug!(subscription = %self.id, from = %self.status, "canceling subscription");
                self.status = SubscriptionStatus::Canceled;
                self.auto_renew = false;
                Ok(())
            }
            status => Err(transition(status, SubscriptionStatus::Canceled)),
        }
    }

    /// Extend the subscription by `months` and mark it active
    ///
    /// The extension starts from the later of the current end date and
    /// `today`, so a lapsed subscription does not get back-dated time.
    ///
    /// # Errors
    ///
    /// Returns a validation error when `months` is zero or the new end date
    /// is out of range.
    pub fn renew(&mut self, months: u32, today: NaiveDate) -> Result<NaiveDate> {
        if months == 0 {
            return Err(Error::validation("months", "must be at least 1"));
        }

        let base = self.end_date.max(today);
        let end = base
            .checked_add_months(Months::new(months))
            .ok_or_else(|| Error::validation("months", "end date out of range"))?;

        if self.end_date < today {
            self.start_date = today;
        }
        self.end_date = end;
        self.status = SubscriptionStatus::Active;
        debug!(subscription = %self.id, %end, "renewed subscription");
        Ok(end)
    }

    /// Append a payment to the history
    pub fn record_payment(&mut self, payment: Payment) {
        if payment.status == PaymentStatus::Paid && self.status == SubscriptionStatus::Pending {
            self.status = SubscriptionStatus::Active;
        }
        self.payments.push(payment);
    }

    /// Sum of settled payments
    pub fn total_paid(&self) -> Decimal {
        self.payments
            .iter()
            .filter(|p| p.status == PaymentStatus::Paid)
            .map(|p| p.amount)
            .sum()
    }

    /// Whether the end date lies before `today`
    pub fn is_expired(&self, today: NaiveDate) -> bool {
        self.end_date < today
    }

    /// Flip a lapsed active subscription to expired; returns whether it changed
    pub fn refresh_status(&mut self, today: NaiveDate) -> bool {
        if self.status == SubscriptionStatus::Active && self.is_expired(today) {
            self.status = SubscriptionStatus::Expired;
            return true;
        }
        false
    }
}

impl OrderStatus {
    /// Next step in the fulfilment pipeline
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Pending => Some(Self::Processing),
            Self::Processing => Some(Self::Shipped),
            Self::Shipped => Some(Self::Delivered),
            Self::Delivered | Self::Canceled => None,
        }
    }

    /// Whether the order can still be canceled
    pub const fn is_cancelable(self) -> bool {
        matches!(self, Self::Pending | Self::Processing)
    }
}

impl Order {
    /// Move the order one step along pending, processing, shipped, delivered
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] for delivered or canceled orders.
    pub fn advance_status(&mut self) -> Result<OrderStatus> {
        let next = self
            .status
            .next()
            .ok_or_else(|| transition(self.status, "next"))?;
        debug!(order = %self.id, from = %self.status, to = %next, "advancing order");
        self.status = next;
        Ok(next)
    }

    /// Cancel an order that has not shipped yet
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidTransition`] once the order has shipped.
    pub fn cancel(&mut self) -> Result<()> {
        if !self.status.is_cancelable() {
            return Err(transition(self.status, OrderStatus::Canceled));
        }
        self.status = OrderStatus::Canceled;
        if self.payment_status == PaymentStatus::Paid {
            self.payment_status = PaymentStatus::Refunded;
        }
        Ok(())
    }

    /// Attach a carrier tracking number
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank number.
    pub fn set_tracking(&mut self, number: &str) -> Result<()> {
        let number = number.trim();
        if number.is_empty() {
            return Err(Error::validation("trackingNumber", "Tracking number is required"));
        }
        self.tracking_number = Some(number.to_string());
        Ok(())
    }
}
