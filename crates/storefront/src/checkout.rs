//! Two-step checkout orchestration.
//!
//! `CheckoutFlow` walks a cart through `Shipping` then `Payment`. Picking a
//! payment method runs the whole tail sequence: initiate the payment, then
//! place the order against the returned payment id. A failure before
//! initiation is retryable; a failure after it leaves a payment with no
//! order behind it, which parks the flow in the terminal `Failed` step
//! until the payment is reconciled manually.

use thiserror::Error;
use tracing::{error, instrument, warn};

use crate::client::StorefrontClient;
use crate::error::ApiError;
use crate::types::{
    CartState, NewShippingAddress, OrderPlaced, OrderRequest, PaymentMethod, ShippingAddress,
};

// =============================================================================
// Errors
// =============================================================================

/// Errors raised while driving the checkout flow.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// The cart has no lines; no payment call is made.
    #[error("Your bag is empty")]
    EmptyBag,
    /// A required contact field is blank.
    #[error("Required field missing: {0}")]
    MissingField(&'static str),
    /// A payment sequence is already in flight for this flow.
    #[error("An order is already being processed")]
    AlreadyProcessing,
    /// A payment method was picked before the flow reached the payment step.
    #[error("Complete the shipping step first")]
    ShippingIncomplete,
    /// Payment was initiated but no order was placed against it.
    #[error(
        "Payment {payment_id} was accepted but the order could not be placed; \
         contact support and quote this payment id"
    )]
    OrphanedPayment { payment_id: String },
    /// The underlying API call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

// =============================================================================
// Flow State
// =============================================================================

/// Where the checkout flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckoutStep {
    /// Collecting the shipping contact.
    Shipping,
    /// Choosing a payment method.
    Payment,
    /// Terminal: a payment exists with no order behind it.
    Failed { payment_id: String },
}

/// Shipping contact details collected during checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub line1: String,
    pub line2: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
    pub notes: String,
}

impl ContactForm {
    /// The first required field that is blank, if any.
    #[must_use]
    pub fn missing_required(&self) -> Option<&'static str> {
        if self.first_name.trim().is_empty() {
            return Some("first name");
        }
        if self.line1.trim().is_empty() {
            return Some("address line 1");
        }
        if self.city.trim().is_empty() {
            return Some("city");
        }
        if self.phone.trim().is_empty() {
            return Some("phone number");
        }
        None
    }

    fn to_address(&self) -> NewShippingAddress {
        NewShippingAddress {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            line1: self.line1.trim().to_owned(),
            line2: optional(&self.line2),
            city: self.city.trim().to_owned(),
            postal_code: optional(&self.postal_code),
            phone: self.phone.trim().to_owned(),
        }
    }

    fn from_address(address: &ShippingAddress) -> Self {
        Self {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            line1: address.line1.clone(),
            line2: address.line2.clone().unwrap_or_default(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone().unwrap_or_default(),
            phone: address.phone.clone(),
            notes: String::new(),
        }
    }
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

// =============================================================================
// CheckoutFlow
// =============================================================================

/// State machine driving a single checkout attempt.
pub struct CheckoutFlow {
    client: StorefrontClient,
    step: CheckoutStep,
    /// Contact form backing the shipping step; edited directly by the UI.
    pub contact: ContactForm,
    addresses: Vec<ShippingAddress>,
    selected_address: Option<String>,
    processing: bool,
}

impl CheckoutFlow {
    /// Start a new flow at the shipping step.
    #[must_use]
    pub fn new(client: StorefrontClient) -> Self {
        Self {
            client,
            step: CheckoutStep::Shipping,
            contact: ContactForm::default(),
            addresses: Vec::new(),
            selected_address: None,
            processing: false,
        }
    }

    /// The current step.
    #[must_use]
    pub fn step(&self) -> &CheckoutStep {
        &self.step
    }

    /// Saved addresses loaded by [`begin`](Self::begin).
    #[must_use]
    pub fn addresses(&self) -> &[ShippingAddress] {
        &self.addresses
    }

    /// Id of the saved address currently backing the contact form.
    #[must_use]
    pub fn selected_address(&self) -> Option<&str> {
        self.selected_address.as_deref()
    }

    /// Whether a payment sequence is in flight.
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.processing
    }

    /// Load saved addresses and seed the contact form from the default one.
    ///
    /// Guests, and signed-in users whose address list cannot be loaded,
    /// continue with manual entry.
    #[instrument(skip(self))]
    pub async fn begin(&mut self) {
        if !self.client.is_authenticated() {
            return;
        }
        match self.client.shipping_addresses().await {
            Ok(addresses) => {
                let seed = addresses
                    .iter()
                    .find(|a| a.is_default)
                    .or_else(|| addresses.first())
                    .cloned();
                if let Some(address) = seed {
                    self.contact = ContactForm::from_address(&address);
                    self.selected_address = Some(address.id);
                }
                self.addresses = addresses;
            }
            Err(err) => {
                warn!(error = %err, "failed to load saved addresses; falling back to manual entry");
            }
        }
    }

    /// Seed the contact form from a previously loaded saved address.
    ///
    /// Returns `false` when no loaded address has that id.
    pub fn select_address(&mut self, id: &str) -> bool {
        let Some(address) = self.addresses.iter().find(|a| a.id == id) else {
            return false;
        };
        self.contact = ContactForm::from_address(address);
        self.selected_address = Some(address.id.clone());
        true
    }

    /// Validate the form, save it as a new address, and select it.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` before any request when a required field is
    /// blank, or an API error if the save fails.
    #[instrument(skip_all)]
    pub async fn save_address(&mut self, form: ContactForm) -> Result<(), CheckoutError> {
        if let Some(field) = form.missing_required() {
            return Err(CheckoutError::MissingField(field));
        }

        let created = self
            .client
            .create_shipping_address(&form.to_address())
            .await?;
        self.contact = form;

        let refreshed = self.client.shipping_addresses().await;
        self.finish_save_address(refreshed, created);
        Ok(())
    }

    /// Apply the post-save refresh. When the refresh fails, the created
    /// address is appended so the selected id still resolves against
    /// [`addresses`](Self::addresses).
    fn finish_save_address(
        &mut self,
        refreshed: Result<Vec<ShippingAddress>, ApiError>,
        created: ShippingAddress,
    ) {
        self.selected_address = Some(created.id.clone());
        match refreshed {
            Ok(addresses) => self.addresses = addresses,
            Err(err) => {
                warn!(error = %err, "failed to refresh addresses after save; appending locally");
                self.addresses.push(created);
            }
        }
    }

    /// Advance from shipping to payment.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when the contact form is incomplete, or
    /// `OrphanedPayment` when the flow has already failed terminally.
    pub fn proceed_to_payment(&mut self) -> Result<(), CheckoutError> {
        if let CheckoutStep::Failed { payment_id } = &self.step {
            return Err(CheckoutError::OrphanedPayment {
                payment_id: payment_id.clone(),
            });
        }
        if let Some(field) = self.contact.missing_required() {
            return Err(CheckoutError::MissingField(field));
        }
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Return from payment to the shipping step.
    pub fn back(&mut self) {
        if self.step == CheckoutStep::Payment {
            self.step = CheckoutStep::Shipping;
        }
    }

    /// Pick a payment method and run the payment-then-order sequence.
    ///
    /// # Errors
    ///
    /// Local guards reject re-entry, a terminally failed flow, a flow that
    /// has not reached the payment step, an empty bag, and an incomplete
    /// contact form before anything is sent. A payment initiation failure
    /// is retryable; an order placement failure after initiation surfaces
    /// `OrphanedPayment` and parks the flow in `Failed`.
    #[instrument(skip_all, fields(method = %method.code))]
    pub async fn select_payment_method(
        &mut self,
        cart: &CartState,
        method: &PaymentMethod,
    ) -> Result<OrderPlaced, CheckoutError> {
        if self.processing {
            return Err(CheckoutError::AlreadyProcessing);
        }
        if let CheckoutStep::Failed { payment_id } = &self.step {
            return Err(CheckoutError::OrphanedPayment {
                payment_id: payment_id.clone(),
            });
        }
        if self.step != CheckoutStep::Payment {
            return Err(CheckoutError::ShippingIncomplete);
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyBag);
        }
        if let Some(field) = self.contact.missing_required() {
            return Err(CheckoutError::MissingField(field));
        }

        self.processing = true;

        let payment_id = match self.client.initiate_payment(method).await {
            Ok(id) => id,
            Err(err) => {
                self.processing = false;
                return Err(CheckoutError::Api(err));
            }
        };

        let order = OrderRequest {
            payment_id: payment_id.clone(),
            shipping_address: self.contact.to_address(),
            billing_address: self.contact.to_address(),
            currency: cart.currency.clone(),
            notes: optional(&self.contact.notes),
        };

        match self.client.place_order(&order).await {
            Ok(placed) => {
                self.processing = false;
                Ok(placed)
            }
            Err(err) => {
                error!(
                    error = %err,
                    payment_id = %payment_id,
                    "order placement failed after payment initiation"
                );
                self.step = CheckoutStep::Failed {
                    payment_id: payment_id.clone(),
                };
                self.processing = false;
                Err(CheckoutError::OrphanedPayment { payment_id })
            }
        }
    }
}
