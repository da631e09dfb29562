//! Cart Sync Client
//!
//! One click, one request, one page patch.

use std::cell::RefCell;
use std::collections::HashMap;

use crate::commands::CartTransport;
use crate::error::CartError;
use crate::models::{MutationAction, MutationOutcome, MutationRequest, MutationResponse};
use crate::view::{CartView, Notice};

/// Per-item request sequence numbers
#[derive(Debug, Default)]
pub struct SequenceTracker {
    issued: HashMap<String, u64>,
    applied: HashMap<String, u64>,
}

impl SequenceTracker {
    /// Allocate the next sequence number for `item_id`
    pub fn next(&mut self, item_id: &str) -> u64 {
        let seq = self.issued.entry(item_id.to_string()).or_insert(0);
        *seq += 1;
        *seq
    }

    /// Record `seq` as applied unless a newer response already was
    pub fn accept(&mut self, item_id: &str, seq: u64) -> bool {
        let applied = self.applied.entry(item_id.to_string()).or_insert(0);
        if seq < *applied {
            return false;
        }
        *applied = seq;
        true
    }
}

/// A request that has been dispatched and awaits its response
#[derive(Debug, Clone)]
pub struct Ticket {
    pub request: MutationRequest,
    pub seq: u64,
}

pub struct CartSyncClient<T, V> {
    transport: T,
    view: V,
    generic_error: String,
    discard_stale: bool,
    sequences: RefCell<SequenceTracker>,
}

impl<T: CartTransport, V: CartView> CartSyncClient<T, V> {
    pub fn new(transport: T, view: V, generic_error: impl Into<String>, discard_stale: bool) -> Self {
        Self {
            transport,
            view,
            generic_error: generic_error.into(),
            discard_stale,
            sequences: RefCell::new(SequenceTracker::default()),
        }
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    /// Validate, send and apply one mutation.
    ///
    /// Every failure is surfaced through [`CartView::notify`] before being
    /// returned. `Ok(None)` means a stale response was dropped.
    pub async fn submit_mutation(
        &self,
        item_id: &str,
        action: &str,
        qty: Option<&str>,
    ) -> Result<Option<MutationOutcome>, CartError> {
        let request = match MutationRequest::parse(item_id, action, qty) {
            Ok(request) => request,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };
        let ticket = self.begin(request);
        let result = self.transport.send(&ticket.request).await;
        self.finish(ticket, result)
    }

    pub(crate) fn begin(&self, request: MutationRequest) -> Ticket {
        let seq = self.sequences.borrow_mut().next(&request.item_id);
        log::info!(
            "[CartSync] {} item {} (seq {})",
            request.action.as_str(),
            request.item_id,
            seq
        );
        Ticket { request, seq }
    }

    pub(crate) fn finish(
        &self,
        ticket: Ticket,
        result: Result<MutationResponse, CartError>,
    ) -> Result<Option<MutationOutcome>, CartError> {
        let Ticket { request, seq } = ticket;

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };
        let cart_count = response.cart_count;
        let product_name = response.product_name.clone();

        let outcome = match response.into_outcome(request.action) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report(&e);
                return Err(e);
            }
        };

        if self.discard_stale && !self.sequences.borrow_mut().accept(&request.item_id, seq) {
            log::debug!("[CartSync] Dropping stale response for item {} (seq {})", request.item_id, seq);
            return Ok(None);
        }

        self.apply(&request, &outcome);
        log::debug!("[CartSync] Applied item {} (seq {}), total {:.2}", request.item_id, seq, outcome.cart_total());
        if let Some(count) = cart_count {
            self.view.set_cart_count(count);
        }
        if request.action == MutationAction::Add {
            if let Some(name) = product_name.filter(|n| !n.trim().is_empty()) {
                self.view.notify(Notice::success(format!("{} added to cart!", name)));
            }
        }
        Ok(Some(outcome))
    }

    fn apply(&self, request: &MutationRequest, outcome: &MutationOutcome) {
        match *outcome {
            MutationOutcome::Removed { cart_total } => {
                self.view.remove_line(&request.item_id);
                self.view.set_total(cart_total);
                if self.view.line_count() == 0 {
                    self.view.show_empty_state();
                }
            }
            MutationOutcome::Updated { qty, item_total, cart_total } => {
                self.view.apply_line_update(&request.item_id, qty, item_total);
                self.view.set_total(cart_total);
            }
            MutationOutcome::Added { cart_total } => {
                self.view.set_total(cart_total);
            }
        }
    }

    fn report(&self, error: &CartError) {
        log::error!("[CartSync] {} ({:?})", error, error.kind());
        self.view.notify(Notice::error(error.user_message(&self.generic_error)));
    }
}
