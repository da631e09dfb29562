//! Cart Backend Commands
//!
//! Bindings to the cart backend's mutate endpoint.

mod cart;

use async_trait::async_trait;

use crate::error::CartError;
use crate::models::{MutationRequest, MutationResponse};

/// Sends one mutation and returns the decoded response
#[async_trait(?Send)]
pub trait CartTransport {
    async fn send(&self, request: &MutationRequest) -> Result<MutationResponse, CartError>;
}

pub use cart::*;
