use crate::domain::model::CartSummary;
use crate::domain::ports::PaymentStage;
use crate::utils::error::Result;

pub const PAYMENT_ROUTE: &str = "/payment";

/// Signals the payment transition through the log; the actual payment UI
/// lives outside this crate.
#[derive(Debug, Clone)]
pub struct ConsolePaymentStage {
    route: String,
}

impl ConsolePaymentStage {
    pub fn new(route: impl Into<String>) -> Self {
        Self {
            route: route.into(),
        }
    }

    pub fn route(&self) -> &str {
        &self.route
    }
}

impl Default for ConsolePaymentStage {
    fn default() -> Self {
        Self::new(PAYMENT_ROUTE)
    }
}

impl PaymentStage for ConsolePaymentStage {
    fn begin_payment(&self, summary: &CartSummary) -> Result<()> {
        tracing::info!(
            "Navigating to {} with {} lines ({} items)",
            self.route,
            summary.lines.len(),
            summary.item_count
        );
        Ok(())
    }
}
