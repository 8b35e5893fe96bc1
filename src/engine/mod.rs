//! Change dispensing engine.
//!
//! The engine owns the coin inventory and answers change requests with the
//! coins to hand back. A request either dispenses exactly the change owed or
//! fails with a reason and leaves the inventory untouched.
//! Also supports an async stream of requests.

use tokio_stream::{Stream, StreamExt};
use tracing::{error, info};

use crate::Money;
use crate::catalog::{Catalog, Currency};
use crate::model::{ChangeRequest, CoinCount, CoinStack, Denomination, Receipt};

mod allocator;
pub use allocator::{Allocation, allocate};

mod feasibility;
pub use feasibility::can_exactly_cover;

mod inventory;
pub use inventory::Inventory;

mod error;
pub use error::{AllocationError, DispenseError, InventoryError};

/// Coins per denomination a freshly built machine holds.
pub const DEFAULT_STOCK: CoinCount = 10;

/// The change dispensing engine.
///
/// Holds a read-only catalog and the only mutable copy of the inventory.
pub struct Engine {
    catalog: Catalog,
    inventory: Inventory,
}

/// Public API
impl Engine {
    pub fn new(currency: Currency, stock: CoinCount) -> Self {
        Self::with_catalog(Catalog::for_currency(currency), stock)
    }

    pub fn with_catalog(catalog: Catalog, stock: CoinCount) -> Self {
        let inventory = Inventory::new(&catalog, stock);
        Self { catalog, inventory }
    }

    /// Run the engine over a stream of requests, handing each outcome to `sink`.
    pub async fn run(
        &mut self,
        mut stream: impl Stream<Item = ChangeRequest> + Unpin,
        mut sink: impl FnMut(Receipt),
    ) {
        while let Some(request) = stream.next().await {
            // a failed request must not stop the engine
            let result = self.apply(&request);
            sink(Receipt {
                request: request.id,
                change: request.required_change(),
                result,
            });
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Face value of every coin in the machine.
    pub fn total_value(&self) -> Money {
        self.inventory.total_value()
    }

    /// Snapshot of the coin stacks, largest denomination first.
    pub fn inventory_report(&self) -> Vec<CoinStack> {
        self.inventory.stacks().to_vec()
    }

    /// Set absolute counts for the listed denominations.
    pub fn restock(&mut self, stacks: &[CoinStack]) -> Result<(), InventoryError> {
        self.inventory.replace_all(stacks)?;
        info!(
            stacks = stacks.len(),
            total = %self.inventory.total_value(),
            "inventory restocked"
        );
        Ok(())
    }

    /// Change owed for a purchase paid with `tender`.
    pub fn required_change(purchase: Money, tender: Money) -> Result<Money, DispenseError> {
        tender
            .checked_sub(purchase)
            .ok_or(DispenseError::InsufficientTender {
                shortfall: purchase.saturating_sub(tender),
            })
    }

    /// Dispense the change for one purchase:
    /// - Ensure the tender covers the purchase
    /// - Ensure the machine holds enough value
    /// - Ensure some combination of stocked coins makes the exact change
    /// - Allocate greedily, then take the coins out of the inventory
    pub fn dispense(
        &mut self,
        purchase: Money,
        tender: Money,
    ) -> Result<Vec<Denomination>, DispenseError> {
        let change = Self::required_change(purchase, tender)?;

        let total = self.inventory.total_value();
        if change > total {
            return Err(DispenseError::InsufficientChangeInMachine {
                missing: change.saturating_sub(total),
            });
        }

        if !can_exactly_cover(change, self.inventory.stacks()) {
            return Err(DispenseError::InsufficientDenominationMix { change });
        }

        let allocation = allocate(change, self.inventory.stacks())
            .map_err(|_| DispenseError::InsufficientDenominationMix { change })?;

        if let Err(e) = self.inventory.commit(&allocation) {
            error!(change = %change, reason = %e, "allocation rejected by inventory");
            return Err(e.into());
        }

        Ok(allocation.coins)
    }

    /// Dispense for a single request and log the outcome
    pub fn apply(&mut self, request: &ChangeRequest) -> Result<Vec<Denomination>, DispenseError> {
        let result = self.dispense(request.purchase, request.tender);
        match &result {
            Ok(coins) => {
                info!(
                    request = request.id,
                    purchase = %request.purchase,
                    tender = %request.tender,
                    coins = ?coins,
                    "dispense applied"
                );
            }
            Err(e) => {
                info!(
                    request = request.id,
                    purchase = %request.purchase,
                    tender = %request.tender,
                    reason = %e,
                    "dispense skipped"
                );
            }
        }
        result
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(Currency::default(), DEFAULT_STOCK)
    }
}
