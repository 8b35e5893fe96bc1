pub mod catalog;
pub mod config;
pub mod csv;
pub mod engine;
pub mod model;
pub mod money;

pub use catalog::{Catalog, Currency};
pub use engine::{DispenseError, Engine};
pub use model::{ChangeRequest, CoinCount, CoinStack, Denomination, Receipt, RequestId};
pub use money::Money;
