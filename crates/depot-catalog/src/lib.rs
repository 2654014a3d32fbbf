mod catalog;
mod ledger;

pub use catalog::{Catalog, CatalogError};
pub use ledger::{Ledger, LedgerError, UpdateCandidate, LEDGER_NAME};

#[cfg(test)]
mod tests;
