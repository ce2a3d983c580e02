//! JSON shapes printed on stdout.

use serde::Serialize;
use shoecart_core::CartTotals;
use shoecart_store::CartSnapshot;

/// A snapshot plus its derived totals.
#[derive(Debug, Serialize)]
pub struct CartView<'a> {
    #[serde(flatten)]
    snapshot: &'a CartSnapshot,
    totals: CartTotals,
}

impl<'a> CartView<'a> {
    pub fn new(snapshot: &'a CartSnapshot) -> Self {
        CartView {
            snapshot,
            totals: snapshot.totals(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Result of `clear-storage`.
#[derive(Debug, Serialize)]
pub struct ClearedView<'a> {
    key: &'a str,
    cleared: bool,
}

impl<'a> ClearedView<'a> {
    pub fn new(key: &'a str, cleared: bool) -> Self {
        ClearedView { key, cleared }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
