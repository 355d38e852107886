use crate::commands::CmdResult;
use crate::error::Result;
use crate::model::{Movement, Product};
use crate::stats;
use crate::store::{KeyValueStore, RecordStore, MOVEMENTS, PRODUCTS};

/// All products with the stock summary.
pub fn stock<S: KeyValueStore>(store: &RecordStore<S>) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let summary = stats::stock_summary(&products);
    let mut result = CmdResult::default().with_products(products);
    result.stock = Some(summary);
    Ok(result)
}

pub fn dashboard<S: KeyValueStore>(store: &RecordStore<S>) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let movements: Vec<Movement> = store.load(MOVEMENTS);
    Ok(CmdResult {
        dashboard: Some(stats::dashboard_snapshot(&products, &movements)),
        ..Default::default()
    })
}

pub fn report<S: KeyValueStore>(store: &RecordStore<S>, preview_len: usize) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let movements: Vec<Movement> = store.load(MOVEMENTS);
    Ok(CmdResult {
        report: Some(stats::report_rollup(&products, &movements, preview_len)),
        ..Default::default()
    })
}
