//! # Aggregations
//!
//! Pure functions that derive statistics from snapshots of the catalog and the
//! ledger. Nothing here touches storage: callers load the collections and pass
//! slices in, which keeps every view consistent with a single read.
//!
//! Numeric fields have already been repaired by the storage layer (malformed
//! values decode as zero), and amounts are filtered through
//! [`Movement::amount_or_zero`] so one bad record can never poison a total.

use crate::model::{Movement, MovementKind, Product, StockStatus, LOW_STOCK_THRESHOLD};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StockSummary {
    pub total_units: u64,
    pub low_stock_count: usize,
    pub out_of_stock_count: usize,
    pub total_value: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FinancialSummary {
    pub total_receivable: f64,
    pub total_payable: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    pub product_count: usize,
    /// Products under the low-stock threshold, out-of-stock ones included.
    pub low_stock_count: usize,
    pub total_receivable: f64,
    pub total_payable: f64,
}

/// The head of a list plus the exact number of entries left out.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preview<T> {
    pub items: Vec<T>,
    pub remaining: usize,
}

impl<T: Clone> Preview<T> {
    pub fn of(all: &[T], len: usize) -> Self {
        let shown = all.len().min(len);
        Self {
            items: all[..shown].to_vec(),
            remaining: all.len() - shown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRollup {
    pub product_count: usize,
    pub stock_value: f64,
    pub total_receivable: f64,
    pub total_payable: f64,
    pub products: Preview<Product>,
    pub movements: Preview<Movement>,
}

/// One bar of the report overview chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBar {
    pub label: &'static str,
    pub value: i64,
}

pub fn stock_summary(products: &[Product]) -> StockSummary {
    products
        .iter()
        .fold(StockSummary::default(), |mut acc, product| {
            acc.total_units += u64::from(product.quantity);
            acc.total_value += product.total_value();
            match product.status() {
                StockStatus::OutOfStock => acc.out_of_stock_count += 1,
                StockStatus::LowStock => acc.low_stock_count += 1,
                StockStatus::Available => {}
            }
            acc
        })
}

pub fn financial_summary(movements: &[Movement]) -> FinancialSummary {
    let total_receivable = total_for(movements, MovementKind::Receivable);
    let total_payable = total_for(movements, MovementKind::Payable);
    FinancialSummary {
        total_receivable,
        total_payable,
        balance: total_receivable - total_payable,
    }
}

pub fn dashboard_snapshot(products: &[Product], movements: &[Movement]) -> DashboardSnapshot {
    let finance = financial_summary(movements);
    DashboardSnapshot {
        product_count: products.len(),
        low_stock_count: products
            .iter()
            .filter(|p| p.quantity < LOW_STOCK_THRESHOLD)
            .count(),
        total_receivable: finance.total_receivable,
        total_payable: finance.total_payable,
    }
}

pub fn report_rollup(
    products: &[Product],
    movements: &[Movement],
    preview_len: usize,
) -> ReportRollup {
    let stock = stock_summary(products);
    let finance = financial_summary(movements);
    ReportRollup {
        product_count: products.len(),
        stock_value: stock.total_value,
        total_receivable: finance.total_receivable,
        total_payable: finance.total_payable,
        products: Preview::of(products, preview_len),
        movements: Preview::of(movements, preview_len),
    }
}

/// Overview bars, rounded to whole currency units.
pub fn chart_series(rollup: &ReportRollup) -> Vec<ChartBar> {
    vec![
        ChartBar {
            label: "Products",
            value: rollup.product_count as i64,
        },
        ChartBar {
            label: "Stock value",
            value: rollup.stock_value.round() as i64,
        },
        ChartBar {
            label: "Receivable",
            value: rollup.total_receivable.round() as i64,
        },
        ChartBar {
            label: "Payable",
            value: rollup.total_payable.round() as i64,
        },
    ]
}

fn total_for(movements: &[Movement], kind: MovementKind) -> f64 {
    movements
        .iter()
        .filter(|m| m.kind == kind)
        .map(Movement::amount_or_zero)
        .sum()
}
