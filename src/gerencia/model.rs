use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;
use tracing::warn;
use uuid::Uuid;

/// Quantity below which a product counts as low stock.
pub const LOW_STOCK_THRESHOLD: u32 = 10;

/// Quantity treated as a "full" shelf when computing the fill level.
pub const STOCK_IDEAL_QUANTITY: u32 = 50;

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "nome", default)]
    pub name: String,
    pub email: String,
    #[serde(rename = "cpfCnpj", default)]
    pub tax_id: String,
    #[serde(rename = "telefone", default)]
    pub phone: String,
    // Stored in plain text, same as the data files we read.
    #[serde(rename = "senha")]
    pub secret: String,
    #[serde(rename = "dataCadastro", default)]
    pub registered_at: DateTime<Utc>,
}

impl User {
    pub fn new(name: String, email: String, tax_id: String, phone: String, secret: String) -> Self {
        Self {
            name,
            email,
            tax_id,
            phone,
            secret,
            registered_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    #[serde(rename = "nome", default)]
    pub name: String,
    #[serde(rename = "preco", default, deserialize_with = "lenient_price")]
    pub price: f64,
    #[serde(rename = "quantidade", default, deserialize_with = "lenient_quantity")]
    pub quantity: u32,
}

impl Product {
    pub fn new(name: String, price: f64, quantity: u32) -> Self {
        Self {
            id: new_id(),
            name,
            price,
            quantity,
        }
    }

    pub fn status(&self) -> StockStatus {
        StockStatus::from_quantity(self.quantity)
    }

    /// Value of the units on hand (`price * quantity`).
    pub fn total_value(&self) -> f64 {
        self.price * f64::from(self.quantity)
    }

    /// Fill level in percent, capped at 100.
    pub fn fill_percent(&self) -> f64 {
        let ratio = f64::from(self.quantity) / f64::from(STOCK_IDEAL_QUANTITY);
        (ratio * 100.0).min(100.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StockStatus {
    OutOfStock,
    LowStock,
    Available,
}

impl StockStatus {
    pub fn from_quantity(quantity: u32) -> Self {
        match quantity {
            0 => StockStatus::OutOfStock,
            q if q < LOW_STOCK_THRESHOLD => StockStatus::LowStock,
            _ => StockStatus::Available,
        }
    }
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StockStatus::OutOfStock => "Out of stock",
            StockStatus::LowStock => "Low stock",
            StockStatus::Available => "Available",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MovementKind {
    #[serde(rename = "receber")]
    Receivable,
    #[serde(rename = "pagar")]
    Payable,
}

impl MovementKind {
    /// Name used in storage and in the exported report.
    pub fn as_stored(&self) -> &'static str {
        match self {
            MovementKind::Receivable => "receber",
            MovementKind::Payable => "pagar",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovementKind::Receivable => f.write_str("receivable"),
            MovementKind::Payable => f.write_str("payable"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movement {
    pub id: String,
    #[serde(rename = "descricao", default)]
    pub description: String,
    #[serde(rename = "valor", default, deserialize_with = "lenient_amount")]
    pub amount: f64,
    #[serde(rename = "tipo")]
    pub kind: MovementKind,
    #[serde(rename = "data", default)]
    pub created_at: DateTime<Utc>,
}

impl Movement {
    pub fn new(description: String, amount: f64, kind: MovementKind) -> Self {
        Self {
            id: new_id(),
            description,
            amount,
            kind,
            created_at: Utc::now(),
        }
    }

    /// Amount as a finite number; anything else counts as zero.
    pub fn amount_or_zero(&self) -> f64 {
        if self.amount.is_finite() {
            self.amount
        } else {
            0.0
        }
    }
}

/// The authenticated user of this client, if any.
///
/// Passed explicitly across the API instead of living in global state.
/// Lifecycle: `Anonymous` -> `Authenticated` (login/restore) -> `Anonymous` (logout).
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Session {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        match self {
            Session::Authenticated(user) => Some(user),
            Session::Anonymous => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Session::Authenticated(_))
    }
}

// --- Lenient numeric decoding ---
//
// Stored records may carry numbers as strings, `null` (NaN after a JSON
// round trip) or garbage. These decode to zero instead of
// rejecting the whole record.

fn number_or_zero(value: &Value) -> f64 {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match parsed {
        Some(n) if n.is_finite() => n,
        _ => {
            warn!(value = %value, "malformed numeric field, using 0");
            0.0
        }
    }
}

fn lenient_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(number_or_zero(&value))
}

fn lenient_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let price = number_or_zero(&value);
    if price < 0.0 {
        warn!(price, "negative price in stored record, using 0");
        return Ok(0.0);
    }
    Ok(price)
}

fn lenient_quantity<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let quantity = number_or_zero(&value).trunc();
    if quantity < 0.0 {
        warn!(quantity, "negative quantity in stored record, using 0");
        return Ok(0);
    }
    Ok(quantity.min(f64::from(u32::MAX)) as u32)
}
