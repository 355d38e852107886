use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GerenciaError, Result};
use crate::model::Product;
use crate::store::{KeyValueStore, RecordStore, PRODUCTS};
use tracing::info;

fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(GerenciaError::InvalidField(format!(
            "price must be a non-negative number, got {}",
            price
        )));
    }
    Ok(())
}

pub fn create<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    name: String,
    price: f64,
    quantity: u32,
) -> Result<CmdResult> {
    validate_price(price)?;

    let mut products: Vec<Product> = store.load_for_update(PRODUCTS)?;
    let product = Product::new(name, price, quantity);
    products.push(product.clone());
    store.save(PRODUCTS, &products)?;
    info!(id = %product.id, "created product");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product created: {}",
        product.name
    )));
    Ok(result.with_products(vec![product]))
}

/// Replace every field of a product except its id. Its position is kept.
pub fn update<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    id: &str,
    name: String,
    price: f64,
    quantity: u32,
) -> Result<CmdResult> {
    validate_price(price)?;

    let mut products: Vec<Product> = store.load_for_update(PRODUCTS)?;
    let product = products
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| GerenciaError::not_found(PRODUCTS, id))?;
    product.name = name;
    product.price = price;
    product.quantity = quantity;
    let updated = product.clone();
    store.save(PRODUCTS, &products)?;
    info!(id, "updated product");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product updated: {}",
        updated.name
    )));
    Ok(result.with_products(vec![updated]))
}

pub fn delete<S: KeyValueStore>(store: &mut RecordStore<S>, id: &str) -> Result<CmdResult> {
    let mut products: Vec<Product> = store.load_for_update(PRODUCTS)?;
    let position = products
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| GerenciaError::not_found(PRODUCTS, id))?;
    let removed = products.remove(position);
    store.save(PRODUCTS, &products)?;
    info!(id, "deleted product");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Product deleted: {}",
        removed.name
    )));
    Ok(result.with_products(vec![removed]))
}

pub fn get<S: KeyValueStore>(store: &RecordStore<S>, id: &str) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let product = products
        .into_iter()
        .find(|p| p.id == id)
        .ok_or_else(|| GerenciaError::not_found(PRODUCTS, id))?;
    Ok(CmdResult::default().with_products(vec![product]))
}

/// List products in insertion order, optionally keeping only names that
/// contain `filter` (case-insensitive).
pub fn list<S: KeyValueStore>(store: &RecordStore<S>, filter: Option<&str>) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let products = match filter {
        Some(term) if !term.is_empty() => {
            let term = term.to_lowercase();
            products
                .into_iter()
                .filter(|p| p.name.to_lowercase().contains(&term))
                .collect()
        }
        _ => products,
    };
    Ok(CmdResult::default().with_products(products))
}
