use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GerenciaError, Result};
use crate::model::{Movement, MovementKind};
use crate::store::{KeyValueStore, RecordStore, MOVEMENTS};
use crate::stats;
use tracing::info;

/// Record a movement stamped with the current time.
pub fn append<S: KeyValueStore>(
    store: &mut RecordStore<S>,
    description: String,
    amount: f64,
    kind: MovementKind,
) -> Result<CmdResult> {
    if !amount.is_finite() {
        return Err(GerenciaError::InvalidField(format!(
            "amount must be a number, got {}",
            amount
        )));
    }

    let mut movements: Vec<Movement> = store.load_for_update(MOVEMENTS)?;
    let movement = Movement::new(description, amount, kind);
    movements.push(movement.clone());
    store.save(MOVEMENTS, &movements)?;
    info!(id = %movement.id, %kind, "appended movement");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Movement added: {}",
        movement.description
    )));
    Ok(result.with_movements(vec![movement]))
}

pub fn delete<S: KeyValueStore>(store: &mut RecordStore<S>, id: &str) -> Result<CmdResult> {
    let mut movements: Vec<Movement> = store.load_for_update(MOVEMENTS)?;
    let position = movements
        .iter()
        .position(|m| m.id == id)
        .ok_or_else(|| GerenciaError::not_found(MOVEMENTS, id))?;
    let removed = movements.remove(position);
    store.save(MOVEMENTS, &movements)?;
    info!(id, "deleted movement");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Movement deleted: {}",
        removed.description
    )));
    Ok(result.with_movements(vec![removed]))
}

/// Movements in insertion order, with the financial summary of the whole
/// ledger. `kind` narrows the listed movements, not the summary.
pub fn list<S: KeyValueStore>(
    store: &RecordStore<S>,
    kind: Option<MovementKind>,
) -> Result<CmdResult> {
    let movements: Vec<Movement> = store.load(MOVEMENTS);
    let summary = stats::financial_summary(&movements);
    let listed = match kind {
        Some(kind) => movements.into_iter().filter(|m| m.kind == kind).collect(),
        None => movements,
    };

    let mut result = CmdResult::default().with_movements(listed);
    result.finance = Some(summary);
    Ok(result)
}
