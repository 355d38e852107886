use crate::commands::{CmdMessage, CmdResult};
use crate::error::{GerenciaError, Result};
use crate::model::{Movement, Product};
use crate::store::{KeyValueStore, RecordStore, MOVEMENTS, PRODUCTS};
use chrono::{NaiveDate, Utc};
use std::fs;
use std::path::Path;
use tracing::info;

const REPORT_TITLE: &str = "RELATÓRIO GERAL - GERENCIA.AÍ";
const PRODUCTS_HEADING: &str = "PRODUTOS";
const MOVEMENTS_HEADING: &str = "MOVIMENTAÇÕES FINANCEIRAS";
const PRODUCT_COLUMNS: [&str; 4] = ["Nome", "Preço", "Quantidade", "Valor Total"];
const MOVEMENT_COLUMNS: [&str; 4] = ["Descrição", "Tipo", "Valor", "Data"];

/// Write the CSV report for the whole catalog and ledger into `out_dir`.
pub fn run<S: KeyValueStore>(store: &RecordStore<S>, out_dir: &Path) -> Result<CmdResult> {
    let products: Vec<Product> = store.load(PRODUCTS);
    let movements: Vec<Movement> = store.load(MOVEMENTS);

    let content = render_report(&products, &movements)?;
    if !out_dir.exists() {
        fs::create_dir_all(out_dir).map_err(GerenciaError::Io)?;
    }
    let path = out_dir.join(report_filename(Utc::now().date_naive()));
    fs::write(&path, content).map_err(GerenciaError::Io)?;
    info!(path = %path.display(), "exported report");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Exported to {}",
        path.display()
    )));
    result.export_path = Some(path);
    Ok(result)
}

pub fn report_filename(date: NaiveDate) -> String {
    format!("relatorio_{}.csv", date.format("%Y-%m-%d"))
}

/// Render the report text: a title, then one CSV table per section.
pub fn render_report(products: &[Product], movements: &[Movement]) -> Result<String> {
    let product_rows = products.iter().map(|p| {
        vec![
            p.name.clone(),
            p.price.to_string(),
            p.quantity.to_string(),
            format!("{:.2}", p.total_value()),
        ]
    });
    let movement_rows = movements.iter().map(|m| {
        vec![
            m.description.clone(),
            m.kind.as_stored().to_string(),
            m.amount.to_string(),
            m.created_at.format("%d/%m/%Y").to_string(),
        ]
    });

    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");
    out.push_str(PRODUCTS_HEADING);
    out.push('\n');
    out.push_str(&csv_table(&PRODUCT_COLUMNS, product_rows)?);
    out.push_str("\n\n");
    out.push_str(MOVEMENTS_HEADING);
    out.push('\n');
    out.push_str(&csv_table(&MOVEMENT_COLUMNS, movement_rows)?);
    Ok(out)
}

fn csv_table<I>(columns: &[&str], rows: I) -> Result<String>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut buf = Vec::new();
    {
        let mut writer = csv::Writer::from_writer(&mut buf);
        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(&row)?;
        }
        writer.flush().map_err(GerenciaError::Io)?;
    }
    String::from_utf8(buf).map_err(|e| GerenciaError::Store(e.to_string()))
}
