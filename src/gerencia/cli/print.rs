use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use gerencia::api::{CmdMessage, MessageLevel};
use gerencia::config::{GerenciaConfig, KEYS};
use gerencia::model::{Movement, MovementKind, Product, StockStatus, User};
use gerencia::stats::{self, DashboardSnapshot, FinancialSummary, ReportRollup, StockSummary};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const NAME_WIDTH: usize = 32;
const ID_WIDTH: usize = 8;
const TIME_WIDTH: usize = 16;
const BAR_WIDTH: usize = 20;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn money(value: f64) -> String {
    format!("R$ {:.2}", value)
}

pub(super) fn print_user(user: &User) {
    println!("{} <{}>", user.name.bold(), user.email);
    if !user.tax_id.is_empty() {
        println!("  CPF/CNPJ  {}", user.tax_id);
    }
    if !user.phone.is_empty() {
        println!("  Phone     {}", user.phone);
    }
    println!(
        "  Joined    {}",
        format_time_ago(user.registered_at).trim_start().dimmed()
    );
}

pub(super) fn print_products(products: &[Product]) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        let name = pad_to_width(&truncate_to_width(&product.name, NAME_WIDTH), NAME_WIDTH);
        println!(
            "  {}  {}  {:>12}  {:>6}  {}",
            short_id(&product.id).dimmed(),
            name,
            money(product.price),
            product.quantity,
            status_label(product.status())
        );
    }
}

pub(super) fn print_product_detail(product: &Product) {
    println!("{}", product.name.bold());
    println!("  Id        {}", product.id);
    println!("  Price     {}", money(product.price));
    println!("  Quantity  {}", product.quantity);
    println!("  Total     {}", money(product.total_value()));
    println!("  Status    {}", status_label(product.status()));
}

/// Product table with a fill bar per product, followed by the summary.
pub(super) fn print_stock(products: &[Product], summary: &StockSummary) {
    println!();
    println!("  Units on hand   {}", summary.total_units);
    println!(
        "  Low stock       {}",
        summary.low_stock_count.to_string().yellow()
    );
    println!(
        "  Out of stock    {}",
        summary.out_of_stock_count.to_string().red()
    );
    println!("  Stock value     {}", money(summary.total_value));
    println!();

    if products.is_empty() {
        println!("No products found.");
        return;
    }
    for product in products {
        let name = pad_to_width(&truncate_to_width(&product.name, NAME_WIDTH), NAME_WIDTH);
        println!(
            "  {}  {:>6}  {}  {}",
            name,
            product.quantity,
            fill_bar(product.fill_percent()),
            status_label(product.status())
        );
    }
}

pub(super) fn print_movements(movements: &[Movement]) {
    if movements.is_empty() {
        println!("No movements found.");
        return;
    }
    for movement in movements {
        let description = pad_to_width(
            &truncate_to_width(&movement.description, NAME_WIDTH),
            NAME_WIDTH,
        );
        println!(
            "  {}  {}  {:>14}  {}",
            short_id(&movement.id).dimmed(),
            description,
            signed_amount(movement),
            format_time_ago(movement.created_at).dimmed()
        );
    }
}

pub(super) fn print_finance_summary(summary: &FinancialSummary) {
    println!();
    println!(
        "  Receivable  {}",
        money(summary.total_receivable).green()
    );
    println!("  Payable     {}", money(summary.total_payable).red());
    let balance = money(summary.balance);
    let balance = if summary.balance < 0.0 {
        balance.red()
    } else {
        balance.bold()
    };
    println!("  Balance     {}", balance);
}

pub(super) fn print_dashboard(user: Option<&User>, snapshot: &DashboardSnapshot) {
    if let Some(user) = user {
        println!("Welcome, {}", user.name.bold());
        println!();
    }
    println!("  Products     {}", snapshot.product_count);
    println!(
        "  Low stock    {}",
        snapshot.low_stock_count.to_string().yellow()
    );
    println!(
        "  Receivable   {}",
        money(snapshot.total_receivable).green()
    );
    println!("  Payable      {}", money(snapshot.total_payable).red());
}

pub(super) fn print_report(rollup: &ReportRollup) {
    println!("{}", "Overview".bold());
    let bars = stats::chart_series(rollup);
    let max = bars.iter().map(|b| b.value.abs()).max().unwrap_or(0).max(1);
    for bar in &bars {
        let len = (bar.value.unsigned_abs() as usize * BAR_WIDTH) / max as usize;
        println!(
            "  {:<12} {:<width$} {}",
            bar.label,
            "█".repeat(len),
            bar.value,
            width = BAR_WIDTH
        );
    }

    println!();
    println!("{}", "Products".bold());
    if rollup.products.items.is_empty() {
        println!("  No products registered.");
    }
    for product in &rollup.products.items {
        println!(
            "  {}  qty {}  {}  total {}",
            product.name,
            product.quantity,
            money(product.price),
            money(product.total_value())
        );
    }
    if rollup.products.remaining > 0 {
        println!(
            "  {}",
            format!("+ {} more products", rollup.products.remaining).dimmed()
        );
    }

    println!();
    println!("{}", "Recent movements".bold());
    if rollup.movements.items.is_empty() {
        println!("  No movements recorded.");
    }
    for movement in &rollup.movements.items {
        println!(
            "  {}  {}  {}",
            movement.description,
            movement.created_at.format("%d/%m/%Y").to_string().dimmed(),
            signed_amount(movement)
        );
    }
    if rollup.movements.remaining > 0 {
        println!(
            "  {}",
            format!("+ {} more movements", rollup.movements.remaining).dimmed()
        );
    }
}

pub(super) fn print_config(config: &GerenciaConfig) {
    for key in KEYS {
        if let Some(value) = config.get(key) {
            println!("{} = {}", key, value);
        }
    }
}

fn status_label(status: StockStatus) -> ColoredString {
    let label = status.to_string();
    match status {
        StockStatus::OutOfStock => label.red(),
        StockStatus::LowStock => label.yellow(),
        StockStatus::Available => label.green(),
    }
}

fn signed_amount(movement: &Movement) -> ColoredString {
    match movement.kind {
        MovementKind::Receivable => format!("+ {}", money(movement.amount)).green(),
        MovementKind::Payable => format!("- {}", money(movement.amount)).red(),
    }
}

fn fill_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64).round() as usize;
    let filled = filled.min(BAR_WIDTH);
    format!("[{}{}]", "#".repeat(filled), " ".repeat(BAR_WIDTH - filled))
}

fn short_id(id: &str) -> String {
    id.chars().take(ID_WIDTH).collect()
}

fn pad_to_width(s: &str, width: usize) -> String {
    let padding = width.saturating_sub(s.width());
    format!("{}{}", s, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_uses_two_decimals() {
        assert_eq!(money(30.0), "R$ 30.00");
        assert_eq!(money(2.5), "R$ 2.50");
    }

    #[test]
    fn truncate_marks_cut_text() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn fill_bar_is_fixed_width() {
        assert_eq!(fill_bar(0.0).len(), BAR_WIDTH + 2);
        assert_eq!(fill_bar(100.0), format!("[{}]", "#".repeat(BAR_WIDTH)));
    }

    #[test]
    fn short_id_keeps_prefix() {
        assert_eq!(short_id("1234567890"), "12345678");
        assert_eq!(short_id("abc"), "abc");
    }
}
