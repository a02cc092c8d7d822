//! Rendering results as text tables or JSON

use gymadmin_core::dashboard::DashboardSummary;
use gymadmin_core::types::{Category, MembershipPlan, Order, Product, Subscription, User};
use gymadmin_core::utils::format_money;
use gymadmin_core::{Error, Result};
use gymadmin_listing::Page;
use serde::Serialize;
use std::fmt::Write as _;

/// How results are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text tables
    Text,
    /// Pretty-printed JSON
    Json,
}

impl OutputFormat {
    /// `Json` when `json` is set
    pub const fn from_flag(json: bool) -> Self {
        if json { Self::Json } else { Self::Text }
    }
}

/// A row in a text table
pub trait Tabular {
    /// Column headers
    const HEADERS: &'static [&'static str];

    /// Cell values, one per header
    fn row(&self) -> Vec<String>;
}

fn date_or_dash<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

impl Tabular for User {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "EMAIL", "ROLE", "STATUS", "JOINED"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.email.clone(),
            self.role.to_string(),
            self.status.to_string(),
            date_or_dash(self.created_at.map(|t| t.date_naive())),
        ]
    }
}

impl Tabular for MembershipPlan {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "PRICE", "MONTHS", "ACTIVE"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            format_money(self.price),
            self.duration.to_string(),
            self.active_subscriptions.to_string(),
        ]
    }
}

impl Tabular for Subscription {
    const HEADERS: &'static [&'static str] =
        &["ID", "MEMBER", "PLAN", "START", "END", "STATUS", "PAID"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user.name.clone(),
            self.plan.name.clone(),
            self.start_date.to_string(),
            self.end_date.to_string(),
            self.status.to_string(),
            format_money(self.total_paid()),
        ]
    }
}

impl Tabular for Product {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "CATEGORY", "PRICE", "STOCK"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.category.clone(),
            format_money(self.price),
            self.stock_quantity.to_string(),
        ]
    }
}

impl Tabular for Order {
    const HEADERS: &'static [&'static str] =
        &["ID", "CUSTOMER", "PLACED", "TOTAL", "STATUS", "PAYMENT", "TRACKING"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.user.name.clone(),
            date_or_dash(self.created_at.map(|t| t.date_naive())),
            format_money(self.total_amount),
            self.status.to_string(),
            self.payment_status.to_string(),
            self.tracking_number.clone().unwrap_or_else(|| "-".to_string()),
        ]
    }
}

impl Tabular for Category {
    const HEADERS: &'static [&'static str] = &["ID", "NAME", "SLUG", "DESCRIPTION"];

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.slug.clone(),
            self.description.clone(),
        ]
    }
}

/// Render rows under headers with padded columns
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let mut line = |cells: &mut dyn Iterator<Item = &str>| {
        let text = cells
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", text.trim_end());
    };

    line(&mut headers.iter().copied());
    for row in rows {
        line(&mut row.iter().map(String::as_str));
    }
    out
}

/// Pretty JSON for any serializable value
///
/// # Errors
///
/// Returns a serialization error.
pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut text = serde_json::to_string_pretty(value).map_err(Error::Serialization)?;
    text.push('\n');
    Ok(text)
}

/// Render one page of a collection
///
/// # Errors
///
/// Returns a serialization error in JSON mode.
pub fn page<T: Tabular + Serialize>(page: &Page<T>, label: &str, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(page);
    }

    if page.is_empty() {
        return Ok(format!("No {label} found\n"));
    }

    let rows: Vec<Vec<String>> = page.items.iter().map(Tabular::row).collect();
    let mut out = table(T::HEADERS, &rows);
    let _ = writeln!(
        out,
        "\nShowing {}-{} of {} {label} (page {} of {})",
        page.first_index(),
        page.last_index(),
        page.total_count,
        page.current_page,
        page.total_pages
    );
    Ok(out)
}

/// Render a single item as a one-row table or JSON
///
/// # Errors
///
/// Returns a serialization error in JSON mode.
pub fn item<T: Tabular + Serialize>(item: &T, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => json(item),
        OutputFormat::Text => Ok(table(T::HEADERS, &[item.row()])),
    }
}

/// Render the dashboard summary
///
/// # Errors
///
/// Returns a serialization error in JSON mode.
pub fn dashboard(summary: &DashboardSummary, format: OutputFormat) -> Result<String> {
    if format == OutputFormat::Json {
        return json(summary);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Total users           {}", summary.total_users);
    let _ = writeln!(out, "Active members        {}", summary.active_members);
    let _ = writeln!(out, "Active subscriptions  {}", summary.active_subscriptions);
    let _ = writeln!(out, "Total revenue         {}", format_money(summary.total_revenue));

    let _ = writeln!(out, "\nOrders by status");
    let statuses: Vec<Vec<String>> = summary
        .orders_by_status
        .iter()
        .map(|(status, count)| vec![status.to_string(), count.to_string()])
        .collect();
    out.push_str(&table(&["STATUS", "ORDERS"], &statuses));

    let _ = writeln!(out, "\nLow stock");
    if summary.low_stock.is_empty() {
        let _ = writeln!(out, "None");
    } else {
        let rows: Vec<Vec<String>> = summary
            .low_stock
            .iter()
            .map(|p| vec![p.id.clone(), p.name.clone(), p.stock_quantity.to_string()])
            .collect();
        out.push_str(&table(&["ID", "NAME", "STOCK"], &rows));
    }
    Ok(out)
}
