//! Plain-text rendering of command results.
//!
//! Everything writes to a caller-supplied `Write` so commands can be tested
//! against a buffer.

use std::io::{self, Write};

use appliance_store_client::services::{CheckoutReceipt, Forecast};
use appliance_store_core::analytics::TrendPoint;
use appliance_store_core::catalog::{Category, Product, StockEntry, Warehouse};
use appliance_store_core::customer::{Customer, UserAccount};
use appliance_store_core::notice::Notice;
use appliance_store_core::pagination::Paginator;
use appliance_store_core::sale::{Sale, SaleDraft};
use appliance_store_core::{CartState, SessionUser, format_amount};

pub fn cart(out: &mut impl Write, state: &CartState) -> io::Result<()> {
    if state.is_empty() {
        return writeln!(out, "Cart is empty.");
    }
    for line in &state.items {
        let mut hints = Vec::new();
        if !line.can_increment() {
            hints.push("max stock");
        }
        if !line.can_decrement() {
            hints.push("min 1");
        }
        let hints = if hints.is_empty() {
            String::new()
        } else {
            format!("  [{}]", hints.join(", "))
        };
        writeln!(
            out,
            "{:>5}  {:<32} {:>3} x {:>14} = {:>14}{hints}",
            line.product.id,
            line.product.name,
            line.quantity,
            format_amount(line.product.unit_price),
            format_amount(line.subtotal()),
        )?;
    }
    writeln!(
        out,
        "{} item(s), total {}",
        state.item_count(),
        format_amount(state.total())
    )
}

pub fn user(out: &mut impl Write, user: &SessionUser) -> io::Result<()> {
    let name = user.profile_str("nombre").unwrap_or("-");
    let email = user.profile_str("correo").unwrap_or("-");
    let role = user.role.as_deref().unwrap_or("-");
    writeln!(out, "#{} {name} <{email}> role={role}", user.id)?;
    if user.is_admin() {
        writeln!(out, "Administrative console enabled.")?;
    }
    Ok(())
}

pub fn products(out: &mut impl Write, products: &[Product]) -> io::Result<()> {
    for p in products {
        writeln!(
            out,
            "{:>5}  {:<10} {:<32} {:>14}  stock {:>3}  {}",
            p.id,
            p.code,
            p.name,
            format_amount(p.sale_price),
            p.stock,
            p.status
        )?;
    }
    writeln!(out, "{} product(s)", products.len())
}

pub fn product_detail(out: &mut impl Write, p: &Product) -> io::Result<()> {
    writeln!(out, "{} ({})", p.name, p.code)?;
    writeln!(out, "  Price:     {}", format_amount(p.sale_price))?;
    writeln!(out, "  Cost:      {}", format_amount(p.purchase_price))?;
    writeln!(out, "  Status:    {}", p.status)?;
    writeln!(out, "  Stock:     {}", p.stock)?;
    writeln!(out, "  Warranty:  {} year(s)", p.warranty_years)?;
    if let Some(brand) = &p.brand {
        writeln!(out, "  Brand:     {brand}")?;
    }
    if let Some(description) = &p.description {
        writeln!(out, "  {description}")?;
    }
    Ok(())
}

pub fn categories(out: &mut impl Write, categories: &[Category]) -> io::Result<()> {
    for c in categories {
        let state = if c.active { "active" } else { "inactive" };
        writeln!(out, "{:>5}  {:<32} {state}", c.id, c.name)?;
    }
    Ok(())
}

pub fn warehouses(out: &mut impl Write, warehouses: &[Warehouse]) -> io::Result<()> {
    for w in warehouses {
        let state = if w.active { "active" } else { "inactive" };
        writeln!(out, "{:>5}  {:<20} {state}", w.id, w.code)?;
    }
    Ok(())
}

pub fn stock_entries(out: &mut impl Write, entries: &[StockEntry]) -> io::Result<()> {
    for e in entries {
        let product = e
            .product
            .map_or_else(|| "-".to_owned(), |p| p.to_string());
        writeln!(
            out,
            "{:>5}  warehouse {:>4}  product {:>5}  qty {:>4}  {}",
            e.id,
            e.warehouse,
            product,
            e.quantity,
            e.received_at.as_deref().unwrap_or("")
        )?;
    }
    Ok(())
}

pub fn customers(out: &mut impl Write, customers: &[Customer]) -> io::Result<()> {
    for c in customers {
        let state = if c.is_active { "active" } else { "inactive" };
        writeln!(
            out,
            "{:>5}  {:<28} {:<30} {:<12} {state}",
            c.id,
            c.full_name(),
            c.email,
            c.phone.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn accounts(out: &mut impl Write, accounts: &[UserAccount]) -> io::Result<()> {
    for a in accounts {
        let superuser = if a.is_superuser.is_set() { " (superuser)" } else { "" };
        writeln!(
            out,
            "{:>5}  {:<28} {:<30} {}{superuser}",
            a.id,
            a.full_name(),
            a.email,
            a.role.as_deref().unwrap_or("-")
        )?;
    }
    Ok(())
}

pub fn sales(out: &mut impl Write, sales: &[Sale]) -> io::Result<()> {
    for s in sales {
        let day = s.sold_at.get(..10).unwrap_or(&s.sold_at);
        writeln!(
            out,
            "{:>5}  {day}  {:<30} {:<10} {:>14}",
            s.id,
            s.customer_email(),
            s.channel,
            format_amount(s.total)
        )?;
    }
    Ok(())
}

pub fn sale_detail(out: &mut impl Write, sale: &Sale) -> io::Result<()> {
    writeln!(out, "Sale #{} on {}", sale.id, sale.sold_at)?;
    writeln!(out, "  Customer: {}", sale.customer_email())?;
    writeln!(out, "  Channel:  {}", sale.channel)?;
    for d in &sale.details {
        let name = d
            .product
            .get("nombre")
            .and_then(serde_json::Value::as_str)
            .map_or_else(|| d.product.to_string(), ToOwned::to_owned);
        let subtotal = d.subtotal.map(format_amount).unwrap_or_default();
        writeln!(out, "  {:>3} x {name:<32} {subtotal:>14}", d.quantity)?;
    }
    writeln!(out, "  Total:    {}", format_amount(sale.total))
}

pub fn draft(out: &mut impl Write, draft: &SaleDraft) -> io::Result<()> {
    for line in draft.lines() {
        writeln!(
            out,
            "{:>5}  {:<32} {:>3} x {:>14} = {:>14}",
            line.product_id,
            line.name,
            line.quantity,
            format_amount(line.unit_price),
            format_amount(line.subtotal())
        )?;
    }
    writeln!(out, "Total {}", format_amount(draft.total()))
}

pub fn notices(out: &mut impl Write, notices: &[Notice]) -> io::Result<()> {
    for n in notices {
        writeln!(
            out,
            "{:>5}  [{:<8}] {:<12} p{}  {}",
            n.id, n.status, n.kind, n.priority, n.subject
        )?;
    }
    Ok(())
}

pub fn forecast(out: &mut impl Write, forecast: &Forecast) -> io::Result<()> {
    for point in &forecast.points {
        writeln!(
            out,
            "{}  {:>16}",
            point.label,
            format_amount(point.predicted_sales)
        )?;
    }
    writeln!(out, "Total predicted: {}", format_amount(forecast.total))
}

pub fn trends(out: &mut impl Write, points: &[TrendPoint]) -> io::Result<()> {
    for point in points {
        writeln!(
            out,
            "{}  {:>5} sale(s)  {:>16}",
            point.label,
            point.sales_count,
            format_amount(point.total_amount)
        )?;
    }
    Ok(())
}

pub fn receipt(out: &mut impl Write, receipt: &CheckoutReceipt) -> io::Result<()> {
    writeln!(
        out,
        "Order #{} placed: {} line(s), total {}",
        receipt.order_id,
        receipt.lines,
        format_amount(receipt.total)
    )
}

/// Write the current page of `items` followed by a page footer.
pub fn paged<T, W: Write>(
    out: &mut W,
    items: &[T],
    page: usize,
    per_page: usize,
    render: impl FnOnce(&mut W, &[T]) -> io::Result<()>,
) -> io::Result<()> {
    let mut pager = Paginator::new(items.len(), per_page);
    if page != 1 && !pager.go_to(page) {
        writeln!(
            out,
            "Page {page} does not exist, showing page {}.",
            pager.page()
        )?;
    }
    render(out, pager.page_items(items))?;
    if pager.is_paginated() {
        writeln!(
            out,
            "Page {} of {} ({} total)",
            pager.page(),
            pager.total_pages(),
            items.len()
        )?;
    }
    Ok(())
}
