//! Sales commands (administrators only).

use std::io::Write;

use appliance_store_client::services::receipt_file_name;
use appliance_store_core::sale::{SaleDraft, SaleFilters};
use appliance_store_core::{ADMIN_ROLE, CustomerId, ProductId, SaleChannel, SaleId};

use super::{PAGE_SIZE, SaleAction};
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: SaleAction, out: &mut impl Write) -> Result<(), CliError> {
    app.require(&[ADMIN_ROLE])?;
    let sales = app.sales();
    match action {
        SaleAction::List {
            from,
            to,
            customer,
            channel,
            page,
        } => {
            let filters = SaleFilters {
                from,
                to,
                customer: customer.map(CustomerId::new),
                channel: channel.as_deref().map(parse_channel).transpose()?,
            };
            let list = sales.list(&filters).await?;
            output::paged(out, &list, page, PAGE_SIZE, |out, items| {
                output::sales(out, items)
            })?;
        }
        SaleAction::Show { id } => {
            output::sale_detail(out, &sales.get(SaleId::new(id)).await?)?;
        }
        SaleAction::Register {
            customer,
            channel,
            items,
        } => {
            let mut draft = SaleDraft::new();
            draft.set_customer(Some(CustomerId::new(customer)));
            draft.set_channel(parse_channel(&channel)?);

            let products = app.catalog().available_products().await?;
            for item in &items {
                let (product_id, qty) = parse_item(item)?;
                let product = products
                    .iter()
                    .find(|p| p.id == product_id)
                    .ok_or_else(|| {
                        CliError::NotFound(format!("product {product_id} is not available"))
                    })?;
                draft.add_item(product, qty)?;
            }

            output::draft(out, &draft)?;
            let sale = sales.register(&mut draft).await?;
            writeln!(out, "Registered sale #{}", sale.id)?;
        }
        SaleAction::Receipt { id, out: path } => {
            let id = SaleId::new(id);
            let pdf = sales.receipt_pdf(id).await?;
            let path = path.unwrap_or_else(|| receipt_file_name(id).into());
            std::fs::write(&path, &pdf)?;
            writeln!(out, "Saved receipt to {} ({} bytes)", path.display(), pdf.len())?;
        }
    }
    Ok(())
}

fn parse_channel(raw: &str) -> Result<SaleChannel, CliError> {
    raw.parse().map_err(CliError::InvalidArgument)
}

/// Parse `PRODUCT_ID:QTY`.
fn parse_item(raw: &str) -> Result<(ProductId, u32), CliError> {
    let invalid = || CliError::InvalidArgument(format!("expected PRODUCT_ID:QTY, got {raw:?}"));
    let (id, qty) = raw.split_once(':').ok_or_else(invalid)?;
    let id = id.parse::<ProductId>().map_err(|_| invalid())?;
    let qty = qty.trim().parse::<u32>().map_err(|_| invalid())?;
    Ok((id, qty))
}
