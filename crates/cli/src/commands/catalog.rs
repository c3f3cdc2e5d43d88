//! Catalog and inventory commands. Listing is public; changes need an
//! administrator.

use std::io::Write;

use appliance_store_core::catalog::{
    CategoryInput, ProductInput, StockEntryRequest, WarehouseInput,
};
use appliance_store_core::{ADMIN_ROLE, CategoryId, ProductId, ProductStatus, WarehouseId};

use super::{CatalogAction, PAGE_SIZE, ProductArgs};
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: CatalogAction, out: &mut impl Write) -> Result<(), CliError> {
    let catalog = app.catalog();
    match action {
        CatalogAction::Products { available, page } => {
            let products = if available {
                catalog.available_products().await?
            } else {
                catalog.products().await?
            };
            output::paged(out, &products, page, PAGE_SIZE, |out, items| {
                output::products(out, items)
            })?;
        }
        CatalogAction::Product { id } => {
            let product = catalog.product(ProductId::new(id)).await?;
            output::product_detail(out, &product)?;
        }
        CatalogAction::ProductCreate(args) => {
            app.require(&[ADMIN_ROLE])?;
            let input = product_input(args)?;
            let product = catalog.create_product(&input).await?;
            writeln!(out, "Created product #{} {}", product.id, product.name)?;
        }
        CatalogAction::ProductUpdate {
            id,
            price,
            stock,
            status,
        } => {
            app.require(&[ADMIN_ROLE])?;
            let id = ProductId::new(id);
            let current = catalog.product(id).await?;
            let mut input = ProductInput::from_product(&current).ok_or_else(|| {
                CliError::InvalidArgument(format!("product {id} has no category; edit it fully"))
            })?;
            if let Some(price) = price {
                input.sale_price = price;
            }
            if let Some(stock) = stock {
                input.stock = stock;
            }
            if let Some(status) = status {
                input.status = status
                    .parse::<ProductStatus>()
                    .map_err(CliError::InvalidArgument)?;
            }
            let product = catalog.update_product(id, &input.validated()?).await?;
            output::product_detail(out, &product)?;
        }
        CatalogAction::ProductDelete { id } => {
            app.require(&[ADMIN_ROLE])?;
            catalog.delete_product(ProductId::new(id)).await?;
            writeln!(out, "Deleted product #{id}")?;
        }
        CatalogAction::Categories => {
            output::categories(out, &catalog.categories().await?)?;
        }
        CatalogAction::CategoryCreate { name, inactive } => {
            app.require(&[ADMIN_ROLE])?;
            let category = catalog
                .create_category(&CategoryInput::new(&name, !inactive)?)
                .await?;
            writeln!(out, "Created category #{} {}", category.id, category.name)?;
        }
        CatalogAction::CategoryUpdate { id, name, inactive } => {
            app.require(&[ADMIN_ROLE])?;
            let category = catalog
                .update_category(CategoryId::new(id), &CategoryInput::new(&name, !inactive)?)
                .await?;
            writeln!(out, "Updated category #{} {}", category.id, category.name)?;
        }
        CatalogAction::CategoryDelete { id } => {
            app.require(&[ADMIN_ROLE])?;
            catalog.delete_category(CategoryId::new(id)).await?;
            writeln!(out, "Deleted category #{id}")?;
        }
        CatalogAction::Warehouses => {
            app.require(&[ADMIN_ROLE])?;
            output::warehouses(out, &catalog.warehouses().await?)?;
        }
        CatalogAction::WarehouseCreate { code, inactive } => {
            app.require(&[ADMIN_ROLE])?;
            let warehouse = catalog
                .create_warehouse(&WarehouseInput::new(&code, !inactive)?)
                .await?;
            writeln!(out, "Created warehouse #{} {}", warehouse.id, warehouse.code)?;
        }
        CatalogAction::WarehouseDelete { id } => {
            app.require(&[ADMIN_ROLE])?;
            catalog.delete_warehouse(WarehouseId::new(id)).await?;
            writeln!(out, "Deleted warehouse #{id}")?;
        }
        CatalogAction::StockEntries => {
            app.require(&[ADMIN_ROLE])?;
            output::stock_entries(out, &catalog.stock_entries().await?)?;
        }
        CatalogAction::AddStock {
            warehouse,
            product,
            qty,
        } => {
            app.require(&[ADMIN_ROLE])?;
            let request =
                StockEntryRequest::new(WarehouseId::new(warehouse), ProductId::new(product), qty)?;
            let entry = catalog.record_stock_entry(&request).await?;
            writeln!(out, "Recorded stock entry #{} ({qty} unit(s))", entry.id)?;
        }
    }
    Ok(())
}

fn product_input(args: ProductArgs) -> Result<ProductInput, CliError> {
    let input = ProductInput {
        code: args.code,
        name: args.name,
        description: args.description,
        sale_price: args.price,
        purchase_price: args.cost,
        image_url: args.image_url,
        status: ProductStatus::Available,
        stock: args.stock,
        warranty_years: args.warranty_years,
        category: CategoryId::new(args.category),
        brand: args.brand,
    };
    Ok(input.validated()?)
}
