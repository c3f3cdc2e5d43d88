//! Cart commands.

use std::io::Write;

use appliance_store_client::services::CheckoutContact;
use appliance_store_core::{Email, ProductId, ProductRef};

use super::CartAction;
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: CartAction, out: &mut impl Write) -> Result<(), CliError> {
    match action {
        CartAction::Show => {}
        CartAction::Add { product_id, qty } => add(app, ProductId::new(product_id), qty).await?,
        CartAction::Decrement { product_id, qty } => {
            decrement(app, ProductId::new(product_id), qty)?;
        }
        CartAction::Remove { product_id } => {
            let id = ProductId::new(product_id);
            if app.cart.state().line(id).is_none() {
                return Err(CliError::NotFound(format!("product {id} is not in the cart")));
            }
            app.cart.remove(id)?;
        }
        CartAction::Clear => app.cart.clear()?,
        CartAction::Checkout {
            name,
            email,
            address,
            phone,
        } => {
            app.require(&[])?;
            let contact = CheckoutContact::new(&name, Email::parse(&email)?, &address, &phone)?;
            let receipt = app.checkout().checkout(&app.cart, &contact).await?;
            output::receipt(out, &receipt)?;
            return Ok(());
        }
    }
    output::cart(out, &app.cart.state())?;
    Ok(())
}

/// Add units, refusing to go past the product's stock like the storefront
/// controls do.
async fn add(app: &App, id: ProductId, qty: u32) -> Result<(), CliError> {
    let product = app.catalog().product(id).await?;
    if !product.is_available() {
        return Err(CliError::InvalidArgument(format!(
            "{} is {}",
            product.name, product.status
        )));
    }

    let in_cart = app.cart.state().line(id).map_or(0, |l| l.quantity);
    if in_cart.saturating_add(qty) > product.stock {
        return Err(CliError::InvalidArgument(format!(
            "only {} unit(s) of {} in stock, {in_cart} already in the cart",
            product.stock, product.name
        )));
    }

    let delta = i32::try_from(qty)
        .map_err(|_| CliError::InvalidArgument(format!("quantity too large: {qty}")))?;
    app.cart.add(ProductRef::from(&product), delta)?;
    Ok(())
}

fn decrement(app: &App, id: ProductId, qty: u32) -> Result<(), CliError> {
    let state = app.cart.state();
    let line = state
        .line(id)
        .ok_or_else(|| CliError::NotFound(format!("product {id} is not in the cart")))?;
    if !line.can_decrement() {
        return Err(CliError::InvalidArgument(
            "quantity is already 1; use `cart remove` instead".into(),
        ));
    }
    let delta = i32::try_from(qty)
        .map_err(|_| CliError::InvalidArgument(format!("quantity too large: {qty}")))?;
    app.cart.add(line.product.clone(), -delta)?;
    Ok(())
}
