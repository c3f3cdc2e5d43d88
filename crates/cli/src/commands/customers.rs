//! Customer and account commands (administrators only).

use std::io::Write;

use appliance_store_core::customer::{CustomerInput, UserAccountInput};
use appliance_store_core::{ADMIN_ROLE, Email, UserId};

use super::{AccountAction, CustomerAction, CustomerArgs, PAGE_SIZE};
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: CustomerAction, out: &mut impl Write) -> Result<(), CliError> {
    app.require(&[ADMIN_ROLE])?;
    let customers = app.customers();
    match action {
        CustomerAction::List { search, page } => {
            let list = customers.list(search.as_deref()).await?;
            output::paged(out, &list, page, PAGE_SIZE, |out, items| {
                output::customers(out, items)
            })?;
        }
        CustomerAction::Create(args) => {
            let input = customer_input(args)?.validated(true)?;
            let customer = customers.create(&input).await?;
            writeln!(out, "Created customer #{} {}", customer.id, customer.full_name())?;
        }
        CustomerAction::Update { id, details } => {
            let input = customer_input(details)?.validated(false)?;
            let customer = customers.update(UserId::new(id), &input).await?;
            writeln!(out, "Updated customer #{} {}", customer.id, customer.full_name())?;
        }
        CustomerAction::Delete { id } => {
            customers.delete(UserId::new(id)).await?;
            writeln!(out, "Deleted customer #{id}")?;
        }
        CustomerAction::Toggle { id } => {
            customers.toggle_status(UserId::new(id)).await?;
            let customer = customers.get(UserId::new(id)).await?;
            let state = if customer.is_active { "active" } else { "inactive" };
            writeln!(out, "Customer #{id} is now {state}")?;
        }
    }
    Ok(())
}

fn customer_input(args: CustomerArgs) -> Result<CustomerInput, CliError> {
    Ok(CustomerInput {
        first_name: args.first_name,
        last_name: args.last_name,
        email: Email::parse(&args.email)?,
        phone: args.phone,
        city: args.city,
        postal_code: args.postal_code,
        is_active: true,
        password: args.password,
    })
}

pub async fn run_accounts(
    app: &App,
    action: AccountAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    app.require(&[ADMIN_ROLE])?;
    let accounts = app.accounts();
    match action {
        AccountAction::List { page } => {
            let list = accounts.list().await?;
            output::paged(out, &list, page, PAGE_SIZE, |out, items| {
                output::accounts(out, items)
            })?;
        }
        AccountAction::Create {
            first_name,
            last_name,
            email,
            role,
            password,
        } => {
            if first_name.trim().is_empty() {
                return Err(CliError::InvalidArgument("first name is required".into()));
            }
            let input = UserAccountInput {
                first_name,
                last_name,
                email: Email::parse(&email)?,
                role: role.trim().to_uppercase(),
                is_active: true,
                password: Some(password).filter(|p| !p.is_empty()),
            };
            let account = accounts.create(&input).await?;
            writeln!(out, "Created account #{} {}", account.id, account.full_name())?;
        }
        AccountAction::Delete { id } => {
            accounts.delete(UserId::new(id)).await?;
            writeln!(out, "Deleted account #{id}")?;
        }
    }
    Ok(())
}
