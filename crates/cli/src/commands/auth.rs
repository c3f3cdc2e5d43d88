//! Session commands.

use std::io::Write;

use appliance_store_core::customer::Registration;
use appliance_store_core::{CUSTOMER_ROLE, Email};
use secrecy::SecretString;

use super::PasswordResetAction;
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn login(
    app: &App,
    email: &str,
    password: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let email = Email::parse(email)?;
    let password = SecretString::from(password);
    let outcome = app.auth().login(&email, &password).await?;
    writeln!(out, "Logged in.")?;
    output::user(out, &outcome.user)?;
    Ok(())
}

pub fn logout(app: &App, out: &mut impl Write) -> Result<(), CliError> {
    app.auth().logout()?;
    writeln!(out, "Logged out.")?;
    Ok(())
}

pub fn whoami(app: &App, out: &mut impl Write) -> Result<(), CliError> {
    app.require(&[])?;
    match app.session.user() {
        Some(user) => output::user(out, &user)?,
        None => return Err(CliError::LoginRequired),
    }
    Ok(())
}

pub async fn register(
    app: &App,
    first_name: String,
    last_name: String,
    email: &str,
    password: String,
    out: &mut impl Write,
) -> Result<(), CliError> {
    if password.is_empty() {
        return Err(CliError::InvalidArgument("password must not be empty".into()));
    }
    let registration = Registration {
        first_name,
        last_name,
        email: Email::parse(email)?,
        password,
        role: CUSTOMER_ROLE.to_owned(),
    };
    app.auth().register(&registration).await?;
    writeln!(out, "Account created for {}. You can now log in.", registration.email)?;
    Ok(())
}

pub async fn password_reset(
    app: &App,
    action: PasswordResetAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        PasswordResetAction::Request { email } => {
            let email = Email::parse(&email)?;
            app.auth().request_password_reset(&email).await?;
            writeln!(out, "If {email} has an account, a recovery token was sent.")?;
        }
        PasswordResetAction::Confirm {
            token,
            password,
            confirm,
        } => {
            if password != confirm {
                return Err(CliError::InvalidArgument("passwords do not match".into()));
            }
            app.auth()
                .confirm_password_reset(
                    token.trim(),
                    &SecretString::from(password),
                    &SecretString::from(confirm),
                )
                .await?;
            writeln!(out, "Password updated.")?;
        }
    }
    Ok(())
}
