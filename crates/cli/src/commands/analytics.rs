//! Forecast and trend commands (administrators only).

use std::io::Write;

use appliance_store_core::analytics::{ForecastHorizon, trend_series};
use appliance_store_core::{ADMIN_ROLE, CategoryId};

use super::AnalyticsAction;
use crate::context::App;
use crate::error::CliError;
use crate::output;

pub async fn run(app: &App, action: AnalyticsAction, out: &mut impl Write) -> Result<(), CliError> {
    app.require(&[ADMIN_ROLE])?;
    match action {
        AnalyticsAction::Forecast { category, months } => {
            let horizon = ForecastHorizon::try_from(months).map_err(CliError::InvalidArgument)?;
            let forecast = app
                .analytics()
                .forecast(category.map(CategoryId::new), horizon)
                .await?;
            if forecast.points.is_empty() {
                writeln!(out, "No predictions available.")?;
            } else {
                output::forecast(out, &forecast)?;
            }
        }
        AnalyticsAction::Trends => {
            let trends = app.sales().trends().await?;
            output::trends(out, &trend_series(&trends))?;
        }
    }
    Ok(())
}
