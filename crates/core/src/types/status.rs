//! Status enums for catalog and sales entities.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Availability of a product in the catalog.
///
/// Older backend rows stored a boolean instead of the status name; those are
/// mapped on read (`true` is available, `false` is discontinued) and a missing
/// value defaults to available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
pub enum ProductStatus {
    /// Offered for sale.
    #[default]
    #[serde(rename = "Disponible")]
    Available,
    /// Temporarily without stock.
    #[serde(rename = "Agotado")]
    SoldOut,
    /// No longer sold.
    #[serde(rename = "Descontinuado")]
    Discontinued,
}

impl ProductStatus {
    /// Wire name of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Disponible",
            Self::SoldOut => "Agotado",
            Self::Discontinued => "Descontinuado",
        }
    }

    fn from_json(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::Bool(false) => Self::Discontinued,
            serde_json::Value::String(s) => s.parse().unwrap_or_default(),
            _ => Self::Available,
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Disponible" => Ok(Self::Available),
            "Agotado" => Ok(Self::SoldOut),
            "Descontinuado" => Ok(Self::Discontinued),
            other => Err(format!("invalid product status: {other}")),
        }
    }
}

impl<'de> Deserialize<'de> for ProductStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

/// Channel through which a counter sale was taken (`metodo_entrada`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SaleChannel {
    /// Walk-in sale paid in cash.
    #[default]
    #[serde(rename = "Mostrador")]
    Counter,
    /// Sale taken over the phone.
    #[serde(rename = "Telefono")]
    Phone,
}

impl SaleChannel {
    /// Wire name of the channel.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counter => "Mostrador",
            Self::Phone => "Telefono",
        }
    }
}

impl fmt::Display for SaleChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for SaleChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mostrador" | "counter" => Ok(Self::Counter),
            "telefono" | "teléfono" | "phone" => Ok(Self::Phone),
            other => Err(format!("invalid sale channel: {other}")),
        }
    }
}
