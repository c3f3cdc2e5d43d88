//! Customers and staff user accounts.

use serde::{Deserialize, Serialize};

use crate::catalog::{InputError, non_blank};
use crate::types::{CustomerId, Email, SuperuserFlag, UserId};

const fn default_true() -> bool {
    true
}

/// A storefront customer (user account plus customer profile).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: UserId,
    /// Id of the customer profile, used by sales (`cliente`).
    #[serde(rename = "cliente_id", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "correo", default)]
    pub email: String,
    #[serde(rename = "telefono", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ciudad", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "codigo_postal", default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Customer {
    /// `"Nombre Apellido"`, or `-` when both are blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    /// The id sales should reference, falling back to the user id.
    #[must_use]
    pub fn sale_customer_id(&self) -> CustomerId {
        self.customer_id
            .unwrap_or_else(|| CustomerId::new(self.id.as_i32()))
    }
}

fn full_name(first: &str, last: &str) -> String {
    let name = format!("{} {}", first.trim(), last.trim());
    let name = name.trim();
    if name.is_empty() {
        "-".to_owned()
    } else {
        name.to_owned()
    }
}

/// Create/update payload for a customer.
///
/// The password is only sent when set; it is mandatory on creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerInput {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: Email,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "codigo_postal", skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl CustomerInput {
    /// Normalize blank optionals and check required fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the first name is blank, or if `creating` and no
    /// password was given.
    pub fn validated(mut self, creating: bool) -> Result<Self, InputError> {
        if self.first_name.trim().is_empty() {
            return Err(InputError::MissingField("nombre"));
        }
        self.password = self.password.filter(|p| !p.is_empty());
        if creating && self.password.is_none() {
            return Err(InputError::MissingField("password"));
        }
        self.phone = non_blank(self.phone);
        self.city = non_blank(self.city);
        self.postal_code = non_blank(self.postal_code);
        Ok(self)
    }
}

/// A staff or customer login account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAccount {
    pub id: UserId,
    #[serde(rename = "nombre", default)]
    pub first_name: String,
    #[serde(rename = "apellido", default)]
    pub last_name: String,
    #[serde(rename = "correo", default)]
    pub email: String,
    #[serde(rename = "rol", default)]
    pub role: Option<String>,
    #[serde(default)]
    pub is_superuser: SuperuserFlag,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl UserAccount {
    /// `"Nombre Apellido"`, or `-` when both are blank.
    #[must_use]
    pub fn full_name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Create/update payload for a user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserAccountInput {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: Email,
    #[serde(rename = "rol")]
    pub role: String,
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Self-service registration payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    #[serde(rename = "correo")]
    pub email: Email,
    pub password: String,
    #[serde(rename = "rol")]
    pub role: String,
}
