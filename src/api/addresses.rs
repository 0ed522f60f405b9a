use serde::{Deserialize, Serialize};

use crate::api::{optional, require};
use crate::database::models::Address;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl CreateAddressRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_address_fields(
            &self.street,
            &self.city,
            &self.province,
            &self.country,
            &self.postal_code,
        )
    }
}

/// Full-field replace; ids come from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAddressRequest {
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl UpdateAddressRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_address_fields(
            &self.street,
            &self.city,
            &self.province,
            &self.country,
            &self.postal_code,
        )
    }
}

fn validate_address_fields(
    street: &Option<String>,
    city: &Option<String>,
    province: &Option<String>,
    country: &str,
    postal_code: &str,
) -> Result<(), ApiError> {
    // Optional fields still reject empty strings; empty != NULL in the store
    optional("street", street, 255)?;
    optional("city", city, 100)?;
    optional("province", province, 100)?;
    require("country", country, 100)?;
    require("postalCode", postal_code, 10)?;
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: i64,
    pub street: Option<String>,
    pub city: Option<String>,
    pub province: Option<String>,
    pub country: String,
    pub postal_code: String,
}

impl From<Address> for AddressResponse {
    fn from(address: Address) -> Self {
        Self {
            id: address.id,
            street: address.street,
            city: address.city,
            province: address.province,
            country: address.country,
            postal_code: address.postal_code,
        }
    }
}
