use serde::{Deserialize, Serialize};

use crate::api::{email_format, optional, require};
use crate::database::models::Contact;
use crate::error::ApiError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl CreateContactRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_contact_fields(&self.first_name, &self.last_name, &self.email, &self.phone)
    }
}

/// Full-field replace; the id comes from the path.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl UpdateContactRequest {
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_contact_fields(&self.first_name, &self.last_name, &self.email, &self.phone)
    }
}

fn validate_contact_fields(
    first_name: &str,
    last_name: &Option<String>,
    email: &Option<String>,
    phone: &Option<String>,
) -> Result<(), ApiError> {
    require("firstName", first_name, 100)?;
    optional("lastName", last_name, 100)?;
    optional("email", email, 100)?;
    if let Some(email) = email {
        email_format("email", email)?;
    }
    optional("phone", phone, 20)?;
    Ok(())
}

/// Raw search query parameters as they arrive on the URL
#[derive(Debug, Deserialize)]
pub struct SearchContactQuery {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

/// Validated search request with pagination defaults applied
#[derive(Debug)]
pub struct SearchContactRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub page: i64,
    pub size: i64,
}

impl SearchContactRequest {
    pub fn from_query(query: SearchContactQuery) -> Result<Self, ApiError> {
        let pagination = &crate::config::config().pagination;
        let page = query.page.unwrap_or(1);
        let size = query.size.unwrap_or(pagination.default_size);

        if page < 1 {
            return Err(ApiError::validation("page must be at least 1"));
        }
        if size < 1 || size > pagination.max_size {
            return Err(ApiError::validation(format!(
                "size must be between 1 and {}",
                pagination.max_size
            )));
        }

        // Present-but-empty filters are rejected rather than treated as no-ops
        for (field, value) in [
            ("name", &query.name),
            ("email", &query.email),
            ("phone", &query.phone),
        ] {
            if let Some(v) = value {
                if v.is_empty() {
                    return Err(ApiError::validation(format!("{} must not be empty", field)));
                }
            }
        }

        Ok(Self {
            name: query.name,
            email: query.email,
            phone: query.phone,
            page,
            size,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone: contact.phone,
        }
    }
}
