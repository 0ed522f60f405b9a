pub mod address_service;
pub mod contact_service;
pub mod user_service;
