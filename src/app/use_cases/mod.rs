pub mod calculate_shipping;
pub mod list_available_countries;
