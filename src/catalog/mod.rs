//! Async HTTP clients for the data the classifier consumes.
//!
//! - [`open_food_facts`]: product search by category, normalized to [`Product`](crate::models::Product).
//! - [`dictionary`]: downloads a remote risk-term table as a validated snapshot.
//!
//! Non-success HTTP statuses degrade to "nothing fetched"; transport errors
//! are returned to the caller.

pub mod dictionary;
pub mod open_food_facts;

pub const USER_AGENT: &str = concat!(
    "ingredient-checkr/",
    env!("CARGO_PKG_VERSION"),
    " (ingredient risk checker)"
);
