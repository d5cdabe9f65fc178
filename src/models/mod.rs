pub mod cost;
pub mod rates;
pub mod tour;
