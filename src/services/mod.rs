pub mod pricing_service;
pub mod rate_catalog;
pub mod tour_builder;
pub mod tour_service;
pub mod validation;
