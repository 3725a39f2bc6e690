pub mod pricing;
pub mod catalog_service;
pub use catalog_service::CatalogService;
pub mod quote_service;
pub use quote_service::{QuoteDraft, QuoteLineInput, QuoteService};
pub mod dashboard_service;
pub use dashboard_service::DashboardService;
