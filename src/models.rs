pub mod product;
pub mod supplier;
pub mod quote;
pub mod dashboard;

pub use product::{Product, ProductPatch};
pub use supplier::{Supplier, SupplierPatch};
pub use quote::{NewQuote, PricedQuote, ProductSnapshot, Quote, QuoteItem, QuotePatch, QuoteStatus};
pub use dashboard::DashboardSummary;
