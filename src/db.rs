pub mod db;
pub use db::connect;
pub mod projection;
pub use projection::{Projection, Snapshot, Subscription};
pub mod store;
pub use store::{Record, RecordStore, Table};
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod supplier_repo;
pub use supplier_repo::SupplierRepository;
pub mod quote_repo;
pub use quote_repo::QuoteRepository;
pub mod seed;
pub use seed::{seed_if_empty, SeedReport};
