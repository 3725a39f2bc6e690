// src/services/catalog_service.rs

use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ProductRepository, SupplierRepository},
    models::{
        product::{Product, ProductPatch},
        supplier::{Supplier, SupplierPatch},
    },
};

// Busca simples das telas: "contém", sem diferenciar maiúsculas.
fn matches(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Filtra produtos por nome ou código.
pub fn filter_products<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| matches(&p.name, &needle) || matches(&p.code, &needle))
        .collect()
}

/// Filtra fornecedores por razão social ou partita IVA.
pub fn filter_suppliers<'a>(suppliers: &'a [Supplier], term: &str) -> Vec<&'a Supplier> {
    let needle = term.to_lowercase();
    suppliers
        .iter()
        .filter(|s| matches(&s.legal_name, &needle) || matches(&s.vat_number, &needle))
        .collect()
}

// Magazzino + Fornitori. Valida a entrada antes de chegar no repositório.
#[derive(Clone)]
pub struct CatalogService {
    products: ProductRepository,
    suppliers: SupplierRepository,
}

impl CatalogService {
    pub fn new(products: ProductRepository, suppliers: SupplierRepository) -> Self {
        Self { products, suppliers }
    }

    // --- PRODOTTI ---

    pub async fn create_product(&self, product: Product) -> Result<Product, AppError> {
        product.validate()?;
        self.products.create(product).await
    }

    pub async fn update_product(&self, id: &str, patch: ProductPatch) -> Result<Product, AppError> {
        patch.validate()?;
        self.products.update(id, &patch).await
    }

    pub async fn delete_product(&self, id: &str) -> Result<(), AppError> {
        self.products.delete(id).await
    }

    pub async fn list_products(&self) -> Result<Vec<Product>, AppError> {
        self.products.list_all().await
    }

    pub async fn search_products(&self, term: &str) -> Result<Vec<Product>, AppError> {
        let all = self.products.list_all().await?;
        Ok(filter_products(&all, term).into_iter().cloned().collect())
    }

    /// Produtos no limite ou abaixo da scorta minima.
    pub async fn low_stock_products(&self) -> Result<Vec<Product>, AppError> {
        let all = self.products.list_all().await?;
        Ok(all.into_iter().filter(Product::is_below_min_stock).collect())
    }

    pub async fn products_by_supplier(&self, supplier_id: &str) -> Result<Vec<Product>, AppError> {
        self.products.find_by_supplier(supplier_id).await
    }

    // --- FORNITORI ---

    pub async fn create_supplier(&self, supplier: Supplier) -> Result<Supplier, AppError> {
        supplier.validate()?;
        self.suppliers.create(supplier).await
    }

    pub async fn update_supplier(&self, id: &str, patch: SupplierPatch) -> Result<Supplier, AppError> {
        patch.validate()?;
        self.suppliers.update(id, &patch).await
    }

    // Produtos que apontam para o fornecedor continuam com o mesmo `fornitoreId`.
    pub async fn delete_supplier(&self, id: &str) -> Result<(), AppError> {
        self.suppliers.delete(id).await
    }

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.suppliers.list_all().await
    }

    pub async fn search_suppliers(&self, term: &str) -> Result<Vec<Supplier>, AppError> {
        let all = self.suppliers.list_all().await?;
        Ok(filter_suppliers(&all, term).into_iter().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, code: &str) -> Product {
        Product {
            name: name.into(),
            code: code.into(),
            ..Default::default()
        }
    }

    #[test]
    fn product_search_is_case_insensitive_on_name_or_code() {
        let products = vec![
            product("Interruttore Magnetotermico", "INT001"),
            product("Cavo FG16", "CAV010"),
        ];

        assert_eq!(filter_products(&products, "magneto").len(), 1);
        assert_eq!(filter_products(&products, "cav0").len(), 1);
        assert_eq!(filter_products(&products, "").len(), 2);
        assert!(filter_products(&products, "presa").is_empty());
    }

    #[test]
    fn supplier_search_matches_vat_number() {
        let suppliers = vec![Supplier {
            legal_name: "Elettroforniture SpA".into(),
            vat_number: "12345678901".into(),
            ..Default::default()
        }];

        assert_eq!(filter_suppliers(&suppliers, "45678").len(), 1);
        assert_eq!(filter_suppliers(&suppliers, "ELETTRO").len(), 1);
    }
}
