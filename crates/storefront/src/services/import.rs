//! CSV bulk product import.
//!
//! Consumes the flat CSV shape the admin bulk-import form produces:
//!
//! ```text
//! name,description,price,inventory,categoryId
//! Sourdough Loaf,Naturally leavened,4.99,12,3
//! ```
//!
//! Rows are validated individually: a bad row is reported with its line
//! number and skipped, and rows before and after it still import. Only a
//! missing or wrong header aborts the whole request.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

use greenbasket_core::CategoryId;

use crate::catalog::Catalog;
use crate::models::{NewProduct, Product};

/// The exact header row the import expects.
pub const EXPECTED_HEADER: &str = "name,description,price,inventory,categoryId";

/// Number of fields per row.
const FIELD_COUNT: usize = 5;

/// A batch-level import failure. Row-level problems never produce this;
/// they are reported per row in [`ImportReport::errors`].
#[derive(Debug, Error)]
pub enum ImportError {
    /// The first line is missing or is not the expected header.
    #[error("invalid CSV header: expected `{EXPECTED_HEADER}`")]
    InvalidHeader,
}

/// Result of a bulk import: what made it in, and what was rejected.
#[derive(Debug, Serialize)]
pub struct ImportReport {
    pub imported: Vec<Product>,
    pub errors: Vec<RowError>,
}

/// A rejected row, identified by its 1-based line number in the input.
#[derive(Debug, Serialize)]
pub struct RowError {
    pub line: usize,
    pub message: String,
}

/// Import products from CSV text.
///
/// # Errors
///
/// Returns `ImportError::InvalidHeader` if the header row is missing or
/// malformed. Individual row failures are reported in the returned
/// [`ImportReport`] and do not abort the batch.
pub async fn import_products(catalog: &Catalog, csv: &str) -> Result<ImportReport, ImportError> {
    let mut lines = csv.lines().enumerate();

    let header = lines
        .next()
        .map(|(_, line)| line.trim())
        .ok_or(ImportError::InvalidHeader)?;
    if header != EXPECTED_HEADER {
        return Err(ImportError::InvalidHeader);
    }

    let mut imported = Vec::new();
    let mut errors = Vec::new();

    for (index, raw) in lines {
        let line = index + 1; // 1-based, counting the header as line 1
        if raw.trim().is_empty() {
            continue;
        }

        match parse_row(raw) {
            Ok(new) => match catalog.create_product(new).await {
                Ok(product) => {
                    tracing::debug!(line, product_id = %product.id, "imported product row");
                    imported.push(product);
                }
                Err(e) => errors.push(RowError {
                    line,
                    message: e.to_string(),
                }),
            },
            Err(message) => errors.push(RowError { line, message }),
        }
    }

    tracing::info!(
        imported = imported.len(),
        rejected = errors.len(),
        "bulk product import finished"
    );
    Ok(ImportReport { imported, errors })
}

/// Parse one data row into a [`NewProduct`].
///
/// Field-level checks happen here; catalog-level checks (category existence,
/// name/description/price validation) happen in the repository so the two
/// entry points agree.
fn parse_row(raw: &str) -> Result<NewProduct, String> {
    let fields: Vec<&str> = raw.split(',').map(str::trim).collect();
    if fields.len() != FIELD_COUNT {
        return Err(format!(
            "expected {FIELD_COUNT} fields, got {}",
            fields.len()
        ));
    }

    let name = fields.first().copied().unwrap_or_default();
    let description = fields.get(1).copied().unwrap_or_default();
    let price_raw = fields.get(2).copied().unwrap_or_default();
    let inventory_raw = fields.get(3).copied().unwrap_or_default();
    let category_raw = fields.get(4).copied().unwrap_or_default();

    if name.is_empty() {
        return Err("name cannot be empty".to_owned());
    }
    if description.is_empty() {
        return Err("description cannot be empty".to_owned());
    }

    let price: Decimal = price_raw
        .parse()
        .map_err(|_| format!("invalid price: {price_raw}"))?;
    if price <= Decimal::ZERO {
        return Err(format!("price must be positive: {price_raw}"));
    }

    let inventory: u32 = inventory_raw
        .parse()
        .map_err(|_| format!("invalid inventory: {inventory_raw}"))?;

    let category_id: i32 = category_raw
        .parse()
        .map_err(|_| format!("invalid categoryId: {category_raw}"))?;

    Ok(NewProduct {
        name: name.to_owned(),
        description: description.to_owned(),
        price,
        category_id: CategoryId::new(category_id),
        store_id: None,
        inventory,
        image_url: None,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::seed;

    fn catalog() -> Catalog {
        Catalog::new(seed::seed_data())
    }

    #[tokio::test]
    async fn test_valid_rows_import() {
        let catalog = catalog();
        let csv = "name,description,price,inventory,categoryId\n\
                   Sourdough Loaf,Naturally leavened,4.99,12,3\n\
                   Oat Milk,Barista blend,3.49,30,2\n";

        let report = import_products(&catalog, csv).await.unwrap();
        assert_eq!(report.imported.len(), 2);
        assert!(report.errors.is_empty());

        let names: Vec<String> = catalog
            .products()
            .list()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert!(names.contains(&"Sourdough Loaf".to_owned()));
    }

    #[tokio::test]
    async fn test_bad_row_is_rejected_without_aborting_batch() {
        let catalog = catalog();
        let csv = "name,description,price,inventory,categoryId\n\
                   Good Before,Fine,2.00,5,1\n\
                   Bad Price,Broken,notanumber,5,1\n\
                   Good After,Fine,3.00,5,1\n";

        let report = import_products(&catalog, csv).await.unwrap();
        assert_eq!(report.imported.len(), 2);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].line, 3);
        assert!(report.errors[0].message.contains("invalid price"));

        let names: Vec<String> = catalog
            .products()
            .list()
            .await
            .into_iter()
            .map(|p| p.name)
            .collect();
        assert!(!names.contains(&"Bad Price".to_owned()));
        assert!(names.contains(&"Good Before".to_owned()));
        assert!(names.contains(&"Good After".to_owned()));
    }

    #[tokio::test]
    async fn test_row_checks() {
        let catalog = catalog();
        let csv = "name,description,price,inventory,categoryId\n\
                   ,Missing name,2.00,5,1\n\
                   No Desc,,2.00,5,1\n\
                   Neg Price,Fine,-2.00,5,1\n\
                   Bad Inventory,Fine,2.00,-3,1\n\
                   Bad Category,Fine,2.00,5,999\n\
                   Short Row,Fine,2.00\n";

        let report = import_products(&catalog, csv).await.unwrap();
        assert!(report.imported.is_empty());
        assert_eq!(report.errors.len(), 6);
    }

    #[tokio::test]
    async fn test_wrong_header_aborts() {
        let catalog = catalog();
        let csv = "name,price\nApples,2.00\n";
        assert!(matches!(
            import_products(&catalog, csv).await,
            Err(ImportError::InvalidHeader)
        ));
    }

    #[tokio::test]
    async fn test_blank_lines_are_skipped() {
        let catalog = catalog();
        let csv = "name,description,price,inventory,categoryId\n\n\
                   Apples,Crisp,2.00,5,1\n\n";

        let report = import_products(&catalog, csv).await.unwrap();
        assert_eq!(report.imported.len(), 1);
        assert!(report.errors.is_empty());
    }
}
