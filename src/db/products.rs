use rusqlite::types::Value;
use crate::errors::ReportError;
use crate::models::product::{flag_text, parse_flag, ProductRecord};
use super::schema::{INSERT_PRODUCT, SELECT_PRODUCTS};
use super::Database;
use tracing::info;

impl Database {
    /// Reset the table and write `products` in one transaction. Ids are
    /// reassigned by the store in insertion order.
    pub fn seed(&mut self, products: &[ProductRecord]) -> Result<usize, ReportError> {
        self.reset_schema()?;

        let tx = self.conn.transaction()
            .map_err(|e| ReportError::Database(format!("Failed to begin transaction: {}", e)))?;
        {
            let mut stmt = tx.prepare(INSERT_PRODUCT)
                .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;
            for product in products {
                stmt.execute(rusqlite::params![
                    product.label,
                    product.brand,
                    product.name,
                    product.price,
                    product.rank,
                    product.ingredients,
                    flag_text(product.combination),
                    flag_text(product.dry),
                    flag_text(product.normal),
                    flag_text(product.oily),
                    flag_text(product.sensitive),
                ]).map_err(|e| ReportError::Database(format!("Failed to insert product: {}", e)))?;
            }
        }
        tx.commit()
            .map_err(|e| ReportError::Database(format!("Failed to commit products: {}", e)))?;

        info!(count = products.len(), "Seeded product store");
        Ok(products.len())
    }

    pub fn count_products(&self) -> Result<usize, ReportError> {
        let count: i64 = self.conn
            .query_row("SELECT COUNT(*) FROM cosmetics", [], |row| row.get(0))
            .map_err(|e| ReportError::Database(format!("Query error: {}", e)))?;
        Ok(count as usize)
    }

    /// Read every product back in id order.
    pub fn load_products(&self) -> Result<Vec<ProductRecord>, ReportError> {
        let mut stmt = self.conn.prepare(SELECT_PRODUCTS)
            .map_err(|e| ReportError::Database(format!("Query failed: {}", e)))?;

        let rows = stmt.query_map([], |row: &rusqlite::Row| {
            let mut values: Vec<Value> = Vec::with_capacity(12);
            for i in 0..12 {
                values.push(row.get::<_, Value>(i)?);
            }
            Ok(values)
        }).map_err(|e| ReportError::Database(format!("Query error: {}", e)))?;

        let mut products = Vec::new();
        for row in rows {
            let values = row.map_err(|e| ReportError::Database(format!("Row error: {}", e)))?;
            products.push(record_from_values(&values)?);
        }
        Ok(products)
    }
}

const COLUMNS: [&str; 12] = [
    "id", "label", "brand", "name", "price", "rank", "ingredients",
    "combination", "dry", "normal", "oily", "sensitive",
];

fn record_from_values(values: &[Value]) -> Result<ProductRecord, ReportError> {
    let id = integer(values, 0, 0)?;
    Ok(ProductRecord {
        id,
        label: text(values, 1),
        brand: text(values, 2),
        name: text(values, 3),
        price: real(values, 4, id)?,
        rank: integer(values, 5, id)?,
        ingredients: text(values, 6),
        combination: flag(values, 7, id)?,
        dry: flag(values, 8, id)?,
        normal: flag(values, 9, id)?,
        oily: flag(values, 10, id)?,
        sensitive: flag(values, 11, id)?,
    })
}

fn bad_column(idx: usize, id: i64, value: &Value) -> ReportError {
    ReportError::Database(format!(
        "Row {}: column '{}' holds unexpected value {:?}",
        id, COLUMNS[idx], value
    ))
}

fn text(values: &[Value], idx: usize) -> String {
    match &values[idx] {
        Value::Text(s) => s.clone(),
        Value::Integer(i) => i.to_string(),
        Value::Real(r) => r.to_string(),
        Value::Null | Value::Blob(_) => String::new(),
    }
}

fn real(values: &[Value], idx: usize, id: i64) -> Result<f64, ReportError> {
    match &values[idx] {
        Value::Real(r) => Ok(*r),
        Value::Integer(i) => Ok(*i as f64),
        other => Err(bad_column(idx, id, other)),
    }
}

fn integer(values: &[Value], idx: usize, id: i64) -> Result<i64, ReportError> {
    match &values[idx] {
        Value::Integer(i) => Ok(*i),
        Value::Real(r) if r.fract() == 0.0 => Ok(*r as i64),
        other => Err(bad_column(idx, id, other)),
    }
}

fn flag(values: &[Value], idx: usize, id: i64) -> Result<bool, ReportError> {
    match &values[idx] {
        Value::Text(s) => parse_flag(s).ok_or_else(|| bad_column(idx, id, &values[idx])),
        Value::Integer(i) => Ok(*i != 0),
        other => Err(bad_column(idx, id, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::sample_products;

    #[test]
    fn test_db_seed_and_load_round_trip() {
        let mut db = Database::in_memory().unwrap();
        let products = sample_products();
        assert_eq!(db.seed(&products).unwrap(), 5);

        let loaded = db.load_products().unwrap();
        assert_eq!(loaded, products);
    }

    #[test]
    fn test_db_reseed_does_not_duplicate() {
        let mut db = Database::in_memory().unwrap();
        db.seed(&sample_products()).unwrap();
        db.seed(&sample_products()).unwrap();
        assert_eq!(db.count_products().unwrap(), 5);
    }

    #[test]
    fn test_db_flags_stored_as_yes_no() {
        let mut db = Database::in_memory().unwrap();
        db.seed(&sample_products()).unwrap();
        let flags: Vec<String> = {
            let mut stmt = db.conn.prepare("SELECT sensitive FROM cosmetics ORDER BY id").unwrap();
            let rows = stmt.query_map([], |row| row.get::<_, String>(0)).unwrap();
            let collected: Vec<String> = rows.map(|r| r.unwrap()).collect();
            collected
        };
        assert_eq!(flags, vec!["Yes", "No", "Yes", "Yes", "No"]);
    }

    #[test]
    fn test_db_non_numeric_price_is_rejected() {
        let mut db = Database::in_memory().unwrap();
        db.seed(&[]).unwrap();
        db.conn.execute(
            "INSERT INTO cosmetics (label, brand, name, price, rank, ingredients, combination, dry, normal, oily, sensitive) VALUES ('Vegan', 'BrandX', 'P', 'cheap', 1, '', 'Yes', 'Yes', 'Yes', 'Yes', 'Yes')",
            [],
        ).unwrap();

        let err = db.load_products().unwrap_err();
        assert!(matches!(err, ReportError::Database(ref msg) if msg.contains("'price'")));
    }

    #[test]
    fn test_db_unknown_flag_is_rejected() {
        let mut db = Database::in_memory().unwrap();
        db.seed(&[]).unwrap();
        db.conn.execute(
            "INSERT INTO cosmetics (label, brand, name, price, rank, ingredients, combination, dry, normal, oily, sensitive) VALUES ('Vegan', 'BrandX', 'P', 10, 1, '', 'Yes', 'Yes', 'Yes', 'Yes', 'Sometimes')",
            [],
        ).unwrap();

        assert!(db.load_products().is_err());
    }

    #[test]
    fn test_db_empty_table_loads_nothing() {
        let mut db = Database::in_memory().unwrap();
        db.seed(&[]).unwrap();
        assert!(db.load_products().unwrap().is_empty());
    }
}
