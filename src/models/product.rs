use serde::{Deserialize, Serialize};
use std::fmt;

/// A single cosmetic product as stored in the `cosmetics` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// 1-based insertion position; assigned by the store.
    pub id: i64,
    pub label: String,
    pub brand: String,
    pub name: String,
    pub price: f64,
    pub rank: i64,
    pub ingredients: String,
    pub combination: bool,
    pub dry: bool,
    pub normal: bool,
    pub oily: bool,
    pub sensitive: bool,
}

impl ProductRecord {
    /// Read one column of this record.
    pub fn value(&self, field: Field) -> FieldValue {
        match field {
            Field::Label => FieldValue::Text(self.label.clone()),
            Field::Brand => FieldValue::Text(self.brand.clone()),
            Field::Name => FieldValue::Text(self.name.clone()),
            Field::Price => FieldValue::Number(self.price),
            Field::Rank => FieldValue::Integer(self.rank),
            Field::Ingredients => FieldValue::Text(self.ingredients.clone()),
            Field::Combination => FieldValue::Flag(self.combination),
            Field::Dry => FieldValue::Flag(self.dry),
            Field::Normal => FieldValue::Flag(self.normal),
            Field::Oily => FieldValue::Flag(self.oily),
            Field::Sensitive => FieldValue::Flag(self.sensitive),
        }
    }
}

/// Column of a [`ProductRecord`] that a report can group by or average over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Label,
    Brand,
    Name,
    Price,
    Rank,
    Ingredients,
    Combination,
    Dry,
    Normal,
    Oily,
    Sensitive,
}

impl Field {
    /// Column name in the `cosmetics` table.
    pub fn column(&self) -> &'static str {
        match self {
            Field::Label => "label",
            Field::Brand => "brand",
            Field::Name => "name",
            Field::Price => "price",
            Field::Rank => "rank",
            Field::Ingredients => "ingredients",
            Field::Combination => "combination",
            Field::Dry => "dry",
            Field::Normal => "normal",
            Field::Oily => "oily",
            Field::Sensitive => "sensitive",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Integer(i64),
    Flag(bool),
}

impl FieldValue {
    /// Numeric view of the value, if it has one. Flags and text do not.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Text(_) | FieldValue::Flag(_) => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            FieldValue::Text(_) => "text",
            FieldValue::Number(_) => "number",
            FieldValue::Integer(_) => "integer",
            FieldValue::Flag(_) => "flag",
        }
    }

    /// Group key used when this value is the grouping column.
    pub fn group_key(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            // -0.0 and 0.0 compare equal and must land in the same group
            FieldValue::Number(n) if *n == 0.0 => "0".to_string(),
            FieldValue::Number(n) => n.to_string(),
            FieldValue::Integer(i) => i.to_string(),
            FieldValue::Flag(true) => "Yes".to_string(),
            FieldValue::Flag(false) => "No".to_string(),
        }
    }
}

/// Parse a stored suitability flag. Accepts Yes/No, true/false and 1/0.
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" => Some(true),
        "no" | "n" | "false" | "0" => Some(false),
        _ => None,
    }
}

pub fn flag_text(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

#[allow(clippy::too_many_arguments)]
fn product(
    id: i64,
    label: &str,
    brand: &str,
    name: &str,
    price: f64,
    rank: i64,
    ingredients: &str,
    flags: [bool; 5],
) -> ProductRecord {
    let [combination, dry, normal, oily, sensitive] = flags;
    ProductRecord {
        id,
        label: label.to_string(),
        brand: brand.to_string(),
        name: name.to_string(),
        price,
        rank,
        ingredients: ingredients.to_string(),
        combination,
        dry,
        normal,
        oily,
        sensitive,
    }
}

/// The five seed products written to the store at the start of every run.
pub fn sample_products() -> Vec<ProductRecord> {
    vec![
        product(1, "Organic", "BrandA", "Product1", 1200.0, 4, "Aloe, Shea", [true, true, true, false, true]),
        product(2, "Vegan", "BrandB", "Product2", 800.0, 5, "Coconut, Vitamin E", [true, false, true, true, false]),
        product(3, "Cruelty-Free", "BrandC", "Product3", 1500.0, 3, "Green Tea, Hyaluronic", [false, true, false, true, true]),
        product(4, "Organic", "BrandA", "Product4", 1000.0, 2, "Shea, Almond", [true, true, true, false, true]),
        product(5, "Vegan", "BrandB", "Product5", 700.0, 5, "Avocado, Jojoba", [false, true, false, true, false]),
    ]
}
