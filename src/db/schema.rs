/// Drops and recreates the product table. Run once per store at startup.
pub const RESET_TABLES: &str = "
DROP TABLE IF EXISTS cosmetics;

CREATE TABLE cosmetics (
    id INTEGER PRIMARY KEY,
    label TEXT,
    brand TEXT,
    name TEXT,
    price REAL,
    rank INTEGER,
    ingredients TEXT,
    combination TEXT,
    dry TEXT,
    normal TEXT,
    oily TEXT,
    sensitive TEXT
);
";

pub const INSERT_PRODUCT: &str = "
INSERT INTO cosmetics (label, brand, name, price, rank, ingredients, combination, dry, normal, oily, sensitive)
VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
";

pub const SELECT_PRODUCTS: &str = "
SELECT id, label, brand, name, price, rank, ingredients, combination, dry, normal, oily, sensitive
FROM cosmetics
ORDER BY id
";
