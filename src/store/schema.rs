//! Database schema for the inventory store.

/// Products table.
///
/// `created_at` holds RFC 3339 UTC text with fixed millisecond precision, so
/// lexical order matches chronological order.
pub const SCHEMA_SQL: &str = r#"
create table if not exists products (
    id         text primary key not null,
    name       text not null,
    sku        text not null unique,
    price      real not null,
    quantity   integer not null,
    min_stock  integer not null,
    created_at text not null
);

create index if not exists IndexProductsCreatedAt on products(created_at);
"#;

/// Column list shared by every product SELECT.
pub(crate) const PRODUCT_COLUMNS: &str =
    "id, name, sku, price, quantity, min_stock, created_at";
