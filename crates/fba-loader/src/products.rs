//! 商品清單 CSV
//!
//! 欄位沿用賣家後台匯出的報表：`fnsku`、`sales-price`、`longest-side`、
//! `median-side`、`shortest-side`、`unit-of-dimension`、`item-package-weight`、
//! `unit-of-weight`，以及可省略的 `amazon-store`。

use std::io::Read;

use fba_core::ProductRecord;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::amount::parse_number;
use crate::{csv_reader, require_columns, LoadError, Result};

#[derive(Debug, Deserialize)]
struct ProductRow {
    fnsku: String,
    #[serde(rename = "sales-price", default)]
    sales_price: String,
    #[serde(rename = "longest-side")]
    longest_side: String,
    #[serde(rename = "median-side")]
    median_side: String,
    #[serde(rename = "shortest-side")]
    shortest_side: String,
    #[serde(rename = "unit-of-dimension")]
    unit_of_dimension: String,
    #[serde(rename = "item-package-weight")]
    item_package_weight: String,
    #[serde(rename = "unit-of-weight")]
    unit_of_weight: String,
    #[serde(rename = "amazon-store", default)]
    amazon_store: String,
}

fn field(line: usize, name: &str, value: &str) -> Result<Decimal> {
    parse_number(value).map_err(|_| LoadError::row(line, format!("{} 不是有效數字: '{}'", name, value)))
}

/// 讀取商品清單
///
/// 缺少售價時視為 0；缺少站點時留空，由引擎改用市場預設國家。
pub fn read_products<R: Read>(reader: R) -> Result<Vec<ProductRecord>> {
    let mut rdr = csv_reader(reader);
    require_columns(
        &mut rdr,
        &[
            "fnsku",
            "longest-side",
            "median-side",
            "shortest-side",
            "unit-of-dimension",
            "item-package-weight",
            "unit-of-weight",
        ],
    )?;

    let mut products = Vec::new();
    for (idx, row) in rdr.deserialize::<ProductRow>().enumerate() {
        let line = idx + 2;
        let row = row?;

        if row.fnsku.is_empty() {
            return Err(LoadError::row(line, "fnsku 不可為空"));
        }

        let price = if row.sales_price.is_empty() {
            Decimal::ZERO
        } else {
            field(line, "sales-price", &row.sales_price)?
        };

        let record = ProductRecord::new(row.fnsku, row.amazon_store.to_uppercase(), price)
            .with_sides(
                field(line, "longest-side", &row.longest_side)?,
                field(line, "median-side", &row.median_side)?,
                field(line, "shortest-side", &row.shortest_side)?,
                row.unit_of_dimension,
            )
            .with_weight(
                field(line, "item-package-weight", &row.item_package_weight)?,
                row.unit_of_weight,
            );
        products.push(record);
    }

    tracing::info!("商品清單載入完成：{} 筆", products.len());
    Ok(products)
}
