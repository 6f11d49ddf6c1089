use std::fmt;

use rust_decimal::Decimal;
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, Visitor},
};

/// A persisted product row. `price` travels as a JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub image_url: String,
}

/// Body of `POST /products`. Any `id` sent by the client is ignored.
///
/// `price` takes a JSON number or a numeric string, since HTML forms submit strings.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_price")]
    pub price: Decimal,
    pub image_url: String,
}

/// Prices must fit a `Decimal` exactly: at most 28 fractional digits and a
/// magnitude below ~7.9e28. Anything else is refused rather than rounded.
fn deserialize_price<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_any(PriceVisitor)
}

struct PriceVisitor;

impl PriceVisitor {
    fn parse<E: de::Error>(raw: &str) -> Result<Decimal, E> {
        Decimal::from_str_exact(raw)
            .map_err(|e| E::custom(format!("price {raw} cannot be stored exactly: {e}")))
    }
}

impl<'de> Visitor<'de> for PriceVisitor {
    type Value = Decimal;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a price as a number or numeric string")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Decimal, E> {
        Ok(Decimal::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Decimal, E> {
        if !v.is_finite() {
            return Err(E::custom("price must be finite"));
        }
        // f64 Display never uses exponent notation, so this is plain decimal text.
        Self::parse(&v.to_string())
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Decimal, E> {
        Self::parse(v.trim())
    }
}
