// Money is held internally as i64 minor currency units (pence) so that
// order totals are exact; JSON exposes major-unit decimals (8.99).

pub fn to_minor_units(major: f64) -> i64 {
    (major * 100.0).round() as i64
}

pub fn to_major_units(minor: i64) -> f64 {
    minor as f64 / 100.0
}

// serde adapter: `#[serde(with = "crate::domain::money::as_major")]` on an i64 field
pub mod as_major {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(minor: &i64, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_f64(super::to_major_units(*minor))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        let major = f64::deserialize(deserializer)?;
        Ok(super::to_minor_units(major))
    }
}
