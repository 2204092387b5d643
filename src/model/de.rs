use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum StringOrNumber {
    String(String),
    Integer(i64),
    Float(f64),
}

impl StringOrNumber {
    fn into_string(self) -> String {
        match self {
            Self::String(s) => s,
            Self::Integer(i) => i.to_string(),
            Self::Float(f) => f.to_string(),
        }
    }

    /// Numeric value; text that isn't a number counts as 0.
    fn into_f64(self) -> f64 {
        match self {
            Self::String(s) => s.trim().parse().unwrap_or_default(),
            Self::Integer(i) => i as f64,
            Self::Float(f) => f,
        }
    }
}

/// Ids arrive either as strings or as bare numbers depending on the backend.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(StringOrNumber::deserialize(deserializer)?.into_string())
}

/// Like [`string_or_number`] for optional ids; `null` reads as `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?.map(StringOrNumber::into_string))
}

/// Any JSON number, a numeric string or `null` (read as 0).
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<StringOrNumber>::deserialize(deserializer)?
        .map(StringOrNumber::into_f64)
        .unwrap_or_default())
}

/// Counts and positions: rounded, negative values read as 0.
pub fn lenient_u32<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = lenient_f64(deserializer)?;
    Ok(value.round().clamp(0.0, f64::from(u32::MAX)) as u32)
}
