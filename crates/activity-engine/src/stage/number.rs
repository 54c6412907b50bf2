//! Serde helpers for stage geometry.
//!
//! Authored files hold plain integers (`"x": 440`); edits keep them that way so
//! a saved catalog diffs cleanly against the hand-written one.

use serde::{Deserialize, Deserializer, Serializer};

const MAX_EXACT: f64 = 9_007_199_254_740_992.0;

pub fn serialize<S>(value: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if value.is_finite() && value.fract() == 0.0 && value.abs() < MAX_EXACT {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

pub mod option {
    use serde::Serializer;

    pub fn serialize<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => super::serialize(v, serializer),
            None => serializer.serialize_none(),
        }
    }
}

/// Accepts `0.5` as well as `"0.5"`; anything unparsable reads as absent.
pub fn lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Number(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().parse().ok(),
        Some(Raw::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Serialize, Deserialize)]
    struct Probe {
        #[serde(serialize_with = "super::serialize")]
        x: f64,
        #[serde(default, serialize_with = "super::option::serialize", deserialize_with = "super::lenient")]
        opacity: Option<f64>,
    }

    #[test]
    fn whole_numbers_serialize_as_integers() {
        let json = serde_json::to_string(&Probe { x: 440.0, opacity: Some(1.0) }).unwrap();
        assert_eq!(json, r#"{"x":440,"opacity":1}"#);
        let json = serde_json::to_string(&Probe { x: 12.5, opacity: None }).unwrap();
        assert_eq!(json, r#"{"x":12.5,"opacity":null}"#);
    }

    #[test]
    fn lenient_accepts_numeric_strings() {
        let p: Probe = serde_json::from_str(r#"{"x": 1, "opacity": "0.4"}"#).unwrap();
        assert_eq!(p.opacity, Some(0.4));
        let p: Probe = serde_json::from_str(r#"{"x": 1, "opacity": "abc"}"#).unwrap();
        assert_eq!(p.opacity, None);
        let p: Probe = serde_json::from_str(r#"{"x": 1}"#).unwrap();
        assert_eq!(p.opacity, None);
    }
}
