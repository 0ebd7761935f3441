//! Catalog form of a serialized curve.
//!
//! JSON has no literal for non-finite numbers and `serde_json` writes them as
//! `null`. Stepped keys carry infinite tangents, so curves held in the catalog
//! go through this adapter: non-finite values are written as the strings
//! `"Infinity"`, `"-Infinity"` and `"NaN"`, finite values stay numbers.
//!
//! Use with `#[serde(with = "crate::codec::json")]` on a [`SerializedCurve`].

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::codec::{SerializedCurve, SerializedKeyframe};
use crate::domain::WrapMode;

pub fn serialize<S: Serializer>(curve: &SerializedCurve, serializer: S) -> Result<S::Ok, S::Error> {
    CurveRepr::from(curve).serialize(serializer)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<SerializedCurve, D::Error> {
    CurveRepr::deserialize(deserializer).map(SerializedCurve::from)
}

#[derive(Serialize, Deserialize)]
struct CurveRepr {
    #[serde(rename = "modePreWrap")]
    mode_pre_wrap: WrapMode,
    #[serde(rename = "modePostWrap")]
    mode_post_wrap: WrapMode,
    keys: Vec<KeyRepr>,
}

#[derive(Serialize, Deserialize)]
struct KeyRepr {
    tv_tg: [JsonFloat; 4],
    w: [JsonFloat; 2],
    m: [i32; 2],
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct JsonFloat(f64);

impl From<&SerializedCurve> for CurveRepr {
    fn from(curve: &SerializedCurve) -> Self {
        Self {
            mode_pre_wrap: curve.mode_pre_wrap,
            mode_post_wrap: curve.mode_post_wrap,
            keys: curve
                .keys
                .iter()
                .map(|k| KeyRepr {
                    tv_tg: k.tv_tg.map(JsonFloat),
                    w: k.w.map(JsonFloat),
                    m: k.m,
                })
                .collect(),
        }
    }
}

impl From<CurveRepr> for SerializedCurve {
    fn from(repr: CurveRepr) -> Self {
        Self {
            mode_pre_wrap: repr.mode_pre_wrap,
            mode_post_wrap: repr.mode_post_wrap,
            keys: repr
                .keys
                .into_iter()
                .map(|k| SerializedKeyframe {
                    tv_tg: k.tv_tg.map(|f| f.0),
                    w: k.w.map(|f| f.0),
                    m: k.m,
                })
                .collect(),
        }
    }
}

impl Serialize for JsonFloat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let v = self.0;
        if v.is_finite() {
            serializer.serialize_f64(v)
        } else if v.is_nan() {
            serializer.serialize_str("NaN")
        } else if v > 0.0 {
            serializer.serialize_str("Infinity")
        } else {
            serializer.serialize_str("-Infinity")
        }
    }
}

impl<'de> Deserialize<'de> for JsonFloat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(JsonFloatVisitor)
    }
}

struct JsonFloatVisitor;

impl Visitor<'_> for JsonFloatVisitor {
    type Value = JsonFloat;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a number or one of \"Infinity\", \"-Infinity\", \"NaN\"")
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        Ok(JsonFloat(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(JsonFloat(v as f64))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        Ok(JsonFloat(v as f64))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "Infinity" => Ok(JsonFloat(f64::INFINITY)),
            "-Infinity" => Ok(JsonFloat(f64::NEG_INFINITY)),
            "NaN" => Ok(JsonFloat(f64::NAN)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}
