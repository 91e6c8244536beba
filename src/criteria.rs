//! The criteria document submitted for scoring.
//!
//! The service accepts a nested mapping of geographic, crop, livestock, and
//! acreage attributes, every field optional. The document is forwarded as-is:
//! this client does not validate its shape, so it is carried as raw JSON
//! rather than a typed schema.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct CriteriaDocument(pub serde_json::Value);

impl CriteriaDocument {
    /// Parse a criteria document from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse criteria document as JSON")
    }

    /// A representative criteria document, useful as a starting point for
    /// building a real one.
    pub fn sample() -> Self {
        CriteriaDocument(json!({
            "geo": {
                "zip_no": 23330,
                "City_no": 20085,
                "county_code": 2706,
                "STATE": "IL"
            },
            "crops": {
                "CORNF": true,
                "SOYBEANF": true,
                "WHEATF": false
            },
            "livestocks": {
                "GOATSF": false,
                "CATTLEF": true,
                "CATTLEHEAD": "251 to 500",
                "GOATSHEAD": null
            },
            "acreage": {
                "CORNACRE": "E",
                "WHEATACRE": null,
                "SOYBEANACRE": "C",
                "TOTACRES": "F"
            }
        }))
    }
}
