use crate::context::Site;
use crate::error::ImageError;
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// A named celestial object with its display color.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    pub name: String,
    pub color: String,
}

impl Target {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// Body of `POST {baseUrl}/generate`: a snapshot of context and targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlotRequest {
    pub date: NaiveDate,
    pub timezone: String,
    pub site: Site,
    pub targets: Vec<Target>,
}

/// A per-target failure reported by the plot service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetNameError {
    pub name: String,
    pub error: String,
}

/// Response body of the plot service, for both 2xx and error statuses.
///
/// The service may send `null` for `imageData` and `errors`, or omit them.
/// `detail` is free-form; frameworks put either a string or a structured
/// validation report there.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    #[serde(default, deserialize_with = "de_vec_or_null")]
    pub errors: Vec<TargetNameError>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<serde_json::Value>,
}

impl PlotResponse {
    /// Human-readable fallback message: `detail` if present, otherwise the default.
    pub fn detail_message(&self) -> String {
        match &self.detail {
            Some(serde_json::Value::String(s)) if !s.trim().is_empty() => s.clone(),
            Some(serde_json::Value::Null) | Some(serde_json::Value::String(_)) | None => {
                "Plot Request Failed".to_string()
            }
            Some(other) => other.to_string(),
        }
    }

    pub fn image(&self) -> PlotImage {
        PlotImage::from_base64(self.image_data.clone())
    }
}

/// Serde helper: treat a JSON `null` like a missing list.
fn de_vec_or_null<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// The chart currently shown to the user. Empty means "no image".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlotImage {
    base64: Option<String>,
}

impl PlotImage {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wrap a base64 PNG payload; an empty string counts as no image.
    pub fn from_base64(data: Option<String>) -> Self {
        Self {
            base64: data.filter(|d| !d.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.base64.is_none()
    }

    pub fn base64(&self) -> Option<&str> {
        self.base64.as_deref()
    }

    /// `data:image/png;base64,...` for display, or `""` when there is nothing to show.
    pub fn data_url(&self) -> String {
        match &self.base64 {
            Some(b64) => format!("{DATA_URL_PREFIX}{b64}"),
            None => String::new(),
        }
    }

    /// Decode the payload into PNG bytes. An empty image decodes to no bytes.
    pub fn decode(&self) -> Result<Vec<u8>, ImageError> {
        match &self.base64 {
            Some(b64) => Ok(base64::engine::general_purpose::STANDARD.decode(b64.trim())?),
            None => Ok(Vec::new()),
        }
    }
}
