use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde::{Deserialize, Serialize};

use crate::i18n;

/// Supported UI languages
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ml,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ml => "ml",
        }
    }
}

/// Kerala districts, used only to enrich the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum District {
    Thiruvananthapuram,
    Kollam,
    Pathanamthitta,
    Alappuzha,
    Kottayam,
    Idukki,
    Ernakulam,
    Thrissur,
    Palakkad,
    Malappuram,
    Kozhikode,
    Wayanad,
    Kannur,
    Kasaragod,
}

impl District {
    pub const ALL: [District; 14] = [
        District::Thiruvananthapuram,
        District::Kollam,
        District::Pathanamthitta,
        District::Alappuzha,
        District::Kottayam,
        District::Idukki,
        District::Ernakulam,
        District::Thrissur,
        District::Palakkad,
        District::Malappuram,
        District::Kozhikode,
        District::Wayanad,
        District::Kannur,
        District::Kasaragod,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            District::Thiruvananthapuram => "Thiruvananthapuram",
            District::Kollam => "Kollam",
            District::Pathanamthitta => "Pathanamthitta",
            District::Alappuzha => "Alappuzha",
            District::Kottayam => "Kottayam",
            District::Idukki => "Idukki",
            District::Ernakulam => "Ernakulam",
            District::Thrissur => "Thrissur",
            District::Palakkad => "Palakkad",
            District::Malappuram => "Malappuram",
            District::Kozhikode => "Kozhikode",
            District::Wayanad => "Wayanad",
            District::Kannur => "Kannur",
            District::Kasaragod => "Kasaragod",
        }
    }
}

/// Common Kerala crop groups, optional on a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CropCategory {
    Coconut,
    Rubber,
    Banana,
    Rice,
    Pepper,
    Cardamom,
    Vegetables,
    Spices,
}

impl CropCategory {
    pub const ALL: [CropCategory; 8] = [
        CropCategory::Coconut,
        CropCategory::Rubber,
        CropCategory::Banana,
        CropCategory::Rice,
        CropCategory::Pepper,
        CropCategory::Cardamom,
        CropCategory::Vegetables,
        CropCategory::Spices,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CropCategory::Coconut => "Coconut",
            CropCategory::Rubber => "Rubber",
            CropCategory::Banana => "Banana",
            CropCategory::Rice => "Rice",
            CropCategory::Pepper => "Pepper",
            CropCategory::Cardamom => "Cardamom",
            CropCategory::Vegetables => "Vegetables",
            CropCategory::Spices => "Spices",
        }
    }
}

/// Request payload for the diagnose endpoint
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisRequest {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub district: Option<District>,
    #[serde(default)]
    pub crop_category: Option<CropCategory>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub image_base64: Option<String>,
    #[serde(default)]
    pub image_mime_type: Option<String>,
}

impl DiagnosisRequest {
    /// A request needs at least a description or an image to be diagnosable
    pub fn has_input(&self) -> bool {
        !self.description.trim().is_empty() || self.has_image()
    }

    pub fn has_image(&self) -> bool {
        self.image_base64
            .as_deref()
            .is_some_and(|b| !b.trim().is_empty())
    }

    /// Checks the image payload: a mime type must accompany the data and the
    /// data must be valid base64. Returns both when an image is attached.
    pub fn image(&self) -> Result<Option<(&str, &str)>, String> {
        let Some(data) = self.image_base64.as_deref().filter(|b| !b.trim().is_empty())
        else {
            return Ok(None);
        };
        let Some(mime) = self
            .image_mime_type
            .as_deref()
            .filter(|m| !m.trim().is_empty())
        else {
            return Err("imageMimeType is required when imageBase64 is set".to_string());
        };
        BASE64
            .decode(data.trim())
            .map_err(|e| format!("imageBase64 is not valid base64: {}", e))?;
        Ok(Some((mime, data.trim())))
    }
}

/// Diagnosis record produced by the AI gateway.
/// riskLevel is optional: four-field replies from older prompts still parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosisResult {
    pub problem_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    pub possible_cause: String,
    pub recommended_action: String,
    pub preventive_measures: String,
}

/// Success envelope relayed to the page
#[derive(Debug, Serialize)]
pub struct DiagnosisResponse {
    pub diagnosis: DiagnosisResult,
}

/// Response payload for the health check endpoint
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Service is healthy".to_string(),
        }
    }
}

/// Static UI data served to the form page: enum listings plus the full
/// translation table, so labels have one server-held source of truth
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiConfigResponse {
    pub districts: Vec<&'static str>,
    pub crop_categories: Vec<&'static str>,
    pub translations: &'static i18n::TranslationTable,
}

impl UiConfigResponse {
    pub fn current() -> Self {
        Self {
            districts: District::ALL.iter().map(|d| d.as_str()).collect(),
            crop_categories: CropCategory::ALL.iter().map(|c| c.as_str()).collect(),
            translations: i18n::table(),
        }
    }
}
