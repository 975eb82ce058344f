//! Prompt builders for the crop diagnosis call.
//!
//! The system prompt pins the expert persona, the answer language, and the
//! strict-JSON output contract; the user prompt carries the farmer's input.

use crate::models::{DiagnosisRequest, Language};

const LANGUAGE_INSTRUCTION_ML: &str =
    "Respond ONLY in Malayalam language. All text must be in Malayalam script.";
const LANGUAGE_INSTRUCTION_EN: &str = "Respond in simple English.";

pub fn system_prompt(language: Language) -> String {
    let language_instruction = match language {
        Language::Ml => LANGUAGE_INSTRUCTION_ML,
        Language::En => LANGUAGE_INSTRUCTION_EN,
    };

    format!(
        r#"You are an experienced agricultural expert specializing in Kerala's crops and farming conditions. You help small farmers diagnose crop issues and provide practical, affordable solutions.

{language_instruction}

When analyzing crop issues, consider Kerala's tropical climate and common crops like coconut, rubber, banana, rice, pepper, cardamom, vegetables, and spices.

IMPORTANT: You MUST respond with ONLY valid JSON in this exact format (no markdown, no code blocks, just pure JSON):
{{
  "problemType": "Identify if it's Pest Attack, Plant Disease, or Nutrient Deficiency",
  "riskLevel": "Assess severity as High, Medium, or Low based on crop damage potential and urgency",
  "possibleCause": "Explain the likely cause in 2-3 simple sentences",
  "recommendedAction": "Provide 3-4 specific, practical remedies suitable for small farmers",
  "preventiveMeasures": "List 3-4 preventive steps to avoid this issue in future"
}}"#
    )
}

pub fn user_prompt(request: &DiagnosisRequest) -> String {
    let description = if request.description.trim().is_empty() {
        "No description provided"
    } else {
        request.description.trim()
    };
    let crop_category = match request.crop_category {
        Some(category) => format!("Crop Category: {}", category.as_str()),
        None => "Crop Category: Not specified".to_string(),
    };
    let district = request
        .district
        .map(|d| d.as_str())
        .unwrap_or("Not specified");
    let image_note = if request.has_image() {
        "An image of the affected crop has been provided for analysis."
    } else {
        "No image was provided."
    };

    format!(
        r#"Analyze this crop issue:
- Farmer's Description: {description}
- {crop_category}
- District: {district} (Kerala, India)

{image_note}

Provide your diagnosis."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CropCategory, District};

    fn request() -> DiagnosisRequest {
        serde_json::from_str("{}").unwrap()
    }

    #[test]
    fn test_system_prompt_carries_language_instruction() {
        let en = system_prompt(Language::En);
        assert!(en.contains("Respond in simple English."));
        let ml = system_prompt(Language::Ml);
        assert!(ml.contains("Respond ONLY in Malayalam language."));
        assert!(ml.contains("\"riskLevel\""));
    }

    #[test]
    fn test_user_prompt_defaults_when_fields_absent() {
        let prompt = user_prompt(&request());
        assert!(prompt.contains("Farmer's Description: No description provided"));
        assert!(prompt.contains("Crop Category: Not specified"));
        assert!(prompt.contains("District: Not specified (Kerala, India)"));
        assert!(prompt.contains("No image was provided."));
    }

    #[test]
    fn test_user_prompt_carries_form_fields() {
        let mut req = request();
        req.description = "yellow spots on banana leaves".to_string();
        req.district = Some(District::Idukki);
        req.crop_category = Some(CropCategory::Banana);
        req.image_base64 = Some("aGVsbG8=".to_string());
        req.image_mime_type = Some("image/jpeg".to_string());

        let prompt = user_prompt(&req);
        assert!(prompt.contains("yellow spots on banana leaves"));
        assert!(prompt.contains("Crop Category: Banana"));
        assert!(prompt.contains("District: Idukki (Kerala, India)"));
        assert!(prompt.contains("An image of the affected crop has been provided"));
    }
}
