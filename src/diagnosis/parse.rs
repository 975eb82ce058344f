//! Parses the gateway's reply text into a diagnosis record.
//!
//! Models often wrap the JSON in markdown code fences despite being told not
//! to; those markers are stripped before parsing.

use crate::models::DiagnosisResult;

/// Strips ```json / ``` fence markers and surrounding whitespace.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "")
        .replace("```", "")
        .trim()
        .to_string()
}

/// Cleans the reply text and parses it as a `DiagnosisResult`.
pub fn parse_diagnosis(raw: &str) -> Result<DiagnosisResult, serde_json::Error> {
    serde_json::from_str(&strip_code_fences(raw))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAGNOSIS_JSON: &str = r#"{
        "problemType": "Plant Disease",
        "riskLevel": "High",
        "possibleCause": "Fungal infection favoured by monsoon humidity.",
        "recommendedAction": "Spray 1% Bordeaux mixture and improve drainage.",
        "preventiveMeasures": "Avoid overhead watering and remove fallen leaves."
    }"#;

    #[test]
    fn test_fenced_reply_parses_to_embedded_json() {
        let fenced = format!("```json\n{}\n```", DIAGNOSIS_JSON);
        let parsed = parse_diagnosis(&fenced).unwrap();
        let expected: DiagnosisResult = serde_json::from_str(DIAGNOSIS_JSON).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(parsed.risk_level.as_deref(), Some("High"));
    }

    #[test]
    fn test_bare_fence_markers_are_stripped() {
        let fenced = format!("```\n{}\n```", DIAGNOSIS_JSON);
        assert!(parse_diagnosis(&fenced).is_ok());
    }

    #[test]
    fn test_plain_json_parses_unchanged() {
        assert!(parse_diagnosis(DIAGNOSIS_JSON).is_ok());
    }

    #[test]
    fn test_malformed_reply_is_an_error() {
        assert!(parse_diagnosis("The crop looks sick to me.").is_err());
        assert!(parse_diagnosis("```json\n{\"problemType\":\n```").is_err());
        assert!(parse_diagnosis("").is_err());
    }
}
