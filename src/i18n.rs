//! Static bilingual (English/Malayalam) translation table.
//!
//! Lookup falls back from the requested language to English, and finally to
//! the key itself, so an unknown key renders as itself rather than failing.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::models::Language;

/// One translation entry. Empty `ml` falls back to `en` on lookup.
#[derive(Debug, Serialize)]
pub struct Entry {
    pub en: &'static str,
    pub ml: &'static str,
}

pub type TranslationTable = BTreeMap<&'static str, Entry>;

macro_rules! entry {
    ($table:ident, $key:literal, $en:literal, $ml:literal) => {
        $table.insert($key, Entry { en: $en, ml: $ml });
    };
}

static TABLE: Lazy<TranslationTable> = Lazy::new(|| {
    let mut t = TranslationTable::new();
    entry!(t, "appTitle", "Crop Doctor", "വിള ഡോക്ടർ");
    entry!(
        t,
        "appSubtitle",
        "AI-Powered Crop Issue Diagnosis",
        "AI അധിഷ്ഠിത വിള പ്രശ്ന നിർണയം"
    );
    entry!(t, "govText", "For Kerala Farmers", "കേരള കർഷകർക്കായി");
    entry!(t, "uploadImage", "Upload Image", "ചിത്രം അപ്‌ലോഡ് ചെയ്യുക");
    entry!(t, "capturePhoto", "Capture Photo", "ഫോട്ടോ എടുക്കുക");
    entry!(t, "or", "or", "അല്ലെങ്കിൽ");
    entry!(t, "imageSelected", "Image Selected", "ചിത്രം തിരഞ്ഞെടുത്തു");
    entry!(
        t,
        "describeIssue",
        "Describe Your Crop Issue",
        "നിങ്ങളുടെ വിളയുടെ പ്രശ്നം വിവരിക്കുക"
    );
    entry!(
        t,
        "descriptionPlaceholder",
        "E.g., Yellow spots on leaves, wilting plants, pest attack...",
        "ഉദാ: ഇലകളിൽ മഞ്ഞ പാടുകൾ, ചെടികൾ വാടുന്നു, കീടാക്രമണം..."
    );
    entry!(
        t,
        "selectDistrict",
        "Select Your District",
        "നിങ്ങളുടെ ജില്ല തിരഞ്ഞെടുക്കുക"
    );
    entry!(
        t,
        "chooseDistrict",
        "-- Choose District --",
        "-- ജില്ല തിരഞ്ഞെടുക്കുക --"
    );
    entry!(
        t,
        "selectCropCategory",
        "Select Crop Category",
        "വിള വിഭാഗം തിരഞ്ഞെടുക്കുക"
    );
    entry!(
        t,
        "chooseCropCategory",
        "-- Choose Category --",
        "-- വിഭാഗം തിരഞ്ഞെടുക്കുക --"
    );
    entry!(t, "getDiagnosis", "Get AI Diagnosis", "AI നിർണയം നേടുക");
    entry!(t, "analyzing", "Analyzing...", "വിശകലനം ചെയ്യുന്നു...");
    entry!(t, "diagnosisResult", "Diagnosis Result", "നിർണയ ഫലം");
    entry!(t, "problemType", "Problem Type", "പ്രശ്ന തരം");
    entry!(t, "riskLevel", "Risk Level", "അപകടസാധ്യത നില");
    entry!(t, "possibleCause", "Possible Cause", "സാധ്യമായ കാരണം");
    entry!(
        t,
        "recommendedAction",
        "Recommended Action",
        "ശുപാർശ ചെയ്യുന്ന നടപടി"
    );
    entry!(
        t,
        "preventiveMeasures",
        "Preventive Measures",
        "മുൻകരുതൽ നടപടികൾ"
    );
    entry!(t, "pestAttack", "Pest Attack", "കീടാക്രമണം");
    entry!(t, "plantDisease", "Plant Disease", "സസ്യരോഗം");
    entry!(t, "nutrientDeficiency", "Nutrient Deficiency", "പോഷകക്കുറവ്");
    entry!(
        t,
        "errorOccurred",
        "An error occurred. Please try again.",
        "ഒരു പിശക് സംഭവിച്ചു. വീണ്ടും ശ്രമിക്കുക."
    );
    entry!(
        t,
        "missingInput",
        "Please provide an image or description",
        "ദയവായി ഒരു ചിത്രമോ വിവരണമോ നൽകുക"
    );
    entry!(
        t,
        "rateLimited",
        "Rate limit exceeded. Please try again later.",
        "പരിധി കവിഞ്ഞു. ദയവായി പിന്നീട് വീണ്ടും ശ്രമിക്കുക."
    );
    entry!(
        t,
        "quotaExceeded",
        "AI service quota exceeded.",
        "AI സേവന ക്വാട്ട കഴിഞ്ഞു."
    );
    entry!(t, "yourCropImage", "Your Crop Image", "നിങ്ങളുടെ വിള ചിത്രം");
    t
});

/// The full table, for serving to the form page.
pub fn table() -> &'static TranslationTable {
    &TABLE
}

/// Localized string for `key`, falling back to English, then to the key.
pub fn translate<'a>(key: &'a str, lang: Language) -> &'a str {
    match TABLE.get(key) {
        Some(entry) => match lang {
            Language::Ml if !entry.ml.is_empty() => entry.ml,
            _ => entry.en,
        },
        None => key,
    }
}
