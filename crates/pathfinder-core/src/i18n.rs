//! Locale text tables for messages produced by the core.
//!
//! Each locale maps to a fixed-shape record. The lookup is an exhaustive
//! match, so adding a [`Language`] without its table does not compile.

use crate::profile::Language;

/// Messages surfaced by setup validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupText {
    pub required: &'static str,
    pub consent_required: &'static str,
}

const EN: SetupText = SetupText {
    required: "This field is required",
    consent_required: "Please consent to continue",
};

const HI: SetupText = SetupText {
    required: "यह फ़ील्ड आवश्यक है",
    consent_required: "जारी रखने के लिए कृपया सहमति दें",
};

const TE: SetupText = SetupText {
    required: "ఈ ఫీల్డ్ తప్పనిసరి",
    consent_required: "కొనసాగించడానికి దయచేసి సమ్మతించండి",
};

const TA: SetupText = SetupText {
    required: "இந்த புலம் அவசியம்",
    consent_required: "தொடர தயவுசெய்து ஒப்புக்கொள்ளவும்",
};

const BN: SetupText = SetupText {
    required: "এই ক্ষেত্রটি আবশ্যক",
    consent_required: "অগ্রসর হতে অনুগ্রহ করে সম্মতি দিন",
};

const GU: SetupText = SetupText {
    required: "આ ફીલ્ડ જરૂરી છે",
    consent_required: "કૃપા કરીને ચાલુ રાખવા માટે સંમતિ આપો",
};

pub fn setup_text(lang: Language) -> &'static SetupText {
    match lang {
        Language::En => &EN,
        Language::Hi => &HI,
        Language::Te => &TE,
        Language::Ta => &TA,
        Language::Bn => &BN,
        Language::Gu => &GU,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_locale_defines_every_message() {
        for lang in Language::ALL {
            let t = setup_text(lang);
            assert!(!t.required.is_empty(), "{lang} missing 'required'");
            assert!(!t.consent_required.is_empty(), "{lang} missing 'consent_required'");
        }
    }

    #[test]
    fn english_text() {
        assert_eq!(setup_text(Language::En).required, "This field is required");
    }
}
