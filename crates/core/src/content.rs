//! Static site content.
//!
//! The whole bundle lives in one JSON file read at startup: property details,
//! amenities, gallery, booked intervals and the initial text of the editable
//! sections. Bilingual fields carry `_hr` / `_en` suffixes; [`SiteContent::localized`]
//! resolves them for one locale.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::dates::BookedInterval;
use crate::error::CoreError;
use crate::locale::Locale;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Translated {
    pub hr: String,
    pub en: String,
}

impl Translated {
    pub fn get(&self, locale: Locale) -> &str {
        locale.pick(self.hr.as_str(), self.en.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub facebook: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amenity {
    pub icon: String,
    pub label_hr: String,
    pub label_en: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub src: String,
    pub alt_hr: String,
    pub alt_en: String,
}

/// Property details shown across the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteData {
    pub name: String,
    pub tagline: Translated,
    pub address: Address,
    pub contact: Contact,
    pub coordinates: Coordinates,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default)]
    pub house_rules_hr: Vec<String>,
    #[serde(default)]
    pub house_rules_en: Vec<String>,
}

/// Everything loaded from the content file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContent {
    pub site: SiteData,
    #[serde(default)]
    pub gallery: Vec<GalleryImage>,
    #[serde(default)]
    pub availability: Vec<BookedInterval>,
    /// Initial text of the editable sections, keyed by section name.
    #[serde(default)]
    pub sections: BTreeMap<String, String>,
}

impl SiteContent {
    pub fn from_json_str(raw: &str) -> Result<Self, CoreError> {
        serde_json::from_str(raw)
            .map_err(|e| CoreError::Validation(format!("Invalid site content: {e}")))
    }

    /// Resolve every bilingual field for `locale`.
    pub fn localized(&self, locale: Locale) -> LocalizedSite {
        let site = &self.site;
        LocalizedSite {
            locale,
            name: site.name.clone(),
            tagline: site.tagline.get(locale).to_string(),
            address: site.address.clone(),
            contact: site.contact.clone(),
            coordinates: site.coordinates,
            amenities: site
                .amenities
                .iter()
                .map(|a| LocalizedAmenity {
                    icon: a.icon.clone(),
                    label: locale.pick(&a.label_hr, &a.label_en).clone(),
                })
                .collect(),
            gallery: self
                .gallery
                .iter()
                .map(|g| LocalizedImage {
                    src: g.src.clone(),
                    alt: locale.pick(&g.alt_hr, &g.alt_en).clone(),
                })
                .collect(),
            house_rules: locale
                .pick(&site.house_rules_hr, &site.house_rules_en)
                .clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedAmenity {
    pub icon: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedImage {
    pub src: String,
    pub alt: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LocalizedSite {
    pub locale: Locale,
    pub name: String,
    pub tagline: String,
    pub address: Address,
    pub contact: Contact,
    pub coordinates: Coordinates,
    pub amenities: Vec<LocalizedAmenity>,
    pub gallery: Vec<LocalizedImage>,
    pub house_rules: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "site": {
            "name": "Mobile Home Lana",
            "tagline": { "hr": "Odmor uz more", "en": "Holiday by the sea" },
            "address": { "street": "Kamp 1", "city": "Pakoštane", "country": "Hrvatska" },
            "contact": { "email": "info@example.com", "phone": "+385911234567" },
            "coordinates": { "lat": 43.9, "lng": 15.5 },
            "amenities": [{ "icon": "wifi", "label_hr": "Besplatni WiFi", "label_en": "Free WiFi" }],
            "house_rules_hr": ["Bez pušenja"],
            "house_rules_en": ["No smoking"]
        },
        "gallery": [{ "src": "/img/1.jpg", "alt_hr": "Terasa", "alt_en": "Terrace" }],
        "availability": [{ "startISO": "2025-07-10", "endISO": "2025-07-15" }],
        "sections": { "about": "Dobrodošli" }
    }"#;

    #[test]
    fn parses_full_bundle() {
        let content = SiteContent::from_json_str(SAMPLE).unwrap();
        assert_eq!(content.site.name, "Mobile Home Lana");
        assert_eq!(content.availability.len(), 1);
        assert_eq!(content.sections.get("about").map(String::as_str), Some("Dobrodošli"));
        assert_eq!(content.site.contact.facebook, None);
    }

    #[test]
    fn localizes_bilingual_fields() {
        let content = SiteContent::from_json_str(SAMPLE).unwrap();

        let en = content.localized(Locale::En);
        assert_eq!(en.tagline, "Holiday by the sea");
        assert_eq!(en.amenities[0].label, "Free WiFi");
        assert_eq!(en.gallery[0].alt, "Terrace");
        assert_eq!(en.house_rules, vec!["No smoking".to_string()]);

        let hr = content.localized(Locale::Hr);
        assert_eq!(hr.tagline, "Odmor uz more");
        assert_eq!(hr.amenities[0].label, "Besplatni WiFi");
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(SiteContent::from_json_str("{ \"site\": 1 }").is_err());
    }
}
