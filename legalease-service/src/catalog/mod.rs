//! Static reference data served alongside the assistant.
//!
//! Everything here is compiled in and immutable.

pub mod categories;
pub mod glossary;
pub mod templates;

pub use categories::{Category, CATEGORIES};
pub use glossary::{GlossaryTerm, GLOSSARY};
pub use templates::{Template, TemplateSummary, TEMPLATES};

use serde::{Serialize, Serializer};

pub const DISCLAIMER: &str = r#"IMPORTANT DISCLAIMER

This system (LegalEase) is an AI-powered advisory tool designed to assist with understanding legal documents and compliance requirements.

This system is NOT a substitute for professional legal counsel. The information provided is:

- For educational and informational purposes only
- Not legal advice or opinion
- Not a replacement for consultation with qualified legal professionals
- Provided "as-is" without warranties of any kind

You should always consult with a licensed attorney for:

- Important legal decisions
- Legal document review and drafting
- Compliance matters affecting your business
- Any situation with legal or financial consequences

By using this system, you acknowledge and agree that you will not hold the developers, operators, or any related parties liable for any decisions made based on information provided by this tool."#;

/// A static id-keyed table, serialized as a JSON object in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct Table<T: 'static>(pub &'static [(&'static str, T)]);

impl<T: Serialize> Serialize for Table<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(id, entry)| (*id, entry)))
    }
}

/// Template listing keyed by id, bodies left out. Same ordering as [`Table`].
#[derive(Debug, Clone, Copy)]
pub struct TemplateIndex(pub &'static [(&'static str, Template)]);

impl TemplateIndex {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for TemplateIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(
            self.0
                .iter()
                .map(|(id, template)| (*id, TemplateSummary::from(template))),
        )
    }
}

pub fn template_summaries() -> TemplateIndex {
    TemplateIndex(TEMPLATES)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disclaimer_mentions_professional_counsel() {
        assert!(DISCLAIMER.starts_with("IMPORTANT DISCLAIMER"));
        assert!(DISCLAIMER.contains("NOT a substitute for professional legal counsel"));
    }

    #[test]
    fn test_table_serializes_as_object_in_order() {
        let json = serde_json::to_string(&Table(CATEGORIES)).unwrap();
        assert!(json.starts_with(r##"{"contract":{"name":"Contract Law","color":"#2563eb""##));
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 8);
    }

    #[test]
    fn test_every_template_has_a_summary() {
        let summaries = template_summaries();
        assert_eq!(summaries.len(), TEMPLATES.len());

        let value = serde_json::to_value(summaries).unwrap();
        assert_eq!(value["nda"]["category"], "Contracts");
        assert!(value["nda"].get("template").is_none());
    }

    #[test]
    fn test_catalog_listings_share_declaration_order() {
        fn key_positions(json: &str, ids: &[&str]) -> Vec<usize> {
            ids.iter()
                .map(|id| json.find(&format!("\"{}\":{{", id)).unwrap())
                .collect()
        }

        let templates = serde_json::to_string(&template_summaries()).unwrap();
        let template_ids: Vec<&str> = TEMPLATES.iter().map(|(id, _)| *id).collect();
        assert_eq!(template_ids[0], "nda");
        let positions = key_positions(&templates, &template_ids);
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", templates);

        let glossary = serde_json::to_string(&Table(GLOSSARY)).unwrap();
        let term_ids: Vec<&str> = GLOSSARY.iter().map(|(id, _)| *id).collect();
        let positions = key_positions(&glossary, &term_ids);
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{}", glossary);
    }
}
