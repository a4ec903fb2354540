//! Free-text relevance match.
//!
//! Binary substring containment over a lower-cased concatenation of the
//! record's descriptive fields. No tokenizing, stemming or ranking.

use coopscope_common::Cooperative;

/// Lower-cased, space-joined text a query is matched against.
pub fn search_text(record: &Cooperative) -> String {
    let partners = record.partners.join(" ");
    let certifications = record.certifications.join(" ");
    [
        record.name.as_str(),
        record.official_name.as_str(),
        record.sector.as_str(),
        record.value_chain.as_str(),
        record.district.as_str(),
        record.buyer.as_str(),
        record.product_focus.as_str(),
        record.fdi_priority.as_str(),
        record.contact.as_str(),
        partners.as_str(),
        certifications.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

/// True if `query` (case-insensitive) occurs contiguously in the record's
/// search text. An empty query matches every record.
pub fn matches_query(record: &Cooperative, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    search_text(record).contains(&query.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coopscope_common::ValueChain;

    fn seaweed() -> Cooperative {
        Cooperative::builder()
            .id("s1")
            .name("Placencia Producers")
            .district("Stann Creek")
            .sector("Seaweed")
            .value_chain(ValueChain::Producer)
            .buyer("Caribbean Seafood Traders")
            .members(18)
            .capacity(3000.0)
            .partners(vec!["WWF Mesoamerica".to_string()])
            .certifications(vec!["Organic".to_string()])
            .esg_tags(vec!["SDG 14".to_string()])
            .build()
    }

    #[test]
    fn query_is_case_insensitive() {
        assert!(matches_query(&seaweed(), "seaweed"));
        assert!(matches_query(&seaweed(), "SEAWEED"));
    }

    #[test]
    fn query_is_substring_not_fuzzy() {
        assert!(!matches_query(&seaweed(), "seaweeds"));
        assert!(matches_query(&seaweed(), "eawee"));
    }

    #[test]
    fn query_spans_adjacent_fields() {
        // sector and value chain are joined by a single space
        assert!(matches_query(&seaweed(), "seaweed producer"));
    }

    #[test]
    fn partners_and_certifications_are_searched() {
        assert!(matches_query(&seaweed(), "wwf"));
        assert!(matches_query(&seaweed(), "organic"));
    }

    #[test]
    fn esg_tags_are_not_searched() {
        assert!(!matches_query(&seaweed(), "sdg"));
    }

    #[test]
    fn empty_query_matches() {
        assert!(matches_query(&seaweed(), ""));
    }
}
