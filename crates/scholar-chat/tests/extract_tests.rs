//! Filter extraction tests.
//!
//! Free-text queries in, structured filters out.

use scholar_chat::models::{FilterSet, Range};
use scholar_chat::pipeline::extract::{citation_count, keywords, open_access, publication_year};
use scholar_chat::extract_filters;

// =============================================================================
// Whole-query extraction
// =============================================================================

#[test]
fn test_extract_full_query() {
    let filters = extract_filters("AI papers published after 2020 with more than 100 citations");

    assert_eq!(filters.keywords, "AI papers");
    assert_eq!(filters.publication_year, Some(Range { min: Some(2020), max: None }));
    assert_eq!(filters.citation_count, Some(Range { min: Some(100), max: None }));
    assert!(!filters.is_open_access);
}

#[test]
fn test_extract_open_access_only() {
    let filters = extract_filters("open access");

    assert_eq!(filters.keywords, "");
    assert!(filters.is_open_access);
    assert!(filters.has_signal());
}

#[test]
fn test_extract_plain_keywords() {
    let filters = extract_filters("protein folding");

    assert_eq!(
        filters,
        FilterSet { keywords: "protein folding".to_string(), ..FilterSet::default() }
    );
}

#[test]
fn test_extract_nothing_useful() {
    let filters = extract_filters("   ");
    assert!(!filters.has_signal());

    let filters = extract_filters("with more than");
    assert!(!filters.has_signal());
}

#[test]
fn test_extract_is_deterministic() {
    let query = "climate models between 2010 and 2015 exactly 7 citations open access";
    assert_eq!(extract_filters(query), extract_filters(query));
}

// =============================================================================
// Keywords
// =============================================================================

#[test]
fn test_keywords_trigger_words_are_case_insensitive() {
    assert_eq!(keywords("Quantum Computing PUBLISHED in 2019"), "Quantum Computing");
}

#[test]
fn test_keywords_ignore_trigger_substrings() {
    // "openness" and "withdrawal" are not trigger words
    assert_eq!(keywords("openness in science"), "openness in science");
    assert_eq!(keywords("opioid withdrawal before 2000"), "opioid withdrawal");
}

#[test]
fn test_keywords_empty_when_query_starts_with_trigger() {
    assert_eq!(keywords("after 2020"), "");
}

// =============================================================================
// Publication year
// =============================================================================

#[test]
fn test_year_relations() {
    assert_eq!(publication_year("since 2018"), Some(Range::at_least(2018)));
    assert_eq!(publication_year("published before 1999"), Some(Range::at_most(1999)));
    assert_eq!(publication_year("in 2005"), Some(Range::exactly(2005)));
}

#[test]
fn test_year_span() {
    assert_eq!(publication_year("between 2010 and 2015"), Some(Range::between(2010, 2015)));
    assert_eq!(publication_year("published in 2001 to 2003"), Some(Range::between(2001, 2003)));
}

#[test]
fn test_year_requires_four_digits() {
    assert_eq!(publication_year("after 20"), None);
    assert_eq!(publication_year("after 20201"), None);
}

#[test]
fn test_year_single_between_is_exact() {
    assert_eq!(publication_year("between 2012"), Some(Range::exactly(2012)));
}

// =============================================================================
// Citation count
// =============================================================================

#[test]
fn test_citation_relations() {
    assert_eq!(citation_count("more than 50 citations"), Some(Range::at_least(50)));
    assert_eq!(citation_count("greater than 5 citations"), Some(Range::at_least(5)));
    assert_eq!(citation_count("less than 10 citations"), Some(Range::at_most(10)));
    assert_eq!(citation_count("exactly 3 citations"), Some(Range::exactly(3)));
    assert_eq!(citation_count("with 1 citation"), Some(Range::exactly(1)));
}

#[test]
fn test_citation_span() {
    assert_eq!(citation_count("with 10 to 20 citations"), Some(Range::between(10, 20)));
    assert_eq!(citation_count("more 100 and 200 citations"), Some(Range::between(100, 200)));
}

#[test]
fn test_citation_requires_citation_word() {
    assert_eq!(citation_count("more than 50 papers"), None);
}

#[test]
fn test_citation_overflow_is_skipped() {
    assert_eq!(citation_count("more than 99999999999 citations"), None);

    let filters = extract_filters("neutrinos with more than 99999999999 citations");
    assert_eq!(filters.keywords, "neutrinos");
    assert!(filters.citation_count.is_none());
}

#[test]
fn test_non_ascii_digits_do_not_hide_later_phrases() {
    let filters = extract_filters("deep learning published in ٢٠٢٠ and since 2015");
    assert_eq!(filters.keywords, "deep learning");
    assert_eq!(filters.publication_year, Some(Range::at_least(2015)));

    let filters = extract_filters("robots with ２０ citations and more than 5 citations");
    assert_eq!(filters.keywords, "robots");
    assert_eq!(filters.citation_count, Some(Range::at_least(5)));
}

// =============================================================================
// Open access
// =============================================================================

#[test]
fn test_open_access_variants() {
    assert!(open_access("Open   Access papers"));
    assert!(open_access("OPEN ACCESS"));
    assert!(!open_access("open source"));
    assert!(!open_access("openaccess"));
}
