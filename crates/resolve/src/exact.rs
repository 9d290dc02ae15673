//! Exact-match resolver — tier one.

use faqline_core::{FaqEntry, FaqMatch};

use crate::normalize::normalize;

/// Scan the catalog in source order and return the first entry whose
/// normalized question appears verbatim inside the normalized message.
///
/// First match wins, so catalog order is the tie-break policy. Entries whose
/// questions normalize to the empty string are skipped; the empty string is
/// a substring of everything and such an entry would answer every query.
pub fn exact_match(message: &str, faqs: &[FaqEntry]) -> Option<FaqMatch> {
    let message = normalize(message);

    for faq in faqs {
        let question = normalize(&faq.question);
        if question.is_empty() {
            continue;
        }
        if message.contains(&question) {
            return Some(FaqMatch {
                response: faq.response.clone(),
                score: 1.0,
            });
        }
    }

    None
}
