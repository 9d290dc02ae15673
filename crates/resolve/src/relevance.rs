//! Relevance resolver — tier two.
//!
//! Token-overlap scoring with a domain-keyword bonus and a topical
//! post-filter. Tuned for precision over recall: serving a weakly related
//! FAQ answer is worse than handing the query to the generative fallback.

use std::collections::HashSet;

use faqline_core::{FaqEntry, FaqMatch};

use crate::normalize::normalize;

/// Minimum score a candidate needs before its response is considered at all.
pub const RELEVANCE_THRESHOLD: f64 = 0.7;

/// Flat bonus added when the query mentions a critical domain keyword.
pub const KEYWORD_BONUS: f64 = 0.1;

/// Keywords that mark a query as squarely in-domain.
pub const CRITICAL_KEYWORDS: [&str; 4] = ["drug", "registration", "approval", "guideline"];

/// A winning response must mention at least one of these topics.
pub const ALLOWED_TOPICS: [&str; 4] = ["drug", "regulation", "health", "approval"];

/// Score every catalog entry against the message and return the single best
/// one, provided it clears [`RELEVANCE_THRESHOLD`] and its response survives
/// the topical post-filter.
///
/// Per entry: `score = |unique question tokens ∩ unique message tokens| /
/// |unique question tokens| + bonus`. The bonus depends only on the message,
/// so it shifts every entry equally. The scan keeps the earliest entry on
/// ties. When the best entry fails the post-filter there is no match; the
/// runner-up is never consulted.
pub fn relevance_match(message: &str, faqs: &[FaqEntry]) -> Option<FaqMatch> {
    let message = normalize(message);
    let message_words: HashSet<&str> = message.split_whitespace().collect();

    let bonus = if CRITICAL_KEYWORDS.iter().any(|kw| message.contains(kw)) {
        KEYWORD_BONUS
    } else {
        0.0
    };

    let mut best_score = f64::NEG_INFINITY;
    let mut best_entry: Option<&FaqEntry> = None;

    for faq in faqs {
        let question = normalize(&faq.question);
        let question_words: HashSet<&str> = question.split_whitespace().collect();
        if question_words.is_empty() {
            continue;
        }

        let overlap = question_words.intersection(&message_words).count();
        let similarity = overlap as f64 / question_words.len() as f64;
        let score = similarity + bonus;

        if score > best_score {
            best_score = score;
            best_entry = Some(faq);
        }
    }

    let faq = best_entry?;
    if best_score < RELEVANCE_THRESHOLD {
        return None;
    }

    let response = normalize(&faq.response);
    if !ALLOWED_TOPICS.iter().any(|topic| response.contains(topic)) {
        return None;
    }

    Some(FaqMatch {
        response: faq.response.clone(),
        score: best_score,
    })
}
