//! Rule-based response overrides.
//!
//! A small ordered table of keyword predicates, evaluated first-match-wins
//! against the lower-cased user text. A hit terminates the turn with a
//! hand-written answer and the model is never called. Matching is plain
//! substring containment, so over-matching ("personal" inside
//! "personality") is intentional and the table order is the only
//! precedence.

use chrono::{Datelike, NaiveDate};

/// One entry of the override table
struct Rule {
    keywords: &'static [&'static str],
    response: RuleResponse,
}

enum RuleResponse {
    Fixed(&'static str),
    /// Selects one of two literals by comparing the current date against a
    /// fixed calendar date; the threshold day itself selects `on_or_after`.
    DateGated {
        threshold: (i32, u32, u32),
        before: &'static str,
        on_or_after: &'static str,
    },
}

const CONTACT_POINTER: &str = "The best way to get in touch with Dominik is the contact form on \
this site: leave your name, your email address and a short message, and he will reply to you \
directly. For professional inquiries you can also find him on LinkedIn.";

const WEAKNESS_NARRATIVE: &str = "One of my main areas for improvement is my tendency to become deeply engrossed in projects, sometimes to the point where I may lose track of time or overlook other tasks. This stems from my passion for problem-solving and my drive to see projects through to completion.

While this intense focus allows me to produce high-quality work and innovative solutions, I've recognized the need to balance this with better time management and a broader perspective on project priorities. To address this, I've been:

1. Implementing stricter time-boxing techniques to allocate specific periods for different tasks.
2. Regularly stepping back to reassess project priorities and ensure I'm aligning with overall team and organizational goals.
3. Actively seeking feedback from colleagues and supervisors to maintain a well-rounded view of my work and its impact.

This self-awareness and the steps I'm taking to improve have actually enhanced my project management skills and my ability to collaborate effectively with teams. It's an ongoing process, but I've already seen positive results in terms of increased productivity and more balanced project outcomes.";

const ENGAGED_ANSWER: &str = "I'm engaged to my wonderful partner, and we are getting married on \
September 6th, 2024. It's an exciting time! Beyond that I prefer to keep my private life private, \
but I'm happy to tell you anything about my professional background.";

const MARRIED_ANSWER: &str = "I'm happily married — we celebrated our wedding on September 6th, \
2024. Beyond that I prefer to keep my private life private, but I'm happy to tell you anything \
about my professional background.";

/// The override table, in evaluation order
static RULES: &[Rule] = &[
    Rule {
        keywords: &["contact", "get in touch"],
        response: RuleResponse::Fixed(CONTACT_POINTER),
    },
    Rule {
        keywords: &["weakness", "weaknesses"],
        response: RuleResponse::Fixed(WEAKNESS_NARRATIVE),
    },
    Rule {
        keywords: &["personal", "relationship", "married", "engaged"],
        response: RuleResponse::DateGated {
            threshold: (2024, 9, 6),
            before: ENGAGED_ANSWER,
            on_or_after: MARRIED_ANSWER,
        },
    },
];

/// Classify one incoming user turn against the override table.
///
/// Pure in (text, today): same input, same outcome. Returns the canned
/// answer on a hit, or `None` to fall through to the model.
pub fn classify(text: &str, today: NaiveDate) -> Option<&'static str> {
    let lowered = text.to_lowercase();
    for rule in RULES {
        if rule.keywords.iter().any(|kw| lowered.contains(kw)) {
            return Some(match &rule.response {
                RuleResponse::Fixed(answer) => answer,
                RuleResponse::DateGated {
                    threshold,
                    before,
                    on_or_after,
                } => {
                    if (today.year(), today.month(), today.day()) < *threshold {
                        before
                    } else {
                        on_or_after
                    }
                }
            });
        }
    }
    None
}
