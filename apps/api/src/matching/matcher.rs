//! Matcher — keyword-overlap scoring of candidates against job requests.
//!
//! Pure and synchronous: no storage, no I/O, identical output for identical input.
//!
//! Algorithm, per (candidate, request) pair:
//! 1. Lower-case the request's requirements and split on runs of `,` `.` and whitespace.
//! 2. Keep tokens longer than 3 characters (no stemming, no stopword list).
//! 3. A token matches when it occurs anywhere in the lower-cased CV content.
//!    Containment is not word-boundary aware: "mart" matches inside "smart".
//! 4. score = round(matched / total × 100). A request with no usable tokens scores 0.

use serde::{Deserialize, Serialize};

use crate::matching::settings::MatchConfig;
use crate::models::{Candidate, Rfp};

/// Tokens of this many characters or fewer are discarded.
const MIN_KEYWORD_LEN: usize = 3;

/// Score for one (candidate, request) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub cv_id: String,
    pub cv_name: String,
    pub rfp_id: String,
    pub rfp_title: String,
    /// Integer percentage in 0..=100.
    pub score: u32,
    /// Requirement tokens found in the CV, in requirement order. Not deduplicated.
    pub matched_keywords: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Tokenizer
// ────────────────────────────────────────────────────────────────────────────

/// `,` `.` or whitespace as ECMAScript's `\s` defines it: Unicode White_Space plus
/// U+FEFF (BOM), minus U+0085 (NEL).
fn is_separator(c: char) -> bool {
    match c {
        ',' | '.' | '\u{FEFF}' => true,
        '\u{85}' => false,
        c => c.is_whitespace(),
    }
}

/// Extracts the scoring keywords from a requirements text, in order of appearance.
pub fn keywords(requirements: &str) -> Vec<String> {
    requirements
        .to_lowercase()
        .split(is_separator)
        .filter(|token| token.chars().count() > MIN_KEYWORD_LEN)
        .map(str::to_string)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Scoring
// ────────────────────────────────────────────────────────────────────────────

/// Scores a single pair. Always produces a result; filtering happens in `match_candidates`.
pub fn score_pair(candidate: &Candidate, rfp: &Rfp) -> MatchResult {
    let requirement_keywords = keywords(&rfp.requirements);
    let content = candidate.content.to_lowercase();

    let matched_keywords: Vec<String> = requirement_keywords
        .iter()
        .filter(|keyword| content.contains(keyword.as_str()))
        .cloned()
        .collect();

    let score = if requirement_keywords.is_empty() {
        0
    } else {
        ((matched_keywords.len() as f64 / requirement_keywords.len() as f64) * 100.0).round()
            as u32
    };

    MatchResult {
        cv_id: candidate.id.clone(),
        cv_name: candidate.name.clone(),
        rfp_id: rfp.id.clone(),
        rfp_title: rfp.title.clone(),
        score,
        matched_keywords,
    }
}

/// Scores every candidate against every request (candidate-major order), keeps results
/// at or above `config.threshold`, sorts by score descending and caps at `config.max_results`.
///
/// The sort is stable, so equal scores keep their generation order.
pub fn match_candidates(
    candidates: &[Candidate],
    rfps: &[Rfp],
    config: &MatchConfig,
) -> Vec<MatchResult> {
    let mut results: Vec<MatchResult> = candidates
        .iter()
        .flat_map(|candidate| rfps.iter().map(move |rfp| score_pair(candidate, rfp)))
        .filter(|result| result.score >= config.threshold)
        .collect();

    results.sort_by(|a, b| b.score.cmp(&a.score));
    results.truncate(config.max_results);
    results
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn cv(id: &str, content: &str) -> Candidate {
        Candidate {
            id: id.to_string(),
            name: format!("{id}.txt"),
            first_name: String::new(),
            last_name: String::new(),
            content: content.to_string(),
        }
    }

    fn rfp(id: &str, requirements: &str) -> Rfp {
        Rfp {
            id: id.to_string(),
            title: format!("Role {id}"),
            description: "Not used for scoring".to_string(),
            requirements: requirements.to_string(),
        }
    }

    fn no_filter() -> MatchConfig {
        MatchConfig {
            threshold: 0,
            max_results: usize::MAX,
            ..Default::default()
        }
    }

    const SWE_CV: &str =
        "Software Engineer with 5 years of experience in React, Node.js, and TypeScript.";
    const UX_CV: &str = "UX Designer with expertise in Figma, user research, and prototyping.";

    #[test]
    fn test_keywords_split_and_length_filter() {
        assert_eq!(
            keywords("React, TypeScript, 3+ years experience"),
            vec!["react", "typescript", "years", "experience"]
        );
    }

    #[test]
    fn test_keywords_runs_of_separators() {
        assert_eq!(
            keywords("Kubernetes.,  Docker\n\tTerraform..."),
            vec!["kubernetes", "docker", "terraform"]
        );
    }

    #[test]
    fn test_keywords_split_on_bom_and_unicode_spaces() {
        assert_eq!(
            keywords("react\u{FEFF}golang\u{00A0}docker\u{2028}kafka"),
            vec!["react", "golang", "docker", "kafka"]
        );
    }

    #[test]
    fn test_keywords_next_line_is_not_a_separator() {
        assert_eq!(keywords("react\u{85}golang"), vec!["react\u{85}golang"]);
    }

    #[test]
    fn test_keywords_counts_chars_not_bytes() {
        // "café" is 4 chars but 5 bytes; "été" is 3 chars.
        assert_eq!(keywords("café été"), vec!["café"]);
    }

    #[test]
    fn test_full_match_scores_100() {
        let result = score_pair(
            &cv("1", SWE_CV),
            &rfp("a", "React, TypeScript, 3+ years experience"),
        );
        assert_eq!(result.score, 100);
        assert_eq!(
            result.matched_keywords,
            vec!["react", "typescript", "years", "experience"]
        );
    }

    #[test]
    fn test_no_match_scores_0() {
        let result = score_pair(&cv("2", UX_CV), &rfp("b", "Agile, Scrum, 5+ years experience"));
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_empty_token_set_scores_0() {
        let result = score_pair(&cv("1", SWE_CV), &rfp("c", "Go, C, SQL, 5+"));
        assert_eq!(result.score, 0);
        assert!(result.matched_keywords.is_empty());
    }

    #[test]
    fn test_substring_match_is_not_word_bounded() {
        let result = score_pair(&cv("1", "Built a smartphone app"), &rfp("d", "mart"));
        assert_eq!(result.score, 100);
        assert_eq!(result.matched_keywords, vec!["mart"]);
    }

    #[test]
    fn test_case_insensitive_containment() {
        let result = score_pair(&cv("1", "KUBERNETES operator"), &rfp("e", "kubernetes"));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_repeated_tokens_are_kept() {
        let result = score_pair(&cv("1", "rust rust"), &rfp("f", "Rust rust, Java"));
        assert_eq!(result.matched_keywords, vec!["rust", "rust"]);
        // 2 of 3 → 66.67 rounds to 67
        assert_eq!(result.score, 67);
    }

    #[test]
    fn test_score_rounds_half_up() {
        // 1 of 8 → 12.5 → 13
        let result = score_pair(
            &cv("1", "alpha"),
            &rfp("g", "alpha bravo charlie delta foxtrot hotel india juliet"),
        );
        assert_eq!(result.score, 13);
    }

    #[test]
    fn test_result_carries_identity_fields() {
        let result = score_pair(&cv("cv-9", SWE_CV), &rfp("rfp-9", "React"));
        assert_eq!(result.cv_id, "cv-9");
        assert_eq!(result.cv_name, "cv-9.txt");
        assert_eq!(result.rfp_id, "rfp-9");
        assert_eq!(result.rfp_title, "Role rfp-9");
    }

    #[test]
    fn test_empty_inputs_yield_empty_output() {
        let config = MatchConfig::default();
        assert!(match_candidates(&[], &[rfp("a", "React")], &config).is_empty());
        assert!(match_candidates(&[cv("1", SWE_CV)], &[], &config).is_empty());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // 1 of 2 tokens → 50
        let rfps = [rfp("a", "react golang")];
        let cvs = [cv("1", SWE_CV)];
        let at = MatchConfig {
            threshold: 50,
            ..Default::default()
        };
        let above = MatchConfig {
            threshold: 51,
            ..Default::default()
        };
        assert_eq!(match_candidates(&cvs, &rfps, &at).len(), 1);
        assert!(match_candidates(&cvs, &rfps, &above).is_empty());
    }

    #[test]
    fn test_sorted_descending_with_stable_ties() {
        let cvs = [cv("1", "react"), cv("2", "react typescript"), cv("3", "react")];
        let rfps = [rfp("a", "react typescript")];
        let results = match_candidates(&cvs, &rfps, &no_filter());

        let order: Vec<(&str, u32)> = results
            .iter()
            .map(|r| (r.cv_id.as_str(), r.score))
            .collect();
        assert_eq!(order, vec![("2", 100), ("1", 50), ("3", 50)]);
    }

    #[test]
    fn test_generation_order_is_candidate_major() {
        let cvs = [cv("1", "none"), cv("2", "none")];
        let rfps = [rfp("a", "react"), rfp("b", "react")];
        let results = match_candidates(&cvs, &rfps, &no_filter());

        let pairs: Vec<(&str, &str)> = results
            .iter()
            .map(|r| (r.cv_id.as_str(), r.rfp_id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("1", "a"), ("1", "b"), ("2", "a"), ("2", "b")]);
    }

    #[test]
    fn test_max_results_caps_after_sort() {
        let cvs: Vec<Candidate> = (0..10)
            .map(|i| cv(&i.to_string(), if i == 9 { "react" } else { "none" }))
            .collect();
        let rfps = [rfp("a", "react")];
        let config = MatchConfig {
            threshold: 0,
            max_results: 3,
            ..Default::default()
        };
        let results = match_candidates(&cvs, &rfps, &config);
        assert_eq!(results.len(), 3);
        assert_eq!(results[0].cv_id, "9");
        assert_eq!(results[0].score, 100);
    }

    #[test]
    fn test_duplicate_candidates_each_produce_rows() {
        let cvs = [cv("1", SWE_CV), cv("1", SWE_CV)];
        let rfps = [rfp("a", "React")];
        assert_eq!(match_candidates(&cvs, &rfps, &no_filter()).len(), 2);
    }

    #[test]
    fn test_weights_do_not_change_scores() {
        let cvs = [cv("1", SWE_CV), cv("2", UX_CV)];
        let rfps = [rfp("a", "React, Figma, research")];
        let baseline = match_candidates(&cvs, &rfps, &no_filter());
        let weighted = match_candidates(
            &cvs,
            &rfps,
            &MatchConfig {
                keyword_weight: 0.0,
                content_weight: 5.0,
                ..no_filter()
            },
        );
        assert_eq!(baseline, weighted);
    }

    #[test]
    fn test_properties_hold_for_default_config() {
        let cvs = [cv("1", SWE_CV), cv("2", UX_CV), cv("3", "")];
        let rfps = [
            rfp("a", "React, TypeScript, 3+ years experience"),
            rfp("b", "Agile, Scrum, 5+ years experience"),
            rfp("c", "Figma research prototyping React"),
        ];
        let config = MatchConfig::default();
        let results = match_candidates(&cvs, &rfps, &config);

        assert!(results.len() <= config.max_results);
        assert!(results.iter().all(|r| r.score >= config.threshold && r.score <= 100));
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_idempotent() {
        let cvs = [cv("1", SWE_CV), cv("2", UX_CV)];
        let rfps = [rfp("a", "React, Figma"), rfp("b", "research typescript")];
        let config = MatchConfig::default();
        assert_eq!(
            match_candidates(&cvs, &rfps, &config),
            match_candidates(&cvs, &rfps, &config)
        );
    }
}
