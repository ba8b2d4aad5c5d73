//! Keyword lexicon for attire-compliance scoring.
//!
//! Labels are matched by lowercased substring: a prediction whose label
//! contains a modest keyword counts toward compliance, one containing a
//! non-modest keyword counts against it. Both lists are consulted for every
//! label, so a label matching both contributes in both directions.

/// Keywords indicating modest attire.
pub const MODEST_KEYWORDS: &[&str] = &["hijab", "abaya", "modest", "covered", "loose"];

/// Keywords indicating non-modest attire.
pub const NON_MODEST_KEYWORDS: &[&str] = &["swimwear", "bikini", "revealing", "tight", "short"];

/// Keyword lists used to score model labels.
///
/// [`Lexicon::default`] carries the built-in lists; callers can supply their
/// own to tune the heuristic without touching the scoring arithmetic.
#[derive(Debug, Clone)]
pub struct Lexicon {
    modest: Vec<String>,
    non_modest: Vec<String>,
}

impl Default for Lexicon {
    fn default() -> Self {
        Self {
            modest: MODEST_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            non_modest: NON_MODEST_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Lexicon {
    /// Build a lexicon from custom keyword lists. Keywords are lowercased.
    pub fn new<S: AsRef<str>>(modest: &[S], non_modest: &[S]) -> Self {
        Self {
            modest: modest.iter().map(|s| s.as_ref().to_lowercase()).collect(),
            non_modest: non_modest
                .iter()
                .map(|s| s.as_ref().to_lowercase())
                .collect(),
        }
    }

    /// Number of modest keywords the lowercased label contains.
    pub fn modest_hits(&self, label: &str) -> usize {
        let label = label.to_lowercase();
        self.modest.iter().filter(|k| label.contains(k.as_str())).count()
    }

    /// Number of non-modest keywords the lowercased label contains.
    pub fn non_modest_hits(&self, label: &str) -> usize {
        let label = label.to_lowercase();
        self.non_modest
            .iter()
            .filter(|k| label.contains(k.as_str()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lists_match_builtins() {
        let lex = Lexicon::default();
        assert_eq!(lex.modest.len(), MODEST_KEYWORDS.len());
        assert_eq!(lex.non_modest.len(), NON_MODEST_KEYWORDS.len());
    }

    #[test]
    fn matching_is_case_insensitive() {
        let lex = Lexicon::default();
        assert_eq!(lex.modest_hits("Hijab, black"), 1);
        assert_eq!(lex.non_modest_hits("BIKINI, two-piece"), 1);
    }

    #[test]
    fn matching_is_substring() {
        let lex = Lexicon::default();
        // "miniskirt" does not contain "short"; "shorts" does.
        assert_eq!(lex.non_modest_hits("miniskirt"), 0);
        assert_eq!(lex.non_modest_hits("swimming shorts"), 1);
    }

    #[test]
    fn label_can_hit_both_lists() {
        let lex = Lexicon::default();
        let label = "loose shorts";
        assert_eq!(lex.modest_hits(label), 1);
        assert_eq!(lex.non_modest_hits(label), 1);
    }

    #[test]
    fn multiple_keywords_count_separately() {
        let lex = Lexicon::default();
        assert_eq!(lex.non_modest_hits("tight short dress"), 2);
    }

    #[test]
    fn custom_lexicon_lowercases_keywords() {
        let lex = Lexicon::new(&["Cloak"], &["Mesh"]);
        assert_eq!(lex.modest_hits("opera cloak"), 1);
        assert_eq!(lex.non_modest_hits("mesh top"), 1);
    }
}
