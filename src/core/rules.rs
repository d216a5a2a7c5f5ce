//! Literal substitution rules.
//!
//! A `RuleSet` is an ordered list of (pattern, replacement) pairs folded over
//! a text buffer: every non-overlapping occurrence of each pattern is replaced
//! left to right, and each rule's output feeds the next rule's input. Matching
//! is exact substring matching — no regex, no word boundaries, no awareness of
//! the underlying configuration syntax.

use serde::Serialize;

/// A single literal substitution rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReplaceRule {
    pub pattern: String,
    pub replacement: String,
}

impl ReplaceRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            replacement: replacement.into(),
        }
    }

    /// Replace every non-overlapping occurrence of the pattern.
    pub fn apply(&self, text: &str) -> String {
        text.replace(&self.pattern, &self.replacement)
    }

    /// Count non-overlapping occurrences of the pattern.
    pub fn count_matches(&self, text: &str) -> usize {
        if self.pattern.is_empty() {
            return 0;
        }
        text.matches(self.pattern.as_str()).count()
    }
}

/// An ordered set of literal substitution rules.
#[derive(Debug, Clone, Serialize)]
pub struct RuleSet {
    rules: Vec<ReplaceRule>,
}

impl RuleSet {
    pub fn new(rules: Vec<ReplaceRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[ReplaceRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Fold every rule over the text in order.
    ///
    /// Returns the final text and the total number of replacements made.
    /// Counts are taken against each rule's own input, so a later rule sees
    /// (and counts within) the output of earlier rules.
    pub fn apply(&self, text: &str) -> (String, usize) {
        let mut current = text.to_string();
        let mut total = 0;

        for rule in &self.rules {
            let count = rule.count_matches(&current);
            if count > 0 {
                current = rule.apply(&current);
                total += count;
            }
        }

        (current, total)
    }

    /// Conservative pairwise interference screen.
    ///
    /// Returns `false` when any pair of rules can interfere, making
    /// application order significant:
    /// - one rule's pattern occurs inside another rule's pattern or
    ///   replacement, or
    /// - two patterns can overlap at a text boundary (a suffix of one is a
    ///   prefix of the other) and the replacements do not keep that shared
    ///   boundary text intact.
    ///
    /// Returns `true` when no such pairwise interference exists. This is a
    /// screen, not a proof of order-independence: replacement text can in
    /// principle splice new matches together across rule boundaries, so the
    /// order-independence of a concrete rule set should be pinned by a test
    /// (as the fixed singleton set is). Rules are always applied in
    /// declaration order either way.
    pub fn is_disjoint(&self) -> bool {
        for (i, a) in self.rules.iter().enumerate() {
            for (j, b) in self.rules.iter().enumerate() {
                if i == j {
                    continue;
                }
                if b.pattern.contains(a.pattern.as_str())
                    || b.replacement.contains(a.pattern.as_str())
                {
                    return false;
                }
                if boundary_overlap_breaks(a, b) {
                    return false;
                }
            }
        }
        true
    }
}

/// True when `a`'s pattern can end where `b`'s begins in some text and the
/// replacements do not preserve the shared boundary text.
///
/// If a proper suffix of `a.pattern` equals a prefix of `b.pattern`, the two
/// patterns can claim overlapping spans. Whichever rule runs first consumes
/// the shared text; the other can still match afterwards only if `a`'s
/// replacement ends with it and `b`'s replacement starts with it (the
/// singleton set's shared `.` delimiter survives this way). Byte comparison
/// throughout, so a candidate overlap may split a multi-byte character.
fn boundary_overlap_breaks(a: &ReplaceRule, b: &ReplaceRule) -> bool {
    let a_pat = a.pattern.as_bytes();
    let b_pat = b.pattern.as_bytes();

    // Proper overlaps only; full containment is screened separately.
    for k in 1..a_pat.len().min(b_pat.len()) {
        let shared = &a_pat[a_pat.len() - k..];
        if shared == &b_pat[..k]
            && !(a.replacement.as_bytes().ends_with(shared)
                && b.replacement.as_bytes().starts_with(shared))
        {
            return true;
        }
    }
    false
}

/// The fixed singleton-normalization rule set.
///
/// Renames conventional singleton block labels (`main`, `openclaw_nsg`,
/// `daily`) to `this`, both at the block declaration (` "name" {`) and at
/// reference sites (`.name.`). Patterns carry their surrounding punctuation
/// so bare words elsewhere in the file are left alone.
pub fn singleton_rules() -> RuleSet {
    RuleSet::new(vec![
        ReplaceRule::new(" \"main\" {", " \"this\" {"),
        ReplaceRule::new(".main.", ".this."),
        ReplaceRule::new(" \"openclaw_nsg\" {", " \"this\" {"),
        ReplaceRule::new(".openclaw_nsg.", ".this."),
        ReplaceRule::new(" \"daily\" {", " \"this\" {"),
        ReplaceRule::new(".daily.", ".this."),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replace_rule_replaces_all_occurrences() {
        let rule = ReplaceRule::new(".main.", ".this.");
        assert_eq!(
            rule.apply("a.main.id and b.main.name"),
            "a.this.id and b.this.name"
        );
    }

    #[test]
    fn replace_rule_counts_non_overlapping() {
        let rule = ReplaceRule::new(".main.", ".this.");
        assert_eq!(rule.count_matches("x.main.y.main.z"), 2);
        assert_eq!(rule.count_matches("no match here"), 0);
    }

    #[test]
    fn empty_pattern_matches_nothing() {
        let rule = ReplaceRule::new("", "x");
        assert_eq!(rule.count_matches("anything"), 0);
    }

    #[test]
    fn ruleset_folds_in_order() {
        // Deliberately overlapping rules: order matters here.
        let rules = RuleSet::new(vec![
            ReplaceRule::new("ab", "b"),
            ReplaceRule::new("bb", "c"),
        ]);
        let (out, count) = rules.apply("abb");
        assert_eq!(out, "c");
        assert_eq!(count, 2);
    }

    #[test]
    fn block_label_rule_targets_declaration_only() {
        let rules = singleton_rules();
        let (out, _) = rules.apply("resource \"x\" \"main\" { name = \"main\" }");
        assert_eq!(out, "resource \"x\" \"this\" { name = \"main\" }");
    }

    #[test]
    fn singleton_rules_are_disjoint() {
        assert!(singleton_rules().is_disjoint());
    }

    #[test]
    fn overlapping_set_detected() {
        let rules = RuleSet::new(vec![
            ReplaceRule::new("main", "this"),
            ReplaceRule::new(".main.", ".this."),
        ]);
        assert!(!rules.is_disjoint());
    }

    #[test]
    fn boundary_overlapping_set_detected() {
        // A suffix of "ab" is a prefix of "ba", and neither replacement keeps
        // the shared "b", so the two rules fight over text like "aba".
        let rules = RuleSet::new(vec![
            ReplaceRule::new("ab", "x"),
            ReplaceRule::new("ba", "y"),
        ]);
        assert!(!rules.is_disjoint());

        // The order dependence the screen exists to catch:
        let (forward, _) = rules.apply("aba");
        let reversed = RuleSet::new(vec![
            ReplaceRule::new("ba", "y"),
            ReplaceRule::new("ab", "x"),
        ]);
        let (backward, _) = reversed.apply("aba");
        assert_eq!(forward, "xa");
        assert_eq!(backward, "ay");
        assert_ne!(forward, backward);
    }

    #[test]
    fn boundary_overlap_preserved_by_replacements_allowed() {
        // Reference patterns share their "." delimiters, but every
        // replacement keeps them, so adjacent references still commute.
        let rules = RuleSet::new(vec![
            ReplaceRule::new(".main.", ".this."),
            ReplaceRule::new(".daily.", ".this."),
        ]);
        assert!(rules.is_disjoint());

        let (forward, _) = rules.apply(".main.daily.");
        let reversed = RuleSet::new(vec![
            ReplaceRule::new(".daily.", ".this."),
            ReplaceRule::new(".main.", ".this."),
        ]);
        let (backward, _) = reversed.apply(".main.daily.");
        assert_eq!(forward, ".this.this.");
        assert_eq!(forward, backward);
    }

    #[test]
    fn len_reflects_rule_count() {
        let set = singleton_rules();
        assert_eq!(set.len(), 6);
        assert!(!set.is_empty());
        assert!(RuleSet::new(Vec::new()).is_empty());
    }

    #[test]
    fn reintroducing_set_detected() {
        // Second rule's replacement contains the first rule's pattern.
        let rules = RuleSet::new(vec![
            ReplaceRule::new("old", "new"),
            ReplaceRule::new("stale", "old"),
        ]);
        assert!(!rules.is_disjoint());
    }

    #[test]
    fn singleton_rules_commute() {
        let text = concat!(
            "resource \"oci_core_vcn\" \"main\" {\n",
            "  cidr_block = \"10.0.0.0/16\"\n",
            "}\n",
            "resource \"azurerm_network_security_group\" \"openclaw_nsg\" {\n",
            "  location = azurerm_resource_group.main.location\n",
            "}\n",
            "resource \"azurerm_backup_policy_vm\" \"daily\" {\n",
            "  policy_id = azurerm_backup_policy_vm.daily.id\n",
            "}\n",
        );

        let forward = singleton_rules();
        let mut reversed_rules: Vec<ReplaceRule> = forward.rules().to_vec();
        reversed_rules.reverse();
        let reversed = RuleSet::new(reversed_rules);

        let (a, count_a) = forward.apply(text);
        let (b, count_b) = reversed.apply(text);
        assert_eq!(a, b);
        assert_eq!(count_a, count_b);
    }

    #[test]
    fn singleton_rules_idempotent() {
        let text = "resource \"x\" \"main\" { a = 1 } output \"o\" { value = x.main.id }";
        let rules = singleton_rules();

        let (once, first_count) = rules.apply(text);
        let (twice, second_count) = rules.apply(&once);

        assert!(first_count > 0);
        assert_eq!(second_count, 0);
        assert_eq!(once, twice);
    }
}
