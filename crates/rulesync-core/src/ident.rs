//! Identifier helpers: name segments, derived display names, match keys.

use crate::config::IdScheme;

impl IdScheme {
    /// The part of an identifier after its namespace and scope segments.
    ///
    /// `WR-NEC-HIER-MAGNIFY` → `HIER-MAGNIFY`, `WR-*SHOCK` → `*SHOCK`
    /// (a lone segment after the namespace is the name), and identifiers
    /// outside the namespace are returned whole.
    pub fn name_segment<'a>(&self, id: &'a str) -> &'a str {
        let rest = if self.namespace.is_empty() {
            id
        } else {
            match id
                .strip_prefix(self.namespace.as_str())
                .and_then(|r| r.strip_prefix(self.separator))
            {
                Some(r) => r,
                None => return id,
            }
        };
        match rest.split_once(self.separator) {
            Some((_scope, name)) if !name.is_empty() => name,
            _ => rest,
        }
    }

    /// Human name for an identifier that has no recorded display name.
    pub fn display_name(&self, id: &str) -> String {
        let segment = self.name_segment(id);
        let segment = segment.strip_prefix(self.marker).unwrap_or(segment);
        let spaced = segment.replace(self.separator, " ");
        let name = title_case(spaced.trim());
        if name.is_empty() {
            id.to_string()
        } else {
            name
        }
    }

    /// Case/decoration-insensitive form used for fuzzy matching: marker
    /// removed, upper-cased. With `fold_separators`, separators become spaces
    /// and whitespace runs collapse to one space.
    pub fn normalize(&self, text: &str) -> String {
        let stripped: String = text.chars().filter(|c| *c != self.marker).collect();
        if !self.fold_separators {
            return stripped.to_uppercase();
        }
        stripped
            .replace(self.separator, " ")
            .to_uppercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn match_key(&self, id: &str) -> String {
        self.normalize(self.name_segment(id))
    }

    pub fn is_shared_id(&self, id: &str) -> bool {
        !self.shared_prefix.is_empty() && id.starts_with(self.shared_prefix.as_str())
    }
}

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheme(namespace: &str) -> IdScheme {
        IdScheme {
            namespace: namespace.to_string(),
            ..IdScheme::default()
        }
    }

    #[test]
    fn name_segment_strips_namespace_and_scope() {
        let ids = IdScheme::default();
        assert_eq!(ids.name_segment("WR-NEC-HIER-MAGNIFY"), "HIER-MAGNIFY");
        assert_eq!(ids.name_segment("WR-UNIV-BALANCED"), "BALANCED");
        assert_eq!(ids.name_segment("WR-*SHOCK"), "*SHOCK");
        assert_eq!(ids.name_segment("XX-A-B"), "XX-A-B");
        assert_eq!(ids.name_segment("WR-A-"), "A-");
    }

    #[test]
    fn derived_name_is_title_cased_without_scope() {
        assert_eq!(scheme("R").display_name("R-A-cool-trick"), "Cool Trick");
        assert_eq!(IdScheme::default().display_name("WR-*SHOCK"), "Shock");
        assert_eq!(
            IdScheme::default().display_name("WR-KOM-*HEAVY-GUNNER"),
            "Heavy Gunner"
        );
    }

    #[test]
    fn derived_name_falls_back_to_identifier() {
        assert_eq!(IdScheme::default().display_name("WR-"), "WR-");
    }

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("lethal 5+ x2"), "Lethal 5+ X2");
        assert_eq!(title_case("ROCKET-pod"), "Rocket-Pod");
    }

    #[test]
    fn normalize_drops_marker_and_upper_cases() {
        let ids = IdScheme::default();
        assert_eq!(ids.normalize("*Relentless"), "RELENTLESS");
        assert_eq!(ids.normalize(" Hier  Magnify "), " HIER  MAGNIFY ");
        assert_eq!(ids.match_key("WR-NEC-HIER-MAGNIFY"), "HIER-MAGNIFY");
    }

    #[test]
    fn folding_separators_is_opt_in() {
        let ids = IdScheme {
            fold_separators: true,
            ..IdScheme::default()
        };
        assert_eq!(ids.normalize(" Hier  Magnify "), "HIER MAGNIFY");
        assert_eq!(ids.match_key("WR-NEC-*HIER-MAGNIFY"), "HIER MAGNIFY");
    }

    #[test]
    fn shared_prefix_detection() {
        let ids = IdScheme::default();
        assert!(ids.is_shared_id("WR-UNIV-BALANCED"));
        assert!(!ids.is_shared_id("WR-NEC-BALANCED"));
        let none = IdScheme {
            shared_prefix: String::new(),
            ..IdScheme::default()
        };
        assert!(!none.is_shared_id("WR-UNIV-BALANCED"));
    }
}
