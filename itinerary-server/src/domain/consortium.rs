//! Consortium classification of lines.

use std::collections::HashSet;

use serde::Deserialize;

/// A named group of lines run by the same operator group.
#[derive(Debug, Clone, Deserialize)]
pub struct Consortium {
    name: String,
    lines: HashSet<String>,
}

impl Consortium {
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn contains(&self, line: &str) -> bool {
        self.lines.contains(line)
    }
}

/// Ordered, read-only mapping from consortium name to its lines.
///
/// Order matters: when a line belongs to several consortia, the one listed
/// last wins.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct ConsortiumMap {
    consortia: Vec<Consortium>,
}

impl ConsortiumMap {
    pub fn new(consortia: Vec<Consortium>) -> Self {
        Self { consortia }
    }

    /// Parse a JSON array of `{ "name": ..., "lines": [...] }` objects.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Name of the consortium `line` belongs to, or `""` if none.
    ///
    /// Every consortium is checked; the last one containing the line wins.
    pub fn classify(&self, line: &str) -> &str {
        let mut output = "";
        for consortium in &self.consortia {
            if consortium.contains(line) {
                output = consortium.name();
            }
        }
        output
    }

    pub fn len(&self) -> usize {
        self.consortia.len()
    }

    pub fn is_empty(&self) -> bool {
        self.consortia.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_match_wins() {
        let map = ConsortiumMap::new(vec![
            Consortium::new("A", ["42", "7"]),
            Consortium::new("B", ["42"]),
        ]);
        assert_eq!(map.classify("42"), "B");
        assert_eq!(map.classify("7"), "A");
    }

    #[test]
    fn unknown_line_is_empty() {
        let map = ConsortiumMap::new(vec![Consortium::new("A", ["1"])]);
        assert_eq!(map.classify("999"), "");
        assert_eq!(ConsortiumMap::default().classify("1"), "");
    }

    #[test]
    fn line_match_is_exact() {
        let map = ConsortiumMap::new(vec![Consortium::new("A", ["107"])]);
        assert_eq!(map.classify("10"), "");
        assert_eq!(map.classify("1070"), "");
    }

    #[test]
    fn from_json_keeps_order() {
        let map = ConsortiumMap::from_json(
            r#"[{"name":"Internorte","lines":["42","100"]},
                {"name":"Transcarioca","lines":["42"]}]"#,
        )
        .unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map.classify("42"), "Transcarioca");
        assert_eq!(map.classify("100"), "Internorte");
    }

    #[test]
    fn from_json_rejects_malformed() {
        assert!(ConsortiumMap::from_json(r#"{"A": ["1"]}"#).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The result is always the last consortium (in order) listing the line.
        #[test]
        fn classify_picks_last_listing(
            memberships in proptest::collection::vec(any::<bool>(), 0..8),
        ) {
            let consortia = memberships
                .iter()
                .enumerate()
                .map(|(i, &member)| {
                    let lines: Vec<&str> = if member { vec!["L"] } else { vec![] };
                    Consortium::new(format!("C{i}"), lines)
                })
                .collect();
            let map = ConsortiumMap::new(consortia);

            let expected = memberships
                .iter()
                .rposition(|&m| m)
                .map(|i| format!("C{i}"))
                .unwrap_or_default();
            prop_assert_eq!(map.classify("L"), expected.as_str());
        }
    }
}
