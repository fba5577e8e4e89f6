//! Indicators: named boolean expressions over match terms, plus the JSON
//! loading layer described at the library's external boundary.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::LoadError;
use crate::term::Term;

/// The reserved end-of-stream token type. Match terms may not use it.
pub const END_TYPE: &str = "end";

/// A `(type, value)` unit of input. Equality is structural.
///
/// The distinguished token `Token::end()` signals end-of-stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub r#type: String,
    pub value: String,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(r#type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            value: value.into(),
        }
    }

    /// The reserved end-of-stream token, `("end", "")`.
    #[must_use]
    pub fn end() -> Self {
        Self {
            r#type: END_TYPE.to_string(),
            value: String::new(),
        }
    }

    /// Returns `true` if this is the end-of-stream token.
    #[must_use]
    pub fn is_end(&self) -> bool {
        self.r#type == END_TYPE
    }
}

/// Metadata describing the results of a hit. Carried through unchanged
/// other than the probability-defaulting rule applied at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Descriptor {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub value: String,
    /// Defaults to `1.0` if absent or zero; a genuine zero probability is
    /// not representable, which is a deliberate simplification carried
    /// from the system this was distilled from.
    #[serde(default)]
    pub probability: f32,
}

/// A named boolean expression over match terms, plus descriptor metadata.
#[derive(Debug, Clone)]
pub struct Indicator {
    pub id: String,
    pub descriptor: Descriptor,
    pub term: Term,
}

/// A loaded set of indicators.
#[derive(Debug, Clone, Default)]
pub struct Indicators {
    pub description: String,
    pub version: String,
    pub indicators: Vec<Indicator>,
}

impl Indicators {
    /// Looks up an indicator by id. O(n).
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Indicator> {
        self.indicators.iter().find(|i| i.id == id)
    }
}

/// Parses an `Indicators` document from a JSON string.
///
/// No partial result is returned on error: either every indicator parses
/// and validates, or the whole load fails.
pub fn load_indicators_str(data: &str) -> Result<Indicators, LoadError> {
    let wire: IndicatorsWire = serde_json::from_str(data)?;

    let mut indicators = Vec::with_capacity(wire.indicators.len());
    for indicator_wire in wire.indicators {
        let id = indicator_wire.id;
        let term = convert_term(indicator_wire.term, &id)?;
        let mut descriptor = indicator_wire.descriptor;
        if descriptor.probability == 0.0 {
            descriptor.probability = 1.0;
        }
        indicators.push(Indicator {
            id,
            descriptor,
            term,
        });
    }

    Ok(Indicators {
        description: wire.description,
        version: wire.version,
        indicators,
    })
}

/// Loads and parses an `Indicators` document from a file path.
pub fn load_indicators_file(path: impl AsRef<Path>) -> Result<Indicators, LoadError> {
    let data = std::fs::read_to_string(path)?;
    load_indicators_str(&data)
}

#[derive(Debug, Deserialize)]
struct IndicatorsWire {
    #[serde(default)]
    description: String,
    #[serde(default)]
    version: String,
    #[serde(default)]
    indicators: Vec<IndicatorWire>,
}

#[derive(Debug, Deserialize)]
struct IndicatorWire {
    #[serde(default)]
    id: String,
    #[serde(default)]
    descriptor: Descriptor,
    #[serde(flatten)]
    term: TermWire,
}

/// The wire shape of a [`Term`]: exactly one of `type`+`value`, `and`, `or`,
/// `not` should be populated; validated in [`convert_term`].
#[derive(Debug, Deserialize)]
struct TermWire {
    #[serde(default)]
    r#type: Option<String>,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    and: Option<Vec<TermWire>>,
    #[serde(default)]
    or: Option<Vec<TermWire>>,
    #[serde(default)]
    not: Option<Box<TermWire>>,
}

fn convert_term(wire: TermWire, id: &str) -> Result<Term, LoadError> {
    let is_match = wire.r#type.is_some() || wire.value.is_some();
    let populated = [is_match, wire.and.is_some(), wire.or.is_some(), wire.not.is_some()];
    match populated.iter().filter(|&&p| p).count() {
        0 => return Err(LoadError::EmptyTerm { id: id.to_string() }),
        1 => {}
        _ => return Err(LoadError::AmbiguousTerm { id: id.to_string() }),
    }

    if is_match {
        let r#type = wire.r#type.unwrap_or_default();
        let value = wire.value.unwrap_or_default();
        if r#type == END_TYPE {
            return Err(LoadError::ReservedEndType { id: id.to_string() });
        }
        return Ok(Term::Match { r#type, value });
    }

    if let Some(children) = wire.and {
        if children.is_empty() {
            return Err(LoadError::EmptyChildren { id: id.to_string() });
        }
        let children = children
            .into_iter()
            .map(|c| convert_term(c, id))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Term::And(children));
    }

    if let Some(children) = wire.or {
        if children.is_empty() {
            return Err(LoadError::EmptyChildren { id: id.to_string() });
        }
        let children = children
            .into_iter()
            .map(|c| convert_term(c, id))
            .collect::<Result<Vec<_>, _>>()?;
        return Ok(Term::Or(children));
    }

    let not_child = wire.not.expect("exactly one variant was confirmed populated above");
    Ok(Term::Not(Box::new(convert_term(*not_child, id)?)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_and_defaults_probability() {
        let json = r#"{
            "indicators": [
                { "id": "i1", "and": [
                    { "type": "tcp", "value": "80" },
                    { "type": "url", "value": "http://x/m.dat" }
                ] }
            ]
        }"#;
        let indicators = load_indicators_str(json).unwrap();
        assert_eq!(indicators.indicators.len(), 1);
        let i1 = &indicators.indicators[0];
        assert_eq!(i1.id, "i1");
        assert_eq!(i1.descriptor.probability, 1.0);
        assert!(i1.term.is_and());
    }

    #[test]
    fn preserves_explicit_nonzero_probability() {
        let json = r#"{
            "indicators": [
                { "id": "i1", "descriptor": {"probability": 0.25}, "type": "a", "value": "1" }
            ]
        }"#;
        let indicators = load_indicators_str(json).unwrap();
        assert_eq!(indicators.indicators[0].descriptor.probability, 0.25);
    }

    #[test]
    fn rejects_end_type_match_term() {
        let json = r#"{ "indicators": [ { "id": "i1", "type": "end", "value": "" } ] }"#;
        let err = load_indicators_str(json).unwrap_err();
        assert!(matches!(err, LoadError::ReservedEndType { .. }));
    }

    #[test]
    fn rejects_ambiguous_term() {
        let json = r#"{ "indicators": [
            { "id": "i1", "type": "a", "value": "1", "or": [{"type":"b","value":"2"}] }
        ] }"#;
        let err = load_indicators_str(json).unwrap_err();
        assert!(matches!(err, LoadError::AmbiguousTerm { .. }));
    }

    #[test]
    fn rejects_empty_term() {
        let json = r#"{ "indicators": [ { "id": "i1" } ] }"#;
        let err = load_indicators_str(json).unwrap_err();
        assert!(matches!(err, LoadError::EmptyTerm { .. }));
    }

    #[test]
    fn rejects_empty_and_children() {
        let json = r#"{ "indicators": [ { "id": "i1", "and": [] } ] }"#;
        let err = load_indicators_str(json).unwrap_err();
        assert!(matches!(err, LoadError::EmptyChildren { .. }));
    }

    #[test]
    fn parses_not() {
        let json = r#"{ "indicators": [
            { "id": "i1", "not": {"type": "a", "value": "1"} }
        ] }"#;
        let indicators = load_indicators_str(json).unwrap();
        assert!(indicators.indicators[0].term.is_not());
    }
}
