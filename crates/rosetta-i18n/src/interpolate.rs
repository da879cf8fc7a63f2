//! Placeholder interpolation
//!
//! Templates mark parameters with `{name}`. The template is split on
//! placeholders, each placeholder is replaced by its parameter, and the
//! pieces are joined back into text, or kept as an ordered composite when a
//! parameter is opaque content.

use crate::params::{ParamValue, Params};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A brace pair enclosing at least one non-`}` character.
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[^}]+\}").expect("placeholder pattern is valid"));

/// Extracts the parameter name from a piece of a split template.
static PLACEHOLDER_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(.+)\}").expect("placeholder name pattern is valid"));

/// Text written for a placeholder whose parameter was not supplied
pub const UNDEFINED_TEXT: &str = "undefined";

/// What a placeholder without a matching parameter turns into
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingParamPolicy {
    /// The literal text `undefined`
    #[default]
    Undefined,
    /// The placeholder itself, braces included
    KeepPlaceholder,
    /// Nothing
    Empty,
}

/// One piece of a composite message
#[derive(Debug, Clone, PartialEq)]
pub enum Segment<C> {
    /// A run of text
    Text(String),
    /// An opaque content value, positioned but not interpreted
    Content(C),
}

/// The final output of a lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedMessage<C> {
    /// Plain text; no opaque values were involved
    Text(String),
    /// Interleaved text and content, to be rendered as one unit
    Composite(Vec<Segment<C>>),
}

impl<C> ResolvedMessage<C> {
    /// The text, when the message is plain text
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Composite(_) => None,
        }
    }

    /// Whether the message carries opaque content
    pub const fn is_composite(&self) -> bool {
        matches!(self, Self::Composite(_))
    }

    /// The composite segments, empty for plain text
    pub fn segments(&self) -> &[Segment<C>] {
        match self {
            Self::Text(_) => &[],
            Self::Composite(segments) => segments,
        }
    }
}

impl ResolvedMessage<crate::params::NoContent> {
    /// Text of a message that cannot carry content
    pub fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Composite(segments) => segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text,
                    Segment::Content(never) => match never {},
                })
                .collect(),
        }
    }
}

impl<C: fmt::Display> fmt::Display for ResolvedMessage<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Composite(segments) => {
                for segment in segments {
                    match segment {
                        Segment::Text(text) => f.write_str(text)?,
                        Segment::Content(content) => write!(f, "{content}")?,
                    }
                }
                Ok(())
            }
        }
    }
}

/// Substitutes parameters into templates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Interpolator {
    missing: MissingParamPolicy,
}

impl Interpolator {
    /// Create an interpolator with the given missing-parameter policy
    #[must_use]
    pub const fn new(missing: MissingParamPolicy) -> Self {
        Self { missing }
    }

    /// Interpolate `params` into `template`.
    ///
    /// Without a parameter set the template is returned untouched, braces and
    /// all. With one, every placeholder is replaced: supplied values by their
    /// text (falsy values included, so `0` stays `0`) or content, absent ones
    /// according to the missing-parameter policy.
    pub fn interpolate<C: Clone>(
        &self,
        template: &str,
        params: Option<&Params<C>>,
    ) -> ResolvedMessage<C> {
        let Some(params) = params else {
            return ResolvedMessage::Text(template.to_string());
        };

        let segments: Vec<Segment<C>> = split_template(template)
            .into_iter()
            .map(|piece| self.substitute(piece, params))
            .collect();

        if segments.iter().all(|segment| matches!(segment, Segment::Text(_))) {
            let text = segments
                .into_iter()
                .map(|segment| match segment {
                    Segment::Text(text) => text,
                    Segment::Content(_) => String::new(),
                })
                .collect();
            return ResolvedMessage::Text(text);
        }

        ResolvedMessage::Composite(compact(segments))
    }

    fn substitute<C: Clone>(&self, piece: &str, params: &Params<C>) -> Segment<C> {
        let Some(name) = PLACEHOLDER_NAME
            .captures(piece)
            .and_then(|captures| captures.get(1))
        else {
            return Segment::Text(piece.to_string());
        };

        match params.get(name.as_str()) {
            Some(ParamValue::Content(content)) => Segment::Content(content.clone()),
            Some(value) => Segment::Text(value.to_text().unwrap_or_default()),
            None => Segment::Text(match self.missing {
                MissingParamPolicy::Undefined => UNDEFINED_TEXT.to_string(),
                MissingParamPolicy::KeepPlaceholder => piece.to_string(),
                MissingParamPolicy::Empty => String::new(),
            }),
        }
    }
}

/// Split into literal runs and placeholders, in order.
fn split_template(template: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut last = 0;
    for placeholder in PLACEHOLDER.find_iter(template) {
        pieces.push(&template[last..placeholder.start()]);
        pieces.push(placeholder.as_str());
        last = placeholder.end();
    }
    pieces.push(&template[last..]);
    pieces
}

/// Merge adjacent text runs and drop empty ones.
fn compact<C>(segments: Vec<Segment<C>>) -> Vec<Segment<C>> {
    let mut compacted: Vec<Segment<C>> = Vec::with_capacity(segments.len());
    for segment in segments {
        if let Segment::Text(text) = &segment {
            if text.is_empty() {
                continue;
            }
            if let Some(Segment::Text(previous)) = compacted.last_mut() {
                previous.push_str(text);
                continue;
            }
        }
        compacted.push(segment);
    }
    compacted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{params, NoContent};

    fn text(template: &str, params: &Params) -> String {
        Interpolator::default()
            .interpolate(template, Some(params))
            .into_string()
    }

    #[test]
    fn test_no_params_returns_template() {
        let result = Interpolator::default().interpolate::<NoContent>("Hi {user}", None);
        assert_eq!(result, ResolvedMessage::Text("Hi {user}".into()));
    }

    #[test]
    fn test_substitutes_text_and_numbers() {
        let params = params!["user" => "Ana", "count" => 3];
        assert_eq!(text("{user} has {count} new", &params), "Ana has 3 new");
    }

    #[test]
    fn test_missing_param_is_undefined() {
        assert_eq!(text("Hi {user}", &params![]), "Hi undefined");
    }

    #[test]
    fn test_falsy_values_render_as_text() {
        let params = params!["zero" => 0, "blank" => "", "nan" => f64::NAN];
        assert_eq!(text("[{zero}|{blank}|{nan}]", &params), "[0||NaN]");
    }

    #[test]
    fn test_missing_param_policies() {
        let params = params!["a" => "A"];
        let keep = Interpolator::new(MissingParamPolicy::KeepPlaceholder);
        assert_eq!(
            keep.interpolate("{a}{b}", Some(&params)).into_string(),
            "A{b}"
        );
        let empty = Interpolator::new(MissingParamPolicy::Empty);
        assert_eq!(
            empty.interpolate("{a}{b}", Some(&params)).into_string(),
            "A"
        );
    }

    #[test]
    fn test_malformed_braces_are_literal() {
        let params = params!["a" => "A"];
        assert_eq!(text("{a} {} {unclosed", &params), "A {} {unclosed");
        assert_eq!(text("} {a}", &params), "} A");
    }

    #[test]
    fn test_nested_open_brace_is_part_of_name() {
        let params = params!["a{b" => "X"];
        assert_eq!(text("<{a{b}>", &params), "<X>");
    }

    #[test]
    fn test_no_placeholders_is_identity() {
        let params = params!["user" => "Ana"];
        assert_eq!(text("Plain text", &params), "Plain text");
    }

    #[test]
    fn test_content_produces_composite() {
        let params = Params::new().with_content("name", "<b>Ana</b>");
        let result = Interpolator::default().interpolate("Hello {name}", Some(&params));
        assert_eq!(
            result,
            ResolvedMessage::Composite(vec![
                Segment::Text("Hello ".into()),
                Segment::Content("<b>Ana</b>"),
            ])
        );
    }

    #[test]
    fn test_composite_merges_text_runs() {
        let params = Params::new()
            .with("user", "Ana")
            .with_content("icon", 7u8)
            .with("count", 2);
        let result =
            Interpolator::default().interpolate("{icon}{user}, {count} left {icon}!", Some(&params));
        assert_eq!(
            result.segments(),
            &[
                Segment::Content(7),
                Segment::Text("Ana, 2 left ".into()),
                Segment::Content(7),
                Segment::Text("!".into()),
            ]
        );
        assert_eq!(result.to_string(), "7Ana, 2 left 7!");
    }

    #[test]
    fn test_split_keeps_order() {
        assert_eq!(split_template("a{b}c"), vec!["a", "{b}", "c"]);
        assert_eq!(split_template("{b}"), vec!["", "{b}", ""]);
    }
}
