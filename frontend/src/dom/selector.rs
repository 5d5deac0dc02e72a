//! The subset of CSS selectors the widgets use, for the in-memory document.
//!
//! Supported: type, `#id`, `.class`, `[attr]`, `[attr="v"]`, `[attr^="v"]`,
//! the descendant combinator and comma-separated lists.

#[derive(Debug, Clone, PartialEq, Eq)]
enum AttrOp {
    Exists,
    Equals(String),
    Prefix(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrMatch {
    name: String,
    op: AttrOp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attrs: Vec<AttrMatch>,
}

/// What a compound selector needs to know about one element.
pub(crate) trait ElementView {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
}

impl Compound {
    pub(crate) fn matches(&self, el: &impl ElementView) -> bool {
        if let Some(tag) = &self.tag {
            if !tag.eq_ignore_ascii_case(el.tag()) {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if el.attr("id") != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.is_empty() {
            let class_attr = el.attr("class").unwrap_or_default();
            if !self
                .classes
                .iter()
                .all(|wanted| class_attr.split_whitespace().any(|c| c == wanted))
            {
                return false;
            }
        }
        self.attrs.iter().all(|m| match (&m.op, el.attr(&m.name)) {
            (_, None) => false,
            (AttrOp::Exists, Some(_)) => true,
            (AttrOp::Equals(v), Some(actual)) => actual == v,
            (AttrOp::Prefix(v), Some(actual)) => actual.starts_with(v.as_str()),
        })
    }
}

/// A selector list: matches when any alternative matches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SelectorList {
    /// Each alternative is a descendant chain, outermost compound first.
    alternatives: Vec<Vec<Compound>>,
}

impl SelectorList {
    pub(crate) fn parse(input: &str) -> Option<Self> {
        let alternatives = input
            .split(',')
            .map(|alt| {
                alt.split_whitespace()
                    .map(parse_compound)
                    .collect::<Option<Vec<_>>>()
                    .filter(|chain| !chain.is_empty())
            })
            .collect::<Option<Vec<_>>>()?;
        Some(Self { alternatives })
    }

    /// `element` followed by its ancestors, innermost first.
    pub(crate) fn matches<'a, E: ElementView + 'a>(
        &self,
        element: &E,
        ancestors: impl Iterator<Item = &'a E> + Clone,
    ) -> bool {
        self.alternatives
            .iter()
            .any(|chain| chain_matches(chain, element, ancestors.clone()))
    }
}

fn chain_matches<'a, E: ElementView + 'a>(
    chain: &[Compound],
    element: &E,
    mut ancestors: impl Iterator<Item = &'a E>,
) -> bool {
    let Some((last, rest)) = chain.split_last() else {
        return false;
    };
    if !last.matches(element) {
        return false;
    }
    // Greedy right-to-left walk is exact for descendant-only chains.
    let mut pending = rest.iter().rev().peekable();
    while let Some(compound) = pending.peek() {
        match ancestors.next() {
            Some(ancestor) if compound.matches(ancestor) => {
                pending.next();
            },
            Some(_) => {},
            None => return false,
        }
    }
    true
}

fn parse_compound(token: &str) -> Option<Compound> {
    let mut compound = Compound::default();
    let mut rest = token;

    let tag_end = rest.find(['.', '#', '[']).unwrap_or(rest.len());
    if tag_end > 0 {
        let tag = &rest[..tag_end];
        if tag != "*" {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }
    rest = &rest[tag_end..];

    while let Some(first) = rest.chars().next() {
        match first {
            '.' | '#' => {
                let body = &rest[1..];
                let end = body.find(['.', '#', '[']).unwrap_or(body.len());
                let name = &body[..end];
                if name.is_empty() {
                    return None;
                }
                if first == '.' {
                    compound.classes.push(name.to_string());
                } else {
                    compound.id = Some(name.to_string());
                }
                rest = &body[end..];
            },
            '[' => {
                let close = rest.find(']')?;
                compound.attrs.push(parse_attr(&rest[1..close])?);
                rest = &rest[close + 1..];
            },
            _ => return None,
        }
    }
    Some(compound)
}

fn parse_attr(body: &str) -> Option<AttrMatch> {
    let unquote = |v: &str| {
        let v = v.trim();
        v.strip_prefix('"')
            .and_then(|v| v.strip_suffix('"'))
            .or_else(|| v.strip_prefix('\'').and_then(|v| v.strip_suffix('\'')))
            .unwrap_or(v)
            .to_string()
    };

    if let Some((name, value)) = body.split_once("^=") {
        return Some(AttrMatch {
            name: name.trim().to_string(),
            op: AttrOp::Prefix(unquote(value)),
        });
    }
    if let Some((name, value)) = body.split_once('=') {
        return Some(AttrMatch {
            name: name.trim().to_string(),
            op: AttrOp::Equals(unquote(value)),
        });
    }
    let name = body.trim();
    if name.is_empty() {
        return None;
    }
    Some(AttrMatch {
        name: name.to_string(),
        op: AttrOp::Exists,
    })
}
