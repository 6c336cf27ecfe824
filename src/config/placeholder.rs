//! Placeholder mini-language for configuration masks
//!
//! A config mask is literal text interleaved with bracketed tokens:
//! `[Settings:ModuleId||0]`, `[Settings:TitleFieldName]`, `[Key]`.
//! `Source:` is optional; `||default` supplies the fallback value.
//! Bracketed text that is not a well-formed token stays literal.
//!
//! A token ends at the first `]` after its `[`, so a default cannot
//! contain `]`; anything past that bracket is literal text.

/// A single parsed `[Source:Key||Default]` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder {
    /// Settings source the key is read from (`Settings` in `[Settings:Key]`)
    pub source: Option<String>,
    /// Setting name
    pub key: String,
    /// Value used when the setting is absent or empty
    pub default: Option<String>,
}

impl Placeholder {
    /// Parse the text between `[` and `]`.
    ///
    /// Returns `None` when the body is not a token (empty key, nested
    /// brackets, whitespace inside the key).
    pub fn parse(body: &str) -> Option<Self> {
        let (reference, default) = match body.split_once("||") {
            Some((r, d)) => (r, Some(d.to_string())),
            None => (body, None),
        };

        let (source, key) = match reference.split_once(':') {
            Some((s, k)) => (Some(s), k),
            None => (None, reference),
        };

        if !is_identifier(key) {
            return None;
        }
        if let Some(s) = source {
            if !is_identifier(s) {
                return None;
            }
        }

        Some(Self {
            source: source.map(str::to_string),
            key: key.to_string(),
            default,
        })
    }

    /// The value to use when the setting resolved to nothing.
    pub fn fallback(&self) -> &str {
        self.default.as_deref().unwrap_or("")
    }
}

fn is_identifier(s: &str) -> bool {
    !s.is_empty()
        && s
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '_' | '-' | '.' | '$'))
}

/// One piece of a config mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Token(Placeholder),
}

/// Split a config mask into literal and token segments.
///
/// Adjacent literal text is merged, so a mask without tokens yields a
/// single `Literal` (or nothing for an empty mask).
pub fn parse_mask(mask: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = mask;

    while let Some(open) = rest.find('[') {
        literal.push_str(&rest[..open]);
        let after_open = &rest[open + 1..];

        let Some(close) = after_open.find(']') else {
            // unclosed bracket: the remainder is literal
            literal.push_str(&rest[open..]);
            rest = "";
            break;
        };

        match Placeholder::parse(&after_open[..close]) {
            Some(placeholder) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Token(placeholder));
                rest = &after_open[close + 1..];
            }
            None => {
                // keep the bracket and rescan from the next character
                literal.push('[');
                rest = after_open;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
