//! Generator-native settings files.
//!
//! The site generator reads its settings from a file of `NAME = literal`
//! bindings. This module parses the literal subset such files use (strings,
//! booleans, `None`, numbers, lists, tuples and dicts) and renders a `SiteConfig`
//! back into that form.

use serde_json::{Map, Value};

use super::schema::{option_for_generator_name, SettingValue, SiteConfig};
use crate::error::{ConfigError, Result};

/// Parse an assignment file into a `SiteConfig`
pub fn parse_pyconf(content: &str) -> Result<SiteConfig> {
    let bindings = Parser::new(content).parse_bindings()?;

    let mut options = Map::new();
    for (name, value) in bindings {
        let Some(option) = option_for_generator_name(&name) else {
            tracing::debug!("Ignoring setting {} not used by sitecfg", name);
            continue;
        };

        if value.is_null() {
            // None means "use the generator default"
            options.remove(option);
            continue;
        }

        options.insert(option.to_string(), value);
    }

    serde_json::from_value(Value::Object(options)).map_err(|e| ConfigError::Parse {
        format: "Python",
        message: e.to_string(),
    })
}

/// Render a `SiteConfig` as an assignment file the generator can read
pub fn to_pyconf(config: &SiteConfig) -> String {
    let mut out = String::from("# -*- coding: utf-8 -*-\n\n");

    for (name, value) in config.generator_settings() {
        let literal = match (name, value) {
            // A lone markup language is written as a bare string
            ("MARKUP", SettingValue::List(items)) if items.len() == 1 => quote(&items[0]),
            ("MARKUP", SettingValue::List(items)) => render_tuple(&items),
            (_, value) => render_value(&value),
        };
        out.push_str(&format!("{} = {}\n", name, literal));
    }

    out
}

fn render_value(value: &SettingValue) -> String {
    match value {
        SettingValue::Text(text) => quote(text),
        SettingValue::Flag(true) => "True".to_string(),
        SettingValue::Flag(false) => "False".to_string(),
        SettingValue::List(items) => {
            let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
            format!("[{}]", quoted.join(", "))
        }
        SettingValue::Pairs(pairs) => {
            let tuples: Vec<String> = pairs
                .iter()
                .map(|(first, second)| format!("({}, {})", quote(first), quote(second)))
                .collect();
            format!("[{}]", tuples.join(", "))
        }
    }
}

fn render_tuple(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|item| quote(item)).collect();
    format!("({})", quoted.join(", "))
}

fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('\'');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('\'');
    out
}

struct Parser<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
}

impl<'a> Parser<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            line: 1,
        }
    }

    fn syntax(&self, message: impl Into<String>) -> ConfigError {
        ConfigError::Syntax {
            line: self.line,
            message: message.into(),
        }
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.chars.next();
        if c == Some('\n') {
            self.line += 1;
        }
        c
    }

    fn skip_comment(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    /// Skip spaces on the current line
    fn skip_inline_space(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c == ' ' || c == '\t' || c == '\r' {
                self.bump();
            } else {
                break;
            }
        }
    }

    /// Skip whitespace including newlines and comments (inside brackets)
    fn skip_space(&mut self) {
        while let Some(&c) = self.chars.peek() {
            if c.is_whitespace() {
                self.bump();
            } else if c == '#' {
                self.skip_comment();
            } else {
                break;
            }
        }
    }

    fn parse_bindings(mut self) -> Result<Vec<(String, Value)>> {
        let mut bindings = Vec::new();

        loop {
            self.skip_space();
            if self.chars.peek().is_none() {
                return Ok(bindings);
            }

            let name = self.parse_identifier()?;
            if name == "import" || name == "from" {
                tracing::debug!("Skipping import on line {}", self.line);
                self.skip_comment();
                continue;
            }

            self.skip_inline_space();
            if self.bump() != Some('=') {
                return Err(self.syntax(format!("expected '=' after {}", name)));
            }
            self.skip_inline_space();

            let value = self.parse_value()?;
            self.expect_end_of_statement()?;
            bindings.push((name, value));
        }
    }

    fn expect_end_of_statement(&mut self) -> Result<()> {
        self.skip_inline_space();
        match self.chars.peek() {
            None | Some('\n') => Ok(()),
            Some('#') => {
                self.skip_comment();
                Ok(())
            }
            Some(&c) => Err(self.syntax(format!("unexpected '{}' after value", c))),
        }
    }

    fn parse_identifier(&mut self) -> Result<String> {
        let mut ident = String::new();
        while let Some(&c) = self.chars.peek() {
            if c.is_ascii_alphanumeric() || c == '_' {
                ident.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
            return Err(self.syntax("expected a setting name"));
        }
        Ok(ident)
    }

    fn parse_value(&mut self) -> Result<Value> {
        match self.chars.peek().copied() {
            Some('\'') | Some('"') => self.parse_string(false).map(Value::String),
            Some('[') => {
                self.bump();
                self.parse_sequence(']').map(|(items, _)| Value::Array(items))
            }
            Some('(') => {
                self.bump();
                let (mut items, trailing_comma) = self.parse_sequence(')')?;
                // `(x)` is just x; `(x,)` is a one-element tuple
                if items.len() == 1 && !trailing_comma {
                    Ok(items.remove(0))
                } else {
                    Ok(Value::Array(items))
                }
            }
            Some('{') => {
                self.bump();
                self.parse_dict()
            }
            Some(c) if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' => {
                self.parse_number()
            }
            Some(c) if c.is_ascii_alphabetic() || c == '_' => self.parse_word(),
            Some(c) => Err(self.syntax(format!("unexpected '{}'", c))),
            None => Err(self.syntax("missing value")),
        }
    }

    /// Parse a keyword literal or a prefixed string such as `u"..."`
    fn parse_word(&mut self) -> Result<Value> {
        let word = self.parse_identifier()?;

        if let Some(&quote) = self.chars.peek() {
            if (quote == '\'' || quote == '"')
                && word.len() <= 2
                && word.chars().all(|c| "uUrRbB".contains(c))
            {
                let raw = word.contains(['r', 'R']);
                return self.parse_string(raw).map(Value::String);
            }
        }

        match word.as_str() {
            "True" => Ok(Value::Bool(true)),
            "False" => Ok(Value::Bool(false)),
            "None" => Ok(Value::Null),
            other => Err(self.syntax(format!("unsupported expression '{}'", other))),
        }
    }

    fn parse_string(&mut self, raw: bool) -> Result<String> {
        let quote = self
            .bump()
            .ok_or_else(|| self.syntax("expected a string"))?;
        let mut text = String::new();

        loop {
            if matches!(self.chars.peek(), None | Some('\n')) {
                return Err(self.syntax("unterminated string"));
            }

            match self.bump() {
                None => return Err(self.syntax("unterminated string")),
                Some(c) if c == quote => return Ok(text),
                Some('\\') if raw => {
                    text.push('\\');
                    if let Some(next) = self.bump() {
                        text.push(next);
                    }
                }
                Some('\\') => match self.bump() {
                    Some('n') => text.push('\n'),
                    Some('t') => text.push('\t'),
                    Some('\\') => text.push('\\'),
                    Some('\'') => text.push('\''),
                    Some('"') => text.push('"'),
                    Some(other) => {
                        text.push('\\');
                        text.push(other);
                    }
                    None => return Err(self.syntax("unterminated string")),
                },
                Some(c) => text.push(c),
            }
        }
    }

    fn parse_number(&mut self) -> Result<Value> {
        let mut literal = String::new();
        while let Some(&c) = self.chars.peek() {
            let sign_allowed = literal.is_empty() || literal.ends_with(['e', 'E']);
            let is_sign = sign_allowed && (c == '-' || c == '+');
            if c.is_ascii_digit() || matches!(c, '.' | 'e' | 'E' | '_') || is_sign {
                literal.push(c);
                self.bump();
            } else {
                break;
            }
        }

        let cleaned = literal.replace('_', "");
        if let Ok(int) = cleaned.parse::<i64>() {
            return Ok(Value::from(int));
        }

        cleaned
            .parse::<f64>()
            .ok()
            .and_then(serde_json::Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| self.syntax(format!("invalid number '{}'", literal)))
    }

    /// Parse a `{key: value, ...}` literal. Non-string keys are kept in their
    /// JSON rendering.
    fn parse_dict(&mut self) -> Result<Value> {
        let mut entries = Map::new();

        loop {
            self.skip_space();
            match self.chars.peek() {
                Some('}') => {
                    self.bump();
                    return Ok(Value::Object(entries));
                }
                None => return Err(self.syntax("missing closing '}'")),
                _ => {}
            }

            let key = match self.parse_value()? {
                Value::String(key) => key,
                other => other.to_string(),
            };

            self.skip_space();
            if self.bump() != Some(':') {
                return Err(self.syntax(format!("expected ':' after key '{}'", key)));
            }
            self.skip_space();

            let value = self.parse_value()?;
            entries.insert(key, value);

            self.skip_space();
            match self.chars.peek() {
                Some(',') => {
                    self.bump();
                }
                Some('}') => {}
                Some(&c) => {
                    return Err(self.syntax(format!("expected ',' or '}}', found '{}'", c)))
                }
                None => return Err(self.syntax("missing closing '}'")),
            }
        }
    }

    /// Parse comma separated values up to `close`. Returns whether the last
    /// item was followed by a comma.
    fn parse_sequence(&mut self, close: char) -> Result<(Vec<Value>, bool)> {
        let mut items = Vec::new();
        let mut trailing_comma = false;

        loop {
            self.skip_space();
            match self.chars.peek() {
                Some(&c) if c == close => {
                    self.bump();
                    return Ok((items, trailing_comma));
                }
                None => return Err(self.syntax(format!("missing closing '{}'", close))),
                _ => {}
            }

            items.push(self.parse_value()?);
            trailing_comma = false;

            self.skip_space();
            match self.chars.peek() {
                Some(',') => {
                    self.bump();
                    trailing_comma = true;
                }
                Some(&c) if c == close => {}
                Some(&c) => {
                    return Err(self.syntax(format!("expected ',' or '{}', found '{}'", close, c)))
                }
                None => return Err(self.syntax(format!("missing closing '{}'", close))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Markup;

    fn bindings(content: &str) -> Vec<(String, Value)> {
        Parser::new(content).parse_bindings().unwrap()
    }

    #[test]
    fn test_parse_literals() {
        let parsed = bindings(
            "A = 'x'\nB = u\"y\"\nC = True\nD = None\nE = 10\nF = ['a', 'b']\nG = ('a',)\n",
        );
        let values: Vec<Value> = parsed.into_iter().map(|(_, v)| v).collect();
        assert_eq!(values[0], Value::from("x"));
        assert_eq!(values[1], Value::from("y"));
        assert_eq!(values[2], Value::Bool(true));
        assert_eq!(values[3], Value::Null);
        assert_eq!(values[4], Value::from(10));
        assert_eq!(values[5], serde_json::json!(["a", "b"]));
        assert_eq!(values[6], serde_json::json!(["a"]));
    }

    #[test]
    fn test_parenthesised_tuple_is_unwrapped() {
        let parsed = bindings("MARKUP = (('rst', 'md'))");
        assert_eq!(parsed[0].1, serde_json::json!(["rst", "md"]));
    }

    #[test]
    fn test_escapes_and_raw_strings() {
        let parsed = bindings("A = 'it\\'s'\nB = r'a\\d'\n");
        assert_eq!(parsed[0].1, Value::from("it's"));
        assert_eq!(parsed[1].1, Value::from("a\\d"));
    }

    #[test]
    fn test_multiline_list_with_comments() {
        let parsed = bindings("LINKS = (\n    ('Home', '/'),  # first\n    ('About', '/about'),\n)\n");
        assert_eq!(parsed[0].1, serde_json::json!([["Home", "/"], ["About", "/about"]]));
    }

    #[test]
    fn test_imports_and_comments_skipped() {
        let parsed = bindings(
            "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\nfrom __future__ import unicode_literals\n\nTHEME = 'theme'  # trailing\n",
        );
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].0, "THEME");
    }

    #[test]
    fn test_syntax_error_reports_line() {
        let err = Parser::new("THEME = 'theme'\nSITENAME = 'unterminated\n")
            .parse_bindings()
            .unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { line: 2, .. }));
    }

    #[test]
    fn test_expressions_rejected() {
        let err = Parser::new("PATH = os.path.join('a', 'b')").parse_bindings().unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { .. }));
    }

    #[test]
    fn test_unknown_settings_ignored() {
        let config = parse_pyconf("DEFAULT_PAGINATION = 10\nTHEME = 'theme'\n").unwrap();
        assert_eq!(config.theme(), "theme");
    }

    #[test]
    fn test_dicts_and_floats_parse() {
        let parsed = bindings(
            "EXTRA_PATH_METADATA = {\n    'extra/robots.txt': {'path': 'robots.txt'},\n    1: 2,\n}\nRATIO = 0.75\nBIG = 1e3\n",
        );
        assert_eq!(
            parsed[0].1,
            serde_json::json!({"extra/robots.txt": {"path": "robots.txt"}, "1": 2})
        );
        assert_eq!(parsed[1].1, serde_json::json!(0.75));
        assert_eq!(parsed[2].1, serde_json::json!(1000.0));
    }

    #[test]
    fn test_unmodelled_dict_and_float_settings_ignored() {
        let config = parse_pyconf(
            "THEME = 'theme'\nEXTRA_PATH_METADATA = {'extra/favicon.ico': {'path': 'favicon.ico'}}\nSUMMARY_RATIO = 0.5\n",
        )
        .unwrap();
        assert_eq!(config.theme(), "theme");
    }

    #[test]
    fn test_dict_for_modelled_setting_is_parse_error() {
        let err = parse_pyconf("STATIC_PATHS = {'images': True}\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "Python", .. }));
    }

    #[test]
    fn test_unterminated_dict_reports_syntax() {
        let err = Parser::new("LINKS = {'a': 'b'\n").parse_bindings().unwrap_err();
        assert!(matches!(err, ConfigError::Syntax { .. }));
    }

    #[test]
    fn test_none_keeps_default() {
        let config = parse_pyconf("TAG_FEED_ATOM = None\n").unwrap();
        assert!(config.tag_feed_path_template().is_none());
    }

    #[test]
    fn test_type_mismatch_is_parse_error() {
        let err = parse_pyconf("STATIC_PATHS = 'images'\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { format: "Python", .. }));
    }

    #[test]
    fn test_render_then_parse_matches() {
        let original = parse_pyconf(
            "MARKUP = ('rst', 'md')\nAUTHOR = u\"Aldrin J D'Souza\"\nTYPOGRIFY = True\nMENUITEMS = [('Archives', '/archives.html')]\n",
        )
        .unwrap();
        let rendered = to_pyconf(&original);
        assert!(rendered.contains("MARKUP = ('rst', 'md')"));
        assert!(rendered.contains("AUTHOR = 'Aldrin J D\\'Souza'"));

        let reparsed = parse_pyconf(&rendered).unwrap();
        assert_eq!(reparsed, original);
        assert_eq!(reparsed.markup(), &[Markup::Rst, Markup::Md]);
    }

    #[test]
    fn test_single_markup_rendered_as_string() {
        let rendered = to_pyconf(&SiteConfig::default());
        assert!(rendered.contains("MARKUP = 'md'\n"));
        assert!(rendered.contains("TYPOGRIFY = False\n"));
        assert!(!rendered.contains("TAG_FEED_ATOM"));
    }
}
