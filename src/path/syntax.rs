use crate::errors::{Error, Result};

/// Scanner over the argument text of a single path command (or a whole
/// `points` attribute).
pub struct SvgPathSyntax {
    data: Vec<char>,
    index: usize,
    split_on_dot: bool,
}

impl SvgPathSyntax {
    pub fn new(data: &str) -> Self {
        Self {
            data: data.chars().collect(),
            index: 0,
            split_on_dot: true,
        }
    }

    /// Control whether a second '.' within a run of digits starts a new
    /// number (`1.5.5` => `1.5`, `.5`) or is rejected as malformed.
    pub fn split_on_dot(mut self, split: bool) -> Self {
        self.split_on_dot = split;
        self
    }
}

impl PathSyntax for SvgPathSyntax {
    fn current(&self) -> Option<char> {
        self.data.get(self.index).copied()
    }

    fn advance(&mut self) {
        self.index += 1;
    }

    fn at_end(&self) -> bool {
        self.index >= self.data.len()
    }

    fn splits_on_dot(&self) -> bool {
        self.split_on_dot
    }
}

pub trait PathSyntax {
    fn current(&self) -> Option<char>;
    fn advance(&mut self);
    fn at_end(&self) -> bool;
    fn splits_on_dot(&self) -> bool;

    fn check_not_end(&self) -> Result<()> {
        if self.at_end() {
            Err(Error::Parse("ran out of data!".to_string()))
        } else {
            Ok(())
        }
    }

    fn skip_whitespace(&mut self) {
        // SVG definition of whitespace is 0x20, 0x9, 0xA, 0xD. Rust's is_ascii_whitespace()
        // also includes 0xC, but is close enough and convenient.
        while matches!(self.current(), Some(c) if c.is_ascii_whitespace()) {
            self.advance();
        }
    }

    fn skip_wsp_comma(&mut self) {
        self.skip_whitespace();
        if self.current() == Some(',') {
            self.advance();
            self.skip_whitespace();
        }
    }

    fn read_flag(&mut self) -> Result<bool> {
        self.check_not_end()?;
        // per the grammar for `a`/`A`, could have '00' etc for
        // the two adjacent flags...
        let res = match self.current() {
            Some('0') => false,
            Some('1') => true,
            other => {
                return Err(Error::InvalidValue(
                    "flag".to_string(),
                    other.map(|c| c.to_string()).unwrap_or_default(),
                ))
            }
        };
        self.advance();
        self.skip_wsp_comma();
        Ok(res)
    }

    /// Read the text of the next number, leaving the scanner after any
    /// trailing whitespace / comma.
    fn read_token(&mut self) -> Result<String> {
        self.check_not_end()?;
        let mut s = String::new();
        if let Some(sign @ ('-' | '+')) = self.current() {
            s.push(sign);
            self.advance();
        }
        let mut dot_valid = true;
        let mut exp_valid = true;
        while let Some(ch) = self.current() {
            match ch {
                '0'..='9' => {
                    s.push(ch);
                    self.advance();
                }
                '.' if dot_valid => {
                    s.push(ch);
                    self.advance();
                    dot_valid = false;
                }
                '.' if !self.splits_on_dot() => {
                    return Err(Error::InvalidValue("number".to_string(), format!("{s}.")));
                }
                'e' | 'E' if exp_valid && s.ends_with(|c: char| c.is_ascii_digit()) => {
                    s.push(ch);
                    self.advance();
                    // include sign character if present
                    if let Some(sign @ ('-' | '+')) = self.current() {
                        s.push(sign);
                        self.advance();
                    }
                    exp_valid = false;
                    dot_valid = false;
                }
                _ => break,
            }
        }
        if !s.contains(|c: char| c.is_ascii_digit()) {
            let found = self.current().map(|c| c.to_string()).unwrap_or(s);
            return Err(Error::InvalidValue("number".to_string(), found));
        }
        self.skip_wsp_comma();
        Ok(s)
    }

    fn read_number(&mut self) -> Result<f64> {
        Ok(self.read_token()?.parse()?)
    }
}

/// Split raw argument text into its individual number tokens.
///
/// Tokens are separated by whitespace and/or a comma, and additionally by a
/// sign or a second decimal point appearing inside a run of digits, so that
/// compressed data such as `1.5.5-2` yields `["1.5", ".5", "-2"]`.
pub fn split_tokens(data: &str) -> Result<Vec<String>> {
    let mut ps = SvgPathSyntax::new(data);
    ps.skip_wsp_comma();
    let mut tokens = Vec::new();
    while !ps.at_end() {
        tokens.push(ps.read_token()?);
    }
    Ok(tokens)
}

/// Parse raw argument text into numbers.
pub fn tokenize(data: &str) -> Result<Vec<f64>> {
    split_tokens(data)?
        .iter()
        .map(|t| t.parse().map_err(Error::from))
        .collect()
}

/// Parse the arguments of an arc segment, where the two flags in each group of
/// seven values are single characters and need no separator.
pub fn tokenize_arc(data: &str) -> Result<Vec<f64>> {
    let mut ps = SvgPathSyntax::new(data);
    ps.skip_wsp_comma();
    let mut values = Vec::new();
    while !ps.at_end() {
        let value = match values.len() % 7 {
            3 | 4 => {
                if ps.read_flag()? {
                    1.
                } else {
                    0.
                }
            }
            _ => ps.read_number()?,
        };
        values.push(value);
    }
    Ok(values)
}
