//! Parser for the path command subset used by stroke data.
//!
//! Supported commands are `M x,y` (absolute move-to), `c` (relative cubic
//! Bézier) and `C` (absolute cubic Bézier). Numbers may be separated by
//! whitespace, commas or simply by the sign of the next number, e.g.
//! `M52.5,17.5c-0.12,1.27-0.35,3.05-1.02,4.23`.

use std::iter::Peekable;

use log::{trace, warn};
use lyon_geom::CubicBezierSegment;

use crate::config::RelativeMode;
use crate::error::Error;
use crate::geometry::{DirectionVector, Point, Polyline};
use crate::tessellate::tessellate_cubic;

#[derive(Debug, PartialEq, Copy, Clone)]
enum Token {
    Command(char),
    Number(f64),
}

/// Splits a path expression into command letters and numbers.
struct Tokenizer<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek_char(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn skip_separators(&mut self) {
        while let Some(c) = self.peek_char() {
            if c.is_whitespace() || c == ',' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    /// Scan one number starting at the current position. A number ends at a
    /// separator, a letter, a sign that does not belong to an exponent, or a
    /// second decimal point.
    fn number(&mut self) -> Result<f64, Error> {
        let start = self.pos;
        let bytes = self.src.as_bytes();
        let mut end = start;
        if matches!(bytes.get(end), Some(b'+') | Some(b'-')) {
            end += 1;
        }
        let mut seen_dot = false;
        while let Some(&b) = bytes.get(end) {
            match b {
                b'0'..=b'9' => end += 1,
                b'.' if !seen_dot => {
                    seen_dot = true;
                    end += 1;
                }
                b'e' | b'E' => {
                    let mut exp_end = end + 1;
                    if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
                        exp_end += 1;
                    }
                    if matches!(bytes.get(exp_end), Some(b'0'..=b'9')) {
                        end = exp_end;
                        while matches!(bytes.get(end), Some(b'0'..=b'9')) {
                            end += 1;
                        }
                    }
                    break;
                }
                _ => break,
            }
        }
        self.pos = end;
        let text = &self.src[start..end];
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(n),
            _ => Err(Error::PathParse(format!(
                "invalid number {:?} at offset {}",
                text, start
            ))),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Result<Token, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_separators();
        let c = self.peek_char()?;
        if c.is_ascii_digit() || c == '-' || c == '+' || c == '.' {
            Some(self.number().map(Token::Number))
        } else {
            self.pos += c.len_utf8();
            Some(Ok(Token::Command(c)))
        }
    }
}

/// Walks the token stream while tracking the current point.
struct PathBuilder<'a, I: Iterator<Item = Result<Token, Error>>> {
    tokens: Peekable<I>,
    expr: &'a str,
    subdivisions: usize,
    relative_mode: RelativeMode,
    current: Option<Point>,
    points: Polyline,
}

impl<'a, I: Iterator<Item = Result<Token, Error>>> PathBuilder<'a, I> {
    /// Whether the next token is a number, i.e. an implicit repetition of the
    /// previous command.
    fn next_is_number(&mut self) -> bool {
        matches!(self.tokens.peek(), Some(Ok(Token::Number(_))))
    }

    fn operands<const N: usize>(&mut self, command: char) -> Result<[f64; N], Error> {
        let mut values = [0.0; N];
        for value in &mut values {
            *value = match self.tokens.next() {
                Some(Ok(Token::Number(n))) => n,
                Some(Err(e)) => return Err(e),
                Some(Ok(Token::Command(_))) | None => {
                    return Err(Error::PathParse(format!(
                        "command '{}' expects {} numbers in {:?}",
                        command, N, self.expr
                    )))
                }
            };
        }
        Ok(values)
    }

    fn move_to(&mut self) -> Result<(), Error> {
        let [x, y] = self.operands::<2>('M')?;
        let point = Point::new(x, y);
        trace!("parse_path: MoveTo {:?}", point);
        self.current = Some(point);
        self.points.push(point);
        Ok(())
    }

    fn curve_to(&mut self, abs: bool) -> Result<(), Error> {
        let command = if abs { 'C' } else { 'c' };
        let from = self.current.ok_or_else(|| {
            Error::PathParse(format!("curve before any move-to in {:?}", self.expr))
        })?;
        let [x1, y1, x2, y2, x, y] = self.operands::<6>(command)?;
        let (ctrl1, ctrl2, to) = if abs {
            (Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y))
        } else {
            let d1 = DirectionVector::new(x1, y1);
            let d2 = DirectionVector::new(x2, y2);
            let d3 = DirectionVector::new(x, y);
            match self.relative_mode {
                RelativeMode::CurrentPoint => (from + d1, from + d2, from + d3),
                RelativeMode::Chained => {
                    let ctrl1 = from + d1;
                    let ctrl2 = ctrl1 + d2;
                    (ctrl1, ctrl2, ctrl2 + d3)
                }
            }
        };
        trace!("parse_path: CurveTo {:?} {:?} {:?} {:?}", from, ctrl1, ctrl2, to);
        let segment = CubicBezierSegment {
            from: from.into(),
            ctrl1: ctrl1.into(),
            ctrl2: ctrl2.into(),
            to: to.into(),
        };
        self.points.extend(tessellate_cubic(&segment, self.subdivisions));
        self.current = Some(to);
        Ok(())
    }

    /// Skip an unrecognized command together with any numbers following it.
    fn skip_unrecognized(&mut self, token: Token) {
        let mut skipped = 0;
        while self.next_is_number() {
            self.tokens.next();
            skipped += 1;
        }
        match token {
            Token::Command(c) => warn!(
                "Unrecognized path command '{}' (skipped with {} operands) in {:?}",
                c, skipped, self.expr
            ),
            Token::Number(n) => warn!(
                "Unexpected number {} (skipped with {} more) in {:?}",
                n, skipped, self.expr
            ),
        }
    }

    fn run(mut self) -> Result<Polyline, Error> {
        while let Some(token) = self.tokens.next() {
            match token? {
                Token::Command('M') => self.move_to()?,
                Token::Command(c @ 'c') | Token::Command(c @ 'C') => {
                    let abs = c == 'C';
                    self.curve_to(abs)?;
                    while self.next_is_number() {
                        self.curve_to(abs)?;
                    }
                }
                other => self.skip_unrecognized(other),
            }
        }
        if self.points.is_empty() {
            return Err(Error::PathParse(format!(
                "path {:?} contains no move-to",
                self.expr
            )));
        }
        Ok(self.points)
    }
}

/// Parse one path expression into a polyline in source units. Cubic
/// segments are flattened with `subdivisions` interior points each.
///
/// Unknown commands are logged and skipped. Missing or malformed operands
/// are an error.
pub fn parse_path(
    expr: &str,
    subdivisions: usize,
    relative_mode: RelativeMode,
) -> Result<Polyline, Error> {
    trace!("parse_path: {:?}", expr);
    PathBuilder {
        tokens: Tokenizer::new(expr).peekable(),
        expr,
        subdivisions,
        relative_mode,
        current: None,
        points: Polyline::new(),
    }
    .run()
}
