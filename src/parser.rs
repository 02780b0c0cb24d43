use std::{
    error, fmt,
    io::{self, BufRead},
    iter,
    num::ParseFloatError,
    ops::RangeFrom,
};

#[derive(Debug)]
pub enum ParsingError {
    MissingCount,
    InvalidCount {
        line: usize,
    },
    BlankLine {
        line: usize,
    },
    MalformedRecord {
        line: usize,
        expected: usize,
        found: usize,
    },
    InvalidNumber {
        line: usize,
        source: ParseFloatError,
    },
    NonFiniteNumber {
        line: usize,
    },
    InconsistentCount {
        declared: usize,
        actual: usize,
    },
    IO(io::Error),
}

impl fmt::Display for ParsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCount => write!(f, "missing particle count"),
            Self::InvalidCount { line } => write!(f, "line {line}: invalid particle count"),
            Self::BlankLine { line } => write!(f, "line {line}: unexpected blank line"),
            Self::MalformedRecord {
                line,
                expected,
                found,
            } => write!(f, "line {line}: expected {expected} fields, found {found}"),
            Self::InvalidNumber { line, source } => write!(f, "line {line}: {source}"),
            Self::NonFiniteNumber { line } => write!(f, "line {line}: non-finite value"),
            Self::InconsistentCount { declared, actual } => write!(
                f,
                "declared particle count {declared} does not match {actual} records"
            ),
            Self::IO(err) => write!(f, "{err}"),
        }
    }
}

impl error::Error for ParsingError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::InvalidNumber { source, .. } => Some(source),
            Self::IO(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ParsingError {
    fn from(err: io::Error) -> Self {
        Self::IO(err)
    }
}

pub type ParseResult<T> = Result<T, ParsingError>;

/// Non-blank lines of a text resource paired with their 1-based line numbers.
/// Blank lines are only accepted at the end of the input.
pub struct RecordLines<B> {
    lines: iter::Zip<RangeFrom<usize>, io::Lines<B>>,
    blank: Option<usize>,
}

impl<B: BufRead> RecordLines<B> {
    pub fn new(reader: B) -> Self {
        Self {
            lines: iter::zip(1.., reader.lines()),
            blank: None,
        }
    }
}

impl<B: BufRead> Iterator for RecordLines<B> {
    type Item = ParseResult<(usize, String)>;

    fn next(&mut self) -> Option<Self::Item> {
        for (line_number, line) in self.lines.by_ref() {
            let line = match line {
                Ok(line) => line,
                Err(err) => return Some(Err(err.into())),
            };
            if line.trim().is_empty() {
                self.blank.get_or_insert(line_number);
                continue;
            }
            if let Some(blank) = self.blank.take() {
                return Some(Err(ParsingError::BlankLine { line: blank }));
            }
            return Some(Ok((line_number, line)));
        }
        None
    }
}

pub fn parse_values<'a, const N: usize>(
    fields: impl Iterator<Item = &'a str>,
    line: usize,
) -> ParseResult<[f64; N]> {
    let fields = fields.collect::<Vec<_>>();
    if fields.len() != N {
        return Err(ParsingError::MalformedRecord {
            line,
            expected: N,
            found: fields.len(),
        });
    }
    let mut values = [0.0; N];
    for (value, field) in iter::zip(&mut values, fields) {
        *value = field
            .trim()
            .parse::<f64>()
            .map_err(|source| ParsingError::InvalidNumber { line, source })?;
        if !value.is_finite() {
            return Err(ParsingError::NonFiniteNumber { line });
        }
    }
    Ok(values)
}
