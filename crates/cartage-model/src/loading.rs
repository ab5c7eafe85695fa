// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Problem instance loader for the transportation domain.
//!
//! Turns whitespace-delimited text streams into a validated `Problem`.
//! The expected token order is:
//!
//! ```raw
//! m n            # number of origins, number of destinations
//! s_1 ... s_m    # supply per origin
//! d_1 ... d_n    # demand per destination
//! c_1_1 ... c_1_n
//! ...
//! c_m_1 ... c_m_n
//! ```
//!
//! Lines may contain comments introduced by `#`, which are ignored during
//! tokenization. The parser accepts any `BufRead`, file path, raw reader,
//! or string slice. Numeric validation (shape, non-negativity) is
//! delegated to `Problem::new`; this layer only reads and parses tokens,
//! so a malformed number surfaces as a `Parse` error with the offending
//! token attached.

use crate::problem::{Problem, ProblemError};
use cartage_core::num::constants::Tolerance;
use num_traits::Float;
use std::{
    collections::VecDeque,
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
    str::FromStr,
};

/// The error type for the instance loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended before all expected tokens were read.
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// The parsed instance failed model validation.
    Problem(ProblemError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "f64").
    pub type_name: &'static str,
}

impl std::fmt::Display for ParseTokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Could not parse token '{}' as type {}",
            self.token, self.type_name
        )
    }
}

impl std::error::Error for ParseTokenError {}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Problem(e) => write!(f, "Invalid instance: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ParseTokenError> for ProblemLoaderError {
    fn from(e: ParseTokenError) -> Self {
        Self::Parse(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

/// A configurable loader for transportation problem instances.
///
/// # Configuration
///
/// * `require_balanced`: If true, the loader rejects instances whose supply
///   and demand totals differ, instead of leaving the balancing decision to
///   the solve configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemLoader {
    require_balanced: bool,
}

impl ProblemLoader {
    /// Creates a new `ProblemLoader` with default settings.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures whether imbalanced instances are rejected at load time.
    #[inline]
    pub fn require_balanced(mut self, yes: bool) -> Self {
        self.require_balanced = yes;
        self
    }

    /// Loads a problem from a type implementing `BufRead`.
    pub fn from_bufread<T, R>(&self, rdr: R) -> Result<Problem<T>, ProblemLoaderError>
    where
        T: Float + Tolerance + FromStr,
        R: BufRead,
    {
        let mut sc = Scanner::new(rdr);

        let m: usize = sc.next()?;
        let n: usize = sc.next()?;

        let mut supply = Vec::with_capacity(m);
        for _ in 0..m {
            supply.push(sc.next::<T>()?);
        }

        let mut demand = Vec::with_capacity(n);
        for _ in 0..n {
            demand.push(sc.next::<T>()?);
        }

        let mut cost_rows = Vec::with_capacity(m);
        for _ in 0..m {
            let mut row = Vec::with_capacity(n);
            for _ in 0..n {
                row.push(sc.next::<T>()?);
            }
            cost_rows.push(row);
        }

        let problem = Problem::new(cost_rows, supply, demand)?;

        if self.require_balanced && !problem.is_balanced() {
            return Err(ProblemLoaderError::Problem(ProblemError::Imbalanced {
                total_supply: problem.total_supply().to_f64().unwrap_or(f64::NAN),
                total_demand: problem.total_demand().to_f64().unwrap_or(f64::NAN),
            }));
        }

        Ok(problem)
    }

    /// Loads a problem from a file path.
    #[inline]
    pub fn from_path<T, P>(&self, path: P) -> Result<Problem<T>, ProblemLoaderError>
    where
        T: Float + Tolerance + FromStr,
        P: AsRef<Path>,
    {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<T, R>(&self, r: R) -> Result<Problem<T>, ProblemLoaderError>
    where
        T: Float + Tolerance + FromStr,
        R: Read,
    {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    pub fn from_str<T>(&self, s: &str) -> Result<Problem<T>, ProblemLoaderError>
    where
        T: Float + Tolerance + FromStr,
    {
        self.from_reader(s.as_bytes())
    }
}

/// A helper that reads whitespace-delimited tokens from a generic reader,
/// skipping `#` comments.
struct Scanner<R> {
    rdr: R,
    tokens: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            tokens: VecDeque::new(),
        }
    }

    /// Reads the next token and parses it into `T`.
    fn next<T>(&mut self) -> Result<T, ProblemLoaderError>
    where
        T: FromStr,
    {
        loop {
            if let Some(token) = self.tokens.pop_front() {
                return token.parse::<T>().map_err(|_| {
                    ProblemLoaderError::Parse(ParseTokenError {
                        token,
                        type_name: std::any::type_name::<T>(),
                    })
                });
            }

            let mut line = String::new();
            let read = self.rdr.read_line(&mut line).map_err(ProblemLoaderError::Io)?;
            if read == 0 {
                return Err(ProblemLoaderError::UnexpectedEof);
            }

            let content = match line.find('#') {
                Some(pos) => &line[..pos],
                None => &line[..],
            };
            self.tokens
                .extend(content.split_whitespace().map(str::to_owned));
        }
    }
}
