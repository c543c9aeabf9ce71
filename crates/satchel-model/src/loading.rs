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

//! Problem instance loader for the unbounded knapsack domain.
//!
//! Instances are whitespace-separated token streams describing a linear
//! program with a single `<=` constraint and a maximization objective:
//!
//! ```raw
//! objects 4                              (label, number of objects)
//! constraints 1                          (label, number of constraints; must be 1)
//! max                                    (objective direction; must be "max")
//! + 15 x1 + 12 x2 + 2 x3 + 8 x4          (sign, value, variable name) per object
//! + 5 x1 + 3 x2 + 2 x3 + 4 x4            (sign, volume, variable name) per object
//! <= 14                                  (relation; must be "<="), capacity
//! ```
//!
//! Line breaks carry no meaning and `#` starts a comment running to the end of
//! the line. The label and variable-name tokens are read but not interpreted.
//!
//! The loader rejects, with a dedicated error kind, everything the solver
//! cannot handle: more than one constraint, a minimization objective, and
//! negative coefficients. The final `Model` is validated by `Model::new`.

use crate::{
    index::ObjectIndex,
    model::{Model, ModelError},
};
use satchel_core::num::SolverNumeric;
use std::{
    collections::VecDeque,
    fmt::Display,
    fs::File,
    io::{BufRead, BufReader, Read},
    marker::PhantomData,
    path::Path,
    str::FromStr,
};

/// Upper bound on the row reservation; the declared object count is untrusted.
const MAX_PREALLOCATED_OBJECTS: usize = 1024;

/// The error type for the problem loading process.
#[derive(Debug)]
pub enum ProblemLoaderError {
    /// An I/O error occurred while reading the input stream.
    Io(std::io::Error),
    /// The input stream ended unexpectedly (e.g., missing tokens).
    UnexpectedEof,
    /// A token could not be parsed into the expected numeric type.
    Parse(ParseTokenError),
    /// A token did not match the keyword or symbol the format requires.
    Format(FormatError),
    /// The instance declares a number of constraints other than one.
    MultiConstraint(usize),
    /// A value or volume coefficient carries a negative sign.
    NegativeValue(NegativeValueError),
    /// The coefficients were read but do not form a valid model.
    Model(ModelError),
}

/// Details about a failed token parsing attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTokenError {
    /// The string token that failed to parse.
    pub token: String,
    /// The name of the type we tried to parse into (e.g., "i64").
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

/// A structural token that was not what the format prescribes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    /// What the loader was looking for.
    pub expected: &'static str,
    /// The token actually found.
    pub found: String,
}

impl std::fmt::Display for FormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Expected {} but found '{}'", self.expected, self.found)
    }
}

impl std::error::Error for FormatError {}

/// Which coefficient row a term belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoefficientKind {
    /// A coefficient of the objective function.
    Value,
    /// A coefficient of the capacity constraint.
    Volume,
}

impl std::fmt::Display for CoefficientKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CoefficientKind::Value => write!(f, "value"),
            CoefficientKind::Volume => write!(f, "volume"),
        }
    }
}

/// A negative coefficient, which the unbounded knapsack model does not admit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NegativeValueError {
    /// The row the coefficient was found in.
    pub kind: CoefficientKind,
    /// The object the coefficient belongs to.
    pub object_index: ObjectIndex,
}

impl std::fmt::Display for NegativeValueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Negative {} for object {} is not supported",
            self.kind,
            self.object_index.get()
        )
    }
}

impl std::error::Error for NegativeValueError {}

impl Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::UnexpectedEof => write!(f, "Unexpected end of file while parsing instance"),
            Self::Parse(e) => write!(f, "Parse error: {}", e),
            Self::Format(e) => write!(f, "Format error: {}", e),
            Self::MultiConstraint(n) => write!(
                f,
                "The knapsack admits exactly one constraint, but the instance declares {}",
                n
            ),
            Self::NegativeValue(e) => write!(f, "Negative coefficient: {}", e),
            Self::Model(e) => write!(f, "Invalid model: {}", e),
        }
    }
}

impl std::error::Error for ProblemLoaderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
            Self::Format(e) => Some(e),
            Self::NegativeValue(e) => Some(e),
            Self::Model(e) => Some(e),
            Self::UnexpectedEof | Self::MultiConstraint(_) => None,
        }
    }
}

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

impl From<FormatError> for ProblemLoaderError {
    fn from(e: FormatError) -> Self {
        Self::Format(e)
    }
}

impl From<NegativeValueError> for ProblemLoaderError {
    fn from(e: NegativeValueError) -> Self {
        Self::NegativeValue(e)
    }
}

impl From<ModelError> for ProblemLoaderError {
    fn from(e: ModelError) -> Self {
        Self::Model(e)
    }
}

/// A loader for knapsack problem instances.
///
/// # Examples
///
/// ```rust
/// # use satchel_model::loading::ProblemLoader;
///
/// let text = "objects 2 constraints 1 max\n+ 6 x1 + 10 x2\n+ 2 x1 + 3 x2\n<= 12\n";
/// let model = ProblemLoader::<i64>::new().from_str(text).unwrap();
/// assert_eq!(model.values(), &[6, 10]);
/// assert_eq!(model.volumes(), &[2, 3]);
/// assert_eq!(model.capacity(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProblemLoader<T> {
    _phantom: PhantomData<T>,
}

impl<T> Default for ProblemLoader<T> {
    fn default() -> Self {
        Self {
            _phantom: PhantomData,
        }
    }
}

impl<T> ProblemLoader<T>
where
    T: SolverNumeric + FromStr,
{
    /// Creates a new `ProblemLoader`.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a problem from a type implementing `BufRead`.
    pub fn from_bufread<R: BufRead>(&self, rdr: R) -> Result<Model<T>, ProblemLoaderError> {
        let mut sc = Scanner::new(rdr);

        // Header
        sc.next_token()?;
        let num_objects: usize = sc.next()?;
        sc.next_token()?;
        let num_constraints: usize = sc.next()?;
        if num_constraints != 1 {
            return Err(ProblemLoaderError::MultiConstraint(num_constraints));
        }
        sc.expect("the objective direction 'max'", "max")?;

        let values = Self::read_row(&mut sc, num_objects, CoefficientKind::Value)?;
        let volumes = Self::read_row(&mut sc, num_objects, CoefficientKind::Volume)?;

        sc.expect("the relation '<='", "<=")?;
        let capacity: T = sc.next()?;

        Ok(Model::new(capacity, values, volumes)?)
    }

    /// Loads a problem from a file path.
    #[inline]
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<Model<T>, ProblemLoaderError> {
        let file = File::open(path)?;
        self.from_bufread(BufReader::new(file))
    }

    /// Loads a problem from a generic reader.
    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Model<T>, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    /// Loads a problem from a string slice.
    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Model<T>, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }

    /// Reads `n` terms of the form `sign coefficient name`.
    fn read_row<R: BufRead>(
        sc: &mut Scanner<R>,
        n: usize,
        kind: CoefficientKind,
    ) -> Result<Vec<T>, ProblemLoaderError> {
        let mut row = Vec::with_capacity(n.min(MAX_PREALLOCATED_OBJECTS));
        for i in 0..n {
            let sign = sc.next_token()?;
            match sign.as_str() {
                "+" => {}
                "-" => {
                    return Err(NegativeValueError {
                        kind,
                        object_index: ObjectIndex::new(i),
                    }
                    .into())
                }
                _ => {
                    return Err(FormatError {
                        expected: "a sign '+' or '-'",
                        found: sign,
                    }
                    .into())
                }
            }

            let coefficient: T = sc.next()?;
            if coefficient < T::zero() {
                // "+ -3 x1" is as negative as "- 3 x1".
                return Err(NegativeValueError {
                    kind,
                    object_index: ObjectIndex::new(i),
                }
                .into());
            }
            row.push(coefficient);

            // Variable name
            sc.next_token()?;
        }
        Ok(row)
    }
}

/// Reads whitespace-delimited tokens from a generic reader, one line at a time.
struct Scanner<R> {
    rdr: R,
    line: String,
    pending: VecDeque<String>,
}

impl<R: BufRead> Scanner<R> {
    /// Creates a new `Scanner` wrapping the given reader.
    #[inline]
    fn new(rdr: R) -> Self {
        Self {
            rdr,
            line: String::new(),
            pending: VecDeque::new(),
        }
    }

    /// Returns the next raw token, skipping whitespace and `#` comments.
    fn next_token(&mut self) -> Result<String, ProblemLoaderError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.rdr.read_line(&mut self.line)? == 0 {
                return Err(ProblemLoaderError::UnexpectedEof);
            }
            let content = match self.line.find('#') {
                Some(comment_start) => &self.line[..comment_start],
                None => self.line.as_str(),
            };
            self.pending
                .extend(content.split_whitespace().map(str::to_owned));
        }

        self.pending
            .pop_front()
            .ok_or(ProblemLoaderError::UnexpectedEof)
    }

    /// Reads the next token and parses it into `U`.
    fn next<U>(&mut self) -> Result<U, ProblemLoaderError>
    where
        U: FromStr,
    {
        let token = self.next_token()?;
        token.parse::<U>().map_err(|_| {
            ProblemLoaderError::Parse(ParseTokenError {
                token,
                type_name: std::any::type_name::<U>(),
            })
        })
    }

    /// Consumes the next token and checks that it equals `keyword`.
    fn expect(&mut self, expected: &'static str, keyword: &str) -> Result<(), ProblemLoaderError> {
        let token = self.next_token()?;
        if token == keyword {
            Ok(())
        } else {
            Err(FormatError {
                expected,
                found: token,
            }
            .into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    type IntegerType = i64;

    const EXAMPLE: &str = "\
# Maximize 15 x1 + 12 x2 + 2 x3 + 8 x4
# subject to 5 x1 + 3 x2 + 2 x3 + 4 x4 <= 14
objects 4
constraints 1
max
+ 15 x1 + 12 x2 + 2 x3 + 8 x4
+ 5 x1 + 3 x2 + 2 x3 + 4 x4
<= 14
";

    fn load(s: &str) -> Result<Model<IntegerType>, ProblemLoaderError> {
        ProblemLoader::<IntegerType>::new().from_str(s)
    }

    #[test]
    fn test_load_example_instance() {
        let model = load(EXAMPLE).expect("example should load");
        assert_eq!(model.num_objects(), 4);
        assert_eq!(model.capacity(), 14);
        assert_eq!(model.values(), &[15, 12, 2, 8]);
        assert_eq!(model.volumes(), &[5, 3, 2, 4]);
    }

    #[test]
    fn test_tokens_may_span_lines_and_carry_trailing_comments() {
        let text = "objects\n1 # one object\nconstraints 1\nmax + 10\nx1 + 3 x1 <=\n10";
        let model = load(text).unwrap();
        assert_eq!(model.values(), &[10]);
        assert_eq!(model.volumes(), &[3]);
        assert_eq!(model.capacity(), 10);
    }

    #[test]
    fn test_rejects_more_than_one_constraint() {
        let text = "objects 1 constraints 2 max + 1 x1 + 1 x1 <= 1";
        assert!(matches!(
            load(text),
            Err(ProblemLoaderError::MultiConstraint(2))
        ));
    }

    #[test]
    fn test_rejects_minimization() {
        let text = "objects 1 constraints 1 min + 1 x1 + 1 x1 <= 1";
        match load(text) {
            Err(ProblemLoaderError::Format(e)) => assert_eq!(e.found, "min"),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_value() {
        let text = "objects 2 constraints 1 max + 1 x1 - 4 x2 + 1 x1 + 1 x2 <= 1";
        match load(text) {
            Err(ProblemLoaderError::NegativeValue(e)) => {
                assert_eq!(e.kind, CoefficientKind::Value);
                assert_eq!(e.object_index, ObjectIndex::new(1));
            }
            other => panic!("expected a negative value error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_negative_volume_written_as_signed_number() {
        let text = "objects 1 constraints 1 max + 1 x1 + -3 x1 <= 1";
        match load(text) {
            Err(ProblemLoaderError::NegativeValue(e)) => {
                assert_eq!(e.kind, CoefficientKind::Volume);
                assert_eq!(e.object_index, ObjectIndex::new(0));
            }
            other => panic!("expected a negative value error, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_wrong_relation() {
        let text = "objects 1 constraints 1 max + 1 x1 + 1 x1 >= 1";
        assert!(matches!(load(text), Err(ProblemLoaderError::Format(_))));
    }

    #[test]
    fn test_rejects_garbage_sign() {
        let text = "objects 1 constraints 1 max * 1 x1 + 1 x1 <= 1";
        match load(text) {
            Err(ProblemLoaderError::Format(e)) => assert_eq!(e.found, "*"),
            other => panic!("expected a format error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_error_reports_token() {
        let text = "objects four constraints 1 max";
        match load(text) {
            Err(ProblemLoaderError::Parse(e)) => {
                assert_eq!(e.token, "four");
                assert_eq!(e.type_name, "usize");
            }
            other => panic!("expected a parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_eof() {
        let text = "objects 2 constraints 1 max + 1 x1";
        assert!(matches!(load(text), Err(ProblemLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_rejects_absurd_object_count() {
        let text = "objects 18446744073709551615 constraints 1 max + 1 x1";
        assert!(matches!(load(text), Err(ProblemLoaderError::UnexpectedEof)));
    }

    #[test]
    fn test_model_validation_is_forwarded() {
        let text = "objects 1 constraints 1 max + 0 x1 + 1 x1 <= 1";
        assert!(matches!(
            load(text),
            Err(ProblemLoaderError::Model(ModelError::NonPositiveValue(_)))
        ));

        let text = "objects 0 constraints 1 max <= 1";
        assert!(matches!(
            load(text),
            Err(ProblemLoaderError::Model(ModelError::NoObjects))
        ));
    }

    #[test]
    fn test_from_path_and_missing_file() {
        let mut path = std::env::temp_dir();
        path.push(format!("satchel-loader-test-{}.txt", std::process::id()));
        {
            let mut file = File::create(&path).unwrap();
            file.write_all(EXAMPLE.as_bytes()).unwrap();
        }
        let model = ProblemLoader::<i32>::new().from_path(&path).unwrap();
        assert_eq!(model.values(), &[15, 12, 2, 8]);
        std::fs::remove_file(&path).unwrap();

        assert!(matches!(
            ProblemLoader::<i32>::new().from_path(&path),
            Err(ProblemLoaderError::Io(_))
        ));
    }

    #[test]
    fn test_error_display() {
        let msg = format!("{}", ProblemLoaderError::MultiConstraint(3));
        assert!(msg.contains("exactly one constraint"));
        let msg = format!(
            "{}",
            ProblemLoaderError::NegativeValue(NegativeValueError {
                kind: CoefficientKind::Volume,
                object_index: ObjectIndex::new(2),
            })
        );
        assert!(msg.contains("Negative volume for object 2"));
    }
}
