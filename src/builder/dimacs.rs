/*!
Reading formulas written in the DIMACS CNF format.

- Lines beginning with `c` are comments, and are skipped.
- A problem line `p cnf <atoms> <clauses>` notes the expected counts, though the counts are not required to match the formula.
- Clauses are whitespace separated non-zero integers, each terminated by `0`, and may span lines.
- A line beginning with `%` ends the formula, as in some benchmark collections.

A final clause missing a terminating `0` is kept.

# Example

```rust
# use stream_sat::builder::dimacs::parse_dimacs;
let dimacs = "
c A comment
p cnf 3 3
 1  2 0
-1  2 0
-2
 3  0
";

let parsed = parse_dimacs(dimacs.as_bytes()).expect("a formula");
assert_eq!(parsed.expected, Some((3, 3)));
assert_eq!(parsed.clauses, vec![vec![1, 2], vec![-1, 2], vec![-2, 3]]);
```
*/

use std::io::BufRead;

use crate::{
    config::Config,
    context::GenericContext,
    dispatch::{
        library::report::{self, Report},
        Dispatch, Dispatcher,
    },
    oracle::Oracle,
    structures::{clause::CClause, formula::Formula, literal::CLiteral},
    types::err::{self, ErrorKind},
};

/// The clauses of a DIMACS formula, as read.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParsedDimacs {
    /// The clauses, in the order read.
    pub clauses: Vec<CClause>,

    /// The atom and clause counts of the problem line, if present.
    pub expected: Option<(usize, usize)>,
}

/// Reads the clauses of a DIMACS formula from `reader`.
pub fn parse_dimacs(mut reader: impl BufRead) -> Result<ParsedDimacs, err::ParseError> {
    let mut parsed = ParsedDimacs::default();

    let mut buffer = String::with_capacity(1024);
    let mut clause_buffer: CClause = Vec::default();
    let mut line_counter = 0;

    'formula_loop: loop {
        buffer.clear();
        match reader.read_line(&mut buffer) {
            Ok(0) => break,
            Ok(_) => line_counter += 1,
            Err(_) => return Err(err::ParseError::Line(line_counter + 1)),
        }

        match buffer.trim_start().chars().next() {
            None | Some('c') => continue,

            Some('%') => break 'formula_loop,

            Some('p') => {
                parsed.expected = Some(problem_specification(&buffer, line_counter)?);
            }

            _ => {
                for item in buffer.split_whitespace() {
                    match item.parse::<CLiteral>() {
                        Ok(0) => parsed.clauses.push(std::mem::take(&mut clause_buffer)),

                        Ok(literal) if literal != CLiteral::MIN => clause_buffer.push(literal),

                        _ => {
                            return Err(err::ParseError::Token {
                                line: line_counter,
                                token: item.to_string(),
                            })
                        }
                    }
                }
            }
        }
    }

    if !clause_buffer.is_empty() {
        parsed.clauses.push(clause_buffer);
    }

    Ok(parsed)
}

/// The counts of a problem line.
fn problem_specification(line: &str, line_counter: usize) -> Result<(usize, usize), err::ParseError> {
    let mut problem_details = line.split_whitespace();

    if problem_details.next() != Some("p") || problem_details.next() != Some("cnf") {
        return Err(err::ParseError::ProblemSpecification(line_counter));
    }

    let mut count = || {
        problem_details
            .next()
            .and_then(|string| string.parse::<usize>().ok())
            .ok_or(err::ParseError::ProblemSpecification(line_counter))
    };

    let atom_count = count()?;
    let clause_count = count()?;
    Ok((atom_count, clause_count))
}

impl<O: Oracle> GenericContext<O> {
    /// Creates a context from a formula in DIMACS form read from `reader`.
    ///
    /// ```rust
    /// # use stream_sat::config::Config;
    /// # use stream_sat::context::Context;
    /// let dimacs = "p cnf 2 2\n 1 2 0\n-1 0\n";
    /// let the_context = Context::from_dimacs(Config::default(), dimacs.as_bytes(), None).expect("a context");
    /// assert!(the_context.root.contains(2));
    /// ```
    pub fn from_dimacs(
        config: Config,
        reader: impl BufRead,
        dispatcher: Option<Dispatcher>,
    ) -> Result<Self, ErrorKind> {
        let parsed = parse_dimacs(reader)?;

        if let (Some(dispatcher), Some((atoms, clauses))) = (&dispatcher, parsed.expected) {
            let expectation = report::Parser::Expected(atoms, clauses);
            dispatcher(Dispatch::Report(Report::Parser(expectation)));
        }

        let formula = Formula::from_clauses(parsed.clauses);

        if let Some(dispatcher) = &dispatcher {
            let counts = report::Parser::Counts(formula.atom_count(), formula.clauses().len());
            dispatcher(Dispatch::Report(Report::Parser(counts)));
        }

        Ok(Self::from_formula(config, formula, dispatcher))
    }
}
