use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ParseError {
    #[error(transparent)]
    Pattern(#[from] regex::Error),
    #[error("line {line}: expected format [Valve AA], got: {text}")]
    MissingValve { line: usize, text: String },
    #[error("line {line}: expected format [rate=5], got: {text}")]
    MissingRate { line: usize, text: String },
    #[error("line {line}: expected format [valves AA, BB], got: {text}")]
    MissingTunnels { line: usize, text: String },
    #[error("line {line}: flow rate {rate} is out of range")]
    InvalidRate { line: usize, rate: String },
    #[error("line {line}: valve {label} was already described on line {first}")]
    DuplicateValve {
        line: usize,
        first: usize,
        label: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SolveError {
    #[error("search cancelled after exceeding its deadline")]
    Cancelled,
    #[error("{count} valves have a positive flow rate, at most {max} are supported")]
    TooManyValves { count: usize, max: usize },
}
