#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("max level must be within 1..={max}, got {got}")]
    InvalidMaxLevel { got: usize, max: usize },

    #[error("promotion probability must be within (0, 1), got {0}")]
    InvalidProbability(f64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
