use thiserror::Error as DError;

#[derive(Debug, Clone, DError)]
pub enum ErrorKind {
    #[error("Cannot fit a model on an empty training set")]
    EmptyTrainingSet,

    #[error("Degenerate training set: {rows} rating(s) for {factors} factors")]
    DegenerateTrainingSet { rows: usize, factors: usize },

    #[error("Score {0} is not a finite number")]
    InvalidScore(f64),

    #[error("Score {score} is outside the valid range [{min}, {max}]")]
    ScoreOutOfRange { score: f64, min: f64, max: f64 },

    #[error("Test fraction {0} must be within [0, 1)")]
    InvalidTestFraction(f64),
}
