pub mod score;

pub use score::{ScoreClient, ScoreClientError};
