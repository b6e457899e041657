use thiserror::Error;

use crate::observations::mpc_80col_reader::DecodeError;

#[derive(Error, Debug)]
pub enum Mpc80Error {
    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Error during the 80 column record decoding: {0}")]
    Decode(#[from] DecodeError),

    #[error("Obscode data unreadable")]
    ObscodeUnreadable,

    #[error("Obscode file {path}: {message}")]
    ObscodeFile { path: String, message: String },

    #[error("Invalid parallax constant: {0}")]
    InvalidParallax(String),

    #[error("Invalid tracklet parameter: {0}")]
    InvalidTrackletParameter(String),

    #[error("Arc producer task failed: {0}")]
    PipelineJoin(String),
}

impl PartialEq for Mpc80Error {
    fn eq(&self, other: &Self) -> bool {
        use Mpc80Error::*;
        match (self, other) {
            // io errors are not comparable: same variant is enough
            (IoError(_), IoError(_)) => true,
            (Decode(a), Decode(b)) => a == b,
            (ObscodeUnreadable, ObscodeUnreadable) => true,
            (
                ObscodeFile {
                    path: p1,
                    message: m1,
                },
                ObscodeFile {
                    path: p2,
                    message: m2,
                },
            ) => p1 == p2 && m1 == m2,
            (InvalidParallax(a), InvalidParallax(b)) => a == b,
            (InvalidTrackletParameter(a), InvalidTrackletParameter(b)) => a == b,
            (PipelineJoin(a), PipelineJoin(b)) => a == b,
            _ => false,
        }
    }
}
