use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Playing position attached to a roster item.
///
/// Serializes as the capitalized variant name, matching what the remote
/// collection stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
pub enum Position {
    Forward,
    Midfielder,
    Defender,
    Goalkeeper,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Position::Forward => "Forward",
            Position::Midfielder => "Midfielder",
            Position::Defender => "Defender",
            Position::Goalkeeper => "Goalkeeper",
        };
        write!(f, "{}", name)
    }
}
