use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The three progressive brackets layered on top of bundskat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketKind {
    /// Mellemskat.
    Middle,
    /// Topskat.
    Top,
    /// Toptopskat.
    TopTop,
}

impl BracketKind {
    pub const ALL: [BracketKind; 3] = [Self::Middle, Self::Top, Self::TopTop];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Middle => "Mellemskat",
            Self::Top => "Topskat",
            Self::TopTop => "Toptopskat",
        }
    }
}

/// A progressive bracket: `rate` applies to personal income after AM above
/// `threshold`.
///
/// Brackets do not subtract each other. Income above the top threshold pays
/// all three rates, each measured from its own threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressiveBracket {
    pub kind: BracketKind,
    pub threshold: Decimal,
    pub rate: Decimal,
}
