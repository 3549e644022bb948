use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GpsDecodeError {
    #[error("Zero denominator in {tag} rational")]
    ZeroDenominator { tag: &'static str },

    #[error("Unexpected value type for {tag}")]
    UnexpectedType { tag: &'static str },

    #[error("Unrecognized hemisphere reference {value:?} in {tag}")]
    InvalidHemisphere { tag: &'static str, value: String },

    #[error("{tag} is not valid UTF-8")]
    InvalidText { tag: &'static str },
}
