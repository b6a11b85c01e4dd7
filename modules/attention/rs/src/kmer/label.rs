use derive_more::Display;

use crate::error::Error;

/// External stability classification of a k-mer.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Display)]
#[repr(u8)]
pub enum Label {
    #[display("unstable")]
    Unstable = 0,
    #[display("stable")]
    Stable = 1,
}

impl TryFrom<u8> for Label {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Label::Unstable),
            1 => Ok(Label::Stable),
            _ => Err(Error::InvalidLabel { value }),
        }
    }
}

impl From<Label> for u8 {
    fn from(label: Label) -> Self {
        label as u8
    }
}
