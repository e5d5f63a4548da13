mod codec;
#[cfg(feature = "serde")]
mod with_serde;

pub use codec::*;
#[cfg_attr(docsrs, doc(cfg(feature = "serde")))]
#[cfg(feature = "serde")]
pub use with_serde::*;
