mod interface;
#[cfg(feature = "std")]
mod system;
mod tick;

pub use interface::*;
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
#[cfg(feature = "std")]
pub use system::*;
pub use tick::*;
