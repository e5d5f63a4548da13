mod atomic;
#[cfg(all(test, feature = "std"))]
mod tests;

pub use atomic::*;
