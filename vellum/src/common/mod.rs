mod constants;
mod lock;
mod sort_order;
pub(crate) mod util;

pub use constants::*;
pub use lock::*;
pub use sort_order::*;
pub use util::*;
