mod bar;
mod interval;
mod symbols;

pub use bar::Bar;
pub use interval::Interval;
pub use symbols::{SymbolGroup, POPULAR_SYMBOLS};
