pub use board::*;
pub use coord::*;
pub use errors::*;
pub use marks::*;
pub use rules::*;
pub use selector::*;
pub use visualization::*;

#[cfg(test)]
mod arbitrary;
mod bitset;
mod board;
mod coord;
mod errors;
mod marks;
mod rules;
mod selector;
mod visualization;
