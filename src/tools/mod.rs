pub mod refresh;
pub mod search;
pub mod set_corpus;

pub use refresh::*;
pub use search::*;
pub use set_corpus::*;
