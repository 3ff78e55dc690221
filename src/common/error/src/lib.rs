mod error;

pub use error::{TablecatError, TablecatResult};
