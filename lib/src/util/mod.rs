mod fs;
mod urls;

pub use self::fs::*;
pub use self::urls::*;
