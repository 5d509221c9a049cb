mod boards;
mod endpoints;
mod features;
mod generate_config;
mod resolve;
mod sites;
mod thumbnail;

pub use boards::*;
pub use endpoints::*;
pub use features::*;
pub use generate_config::*;
pub use resolve::*;
pub use sites::*;
pub use thumbnail::*;
