mod provider;
pub use provider::*;

mod transports;
pub use transports::*;
