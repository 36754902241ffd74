//! Command implementations

mod init;
mod run;

pub use init::init;
pub use run::run;
