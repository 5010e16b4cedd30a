pub mod emi;
pub mod setup;
pub mod sip;
pub mod snapshot;
pub mod ui;
