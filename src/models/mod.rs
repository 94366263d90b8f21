pub mod clock;
pub mod status;
pub mod structure;
pub mod vacation;
pub mod worker;
