pub mod aggregator;
pub mod backup;
pub mod calculator;
pub mod clock;
pub mod config;
pub mod edit;
pub mod import;
pub mod log;
pub mod register;
pub mod report;
pub mod roster;
pub mod vacation;
pub mod validator;
