pub mod deregister;
pub mod register;
pub mod report;
pub mod seed;
pub mod version;
