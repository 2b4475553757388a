pub mod lifecycle;
pub mod mongo_driver;
