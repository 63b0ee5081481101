pub mod departments;
pub mod graduates;
pub mod tracer;
pub mod users;
