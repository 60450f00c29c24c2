pub mod films;
pub mod reference;
pub mod users;
