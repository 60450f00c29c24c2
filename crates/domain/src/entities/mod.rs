pub mod film;
pub mod genre;
pub mod rating;
pub mod relation;
pub mod user;

pub use film::*;
pub use genre::*;
pub use rating::*;
pub use relation::*;
pub use user::*;
