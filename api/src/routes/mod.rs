mod health_check;
mod home;
mod newsletter;

pub use health_check::health_check;
pub use home::home;
pub use newsletter::*;
