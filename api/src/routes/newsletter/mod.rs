mod subscribe;
mod subscribers;
mod unsubscribe;

pub use subscribe::*;
pub use subscribers::subscribers;
pub use unsubscribe::*;
