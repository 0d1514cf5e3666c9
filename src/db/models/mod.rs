mod assessment;
mod progress;
mod training;
mod user;

pub use assessment::*;
pub use progress::*;
pub use training::*;
pub use user::*;
