mod domain;
mod projector;
mod validator;

pub use domain::*;
pub use projector::*;
pub use validator::*;
