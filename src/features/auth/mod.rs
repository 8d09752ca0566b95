mod policy;
mod validator;

pub mod model;

pub use policy::PrivilegePolicy;
pub use validator::JwtValidator;
