mod scope;
mod value;

pub use scope::Scope;
pub use value::Value;
