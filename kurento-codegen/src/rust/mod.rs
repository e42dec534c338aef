//! Rust code generation modules.

pub mod classes;
pub mod complex_types;
pub mod types;

pub use classes::ClassGenerator;
pub use complex_types::ComplexTypeGenerator;
pub use types::TypeMapper;
