pub mod class;
pub mod color;
pub mod descriptor;
pub mod error;
pub mod marker;
pub mod record;
pub mod shared;
pub mod value;
