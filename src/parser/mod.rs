pub mod cases;
pub mod opinions;
pub mod query;
pub mod text;

pub use cases::parse_cases;
pub use opinions::parse_opinions;
