pub mod cursor;
pub mod error;
pub mod heading;
pub mod table;

pub use cursor::LineCursor;
pub use error::ParseError;
pub use heading::Heading;
pub use table::{Row, Table};
