pub mod banner;
pub mod header;

pub use banner::{Banner, Notice};
pub use header::Header;
