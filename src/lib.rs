pub mod error;
pub mod fetch;
pub mod layout;
pub mod lookup;
pub mod region;
pub mod render_svg;
pub mod report;
pub mod tracks;
pub mod transcript;

pub use error::ExonMapError;
pub use region::{Region, Strand};
