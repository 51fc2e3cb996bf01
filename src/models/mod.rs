mod content;
mod dashboard;

pub use content::*;
pub use dashboard::*;
