pub mod completions;
pub mod managers;
pub mod outdated;
pub mod upgrade;
