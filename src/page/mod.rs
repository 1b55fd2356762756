pub mod dom;
pub mod locator;
pub mod scripts;
pub mod traits;
