#[allow(clippy::module_inception)]
pub mod startup;

pub use self::startup::Application;
