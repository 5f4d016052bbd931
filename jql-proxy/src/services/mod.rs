pub mod providers;
pub mod translator;

pub use translator::JqlTranslator;
