pub mod editing;
pub mod i18n;
pub mod selection;
pub mod tabular;
