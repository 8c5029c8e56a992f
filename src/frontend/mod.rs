pub mod conversion;
pub mod elaborate;
pub mod evaluate;
pub mod parse;
pub mod unevaluate;
pub mod unparse;
