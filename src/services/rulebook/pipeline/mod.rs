pub mod auto_fix;
pub mod collector;
pub mod corrector;
pub mod resolver;
pub mod row_pipeline;
pub mod semantic;
pub mod validation;
