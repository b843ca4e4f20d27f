pub mod caps;
pub mod run;
pub mod validate;
