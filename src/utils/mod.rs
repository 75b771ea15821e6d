pub mod body_rules;
pub mod input;
pub mod labels;
pub mod placeholders;
pub mod redact;
pub mod suggest;
pub mod text;
