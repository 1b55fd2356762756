pub mod actuator;
pub mod coordinator;
pub mod dispatcher;
pub mod input;
pub mod mock;
pub mod safety;
pub mod text_input;
