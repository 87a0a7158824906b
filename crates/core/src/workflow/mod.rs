pub mod gesture_workflow;
pub mod presenter;
pub mod sample_trainer;
pub mod session_initializer;
pub mod workflow_state;
