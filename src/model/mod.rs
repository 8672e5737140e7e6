pub mod issue;
pub mod size;
pub mod sprint;
pub mod task_kind;
pub mod update;
