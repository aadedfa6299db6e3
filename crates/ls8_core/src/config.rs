use typed_builder::TypedBuilder;

use crate::STACK_START;

/// Start-up options for a [`Machine`](crate::Machine).
#[derive(Clone, Copy, Debug, PartialEq, Eq, TypedBuilder)]
pub struct MachineConfig {
    /// Initial value of `R7`.
    #[builder(default = STACK_START)]
    pub stack_pointer: u8,
    /// Log a trace line before every instruction.
    #[builder(default = false)]
    pub trace: bool,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}
