/// CPU configuration options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuSettings {
    /// What the CPU does when it fetches a byte with no entry in the
    /// instruction set
    pub undefined_opcode: UndefinedOpcodePolicy,

    /// Stack pointer value loaded on every reset
    pub reset_stack_pointer: u8,
}

pub const DEFAULT_UNDEFINED_OPCODE_POLICY: UndefinedOpcodePolicy = UndefinedOpcodePolicy::Halt;
pub const DEFAULT_RESET_STACK_POINTER: u8 = 0x00;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UndefinedOpcodePolicy {
    /// Refuse to execute: `step` reports the opcode and leaves the CPU
    /// untouched, pointing at the offending byte
    Halt,

    /// Treat the byte as a single byte, two cycle NOP and keep going
    Skip,
}

impl Default for CpuSettings {
    fn default() -> Self {
        Self {
            undefined_opcode: DEFAULT_UNDEFINED_OPCODE_POLICY,
            reset_stack_pointer: DEFAULT_RESET_STACK_POINTER,
        }
    }
}
