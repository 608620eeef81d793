pub mod addressing;
pub mod cpu;
pub mod instruction;
pub mod instruction_set;
pub mod memory;
pub mod registers;
pub mod status_register;
