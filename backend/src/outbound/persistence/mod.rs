//! Persistence adapters implementing the record store port.

mod memory;

pub use memory::MemoryUserRepository;
