//! Infrastructure Layer
//!
//! Adapters (implementations) for the ports defined in the application
//! layer. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**
//!   - `persistence/`: Store adapters (in-memory, Turso)
//!   - `signals/`: Signal source adapters
//!
//! - **Driver Adapters (Inbound)**
//!   - `http/`: REST API controllers
//!   - `scheduler`: Periodic probability updates

pub mod http;
pub mod persistence;
pub mod scheduler;
pub mod signals;
