pub mod container;
pub mod controller;
pub mod router;
pub mod shell;

pub use container::{Container, ContainerConfig};
pub use router::Router;
pub use shell::Shell;
