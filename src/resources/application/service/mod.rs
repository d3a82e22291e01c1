pub mod detail_service;
pub mod machine_service;
pub mod node_service;
