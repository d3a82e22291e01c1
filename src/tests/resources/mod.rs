mod detail_tests;
mod node_tests;
mod vm_tests;
