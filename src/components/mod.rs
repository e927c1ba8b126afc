pub mod node_map;
