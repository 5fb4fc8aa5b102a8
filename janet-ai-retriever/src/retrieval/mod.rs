pub mod analyzer;
pub mod chunking_strategy;
pub mod directory_watcher;
pub mod enhanced_index;
pub mod file_index;
pub mod indexing_engine;
pub mod indexing_mode;
pub mod task_queue;
