pub mod completion;
pub mod memory_store;
pub mod supabase;
pub mod table_store;
