pub mod generation_lock;
