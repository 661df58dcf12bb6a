pub mod config;
pub mod render_loop;
