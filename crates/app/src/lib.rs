pub mod app_loop;
pub mod seed;
