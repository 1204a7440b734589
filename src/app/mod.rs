mod export;
mod progress;
mod runner;
mod summary;


pub(crate) use runner::run_session;
