mod logging;

pub use logging::LoggingHandler;
