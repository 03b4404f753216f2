use std::sync::Arc;

/// Receives child process output one line at a time, in emission order.
pub trait ProcessLogger: Send + Sync {
    fn on_line(&self, line: &str);
}

pub type SharedLogger = Arc<dyn ProcessLogger>;

impl<F> ProcessLogger for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_line(&self, line: &str) {
        self(line)
    }
}
