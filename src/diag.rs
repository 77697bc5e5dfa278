/// Diagnostic sink injected into the engine.
///
/// The engine never prints or panics on degraded conditions; everything it
/// wants to say goes through this trait so hosts can route it wherever they
/// like.
pub trait DiagnosticSink {
    fn debug(&self, msg: &str);
    fn warn(&self, msg: &str);
    fn error(&self, msg: &str);
}

/// Forwards to the `log` facade under the `voctrain` target.
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn debug(&self, msg: &str) {
        log::debug!(target: "voctrain", "{msg}");
    }

    fn warn(&self, msg: &str) {
        log::warn!(target: "voctrain", "{msg}");
    }

    fn error(&self, msg: &str) {
        log::error!(target: "voctrain", "{msg}");
    }
}

/// Discards everything.
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn debug(&self, _msg: &str) {}
    fn warn(&self, _msg: &str) {}
    fn error(&self, _msg: &str) {}
}
