mod probe_session;

pub use probe_session::ProbeSession;
