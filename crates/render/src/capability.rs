use serde::Serialize;
use std::panic::{self, AssertUnwindSafe};

/// What the probe found when rendering is available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterSummary {
    pub name: String,
    pub backend: String,
    pub device_type: String,
}

impl std::fmt::Display for AdapterSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}, {})", self.name, self.backend, self.device_type)
    }
}

/// Result of a capability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability {
    Supported(AdapterSummary),
    Unsupported { reason: String },
}

impl Capability {
    pub fn unsupported(reason: impl Into<String>) -> Self {
        Capability::Unsupported {
            reason: reason.into(),
        }
    }

    pub fn is_supported(&self) -> bool {
        matches!(self, Capability::Supported(_))
    }
}

/// Runtime check for hardware 3D rendering.
///
/// Implementations must not panic or fail; wrap fallible work in
/// [`guarded_probe`].
pub trait CapabilityProbe {
    fn probe(&self) -> Capability;
}

impl<F> CapabilityProbe for F
where
    F: Fn() -> Capability,
{
    fn probe(&self) -> Capability {
        self()
    }
}

/// Run a fallible probe body, turning an error or a panic into
/// [`Capability::Unsupported`].
pub fn guarded_probe<F, E>(body: F) -> Capability
where
    F: FnOnce() -> Result<AdapterSummary, E>,
    E: std::fmt::Display,
{
    match panic::catch_unwind(AssertUnwindSafe(body)) {
        Ok(Ok(adapter)) => Capability::Supported(adapter),
        Ok(Err(e)) => Capability::unsupported(e.to_string()),
        Err(payload) => {
            let message = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            Capability::unsupported(format!("probe panicked: {message}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adapter() -> AdapterSummary {
        AdapterSummary {
            name: "test adapter".into(),
            backend: "vulkan".into(),
            device_type: "DiscreteGpu".into(),
        }
    }

    #[test]
    fn ok_body_is_supported() {
        let cap = guarded_probe(|| Ok::<_, String>(adapter()));
        assert!(cap.is_supported());
        assert_eq!(cap, Capability::Supported(adapter()));
    }

    #[test]
    fn error_body_is_unsupported() {
        let cap = guarded_probe(|| Err::<AdapterSummary, _>("no adapter"));
        assert_eq!(cap, Capability::unsupported("no adapter"));
        assert!(!cap.is_supported());
    }

    #[test]
    fn panicking_body_is_unsupported() {
        let cap = guarded_probe(|| -> Result<AdapterSummary, String> {
            panic!("driver exploded");
        });
        match cap {
            Capability::Unsupported { reason } => assert!(reason.contains("driver exploded")),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn closures_are_probes() {
        let probe = || Capability::unsupported("headless");
        assert!(!probe.probe().is_supported());
    }

    #[test]
    fn adapter_display() {
        assert_eq!(adapter().to_string(), "test adapter (vulkan, DiscreteGpu)");
    }
}
